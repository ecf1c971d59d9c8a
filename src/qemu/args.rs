// file: src/qemu/args.rs
// version: 1.0.0
// guid: 5c04a40e-044a-4604-9790-6adff8080852

//! QEMU command line assembly

use super::disk::BootDisk;
use std::path::Path;

/// Inputs for one qemu invocation
#[derive(Debug, Clone)]
pub struct QemuArgs<'a> {
    pub machine_args: &'a [String],
    pub code: &'a Path,
    pub vars: &'a Path,
    pub boot: &'a BootDisk,
    pub shell: Option<&'a Path>,
    pub extra: &'a [String],
}

fn pflash(unit: u8, file: &Path, readonly: bool) -> [String; 2] {
    let mut drive = format!("if=pflash,format=raw,unit={},file={}", unit, file.display());
    if readonly {
        drive.push_str(",readonly=on");
    }
    ["-drive".to_string(), drive]
}

impl QemuArgs<'_> {
    /// Render the argument list
    ///
    /// Order: machine selection, firmware, boot disk, shell ISO, `-net none`,
    /// then passthrough arguments verbatim.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.machine_args.to_vec();

        args.extend(pflash(0, self.code, true));
        args.extend(pflash(1, self.vars, false));

        match self.boot {
            BootDisk::Image(image) => {
                args.push("-drive".to_string());
                args.push(format!(
                    "file={},format=raw,if=none,id=uefi-disk",
                    image.display()
                ));
                args.push("-device".to_string());
                args.push("virtio-blk-pci,drive=uefi-disk,bootindex=1".to_string());
            }
            BootDisk::Directory(dir) => {
                args.push("-drive".to_string());
                args.push(format!("file=fat:rw:{},format=raw", dir.display()));
            }
        }

        if let Some(shell) = self.shell {
            args.push("-drive".to_string());
            args.push(format!(
                "file={},format=raw,if=none,id=uefi-shell,media=cdrom,readonly=on",
                shell.display()
            ));
            args.extend(
                [
                    "-device",
                    "virtio-scsi-pci,id=scsi0",
                    "-device",
                    "scsi-cd,drive=uefi-shell",
                ]
                .map(String::from),
            );
        }

        args.push("-net".to_string());
        args.push("none".to_string());

        args.extend(self.extra.iter().cloned());
        args
    }
}
