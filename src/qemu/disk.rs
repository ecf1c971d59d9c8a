// file: src/qemu/disk.rs
// version: 1.0.0
// guid: 5f6c14f2-80e9-44b0-ad89-cdc1c3236b81

//! FAT32 boot image synthesis with dd and mtools

use super::scratch::ScratchLayout;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;
use std::path::PathBuf;
use tracing::debug;

/// How the EFI application reaches the guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootDisk {
    /// Raw FAT32 image attached as a virtio block device
    Image(PathBuf),
    /// Directory exposed through qemu's vvfat driver
    Directory(PathBuf),
}

/// Commands that build a FAT32 image of `size_mb` MiB holding the EFI
/// binary and startup script
///
/// Geometry is 64 heads by 32 sectors, so one track is exactly 1 MiB.
pub fn fat_image_commands(layout: &ScratchLayout, size_mb: u32) -> (PathBuf, Vec<CommandSpec>) {
    let image = layout.dir.join("disk.img");
    let image_arg = image.to_string_lossy().into_owned();

    let commands = vec![
        CommandSpec::new("dd")
            .arg("if=/dev/zero")
            .arg(format!("of={}", image_arg))
            .arg("bs=1M")
            .arg(format!("count={}", size_mb))
            .arg("status=none"),
        CommandSpec::new("mformat")
            .args(["-i", image_arg.as_str(), "-F"])
            .args(["-h", "64", "-s", "32"])
            .arg("-t")
            .arg(size_mb.to_string())
            .arg("::"),
        CommandSpec::new("mcopy")
            .args(["-i", image_arg.as_str()])
            .path_arg(&layout.efi)
            .path_arg(&layout.startup)
            .arg("::/"),
    ];

    (image, commands)
}

/// Build the FAT32 boot image
pub async fn create_fat_image<R>(runner: &R, layout: &ScratchLayout, size_mb: u32) -> Result<BootDisk>
where
    R: CommandRunner + ?Sized,
{
    let (image, commands) = fat_image_commands(layout, size_mb);

    for command in &commands {
        runner.run(command).await?;
    }

    debug!("Created {} MiB FAT32 boot image: {}", size_mb, image.display());
    Ok(BootDisk::Image(image))
}
