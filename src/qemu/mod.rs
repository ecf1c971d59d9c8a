// file: src/qemu/mod.rs
// version: 1.0.0
// guid: be4d99f4-5104-43d4-84ad-e4b2ebbcd10c

//! UEFI application test harness
//!
//! Stages firmware and an EFI binary in a scratch directory, wraps them in
//! a bootable FAT filesystem and boots them under the matching
//! `qemu-system-*` emulator. The scratch directory lives exactly as long as
//! one [`run_qemu`] call unless the caller asks to keep it.

pub mod args;
pub mod disk;
pub mod scratch;

pub use args::QemuArgs;
pub use disk::BootDisk;
pub use scratch::{startup_script, ScratchLayout};

use crate::config::{sections::MIN_DISK_SIZE_MB, ArchProfile, Architecture, QemuConfig};
use crate::error::WorkbenchError;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How the boot filesystem is presented to the guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiskMode {
    /// Synthesized FAT32 image (needs dd and mtools)
    #[default]
    Image,
    /// qemu vvfat view of the scratch directory
    Directory,
}

/// Options for one harness run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub efi_file: PathBuf,
    pub arch: Architecture,
    pub qemu: Option<String>,
    pub code: Option<PathBuf>,
    pub vars: Option<PathBuf>,
    pub shell: Option<PathBuf>,
    pub no_shell: bool,
    pub disk_mode: DiskMode,
    pub disk_size_mb: u32,
    pub keep_scratch: bool,
    pub extra_args: Vec<String>,
}

impl RunOptions {
    /// Defaults from the configuration for the given EFI file
    pub fn new(efi_file: impl Into<PathBuf>, config: &QemuConfig) -> Self {
        Self {
            efi_file: efi_file.into(),
            arch: config.default_arch,
            qemu: None,
            code: None,
            vars: None,
            shell: None,
            no_shell: false,
            disk_mode: DiskMode::Image,
            disk_size_mb: config.disk_size_mb,
            keep_scratch: false,
            extra_args: Vec::new(),
        }
    }

    /// The configured profile with command line overrides applied
    pub fn resolve_profile(&self, config: &QemuConfig) -> ArchProfile {
        let mut profile = config.profile(self.arch);
        if let Some(qemu) = &self.qemu {
            profile.qemu = qemu.clone();
        }
        if let Some(code) = &self.code {
            profile.code = code.clone();
        }
        if let Some(vars) = &self.vars {
            profile.vars = vars.clone();
        }
        if let Some(shell) = &self.shell {
            profile.shell = Some(shell.clone());
        }
        if self.no_shell {
            profile.shell = None;
        }
        profile
    }
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(WorkbenchError::QemuError(format!(
            "{} not found: {}",
            what,
            path.display()
        )))
    }
}

/// Boot the EFI application under qemu and wait for the emulator to exit
pub async fn run_qemu<R>(runner: &R, profile: &ArchProfile, options: &RunOptions) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    if options.disk_mode == DiskMode::Image && options.disk_size_mb < MIN_DISK_SIZE_MB {
        return Err(WorkbenchError::validation(format!(
            "FAT32 boot image needs at least {} MiB (got {})",
            MIN_DISK_SIZE_MB, options.disk_size_mb
        )));
    }
    require_file(&options.efi_file, "EFI file")?;
    require_file(&profile.code, "OVMF code image")?;
    require_file(&profile.vars, "OVMF vars image")?;

    let shell = match &profile.shell {
        Some(iso) if iso.is_file() => Some(iso.as_path()),
        Some(iso) => {
            warn!("UEFI shell ISO not found, continuing without it: {}", iso.display());
            None
        }
        None => None,
    };

    let scratch = tempfile::Builder::new().prefix("run-qemu-").tempdir()?;
    let result = boot(runner, profile, options, scratch.path(), shell).await;

    if options.keep_scratch {
        let kept = scratch.keep();
        info!("Keeping scratch directory: {}", kept.display());
    }

    result
}

async fn boot<R>(
    runner: &R,
    profile: &ArchProfile,
    options: &RunOptions,
    dir: &Path,
    shell: Option<&Path>,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let layout =
        ScratchLayout::prepare(dir, &options.efi_file, &profile.code, &profile.vars, shell)
            .await?;

    let boot_disk = match options.disk_mode {
        DiskMode::Image => disk::create_fat_image(runner, &layout, options.disk_size_mb).await?,
        DiskMode::Directory => BootDisk::Directory(layout.dir.clone()),
    };

    let args = QemuArgs {
        machine_args: &profile.machine_args,
        code: &layout.code,
        vars: &layout.vars,
        boot: &boot_disk,
        shell: layout.shell.as_deref(),
        extra: &options.extra_args,
    }
    .to_args();

    info!(
        "Booting {} on {} with {}",
        options.efi_file.display(),
        options.arch,
        profile.qemu
    );

    runner
        .run(&CommandSpec::new(profile.qemu.clone()).args(args))
        .await
}
