// file: src/config/mod.rs
// version: 2.0.0
// guid: cc270542-52ad-4592-8a69-01054c13da5b

//! Configuration module for workbench
//!
//! Handles loading and validation of the shared YAML configuration and the
//! built-in firmware profiles for each emulated architecture.

pub mod loader;
pub mod profile;
pub mod sections;

pub use loader::ConfigLoader;
pub use profile::{ArchProfile, ProfileOverride};
pub use sections::{BeagleConfig, BeagleplayConfig, LinksConfig, QemuConfig, ToolboxConfig};

use serde::{Deserialize, Serialize};

/// Architectures the UEFI harness can emulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Architecture {
    Ia32,
    X64,
    Arm,
    Aarch64,
    Riscv64,
}

impl Architecture {
    /// Every supported architecture
    pub const ALL: [Architecture; 5] = [
        Architecture::Ia32,
        Architecture::X64,
        Architecture::Arm,
        Architecture::Aarch64,
        Architecture::Riscv64,
    ];

    /// Get the architecture as an EDK2-style name
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Ia32 => "IA32",
            Architecture::X64 => "X64",
            Architecture::Arm => "ARM",
            Architecture::Aarch64 => "AARCH64",
            Architecture::Riscv64 => "RISCV64",
        }
    }

    /// Get the default QEMU system emulator for this architecture
    pub fn qemu_binary(&self) -> &'static str {
        match self {
            Architecture::Ia32 => "qemu-system-i386",
            Architecture::X64 => "qemu-system-x86_64",
            Architecture::Arm => "qemu-system-arm",
            Architecture::Aarch64 => "qemu-system-aarch64",
            Architecture::Riscv64 => "qemu-system-riscv64",
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Architecture {
    type Err = crate::error::WorkbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ia32" | "i386" | "i686" => Ok(Architecture::Ia32),
            "x64" | "x86_64" | "amd64" => Ok(Architecture::X64),
            "arm" | "arm32" => Ok(Architecture::Arm),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            "riscv64" => Ok(Architecture::Riscv64),
            _ => Err(crate::error::WorkbenchError::ValidationError(format!(
                "Unknown architecture: {}",
                s
            ))),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub qemu: QemuConfig,
    pub beagle: BeagleConfig,
    pub beagleplay: BeagleplayConfig,
    pub toolbox: ToolboxConfig,
    pub links: LinksConfig,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> crate::Result<()> {
        self.qemu.validate()?;
        self.beagle.validate()?;
        self.beagleplay.validate()?;
        self.toolbox.validate()?;
        Ok(())
    }

    /// Expand `~` in every path value
    pub fn expand_paths(&mut self) {
        for profile in self.qemu.profiles.values_mut() {
            profile.expand_paths();
        }
        self.beagleplay.temp_path = expand_tilde(&self.beagleplay.temp_path);
        if let Some(bin_dir) = &self.links.bin_dir {
            self.links.bin_dir = Some(expand_tilde(bin_dir));
        }
        for target in self.links.extra.values_mut() {
            *target = expand_tilde(target);
        }
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &std::path::Path) -> std::path::PathBuf {
    let raw = path.to_string_lossy();
    std::path::PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}
