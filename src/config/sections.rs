// file: src/config/sections.rs
// version: 1.0.0
// guid: a67f59c3-3396-431e-a465-cea8d09ce665

//! Per-applet configuration sections

use super::{ArchProfile, Architecture, ProfileOverride};
use crate::error::WorkbenchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Smallest FAT32 image mformat accepts with 512-byte clusters
pub const MIN_DISK_SIZE_MB: u32 = 34;

/// UEFI harness settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QemuConfig {
    /// Architecture used when `--arch` is not given
    pub default_arch: Architecture,
    /// Size of the synthesized FAT32 boot image
    pub disk_size_mb: u32,
    /// Field-level overrides of the built-in profiles
    pub profiles: BTreeMap<Architecture, ProfileOverride>,
}

impl Default for QemuConfig {
    fn default() -> Self {
        Self {
            default_arch: Architecture::X64,
            disk_size_mb: 64,
            profiles: BTreeMap::new(),
        }
    }
}

impl QemuConfig {
    /// Resolve the effective profile for an architecture
    pub fn profile(&self, arch: Architecture) -> ArchProfile {
        let builtin = ArchProfile::builtin(arch);
        match self.profiles.get(&arch) {
            Some(over) => builtin.merged(over),
            None => builtin,
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.disk_size_mb < MIN_DISK_SIZE_MB {
            return Err(WorkbenchError::ValidationError(format!(
                "qemu.disk_size_mb must be at least {} (got {})",
                MIN_DISK_SIZE_MB, self.disk_size_mb
            )));
        }

        for (arch, over) in &self.profiles {
            if over.qemu.as_deref().is_some_and(|q| q.trim().is_empty()) {
                return Err(WorkbenchError::ValidationError(format!(
                    "qemu.profiles.{}.qemu cannot be empty",
                    arch
                )));
            }
        }

        Ok(())
    }
}

/// Beagleboard release discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeagleConfig {
    pub kernel_url: String,
    pub uboot_url: String,
}

impl Default for BeagleConfig {
    fn default() -> Self {
        Self {
            kernel_url: "https://github.com/beagleboard/linux.git".to_string(),
            uboot_url: "https://github.com/beagleboard/u-boot.git".to_string(),
        }
    }
}

impl BeagleConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.kernel_url.trim().is_empty() || self.uboot_url.trim().is_empty() {
            return Err(WorkbenchError::ValidationError(
                "beagle repository URLs cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// BeaglePlay board settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeagleplayConfig {
    /// GPIO line name wired to the CC1352 reset pin
    pub reset_line: String,
    /// Time the line is held in each state
    pub pulse_ms: u64,
    /// Sysfs attribute read by the timing probe
    pub temp_path: PathBuf,
}

impl Default for BeagleplayConfig {
    fn default() -> Self {
        Self {
            reset_line: "CC1352P7_RSTN".to_string(),
            pulse_ms: 200,
            temp_path: PathBuf::from("/sys/bus/iio/devices/iio:device1/in_temp_raw"),
        }
    }
}

impl BeagleplayConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.reset_line.trim().is_empty() {
            return Err(WorkbenchError::ValidationError(
                "beagleplay.reset_line cannot be empty".to_string(),
            ));
        }
        if self.pulse_ms == 0 {
            return Err(WorkbenchError::ValidationError(
                "beagleplay.pulse_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Toolbox provisioning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolboxConfig {
    pub basic_packages: Vec<String>,
    pub development_packages: Vec<String>,
    /// Lines appended to /etc/dnf/dnf.conf in new containers
    pub dnf_options: Vec<String>,
    /// Login shell used when entering a freshly created container
    pub shell: String,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            basic_packages: owned(&["fish", "exa", "direnv", "fd-find", "ripgrep"]),
            development_packages: owned(&["neovim", "bat", "gcc", "g++"]),
            dnf_options: owned(&["deltarpm=true", "max_parallel_downloads=12"]),
            shell: "/bin/fish".to_string(),
        }
    }
}

impl ToolboxConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(bad) = self.dnf_options.iter().find(|o| !o.contains('=') || o.contains('\'')) {
            return Err(WorkbenchError::ValidationError(format!(
                "toolbox.dnf_options entry must be key=value without quotes: {}",
                bad
            )));
        }
        if self.shell.trim().is_empty() {
            return Err(WorkbenchError::ValidationError(
                "toolbox.shell cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Symlink installer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Directory receiving the links (defaults to ~/.local/bin)
    pub bin_dir: Option<PathBuf>,
    /// Additional `name: target` links installed next to the applets
    pub extra: BTreeMap<String, PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qemu_profile_uses_override() {
        let mut config = QemuConfig::default();
        config.profiles.insert(
            Architecture::Aarch64,
            ProfileOverride {
                qemu: Some("/opt/qemu/bin/qemu-system-aarch64".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(
            config.profile(Architecture::Aarch64).qemu,
            "/opt/qemu/bin/qemu-system-aarch64"
        );
        assert_eq!(config.profile(Architecture::X64).qemu, "qemu-system-x86_64");
    }

    #[test]
    fn test_qemu_disk_size_lower_bound() {
        let config = QemuConfig {
            disk_size_mb: 16,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_qemu_binary_rejected() {
        let mut config = QemuConfig::default();
        config.profiles.insert(
            Architecture::X64,
            ProfileOverride {
                qemu: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_beagleplay_zero_pulse_rejected() {
        let config = BeagleplayConfig {
            pulse_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toolbox_defaults() {
        let config = ToolboxConfig::default();
        assert_eq!(config.basic_packages.len(), 5);
        assert!(config.development_packages.contains(&"g++".to_string()));
        assert_eq!(config.shell, "/bin/fish");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toolbox_rejects_quoted_dnf_option() {
        let config = ToolboxConfig {
            dnf_options: vec!["fastestmirror='1'".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
