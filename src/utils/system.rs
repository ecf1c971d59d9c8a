// file: src/utils/system.rs
// version: 2.0.0
// guid: e4488877-74fb-43ac-9b90-a9fbbb47f2c2

//! System utility functions

use crate::config::{Architecture, Config};
use std::path::PathBuf;
use tracing::warn;

/// External binaries the applets shell out to, and whether booting the
/// default architecture needs them
const TOOLS: &[(&str, &str, bool)] = &[
    ("dd", "run-qemu", true),
    ("mformat", "run-qemu", true),
    ("mcopy", "run-qemu", true),
    ("git", "kernel-query, uboot-query", false),
    ("toolbox", "toolbox-*", false),
    ("gpiofind", "beagleplay-reset", false),
    ("gpioset", "beagleplay-reset", false),
    ("gpioget", "beagleplay-reset", false),
    ("cat", "beagleconnect-timings", false),
];

/// Lookup result for one external binary
#[derive(Debug, Clone)]
pub struct Prerequisite {
    pub name: String,
    pub used_by: String,
    pub location: Option<PathBuf>,
    /// Missing required binaries fail the check; others only warn
    pub required: bool,
}

impl Prerequisite {
    pub fn found(&self) -> bool {
        self.location.is_some()
    }
}

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Resolve a command through PATH, or check an explicit path
    pub fn locate(command: &str) -> Option<PathBuf> {
        which::which(command).ok()
    }

    /// Look up every binary the applets use
    ///
    /// The FAT image tools and the emulator for the default architecture
    /// are required; everything else only warns when missing.
    pub fn check_prerequisites(config: &Config) -> Vec<Prerequisite> {
        let mut report: Vec<Prerequisite> = TOOLS
            .iter()
            .map(|&(name, used_by, required)| {
                let location = Self::locate(name);
                if location.is_none() && !required {
                    warn!("{} not found - {} unavailable", name, used_by);
                }
                Prerequisite {
                    name: name.to_string(),
                    used_by: used_by.to_string(),
                    location,
                    required,
                }
            })
            .collect();

        for arch in Architecture::ALL {
            let qemu = config.qemu.profile(arch).qemu;
            if report.iter().any(|p| p.name == qemu) {
                continue;
            }
            let required = arch == config.qemu.default_arch;
            let location = Self::locate(&qemu);
            if location.is_none() && !required {
                warn!("{} not found - {} emulation unavailable", qemu, arch);
            }
            report.push(Prerequisite {
                name: qemu,
                used_by: format!("run-qemu --arch {}", arch),
                location,
                required,
            });
        }

        report
    }
}
