// file: src/config/profile.rs
// version: 1.0.0
// guid: a917d331-d572-4c58-a490-84edca506a70

//! Firmware profiles for each emulated architecture

use super::{expand_tilde, Architecture};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything needed to boot UEFI firmware for one architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchProfile {
    /// QEMU system emulator binary
    pub qemu: String,
    /// OVMF/AAVMF code image (mapped read-only)
    pub code: PathBuf,
    /// OVMF/AAVMF variable store template
    pub vars: PathBuf,
    /// UEFI shell ISO, attached when present
    pub shell: Option<PathBuf>,
    /// Machine selection arguments placed before the firmware drives
    pub machine_args: Vec<String>,
}

impl ArchProfile {
    /// Built-in profile for an architecture
    pub fn builtin(arch: Architecture) -> Self {
        let (code, vars, shell, machine): (&str, &str, Option<&str>, &[&str]) = match arch {
            Architecture::X64 => (
                "/usr/share/OVMF/OVMF_CODE.fd",
                "/usr/share/OVMF/OVMF_VARS.fd",
                Some("/usr/share/edk2/ovmf/UefiShell.iso"),
                &["-machine", "q35"],
            ),
            Architecture::Ia32 => (
                "/usr/share/edk2/ovmf-ia32/OVMF_CODE.fd",
                "/usr/share/edk2/ovmf-ia32/OVMF_VARS.fd",
                None,
                &["-machine", "q35"],
            ),
            Architecture::Arm => (
                "/usr/share/AAVMF/AAVMF32_CODE.fd",
                "/usr/share/AAVMF/AAVMF32_VARS.fd",
                None,
                &["-machine", "virt", "-cpu", "cortex-a15"],
            ),
            Architecture::Aarch64 => (
                "/usr/share/AAVMF/AAVMF_CODE.fd",
                "/usr/share/AAVMF/AAVMF_VARS.fd",
                None,
                &["-machine", "virt", "-cpu", "cortex-a57"],
            ),
            Architecture::Riscv64 => (
                "/usr/share/qemu-efi-riscv64/RISCV_VIRT_CODE.fd",
                "/usr/share/qemu-efi-riscv64/RISCV_VIRT_VARS.fd",
                None,
                &["-machine", "virt"],
            ),
        };

        Self {
            qemu: arch.qemu_binary().to_string(),
            code: PathBuf::from(code),
            vars: PathBuf::from(vars),
            shell: shell.map(PathBuf::from),
            machine_args: machine.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Apply a partial override on top of this profile
    pub fn merged(mut self, over: &ProfileOverride) -> Self {
        if let Some(qemu) = &over.qemu {
            self.qemu = qemu.clone();
        }
        if let Some(code) = &over.code {
            self.code = code.clone();
        }
        if let Some(vars) = &over.vars {
            self.vars = vars.clone();
        }
        if let Some(shell) = &over.shell {
            // An empty path in the config detaches the shell ISO
            self.shell = if shell.as_os_str().is_empty() {
                None
            } else {
                Some(shell.clone())
            };
        }
        if let Some(args) = &over.machine_args {
            self.machine_args = args.clone();
        }
        self
    }
}

/// Per-architecture fields set in the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOverride {
    pub qemu: Option<String>,
    pub code: Option<PathBuf>,
    pub vars: Option<PathBuf>,
    pub shell: Option<PathBuf>,
    pub machine_args: Option<Vec<String>>,
}

impl ProfileOverride {
    /// Expand `~` in every path
    pub fn expand_paths(&mut self) {
        for path in [&mut self.code, &mut self.vars, &mut self.shell]
            .into_iter()
            .flatten()
        {
            *path = expand_tilde(path);
        }
    }
}
