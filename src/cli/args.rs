// file: src/cli/args.rs
// version: 2.0.0
// guid: 7b52200c-84e7-452c-981e-77276bc53b85

//! Command line argument definitions

use crate::config::{sections::MIN_DISK_SIZE_MB, Architecture};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "workbench")]
#[command(about = "Personal automation applets for UEFI, beagleboard and toolbox workflows")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to <config dir>/workbench/config.yaml)
    #[arg(long, global = true, env = "WORKBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print mutating commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run UEFI applications using qemu
    RunQemu {
        /// Path to the EFI file
        efi_file: PathBuf,

        /// Path to the OVMF code file
        #[arg(short, long)]
        code: Option<PathBuf>,

        /// Path to the OVMF vars file
        #[arg(short = 'v', long)]
        vars: Option<PathBuf>,

        /// Path to the qemu executable [default: emulator for --arch]
        #[arg(short, long)]
        qemu: Option<String>,

        /// Architecture to emulate on [default: X64]
        #[arg(short, long, value_enum, ignore_case = true)]
        arch: Option<ArchArg>,

        /// UEFI shell ISO to attach
        #[arg(short, long)]
        shell: Option<PathBuf>,

        /// Do not attach a UEFI shell ISO
        #[arg(long, conflicts_with = "shell")]
        no_shell: bool,

        /// Expose the scratch directory through qemu's vvfat driver instead of a FAT image
        #[arg(long)]
        vvfat: bool,

        /// Size of the FAT32 boot image in MiB
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(MIN_DISK_SIZE_MB as i64..)
        )]
        disk_size_mb: Option<u32>,

        /// Keep the scratch directory after qemu exits
        #[arg(long)]
        keep_scratch: bool,

        /// Extra arguments passed to qemu verbatim (after `--`)
        #[arg(last = true)]
        qemu_args: Vec<String>,
    },

    /// Show all beagle kernel branches
    KernelQuery {
        /// Minimum kernel major version
        #[arg(long, default_value_t = 0)]
        major: u32,

        /// Minimum kernel minor version
        #[arg(long, default_value_t = 0)]
        minor: u32,

        /// Minimum kernel patch version
        #[arg(long, default_value_t = 0)]
        patch: u32,

        /// Kernel repository to query
        #[arg(long)]
        url: Option<String>,

        /// Print branches and versions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show all beagle U-Boot branches for a board
    UbootQuery {
        /// Board name
        board: String,

        /// Minimum U-Boot year
        #[arg(long, default_value_t = 0)]
        year: u32,

        /// Minimum U-Boot month
        #[arg(long, default_value_t = 0)]
        month: u32,

        /// U-Boot repository to query
        #[arg(long)]
        url: Option<String>,

        /// Print branches and versions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset the BeaglePlay CC1352 coprocessor
    BeagleplayReset {
        /// GPIO line name of the reset pin
        #[arg(long)]
        line: Option<String>,

        /// Milliseconds the line is held low and high
        #[arg(long)]
        pulse_ms: Option<u64>,
    },

    /// Measure sysfs read latency through a child process
    BeagleconnectTimings {
        /// Sysfs attribute to read
        #[arg(long)]
        path: Option<PathBuf>,

        /// Reads averaged per reported line
        #[arg(
            short = 'n',
            long,
            default_value_t = 100,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        iterations: u32,

        /// Stop after this many lines [default: run until interrupted]
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Create and set up a toolbox container
    #[command(alias = "toolbox-custom-create")]
    ToolboxFirstRun {
        /// The name of the container
        name: String,

        /// Install development tools
        #[arg(short, long)]
        development: bool,

        /// Do not enter the container when done
        #[arg(long)]
        no_enter: bool,
    },

    /// Update toolbox containers
    ToolboxUpdate {
        /// The names of the containers, or `all`
        containers: Vec<String>,
    },

    /// Add packages to toolbox containers
    #[command(group(
        clap::ArgGroup::new("targets").required(true).args(["containers", "all"])
    ))]
    ToolboxAddPackages {
        /// The names of the containers (repeat or separate with commas)
        #[arg(short, long, value_delimiter = ',')]
        containers: Vec<String>,

        /// Add to every container
        #[arg(short, long)]
        all: bool,

        /// The names of the packages
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Install applet symlinks into a bin directory
    InstallLinks {
        /// Target directory [default: ~/.local/bin]
        #[arg(long)]
        bin_dir: Option<PathBuf>,
    },

    /// Check that the external tools used by the applets are installed
    CheckPrereqs,
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn applet_name(&self) -> &'static str {
        match self {
            Commands::RunQemu { .. } => "run-qemu",
            Commands::KernelQuery { .. } => "kernel-query",
            Commands::UbootQuery { .. } => "uboot-query",
            Commands::BeagleplayReset { .. } => "beagleplay-reset",
            Commands::BeagleconnectTimings { .. } => "beagleconnect-timings",
            Commands::ToolboxFirstRun { .. } => "toolbox-first-run",
            Commands::ToolboxUpdate { .. } => "toolbox-update",
            Commands::ToolboxAddPackages { .. } => "toolbox-add-packages",
            Commands::InstallLinks { .. } => "install-links",
            Commands::CheckPrereqs => "check-prereqs",
        }
    }
}

/// Architecture argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchArg {
    Ia32,
    X64,
    Arm,
    Aarch64,
    Riscv64,
}

impl From<ArchArg> for Architecture {
    fn from(arch: ArchArg) -> Self {
        match arch {
            ArchArg::Ia32 => Architecture::Ia32,
            ArchArg::X64 => Architecture::X64,
            ArchArg::Arm => Architecture::Arm,
            ArchArg::Aarch64 => Architecture::Aarch64,
            ArchArg::Riscv64 => Architecture::Riscv64,
        }
    }
}
