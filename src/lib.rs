// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # workbench
//!
//! A single binary bundling small automation applets: a qemu harness for
//! UEFI applications, beagleboard branch queries, BeaglePlay helpers and
//! toolbox container provisioning. Each applet is a subcommand and can also
//! be invoked through a symlink named after it.

pub mod beagle;
pub mod beagleplay;
pub mod cli;
pub mod config;
pub mod error;
pub mod links;
pub mod logging;
pub mod qemu;
pub mod runner;
pub mod toolbox;
pub mod utils;

pub use error::{Result, WorkbenchError};

/// Version information for the binary
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
