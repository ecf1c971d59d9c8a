// file: src/cli/mod.rs
// version: 2.0.0
// guid: 7258c56d-0407-4485-9329-7000f22b94b0

//! Command line interface for workbench

pub mod applet;
pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
