// file: src/toolbox/mod.rs
// version: 1.0.0
// guid: 87f9fdbc-b677-4f5c-bd38-7fe4098a8acd

//! Toolbox container lifecycle: create and provision, update, add packages
//!
//! Every step prints a title, runs, then leaves one blank line so the
//! output of consecutive steps stays readable.

pub mod containers;
pub mod packages;
pub mod provision;
pub mod update;

pub use containers::{list_containers, parse_container_list, resolve_targets, Targets};
pub use packages::add_packages;
pub use provision::first_run;
pub use update::update_containers;

use crate::runner::CommandSpec;
use crate::Result;
use colored::Colorize;
use std::io::Write;

/// `toolbox run -c <container> <command…>`
pub fn toolbox_run<I, S>(container: &str, command: I) -> CommandSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandSpec::new("toolbox")
        .args(["run", "-c", container])
        .args(command)
}

/// `sudo dnf <verb> -y <packages…>` inside a container
pub fn dnf(container: &str, verb: &str, packages: &[String]) -> CommandSpec {
    toolbox_run(container, ["sudo", "dnf", verb, "-y"]).args(packages.iter().cloned())
}

/// Print a step title
pub(crate) fn begin_block<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "{}", title.bold())?;
    out.flush()?;
    Ok(())
}

/// Close a step with a blank line
pub(crate) fn end_block<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
