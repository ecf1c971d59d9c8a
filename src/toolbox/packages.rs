// file: src/toolbox/packages.rs
// version: 1.0.0
// guid: e6c764d0-2000-42b7-97df-9f1c0e98df58

//! Install extra packages into containers

use super::{begin_block, dnf, end_block};
use crate::error::WorkbenchError;
use crate::runner::CommandRunner;
use crate::Result;
use std::io::Write;

/// Install `packages` into every container, stopping at the first failure
pub async fn add_packages<R, W>(
    runner: &R,
    out: &mut W,
    containers: &[String],
    packages: &[String],
) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    if packages.is_empty() {
        return Err(WorkbenchError::validation("At least one package is required"));
    }

    for container in containers {
        begin_block(out, &format!("Adding Packages to {}", container))?;
        runner.run(&dnf(container, "install", packages)).await?;
        end_block(out)?;
    }
    Ok(())
}
