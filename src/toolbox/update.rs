// file: src/toolbox/update.rs
// version: 1.0.0
// guid: 854b427a-de4c-434a-8136-61094f6168a5

//! Upgrade packages in existing containers

use super::{begin_block, dnf, end_block};
use crate::runner::CommandRunner;
use crate::Result;
use std::io::Write;

/// Run `dnf upgrade` in each container, stopping at the first failure
pub async fn update_containers<R, W>(runner: &R, out: &mut W, containers: &[String]) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    for container in containers {
        begin_block(out, &format!("Updating {}", container))?;
        runner.run(&dnf(container, "upgrade", &[])).await?;
        end_block(out)?;
    }
    Ok(())
}
