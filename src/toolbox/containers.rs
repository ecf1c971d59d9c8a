// file: src/toolbox/containers.rs
// version: 1.0.0
// guid: 371a08a4-474b-4193-beda-645b4698e4df

//! Container discovery and target selection

use crate::error::WorkbenchError;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;

/// Container names from `toolbox list -c` (header skipped, second column)
pub fn parse_container_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}

/// Every toolbox container on this machine
pub async fn list_containers<R>(runner: &R) -> Result<Vec<String>>
where
    R: CommandRunner + ?Sized,
{
    let stdout = runner
        .output(&CommandSpec::new("toolbox").args(["list", "-c"]))
        .await?;
    Ok(parse_container_list(&stdout))
}

/// Which containers an applet acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    All,
    Named(Vec<String>),
}

impl Targets {
    /// No names, or the word `all` anywhere, selects every container
    pub fn from_names(names: &[String]) -> Self {
        if names.is_empty() || names.iter().any(|n| n == "all") {
            Targets::All
        } else {
            Targets::Named(names.to_vec())
        }
    }
}

/// Expand the targets against the containers that exist
///
/// Named containers must all exist; the error lists the valid choices.
pub async fn resolve_targets<R>(runner: &R, targets: &Targets) -> Result<Vec<String>>
where
    R: CommandRunner + ?Sized,
{
    let known = list_containers(runner).await?;

    match targets {
        Targets::All => Ok(known),
        Targets::Named(names) => {
            let unknown: Vec<&str> = names
                .iter()
                .filter(|n| !known.contains(*n))
                .map(String::as_str)
                .collect();

            if unknown.is_empty() {
                Ok(names.clone())
            } else {
                Err(WorkbenchError::ToolboxError(format!(
                    "Unknown container(s): {} (choose from: {})",
                    unknown.join(", "),
                    known
                        .iter()
                        .map(String::as_str)
                        .chain(std::iter::once("all"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        }
    }
}
