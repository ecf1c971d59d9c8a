// file: src/beagle/query.rs
// version: 1.0.0
// guid: 0263a2f6-9635-4d03-b742-799a93d608d5

//! Remote branch discovery through `git ls-remote`

use super::version::BranchVersion;
use crate::error::WorkbenchError;
use crate::runner::{CommandRunner, CommandSpec};
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// A branch whose name carried a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchMatch<V> {
    pub branch: String,
    pub version: V,
    /// Single-integer form of `version`, see [`BranchVersion::encode`]
    pub encoded: u64,
}

/// The `git ls-remote` invocation listing branch heads of `url`
pub fn ls_remote_command(url: &str, pattern: Option<&str>) -> CommandSpec {
    let spec = CommandSpec::new("git").args(["ls-remote", "--heads", url]);
    match pattern {
        Some(pattern) => spec.arg(pattern),
        None => spec,
    }
}

/// Branch names from `git ls-remote` output (`<sha>\trefs/heads/<name>`)
pub fn parse_ls_remote(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|reference| reference.strip_prefix("refs/heads/"))
        .map(str::to_string)
        .collect()
}

/// Keep branches at or above `minimum`, sorted ascending by version
///
/// Names that do not parse are dropped. The sort is stable, so branches
/// sharing a version keep their remote order.
pub fn select_branches<V, I>(names: I, minimum: V) -> Vec<BranchMatch<V>>
where
    V: BranchVersion,
    I: IntoIterator<Item = String>,
{
    let mut matches: Vec<BranchMatch<V>> = names
        .into_iter()
        .filter_map(|branch| {
            let version = V::parse_branch(&branch)?;
            (version >= minimum).then(|| BranchMatch {
                branch,
                encoded: version.encode(),
                version,
            })
        })
        .collect();

    matches.sort_by(|a, b| a.version.cmp(&b.version));
    matches
}

/// Fetch, filter and sort the versioned branches of a remote
pub async fn query_branches<R, V>(
    runner: &R,
    url: &str,
    pattern: Option<&str>,
    minimum: V,
) -> Result<Vec<BranchMatch<V>>>
where
    R: CommandRunner + ?Sized,
    V: BranchVersion,
{
    let command = ls_remote_command(url, pattern);
    let stdout = runner.output(&command).await.map_err(|e| match e {
        WorkbenchError::ProcessError {
            exit_code: None,
            stderr,
            ..
        } => WorkbenchError::GitError(format!("git could not be started: {}", stderr)),
        other => other,
    })?;

    let names = parse_ls_remote(&stdout);
    debug!("{} branches on {}", names.len(), url);

    Ok(select_branches(names, minimum))
}

/// Format matches for stdout: one branch per line, or a JSON array
pub fn render<V: BranchVersion>(matches: &[BranchMatch<V>], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(matches)?);
    }
    Ok(matches
        .iter()
        .map(|m| m.branch.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}
