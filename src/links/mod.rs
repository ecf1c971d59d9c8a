// file: src/links/mod.rs
// version: 1.0.0
// guid: 34c4117b-2a80-44c2-a2ed-bc7067d64595

//! Install applet symlinks into a bin directory

use crate::error::WorkbenchError;
use crate::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Link name to link target
pub type LinkSet = BTreeMap<String, PathBuf>;

/// One link per applet pointing at `exe`, plus the configured extras
pub fn link_set(exe: &Path, applets: &[&str], extra: &BTreeMap<String, PathBuf>) -> LinkSet {
    let mut links: LinkSet = applets
        .iter()
        .map(|name| (name.to_string(), exe.to_path_buf()))
        .collect();
    for (name, target) in extra {
        links.insert(name.clone(), target.clone());
    }
    links
}

/// `~/.local/bin` unless configured otherwise
pub fn default_bin_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".local").join("bin"))
        .ok_or_else(|| WorkbenchError::LinkError("Cannot determine home directory".to_string()))
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(WorkbenchError::LinkError(format!("Invalid link name: {:?}", name)));
    }
    Ok(())
}

/// Create or replace one symlink atomically
///
/// The link is made under a temporary name and renamed over the final
/// path, so an existing link is never missing mid-way.
#[cfg(unix)]
pub fn install_link(bin_dir: &Path, name: &str, target: &Path) -> Result<PathBuf> {
    validate_name(name)?;

    let link = bin_dir.join(name);
    let tmp = bin_dir.join(format!(".{}.tmp", name));

    match std::fs::remove_file(&tmp) {
        Ok(()) => debug!("Removed stale {}", tmp.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    std::os::unix::fs::symlink(target, &tmp).map_err(|e| {
        WorkbenchError::LinkError(format!("Failed to create {}: {}", tmp.display(), e))
    })?;
    std::fs::rename(&tmp, &link).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        WorkbenchError::LinkError(format!("Failed to install {}: {}", link.display(), e))
    })?;

    Ok(link)
}

#[cfg(not(unix))]
pub fn install_link(_bin_dir: &Path, name: &str, _target: &Path) -> Result<PathBuf> {
    validate_name(name)?;
    Err(WorkbenchError::LinkError(
        "Symlink installation is only supported on unix".to_string(),
    ))
}

/// Install every link, creating `bin_dir` if needed
pub fn install_links(bin_dir: &Path, links: &LinkSet, dry_run: bool) -> Result<Vec<PathBuf>> {
    if dry_run {
        for (name, target) in links {
            info!(
                "DRY RUN: would link {} -> {}",
                bin_dir.join(name).display(),
                target.display()
            );
        }
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(bin_dir)?;

    let mut installed = Vec::with_capacity(links.len());
    for (name, target) in links {
        let link = install_link(bin_dir, name, target)?;
        info!("{} -> {}", link.display(), target.display());
        installed.push(link);
    }
    Ok(installed)
}
