// file: src/beagle/version.rs
// version: 1.0.0
// guid: ddc258e3-2877-4308-8572-bcab229baf35

//! Version schemes embedded in beagleboard branch names

use serde::Serialize;
use std::fmt;

/// A version that can be read out of a branch name
///
/// `Ord` must be lexicographic over the version components.
pub trait BranchVersion: Ord + Copy + fmt::Display + Serialize {
    /// Parse a branch name, returning `None` for branches of another shape
    fn parse_branch(name: &str) -> Option<Self>;

    /// Legacy single-integer encoding, monotonic while trailing
    /// components stay below 100
    fn encode(&self) -> u64;
}

fn number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Strip a leading `v` from the first component
fn leading(part: &str) -> Option<u32> {
    number(part.trim_start_matches('v'))
}

/// Keep only what precedes the first `-` of the last component
fn trailing(part: &str) -> Option<u32> {
    number(part.split('-').next().unwrap_or(part))
}

/// Kernel release `major.minor.patch`, e.g. `v6.1.83-ti-rt-arm64-r63`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct KernelVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl KernelVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl BranchVersion for KernelVersion {
    fn parse_branch(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        match parts.as_slice() {
            [major, minor, patch] => Some(Self {
                major: leading(major)?,
                minor: number(minor)?,
                patch: trailing(patch)?,
            }),
            _ => None,
        }
    }

    fn encode(&self) -> u64 {
        u64::from(self.major) * 10_000 + u64::from(self.minor) * 100 + u64::from(self.patch)
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// U-Boot release `year.month`, e.g. `v2023.04-ti-arm32-r10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UbootVersion {
    pub year: u32,
    pub month: u32,
}

impl UbootVersion {
    pub fn new(year: u32, month: u32) -> Self {
        Self { year, month }
    }
}

impl BranchVersion for UbootVersion {
    fn parse_branch(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        match parts.as_slice() {
            [year, month] => Some(Self {
                year: leading(year)?,
                month: trailing(month)?,
            }),
            _ => None,
        }
    }

    fn encode(&self) -> u64 {
        u64::from(self.year) * 100 + u64::from(self.month)
    }
}

impl fmt::Display for UbootVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.year, self.month)
    }
}
