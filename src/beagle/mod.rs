// file: src/beagle/mod.rs
// version: 1.0.0
// guid: 4285c55b-fc8e-45cc-9ff5-540c3aff87a1

//! Beagleboard kernel and U-Boot release discovery

pub mod query;
pub mod version;

pub use query::{query_branches, render, select_branches, BranchMatch};
pub use version::{BranchVersion, KernelVersion, UbootVersion};

/// Branch pattern matching every U-Boot branch of a board
pub fn board_pattern(board: &str) -> String {
    format!("*-{}", board)
}
