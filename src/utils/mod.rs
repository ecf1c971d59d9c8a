// file: src/utils/mod.rs
// version: 2.0.0
// guid: fa52805b-2d7a-4774-ac9e-177def0f9379

//! Utility modules for system operations

pub mod system;

pub use system::{Prerequisite, SystemUtils};
