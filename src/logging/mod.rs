// file: src/logging/mod.rs
// version: 2.0.0
// guid: 15b0dd62-306f-48fe-bbd2-e5e4efdbcffd

//! Logging system for workbench

pub mod logger;

pub use logger::{init_logger, with_async_operation_span};
