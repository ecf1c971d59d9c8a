// file: src/beagleplay/mod.rs
// version: 1.0.0
// guid: 8fdea772-3b88-44f9-ad4d-d9d3e5fe6c25

//! BeaglePlay board helpers: CC1352 reset and sysfs timing probe

pub mod reset;
pub mod timings;

pub use reset::{find_line, reset_cc1352, GpioLine};
pub use timings::{run_timings, TimingOptions};
