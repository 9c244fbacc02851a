//! Mix network capacity planner: command line and report rendering
//!
//! The numbers come from `mixplan_core`; this crate loads configs, renders
//! them with units, and wires up logging.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;
pub mod util;

pub use logging::{default_log_dir, init_logging};
