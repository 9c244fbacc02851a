//! Mix network capacity planning library
//!
//! This crate estimates what a mix network needs in order to carry a given
//! client population:
//! - Mix count from client traffic, cover traffic, and per-mix bandwidth
//! - Consensus document size and the bandwidth spent distributing it
//! - Per-client consensus overhead and remaining channel capacity
//! - Parameter sweeps over any combination of inputs
//!
//! Everything here is closed-form and deterministic. There is no I/O and no
//! formatting; rendering lives in the `mixplan` crate.
//!
//! # Example
//!
//! ```
//! use mixplan_core::capacity::evaluate;
//! use mixplan_core::config::ParametersBuilder;
//!
//! let params = ParametersBuilder::new()
//!     .clients(100_000)
//!     .noise_signal(2.0)
//!     .build()
//!     .unwrap();
//!
//! let metrics = evaluate(&params).unwrap();
//! println!("{} mixes", metrics.mixes_required_ceil());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod capacity;
pub mod error;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SweepDimension, SweepResults, SweepRow, SweepSpec, evaluate_sweep};
pub use capacity::{CapacityModel, evaluate};
pub use config::{ParametersBuilder, TrafficProfile};
pub use error::{ParameterError, SweepError};
pub use model::{MetricKind, Metrics, ParameterField, Parameters};
