//! Parameter sweep over the capacity model.
//!
//! A `SweepSpec` holds a base `Parameters` value and one `SweepDimension`
//! per varied field. The sweep visits the Cartesian product of the
//! dimensions, first dimension slowest, and evaluates the capacity model at
//! each point.
//!
//! ```
//! use mixplan_core::analysis::{SweepDimension, SweepSpec};
//! use mixplan_core::config::presets;
//! use mixplan_core::model::ParameterField;
//!
//! let spec = SweepSpec::new(presets::reference())
//!     .dimension(SweepDimension::new(ParameterField::NoiseSignal, vec![0.0, 2.0]))
//!     .dimension(SweepDimension::geometric(ParameterField::NumClients, 1e4, 10.0, 3));
//!
//! let rows: Vec<_> = spec.rows().collect();
//! assert_eq!(rows.len(), 6);
//! assert_eq!(rows[4].coords, vec![1, 1]);
//! ```
//!
//! Use `evaluate_sweep` to collect all rows into a `SweepResults`, which
//! supports 2-D metric slices for report tables.

mod config;
mod evaluator;
mod grid;

pub use config::*;
pub use evaluator::*;
pub use grid::*;
