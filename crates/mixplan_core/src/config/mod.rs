//! Parameter construction and sample configurations
//!
//! `ParametersBuilder` gives a fluent way to build one parameter set;
//! `presets` holds the sample deployments and sweep grids.

pub mod builder;
pub mod presets;

pub use builder::ParametersBuilder;
pub use presets::TrafficProfile;
