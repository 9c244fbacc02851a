mod metrics;
mod parameters;

pub use metrics::{MetricKind, MetricUnit, Metrics};
pub use parameters::{ParameterField, Parameters};
