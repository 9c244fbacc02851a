//! Sample deployments and sweep grids.
//!
//! These are planning starting points, not recommendations. Each sweep is
//! plain data; callers are free to build their own `SweepSpec` instead.

use serde::{Deserialize, Serialize};

use crate::analysis::{SweepDimension, SweepSpec};
use crate::error::SweepError;
use crate::model::{ParameterField, Parameters};

pub const GIGABIT: f64 = 1e9;
pub const HOUR: f64 = 60.0 * 60.0;
pub const DAY: f64 = 24.0 * HOUR;

/// Identity, link, and three epochs of mix keys, plus 10 address bytes and
/// a 2-byte field
pub const REFERENCE_DESCRIPTOR_SIZE: f64 = 32.0 + 32.0 + 3.0 * 32.0 + 10.0 + 2.0;
pub const REFERENCE_SIGNATURE_SIZE: f64 = 64.0;

/// The example deployment.
///
/// Mixes are budgeted at half of a 1 Gbit/s line; the consensus is
/// republished every three hours by nine authorities.
#[must_use]
pub fn reference() -> Parameters {
    Parameters {
        num_authorities: 9.0,
        num_clients: 100_000.0,
        consensus_interval: 3.0 * HOUR,
        mix_bandwidth: 0.5 * GIGABIT,
        message_interval: 10.0,
        message_size: 50.0 * 1024.0,
        descriptor_size: REFERENCE_DESCRIPTOR_SIZE,
        signature_size: REFERENCE_SIGNATURE_SIZE,
        noise_signal: 0.0,
    }
}

/// Small-message, high-rate deployment used for the consensus-interval grid
#[must_use]
pub fn low_latency() -> Parameters {
    Parameters {
        num_authorities: 5.0,
        num_clients: 1_000.0,
        consensus_interval: 60.0,
        mix_bandwidth: 0.7 * GIGABIT,
        descriptor_size: 100.0,
        signature_size: 100.0,
        noise_signal: 0.0,
        ..TrafficProfile::LowLatency.apply_to(reference())
    }
}

/// Message size and send interval pairs for typical client behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficProfile {
    /// Short messages, 300 ms apart
    LowLatency,
    /// Short messages, 5 s apart
    MediumLatency,
    /// 5 MB messages every ten minutes
    HighLatency,
}

impl TrafficProfile {
    pub const ALL: [TrafficProfile; 3] = [
        TrafficProfile::LowLatency,
        TrafficProfile::MediumLatency,
        TrafficProfile::HighLatency,
    ];

    /// (message_size bytes, message_interval seconds)
    #[must_use]
    pub fn message_shape(self) -> (f64, f64) {
        match self {
            TrafficProfile::LowLatency => (512.0, 0.3),
            TrafficProfile::MediumLatency => (512.0, 5.0),
            TrafficProfile::HighLatency => (5.0 * 1024.0 * 1024.0, 600.0),
        }
    }

    /// Copy of `params` with this profile's message shape
    #[must_use]
    pub fn apply_to(self, params: Parameters) -> Parameters {
        let (size, interval) = self.message_shape();
        params
            .with(ParameterField::MessageSize, size)
            .with(ParameterField::MessageInterval, interval)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TrafficProfile::LowLatency => "low_latency",
            TrafficProfile::MediumLatency => "medium_latency",
            TrafficProfile::HighLatency => "high_latency",
        }
    }
}

/// Noise ratio against client population on the reference deployment
#[must_use]
pub fn reference_sweep() -> SweepSpec {
    SweepSpec::new(reference())
        .dimension(SweepDimension::new(
            ParameterField::NoiseSignal,
            vec![0.0, 0.5, 2.0, 9.0],
        ))
        .dimension(SweepDimension::new(
            ParameterField::NumClients,
            vec![1e4, 1e5, 1e6, 1e8],
        ))
}

/// Consensus interval, noise ratio, and client population from a thousand
/// to a billion clients
#[must_use]
pub fn consensus_interval_sweep() -> SweepSpec {
    SweepSpec::new(low_latency())
        .dimension(SweepDimension::new(
            ParameterField::ConsensusInterval,
            vec![60.0, 600.0, 3.0 * HOUR, DAY],
        ))
        .dimension(SweepDimension::new(
            ParameterField::NoiseSignal,
            vec![0.0, 2.0, 9.0, 99.0],
        ))
        .dimension(SweepDimension::geometric(
            ParameterField::NumClients,
            1e3,
            10.0,
            7,
        ))
}

/// Send interval against message size at a fixed population
#[must_use]
pub fn message_shape_sweep() -> SweepSpec {
    SweepSpec::new(reference())
        .dimension(SweepDimension::new(
            ParameterField::MessageInterval,
            vec![0.3, 1.0, 5.0, 30.0, 60.0, 300.0, 600.0, HOUR],
        ))
        .dimension(SweepDimension::new(
            ParameterField::MessageSize,
            vec![512.0, 1024.0, 50.0 * 1024.0, 1e6, 1e7],
        ))
}

/// Registered sweep presets, by CLI name
pub const SWEEP_PRESETS: [(&str, &str); 3] = [
    ("reference", "noise ratio x clients on the reference deployment"),
    (
        "consensus_interval",
        "consensus interval x noise ratio x clients, low-latency traffic",
    ),
    (
        "message_shape",
        "message interval x message size on the reference deployment",
    ),
];

/// Look up a sweep preset by name
pub fn named(name: &str) -> Result<SweepSpec, SweepError> {
    match name {
        "reference" => Ok(reference_sweep()),
        "consensus_interval" => Ok(consensus_interval_sweep()),
        "message_shape" => Ok(message_shape_sweep()),
        other => Err(SweepError::UnknownPreset(other.to_string())),
    }
}
