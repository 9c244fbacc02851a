//! Integration tests for the capacity model and sweep driver
//!
//! Tests are organized by topic:
//! - `capacity` - Formula values for known deployments
//! - `properties` - Invariants checked over randomized valid parameters
//! - `sweep` - Enumeration order, restartability, and per-point failures

mod capacity;
mod properties;

use crate::model::Parameters;

/// Nine authorities, 100k clients, 50 KiB every 10 s over 500 Mbit/s mixes
pub(crate) fn scenario() -> Parameters {
    Parameters {
        num_authorities: 9.0,
        num_clients: 100_000.0,
        consensus_interval: 10_800.0,
        mix_bandwidth: 5e8,
        message_interval: 10.0,
        message_size: 51_200.0,
        descriptor_size: 138.0,
        signature_size: 64.0,
        noise_signal: 0.0,
    }
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
