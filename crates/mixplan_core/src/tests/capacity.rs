//! Tests for the capacity formulas
//!
//! These tests verify that:
//! - Each formula matches hand-computed values for a known deployment
//! - Zero divisors and negative inputs are rejected before any computation
//! - Infeasible deployments come back as negative channel capacity, not errors

use super::{assert_close, scenario};
use crate::capacity::{self, CapacityModel, evaluate};
use crate::error::ParameterError;
use crate::model::ParameterField;

/// The deployment at 100k clients needs a little over eight mixes
#[test]
fn test_scenario_client_bandwidth_and_mixes() {
    let p = scenario();

    assert_eq!(capacity::client_average_bandwidth(&p).unwrap(), 40_960.0);
    assert_close(capacity::num_mixes_required(&p).unwrap(), 8.192);
}

/// At 100M clients the same deployment needs 8192 mixes
#[test]
fn test_scenario_at_hundred_million_clients() {
    let p = scenario().with(ParameterField::NumClients, 1e8);
    let m = evaluate(&p).unwrap();

    assert_eq!(m.client_average_bandwidth, 40_960.0);
    assert_close(m.num_mixes_required, 8192.0);
    assert_eq!(m.mixes_required_ceil(), 8192);
    assert_close(m.consensus_document_size, 1_131_072.0);
}

#[test]
fn test_scenario_consensus_metrics() {
    let m = evaluate(&scenario()).unwrap();

    // 8.192 * 138 + 9 * 64
    assert_close(m.consensus_document_size, 1706.496);

    // (2*8.192*138*9 + 64*9 + 1e5*8.192*138 + 1e5*64*9) / 10800
    let numerator = 2.0 * 8.192 * 138.0 * 9.0 + 576.0 + 1e5 * 8.192 * 138.0 + 1e5 * 576.0;
    assert_close(m.consensus_bandwidth, numerator / 10_800.0);

    assert_close(m.network_bandwidth, m.consensus_bandwidth + 40_960.0 * 1e5);
    assert_close(
        m.consensus_bandwidth_ratio,
        m.consensus_bandwidth / m.network_bandwidth,
    );
    assert_close(m.consensus_overhead_per_client, m.consensus_bandwidth / 1e5);
    assert_close(
        m.channel_bandwidth_per_client,
        40_960.0 - m.consensus_overhead_per_client,
    );
    assert!(m.is_feasible());
}

#[test]
fn test_supplemental_metrics() {
    let m = evaluate(&scenario()).unwrap();

    assert_close(m.clients_per_mix.unwrap(), 5e8 / 40_960.0);
    assert_close(m.network_bandwidth_per_client, m.network_bandwidth / 1e5);
    assert_close(m.consensus_download_volume, 1706.496 * 1e5);
}

/// Decoy traffic scales the client bitrate but not the genuine channel
#[test]
fn test_noise_scales_client_bandwidth() {
    let quiet = evaluate(&scenario()).unwrap();
    let noisy = evaluate(&scenario().with(ParameterField::NoiseSignal, 2.0)).unwrap();

    assert_close(noisy.client_average_bandwidth, 3.0 * quiet.client_average_bandwidth);
    assert_close(noisy.num_mixes_required, 3.0 * quiet.num_mixes_required);
    // Genuine share is 40960 before consensus overhead in both cases
    assert!(noisy.channel_bandwidth_per_client < 40_960.0);
    assert!(noisy.channel_bandwidth_per_client > 40_000.0);
}

/// A billion chatty clients behind a one-minute consensus exhaust capacity
#[test]
fn test_infeasible_deployment_is_not_an_error() {
    let p = crate::config::presets::low_latency()
        .with(ParameterField::NumClients, 1e9)
        .with(ParameterField::NoiseSignal, 99.0);

    let m = evaluate(&p).unwrap();
    assert!(m.channel_bandwidth_per_client < 0.0);
    assert!(!m.is_feasible());
    assert!(m.consensus_bandwidth_ratio > 0.7 && m.consensus_bandwidth_ratio < 0.71);
}

#[test]
fn test_zero_consensus_interval_is_domain_error() {
    let p = scenario().with(ParameterField::ConsensusInterval, 0.0);

    assert_eq!(
        evaluate(&p).unwrap_err(),
        ParameterError::DomainError {
            field: "consensus_interval"
        }
    );
    assert!(capacity::consensus_bandwidth(&p).is_err());
    // Validation is eager: even formulas that don't divide by the interval fail
    assert!(capacity::client_average_bandwidth(&p).is_err());
}

#[test]
fn test_every_entry_point_validates() {
    let p = scenario().with(ParameterField::MessageSize, -1.0);
    let entry_points: [fn(&crate::model::Parameters) -> crate::error::Result<f64>; 8] = [
        capacity::client_average_bandwidth,
        capacity::num_mixes_required,
        capacity::consensus_document_size,
        capacity::consensus_bandwidth,
        capacity::network_bandwidth,
        capacity::consensus_bandwidth_ratio,
        capacity::consensus_overhead_per_client,
        capacity::channel_bandwidth_per_client,
    ];
    for f in entry_points {
        assert!(matches!(
            f(&p),
            Err(ParameterError::InvalidParameter {
                field: "message_size",
                ..
            })
        ));
    }
}

/// Free functions and the model agree
#[test]
fn test_model_matches_free_functions() {
    let p = scenario().with(ParameterField::NoiseSignal, 0.5);
    let model = CapacityModel::new(p).unwrap();
    let m = model.metrics();

    assert_eq!(model.parameters(), &p);
    assert_eq!(capacity::network_bandwidth(&p).unwrap(), m.network_bandwidth);
    assert_eq!(
        capacity::consensus_overhead_per_client(&p).unwrap(),
        m.consensus_overhead_per_client
    );
    assert_eq!(
        capacity::channel_bandwidth_per_client(&p).unwrap(),
        m.channel_bandwidth_per_client
    );
}

/// Huge messages sent every tenth of a nanosecond overflow the network bitrate
#[test]
fn test_overflowing_bandwidth_is_rejected() {
    let p = scenario()
        .with(ParameterField::MessageSize, 1e300)
        .with(ParameterField::MessageInterval, 1e-10);
    assert!(p.validate().is_ok());

    let err = evaluate(&p).unwrap_err();
    assert!(
        matches!(
            err,
            ParameterError::InvalidParameter {
                field: "message_size",
                value,
                ..
            } if value == 1e300
        ),
        "{err:?}"
    );
    assert!(capacity::consensus_bandwidth_ratio(&p).is_err());
    assert!(CapacityModel::new(p).is_err());
}

/// Overflow through the consensus term alone is caught too
#[test]
fn test_overflowing_consensus_volume_is_rejected() {
    let p = scenario()
        .with(ParameterField::DescriptorSize, 1e300)
        .with(ParameterField::NumClients, 1e9);

    let err = evaluate(&p).unwrap_err();
    assert_eq!(err.field(), "descriptor_size");
    assert!(!err.is_domain_error());
}

/// Zero-size messages and signatures leave nothing on the wire
#[test]
fn test_silent_network_has_zero_ratio() {
    let p = scenario()
        .with(ParameterField::MessageSize, 0.0)
        .with(ParameterField::SignatureSize, 0.0);
    let m = evaluate(&p).unwrap();

    assert_eq!(m.network_bandwidth, 0.0);
    assert_eq!(m.consensus_bandwidth_ratio, 0.0);
    assert_eq!(m.num_mixes_required, 0.0);
    assert_eq!(m.clients_per_mix, None);
}
