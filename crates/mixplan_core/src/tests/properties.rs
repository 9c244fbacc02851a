//! Invariants of the capacity model over randomized valid parameters
//!
//! Parameters are drawn from a seeded `StdRng` so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::assert_close;
use crate::capacity::evaluate;
use crate::model::{ParameterField, Parameters};

const SAMPLES: usize = 500;

fn random_parameters(rng: &mut StdRng) -> Parameters {
    Parameters {
        num_authorities: f64::from(rng.random_range(1..=30u32)),
        num_clients: rng.random_range(1..=1_000_000_000u64) as f64,
        consensus_interval: rng.random_range(1.0..=86_400.0),
        mix_bandwidth: rng.random_range(1e6..=1e10),
        message_interval: rng.random_range(0.01..=3_600.0),
        message_size: rng.random_range(1.0..=1e7),
        descriptor_size: rng.random_range(1.0..=1_000.0),
        signature_size: rng.random_range(1.0..=512.0),
        noise_signal: rng.random_range(0.0..=100.0),
    }
}

#[test]
fn test_network_bandwidth_decomposes() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..SAMPLES {
        let p = random_parameters(&mut rng);
        let m = evaluate(&p).unwrap();
        assert_close(
            m.network_bandwidth,
            m.consensus_bandwidth + m.client_average_bandwidth * p.num_clients,
        );
    }
}

#[test]
fn test_consensus_ratio_is_a_fraction() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..SAMPLES {
        let p = random_parameters(&mut rng);
        let m = evaluate(&p).unwrap();
        assert!(
            (0.0..=1.0).contains(&m.consensus_bandwidth_ratio),
            "ratio {} out of range for {p:?}",
            m.consensus_bandwidth_ratio
        );
    }
}

#[test]
fn test_mixes_monotone_in_clients_and_noise() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..SAMPLES {
        let p = random_parameters(&mut rng);
        let base = evaluate(&p).unwrap().num_mixes_required;

        let more_clients = p.with(ParameterField::NumClients, p.num_clients + 1.0);
        assert!(evaluate(&more_clients).unwrap().num_mixes_required >= base);

        let more_noise = p.with(ParameterField::NoiseSignal, p.noise_signal + 0.5);
        assert!(evaluate(&more_noise).unwrap().num_mixes_required >= base);
    }
}

#[test]
fn test_no_noise_means_raw_bitrate() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..SAMPLES {
        let p = random_parameters(&mut rng).with(ParameterField::NoiseSignal, 0.0);
        let m = evaluate(&p).unwrap();
        assert_eq!(
            m.client_average_bandwidth,
            p.message_size * 8.0 / p.message_interval
        );
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let p = random_parameters(&mut rng);
        assert_eq!(evaluate(&p), evaluate(&p));
    }
}
