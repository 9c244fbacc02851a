//! Closed-form capacity model for a mix network.
//!
//! Maps one `Parameters` value to the `Metrics` a planner cares about: how
//! many mixes the client load needs, and how much of the network's bitrate
//! goes to distributing the consensus instead of carrying messages.
//!
//! # Mix sizing is one-pass
//!
//! `num_mixes_required` divides client demand by per-mix capacity and
//! ignores consensus load. The consensus bitrate itself grows with the mix
//! count, so including it would need a fixed-point solve. The estimate here
//! is the lower bound that the rest of the metrics build on.
//!
//! # Example
//!
//! ```
//! use mixplan_core::capacity::CapacityModel;
//! use mixplan_core::model::Parameters;
//!
//! let params = Parameters::builder().clients(100_000).build().unwrap();
//! let model = CapacityModel::new(params).unwrap();
//! assert!(model.num_mixes_required() > 0.0);
//! ```

use crate::config::presets;
use crate::error::{ParameterError, Result};
use crate::model::{Metrics, ParameterField, Parameters};

const BITS_PER_BYTE: f64 = 8.0;

/// A validated parameter set with the capacity formulas as methods.
///
/// Construction is the only fallible step. Once a model exists every
/// formula is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityModel {
    p: Parameters,
}

impl CapacityModel {
    /// Validate `params` and wrap them.
    ///
    /// Besides the per-field checks, rejects parameter sets whose derived
    /// bitrates or volumes overflow `f64`; the error names the field that
    /// pushed them out of range.
    pub fn new(params: Parameters) -> Result<Self> {
        params.validate()?;
        let model = Self { p: params };
        if !model.is_representable() {
            let field = model.overflow_field();
            return Err(ParameterError::InvalidParameter {
                field: field.name(),
                value: params.get(field),
                reason: "drives derived bandwidth out of floating-point range",
            });
        }
        Ok(model)
    }

    /// Every metric is bounded by one of these two, so both finite means all are
    fn is_representable(&self) -> bool {
        self.network_bandwidth().is_finite() && self.consensus_download_volume().is_finite()
    }

    /// The field furthest from its reference value, in orders of magnitude,
    /// among those whose reference value brings the model back into range.
    /// If no single field does, the furthest field overall.
    fn overflow_field(&self) -> ParameterField {
        let reference = presets::reference();
        let distance = |field: ParameterField| {
            let (value, base) = (self.p.get(field), reference.get(field));
            if value > 0.0 && base > 0.0 {
                (value / base).ln().abs()
            } else {
                0.0
            }
        };
        let restores = |field: ParameterField| {
            Self {
                p: self.p.with(field, reference.get(field)),
            }
            .is_representable()
        };
        let furthest = |fields: &mut dyn Iterator<Item = ParameterField>| {
            fields
                .map(|field| (field, distance(field)))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(field, _)| field)
        };

        furthest(&mut ParameterField::ALL.into_iter().filter(|&f| restores(f)))
            .or_else(|| furthest(&mut ParameterField::ALL.into_iter()))
            .unwrap_or(ParameterField::NumClients)
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.p
    }

    /// Genuine plus decoy bits/second sent by one client
    #[must_use]
    pub fn client_average_bandwidth(&self) -> f64 {
        let decoy_overhead = 1.0 + self.p.noise_signal;
        decoy_overhead * (self.p.message_size * BITS_PER_BYTE / self.p.message_interval)
    }

    /// Total client demand over per-mix capacity. Not rounded.
    #[must_use]
    pub fn num_mixes_required(&self) -> f64 {
        self.p.num_clients * self.client_average_bandwidth() / self.p.mix_bandwidth
    }

    /// One descriptor per mix plus one signature per authority, bytes
    #[must_use]
    pub fn consensus_document_size(&self) -> f64 {
        self.num_mixes_required() * self.p.descriptor_size
            + self.p.num_authorities * self.p.signature_size
    }

    /// Aggregate bitrate of consensus distribution.
    ///
    /// Authorities trade descriptor bundles pairwise and then their final
    /// signatures; every client pulls all descriptors and signatures once
    /// per interval.
    #[must_use]
    pub fn consensus_bandwidth(&self) -> f64 {
        let p = &self.p;
        let mixes = self.num_mixes_required();

        let mut b = 2.0 * mixes * p.descriptor_size * p.num_authorities;
        b += p.signature_size * p.num_authorities;
        b += p.num_clients * mixes * p.descriptor_size;
        b += p.num_clients * p.signature_size * p.num_authorities;
        b / p.consensus_interval
    }

    /// Consensus bitrate plus all client traffic
    #[must_use]
    pub fn network_bandwidth(&self) -> f64 {
        self.consensus_bandwidth() + self.client_average_bandwidth() * self.p.num_clients
    }

    /// Fraction of network bitrate spent on the consensus.
    ///
    /// Zero when the network carries nothing at all.
    #[must_use]
    pub fn consensus_bandwidth_ratio(&self) -> f64 {
        let network = self.network_bandwidth();
        if network == 0.0 {
            return 0.0;
        }
        self.consensus_bandwidth() / network
    }

    /// Consensus cost apportioned uniformly over clients
    #[must_use]
    pub fn consensus_overhead_per_client(&self) -> f64 {
        self.consensus_bandwidth_ratio() * self.network_bandwidth_per_client()
    }

    /// Genuine channel left to a client once decoy and consensus overhead are
    /// taken out. May be negative.
    #[must_use]
    pub fn channel_bandwidth_per_client(&self) -> f64 {
        self.client_average_bandwidth() / (1.0 + self.p.noise_signal)
            - self.consensus_overhead_per_client()
    }

    /// Inverse of the scaling factor `k`: clients a single mix can absorb
    #[must_use]
    pub fn clients_per_mix(&self) -> Option<f64> {
        let per_client = self.client_average_bandwidth();
        (per_client > 0.0).then(|| self.p.mix_bandwidth / per_client)
    }

    #[must_use]
    pub fn network_bandwidth_per_client(&self) -> f64 {
        self.network_bandwidth() / self.p.num_clients
    }

    /// Bytes all clients download per consensus interval
    #[must_use]
    pub fn consensus_download_volume(&self) -> f64 {
        self.consensus_document_size() * self.p.num_clients
    }

    /// Compute every metric at once
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        Metrics {
            client_average_bandwidth: self.client_average_bandwidth(),
            num_mixes_required: self.num_mixes_required(),
            consensus_document_size: self.consensus_document_size(),
            consensus_bandwidth: self.consensus_bandwidth(),
            network_bandwidth: self.network_bandwidth(),
            consensus_bandwidth_ratio: self.consensus_bandwidth_ratio(),
            consensus_overhead_per_client: self.consensus_overhead_per_client(),
            channel_bandwidth_per_client: self.channel_bandwidth_per_client(),
            clients_per_mix: self.clients_per_mix(),
            network_bandwidth_per_client: self.network_bandwidth_per_client(),
            consensus_download_volume: self.consensus_download_volume(),
        }
    }
}

/// Validate `params` and compute all metrics
pub fn evaluate(params: &Parameters) -> Result<Metrics> {
    Ok(CapacityModel::new(*params)?.metrics())
}

// Single-formula entry points. Each validates before computing.

pub fn client_average_bandwidth(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.client_average_bandwidth())
}

pub fn num_mixes_required(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.num_mixes_required())
}

pub fn consensus_document_size(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.consensus_document_size())
}

pub fn consensus_bandwidth(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.consensus_bandwidth())
}

pub fn network_bandwidth(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.network_bandwidth())
}

pub fn consensus_bandwidth_ratio(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.consensus_bandwidth_ratio())
}

pub fn consensus_overhead_per_client(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.consensus_overhead_per_client())
}

pub fn channel_bandwidth_per_client(params: &Parameters) -> Result<f64> {
    Ok(CapacityModel::new(*params)?.channel_bandwidth_per_client())
}
