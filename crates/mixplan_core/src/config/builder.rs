//! Parameters Builder
//!
//! Fluent construction of a `Parameters` value. Starts from the reference
//! deployment so that only the fields under study need to be named.
//!
//! # Example
//!
//! ```
//! use mixplan_core::config::{ParametersBuilder, TrafficProfile};
//!
//! let params = ParametersBuilder::new()
//!     .authorities(5)
//!     .clients(1_000_000)
//!     .profile(TrafficProfile::MediumLatency)
//!     .noise_signal(2.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.message_interval, 5.0);
//! ```

use super::presets::{self, TrafficProfile};
use crate::error::Result;
use crate::model::Parameters;

/// Builder for `Parameters`; `build` validates
#[derive(Debug, Clone, Copy)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParametersBuilder {
    /// Seeded with `presets::reference()`
    #[must_use]
    pub fn new() -> Self {
        Self::from_parameters(presets::reference())
    }

    /// Seeded with an existing parameter set
    #[must_use]
    pub fn from_parameters(params: Parameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn authorities(mut self, n: u32) -> Self {
        self.params.num_authorities = f64::from(n);
        self
    }

    #[must_use]
    pub fn clients(mut self, n: u64) -> Self {
        self.params.num_clients = n as f64;
        self
    }

    /// Seconds between consensus publications
    #[must_use]
    pub fn consensus_interval(mut self, secs: f64) -> Self {
        self.params.consensus_interval = secs;
        self
    }

    /// Per-mix budget in bits/second
    #[must_use]
    pub fn mix_bandwidth(mut self, bits_per_sec: f64) -> Self {
        self.params.mix_bandwidth = bits_per_sec;
        self
    }

    /// Average seconds between one client's messages
    #[must_use]
    pub fn message_interval(mut self, secs: f64) -> Self {
        self.params.message_interval = secs;
        self
    }

    #[must_use]
    pub fn message_size(mut self, bytes: f64) -> Self {
        self.params.message_size = bytes;
        self
    }

    #[must_use]
    pub fn descriptor_size(mut self, bytes: f64) -> Self {
        self.params.descriptor_size = bytes;
        self
    }

    #[must_use]
    pub fn signature_size(mut self, bytes: f64) -> Self {
        self.params.signature_size = bytes;
        self
    }

    #[must_use]
    pub fn noise_signal(mut self, ratio: f64) -> Self {
        self.params.noise_signal = ratio;
        self
    }

    /// Set message size and interval from a traffic profile
    #[must_use]
    pub fn profile(mut self, profile: TrafficProfile) -> Self {
        self.params = profile.apply_to(self.params);
        self
    }

    /// Validate and return the parameters
    pub fn build(self) -> Result<Parameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}
