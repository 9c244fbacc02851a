use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result};

/// Input to the capacity model.
///
/// Every field is carried as `f64` so that a sweep can override any of them
/// with the same grid machinery. Counts must still be whole numbers, which
/// `validate` enforces.
///
/// Units: bits/second for bandwidth, bytes for sizes, seconds for time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Directory authorities signing the consensus
    pub num_authorities: f64,
    /// Active clients
    pub num_clients: f64,
    /// Seconds between consensus publications
    pub consensus_interval: f64,
    /// Sustainable throughput per mix, bits/second
    pub mix_bandwidth: f64,
    /// Average seconds between a client's messages
    pub message_interval: f64,
    /// Client payload size, bytes
    pub message_size: f64,
    /// One mix descriptor in the consensus, bytes
    pub descriptor_size: f64,
    /// One authority signature, bytes
    pub signature_size: f64,
    /// Decoy volume over genuine volume; 0 disables cover traffic
    #[serde(default)]
    pub noise_signal: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        crate::config::presets::reference()
    }
}

impl Parameters {
    /// Start a fluent builder seeded with the reference deployment
    #[must_use]
    pub fn builder() -> crate::config::ParametersBuilder {
        crate::config::ParametersBuilder::new()
    }

    /// Read one field by name
    #[must_use]
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::NumAuthorities => self.num_authorities,
            ParameterField::NumClients => self.num_clients,
            ParameterField::ConsensusInterval => self.consensus_interval,
            ParameterField::MixBandwidth => self.mix_bandwidth,
            ParameterField::MessageInterval => self.message_interval,
            ParameterField::MessageSize => self.message_size,
            ParameterField::DescriptorSize => self.descriptor_size,
            ParameterField::SignatureSize => self.signature_size,
            ParameterField::NoiseSignal => self.noise_signal,
        }
    }

    /// Return a copy with one field replaced. `self` is left untouched.
    #[must_use]
    pub fn with(self, field: ParameterField, value: f64) -> Self {
        let mut next = self;
        let slot = match field {
            ParameterField::NumAuthorities => &mut next.num_authorities,
            ParameterField::NumClients => &mut next.num_clients,
            ParameterField::ConsensusInterval => &mut next.consensus_interval,
            ParameterField::MixBandwidth => &mut next.mix_bandwidth,
            ParameterField::MessageInterval => &mut next.message_interval,
            ParameterField::MessageSize => &mut next.message_size,
            ParameterField::DescriptorSize => &mut next.descriptor_size,
            ParameterField::SignatureSize => &mut next.signature_size,
            ParameterField::NoiseSignal => &mut next.noise_signal,
        };
        *slot = value;
        next
    }

    /// Check every field against its domain.
    ///
    /// Field constraints (finite, non-negative, whole counts) are checked
    /// across all fields first; zero divisors are reported only once every
    /// field is individually well-formed.
    pub fn validate(&self) -> Result<()> {
        for field in ParameterField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(ParameterError::InvalidParameter {
                    field: field.name(),
                    value,
                    reason: "must be a finite number",
                });
            }
            if value < 0.0 {
                return Err(ParameterError::InvalidParameter {
                    field: field.name(),
                    value,
                    reason: "must not be negative",
                });
            }
            if field.is_count() && value.fract() != 0.0 {
                return Err(ParameterError::InvalidParameter {
                    field: field.name(),
                    value,
                    reason: "must be a whole number",
                });
            }
        }

        for field in ParameterField::DIVISORS {
            if self.get(field) == 0.0 {
                return Err(ParameterError::DomainError {
                    field: field.name(),
                });
            }
        }

        Ok(())
    }
}

/// Names a single `Parameters` field.
///
/// Used as the axis of a sweep dimension and as a stable key in YAML configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    NumAuthorities,
    NumClients,
    ConsensusInterval,
    MixBandwidth,
    MessageInterval,
    MessageSize,
    DescriptorSize,
    SignatureSize,
    NoiseSignal,
}

impl ParameterField {
    pub const ALL: [ParameterField; 9] = [
        ParameterField::NumAuthorities,
        ParameterField::NumClients,
        ParameterField::ConsensusInterval,
        ParameterField::MixBandwidth,
        ParameterField::MessageInterval,
        ParameterField::MessageSize,
        ParameterField::DescriptorSize,
        ParameterField::SignatureSize,
        ParameterField::NoiseSignal,
    ];

    /// Fields that appear as denominators in the capacity formulas
    pub const DIVISORS: [ParameterField; 4] = [
        ParameterField::MessageInterval,
        ParameterField::MixBandwidth,
        ParameterField::ConsensusInterval,
        ParameterField::NumClients,
    ];

    /// The snake_case key used in configs and error messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ParameterField::NumAuthorities => "num_authorities",
            ParameterField::NumClients => "num_clients",
            ParameterField::ConsensusInterval => "consensus_interval",
            ParameterField::MixBandwidth => "mix_bandwidth",
            ParameterField::MessageInterval => "message_interval",
            ParameterField::MessageSize => "message_size",
            ParameterField::DescriptorSize => "descriptor_size",
            ParameterField::SignatureSize => "signature_size",
            ParameterField::NoiseSignal => "noise_signal",
        }
    }

    /// Human-readable label for table headers
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ParameterField::NumAuthorities => "Authorities",
            ParameterField::NumClients => "Clients",
            ParameterField::ConsensusInterval => "Consensus Interval",
            ParameterField::MixBandwidth => "Mix Bandwidth",
            ParameterField::MessageInterval => "Message Interval",
            ParameterField::MessageSize => "Message Size",
            ParameterField::DescriptorSize => "Descriptor Size",
            ParameterField::SignatureSize => "Signature Size",
            ParameterField::NoiseSignal => "Noise/Signal",
        }
    }

    /// Look a field up by its snake_case key
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub fn is_count(self) -> bool {
        matches!(
            self,
            ParameterField::NumAuthorities | ParameterField::NumClients
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Parameters {
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

    #[test]
    fn test_valid_parameters_pass() {
        assert_eq!(scenario().validate(), Ok(()));
    }

    #[test]
    fn test_zero_divisors_are_domain_errors() {
        for field in ParameterField::DIVISORS {
            let err = scenario().with(field, 0.0).validate().unwrap_err();
            assert_eq!(err, ParameterError::DomainError { field: field.name() });
        }
    }

    #[test]
    fn test_zero_non_divisor_is_allowed() {
        let p = scenario()
            .with(ParameterField::NumAuthorities, 0.0)
            .with(ParameterField::NoiseSignal, 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_negative_noise_is_invalid() {
        let err = scenario()
            .with(ParameterField::NoiseSignal, -0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ParameterError::InvalidParameter {
                field: "noise_signal",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_divisor_reports_invalid_before_domain() {
        // Another divisor is zero, but the negative size is reported first
        let p = scenario()
            .with(ParameterField::MixBandwidth, 0.0)
            .with(ParameterField::DescriptorSize, -1.0);
        let err = p.validate().unwrap_err();
        assert!(!err.is_domain_error());
        assert_eq!(err.field(), "descriptor_size");
    }

    #[test]
    fn test_non_finite_and_fractional_counts() {
        let nan = scenario().with(ParameterField::MessageSize, f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(ParameterError::InvalidParameter {
                reason: "must be a finite number",
                ..
            })
        ));

        let fractional = scenario().with(ParameterField::NumClients, 10.5);
        assert!(matches!(
            fractional.validate(),
            Err(ParameterError::InvalidParameter {
                field: "num_clients",
                reason: "must be a whole number",
                ..
            })
        ));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = scenario();
        let changed = base.with(ParameterField::NumClients, 1.0);
        assert_eq!(base.num_clients, 100_000.0);
        assert_eq!(changed.num_clients, 1.0);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ParameterField::ALL {
            assert_eq!(ParameterField::from_name(field.name()), Some(field));
        }
        assert_eq!(ParameterField::from_name("frequency"), None);
    }
}
