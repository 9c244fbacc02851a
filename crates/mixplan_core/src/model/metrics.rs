use serde::{Deserialize, Serialize};

/// Capacity metrics derived from one `Parameters` value.
///
/// All values are in base units: bits/second for rates, bytes for sizes.
/// Nothing here is rounded; display policy belongs to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Genuine plus decoy bitrate of one client
    pub client_average_bandwidth: f64,
    /// Real-valued mix count; ignores consensus load
    pub num_mixes_required: f64,
    /// Size of one consensus document, bytes
    pub consensus_document_size: f64,
    /// Aggregate bitrate spent distributing the consensus
    pub consensus_bandwidth: f64,
    /// Consensus plus all client traffic
    pub network_bandwidth: f64,
    /// Share of network bandwidth spent on the consensus, in [0, 1]
    pub consensus_bandwidth_ratio: f64,
    /// Per-client share of the consensus bitrate
    pub consensus_overhead_per_client: f64,
    /// Genuine channel left to one client after decoy and consensus overhead.
    /// Negative means capacity is exhausted.
    pub channel_bandwidth_per_client: f64,
    /// Clients one mix can carry; `None` when clients send nothing
    pub clients_per_mix: Option<f64>,
    /// Network bitrate divided evenly over clients
    pub network_bandwidth_per_client: f64,
    /// Bytes downloaded by all clients in one consensus interval
    pub consensus_download_volume: f64,
}

impl Metrics {
    /// Whole mixes needed to cover the client demand
    #[must_use]
    pub fn mixes_required_ceil(&self) -> u64 {
        self.num_mixes_required.ceil() as u64
    }

    /// False when overheads eat the whole per-client channel
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.channel_bandwidth_per_client >= 0.0
    }
}

/// Selects a single metric out of `Metrics`, for tables and matrix slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    ClientAverageBandwidth,
    NumMixesRequired,
    ConsensusDocumentSize,
    ConsensusBandwidth,
    NetworkBandwidth,
    ConsensusBandwidthRatio,
    ConsensusOverheadPerClient,
    ChannelBandwidthPerClient,
    ClientsPerMix,
    NetworkBandwidthPerClient,
    ConsensusDownloadVolume,
}

impl MetricKind {
    pub const ALL: [MetricKind; 11] = [
        MetricKind::ClientAverageBandwidth,
        MetricKind::NumMixesRequired,
        MetricKind::ConsensusDocumentSize,
        MetricKind::ConsensusBandwidth,
        MetricKind::NetworkBandwidth,
        MetricKind::ConsensusBandwidthRatio,
        MetricKind::ConsensusOverheadPerClient,
        MetricKind::ChannelBandwidthPerClient,
        MetricKind::ClientsPerMix,
        MetricKind::NetworkBandwidthPerClient,
        MetricKind::ConsensusDownloadVolume,
    ];

    /// Extract this metric. `ClientsPerMix` reads as infinite when undefined.
    #[must_use]
    pub fn value(self, m: &Metrics) -> f64 {
        match self {
            Self::ClientAverageBandwidth => m.client_average_bandwidth,
            Self::NumMixesRequired => m.num_mixes_required,
            Self::ConsensusDocumentSize => m.consensus_document_size,
            Self::ConsensusBandwidth => m.consensus_bandwidth,
            Self::NetworkBandwidth => m.network_bandwidth,
            Self::ConsensusBandwidthRatio => m.consensus_bandwidth_ratio,
            Self::ConsensusOverheadPerClient => m.consensus_overhead_per_client,
            Self::ChannelBandwidthPerClient => m.channel_bandwidth_per_client,
            Self::ClientsPerMix => m.clients_per_mix.unwrap_or(f64::INFINITY),
            Self::NetworkBandwidthPerClient => m.network_bandwidth_per_client,
            Self::ConsensusDownloadVolume => m.consensus_download_volume,
        }
    }

    /// The snake_case key, as used in configs and on the command line
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ClientAverageBandwidth => "client_average_bandwidth",
            Self::NumMixesRequired => "num_mixes_required",
            Self::ConsensusDocumentSize => "consensus_document_size",
            Self::ConsensusBandwidth => "consensus_bandwidth",
            Self::NetworkBandwidth => "network_bandwidth",
            Self::ConsensusBandwidthRatio => "consensus_bandwidth_ratio",
            Self::ConsensusOverheadPerClient => "consensus_overhead_per_client",
            Self::ChannelBandwidthPerClient => "channel_bandwidth_per_client",
            Self::ClientsPerMix => "clients_per_mix",
            Self::NetworkBandwidthPerClient => "network_bandwidth_per_client",
            Self::ConsensusDownloadVolume => "consensus_download_volume",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ClientAverageBandwidth => "Client Bandwidth",
            Self::NumMixesRequired => "Mixes",
            Self::ConsensusDocumentSize => "Consensus Size",
            Self::ConsensusBandwidth => "Consensus Bandwidth",
            Self::NetworkBandwidth => "Network Bandwidth",
            Self::ConsensusBandwidthRatio => "Consensus Ratio",
            Self::ConsensusOverheadPerClient => "Consensus/Client",
            Self::ChannelBandwidthPerClient => "Channel/Client",
            Self::ClientsPerMix => "Clients/Mix",
            Self::NetworkBandwidthPerClient => "Network/Client",
            Self::ConsensusDownloadVolume => "Consensus Download",
        }
    }

    /// How the renderer should scale this metric
    #[must_use]
    pub fn unit(self) -> MetricUnit {
        match self {
            Self::ClientAverageBandwidth
            | Self::ConsensusBandwidth
            | Self::NetworkBandwidth
            | Self::ConsensusOverheadPerClient
            | Self::ChannelBandwidthPerClient
            | Self::NetworkBandwidthPerClient => MetricUnit::BitsPerSecond,
            Self::ConsensusDocumentSize | Self::ConsensusDownloadVolume => MetricUnit::Bytes,
            Self::ConsensusBandwidthRatio => MetricUnit::Ratio,
            Self::NumMixesRequired | Self::ClientsPerMix => MetricUnit::Count,
        }
    }
}

/// Base unit a metric is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    BitsPerSecond,
    Bytes,
    Ratio,
    Count,
}
