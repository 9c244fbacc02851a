//! Command-line definitions

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use mixplan_core::{MetricKind, TrafficProfile};

use crate::logging::default_log_dir;

#[derive(Parser, Debug)]
#[command(name = "mixplan")]
#[command(about = "Capacity planning for mix networks: mixes, consensus load, per-client bandwidth")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Write logs to mixplan.log in this directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Write logs to mixplan.log in the platform data dir instead of stderr
    #[arg(long, global = true, conflicts_with = "log_dir")]
    pub log_file: bool,
}

impl Args {
    /// Directory for the log file; `None` means log to stderr
    pub fn log_target(&self) -> Option<PathBuf> {
        match &self.log_dir {
            Some(dir) => Some(dir.clone()),
            None if self.log_file => default_log_dir(),
            None => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a single deployment
    Eval(EvalArgs),
    /// Evaluate every point of a parameter sweep
    Sweep(SweepArgs),
    /// List sweep presets, or print one as YAML
    Presets(PresetsArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct EvalArgs {
    /// YAML file with the deployment parameters (default: reference deployment)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Traffic profile setting message size and interval
    #[arg(short, long, value_parser = parse_profile)]
    pub profile: Option<TrafficProfile>,

    #[arg(long)]
    pub authorities: Option<u32>,

    #[arg(long)]
    pub clients: Option<u64>,

    /// Decoy messages per genuine message
    #[arg(long)]
    pub noise: Option<f64>,

    /// Per-mix bandwidth, bits/s
    #[arg(long)]
    pub mix_bandwidth: Option<f64>,

    /// Seconds between consensus documents
    #[arg(long)]
    pub consensus_interval: Option<f64>,

    /// Seconds between messages from one client
    #[arg(long)]
    pub message_interval: Option<f64>,

    /// Message size, bytes
    #[arg(long)]
    pub message_size: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = EvalFormat::Text)]
    pub format: EvalFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct SweepArgs {
    /// YAML sweep file: a `base` deployment plus `dimensions`
    #[arg(short, long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Named sweep preset (see `mixplan presets`)
    #[arg(short, long, default_value = "reference")]
    pub preset: String,

    #[arg(short, long, value_enum, default_value_t = SweepFormat::Table)]
    pub format: SweepFormat,

    /// Metric to show; repeat for several. Matrix output uses the first.
    #[arg(short, long = "metric", value_parser = parse_metric)]
    pub metrics: Vec<MetricKind>,

    /// Matrix rows: index of the swept dimension
    #[arg(long, default_value_t = 0)]
    pub row_dim: usize,

    /// Matrix columns: index of the swept dimension
    #[arg(long, default_value_t = 1)]
    pub col_dim: usize,

    /// Matrix position along the other dimensions, one per dimension
    #[arg(long, value_delimiter = ',')]
    pub at: Vec<usize>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct PresetsArgs {
    /// Print this preset as a YAML sweep file
    pub name: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvalFormat {
    #[default]
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepFormat {
    Table,
    Json,
    Matrix,
}

fn parse_profile(s: &str) -> Result<TrafficProfile, String> {
    let key = s.replace('-', "_");
    TrafficProfile::ALL
        .into_iter()
        .find(|p| p.name() == key || p.name().trim_end_matches("_latency") == key)
        .ok_or_else(|| {
            let names: Vec<_> = TrafficProfile::ALL.iter().map(|p| p.name()).collect();
            format!("unknown profile {s:?} (expected one of: {})", names.join(", "))
        })
}

fn parse_metric(s: &str) -> Result<MetricKind, String> {
    MetricKind::from_name(&s.replace('-', "_")).ok_or_else(|| {
        let names: Vec<_> = MetricKind::ALL.iter().map(|m| m.name()).collect();
        format!("unknown metric {s:?} (expected one of: {})", names.join(", "))
    })
}
