//! Subcommand handlers. Each returns the rendered report; `main` decides
//! where it goes.

use std::path::Path;
use std::time::Instant;

use color_eyre::eyre::{WrapErr, eyre};
use mixplan_core::config::presets;
use mixplan_core::{MetricKind, ParametersBuilder, evaluate, evaluate_sweep};
use tracing::{debug, info, warn};

use crate::cli::{Command, EvalArgs, EvalFormat, PresetsArgs, SweepArgs, SweepFormat};
use crate::report::{self, DEFAULT_TABLE_METRICS};
use crate::util::io::{atomic_write, load_parameters, load_sweep, sweep_to_yaml};

/// Run one subcommand and return its report
pub fn run(command: &Command) -> color_eyre::Result<String> {
    match command {
        Command::Eval(args) => eval(args),
        Command::Sweep(args) => sweep(args),
        Command::Presets(args) => list_presets(args),
    }
}

/// Where the report should be written, if not stdout
pub fn output_path(command: &Command) -> Option<&Path> {
    match command {
        Command::Eval(args) => args.output.as_deref(),
        Command::Sweep(args) => args.output.as_deref(),
        Command::Presets(_) => None,
    }
}

/// Print to stdout, or write atomically to `output`
pub fn emit(output: Option<&Path>, content: &str) -> color_eyre::Result<()> {
    match output {
        Some(path) => {
            atomic_write(path, content)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "report written");
        }
        None => print!("{content}"),
    }
    Ok(())
}

pub fn eval(args: &EvalArgs) -> color_eyre::Result<String> {
    let base = match &args.config {
        Some(path) => load_parameters(path)?,
        None => presets::reference(),
    };

    let mut builder = ParametersBuilder::from_parameters(base);
    if let Some(profile) = args.profile {
        builder = builder.profile(profile);
    }
    if let Some(n) = args.authorities {
        builder = builder.authorities(n);
    }
    if let Some(n) = args.clients {
        builder = builder.clients(n);
    }
    if let Some(x) = args.noise {
        builder = builder.noise_signal(x);
    }
    if let Some(x) = args.mix_bandwidth {
        builder = builder.mix_bandwidth(x);
    }
    if let Some(x) = args.consensus_interval {
        builder = builder.consensus_interval(x);
    }
    if let Some(x) = args.message_interval {
        builder = builder.message_interval(x);
    }
    if let Some(x) = args.message_size {
        builder = builder.message_size(x);
    }

    let params = builder.build().wrap_err("invalid deployment parameters")?;
    let metrics = evaluate(&params)?;

    info!(
        mixes = metrics.mixes_required_ceil(),
        consensus_ratio = metrics.consensus_bandwidth_ratio,
        "deployment evaluated"
    );
    if !metrics.is_feasible() {
        warn!(
            channel_bandwidth_per_client = metrics.channel_bandwidth_per_client,
            "consensus overhead exceeds the per-client channel"
        );
    }

    match args.format {
        EvalFormat::Text => Ok(report::render_summary(&params, &metrics)),
        EvalFormat::Json => {
            let doc = report::evaluation_json(&params, &metrics);
            Ok(serde_json::to_string_pretty(&doc)? + "\n")
        }
    }
}

pub fn sweep(args: &SweepArgs) -> color_eyre::Result<String> {
    let spec = match &args.config {
        Some(path) => load_sweep(path)?,
        None => presets::named(&args.preset)?,
    };
    debug!(
        points = spec.total_points(),
        dimensions = ?spec.labels(),
        "starting sweep"
    );

    let started = Instant::now();
    let results = evaluate_sweep(&spec)?;

    for (row, err) in results.failures() {
        warn!(index = row.index, coords = ?row.coords, field = err.field(), "grid point failed: {err}");
    }
    info!(
        points = results.len(),
        failures = results.failure_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sweep complete"
    );

    let metrics: Vec<MetricKind> = if args.metrics.is_empty() {
        DEFAULT_TABLE_METRICS.to_vec()
    } else {
        args.metrics.clone()
    };

    match args.format {
        SweepFormat::Table => Ok(report::render_table(&results, &metrics)),
        SweepFormat::Json => Ok(serde_json::to_string_pretty(&report::render_json(&results))? + "\n"),
        SweepFormat::Matrix => {
            let fixed = if args.at.is_empty() {
                vec![0; results.ndim()]
            } else {
                args.at.clone()
            };
            report::render_matrix(&results, args.row_dim, args.col_dim, &fixed, metrics[0])
                .ok_or_else(|| {
                    eyre!(
                        "cannot slice a {}-dimensional sweep with rows from dimension {}, \
                         columns from dimension {} at position {:?}",
                        results.ndim(),
                        args.row_dim,
                        args.col_dim,
                        fixed
                    )
                })
        }
    }
}

pub fn list_presets(args: &PresetsArgs) -> color_eyre::Result<String> {
    if let Some(name) = &args.name {
        let spec = presets::named(name)?;
        return Ok(sweep_to_yaml(&spec)?);
    }

    let width = presets::SWEEP_PRESETS
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (name, description) in presets::SWEEP_PRESETS {
        let points = presets::named(name).map(|s| s.total_points()).unwrap_or(0);
        out.push_str(&format!(
            "{:<width$}  {} ({} points)\n",
            name, description, points
        ));
    }
    Ok(out)
}
