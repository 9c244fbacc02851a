//! Text and JSON renderings of capacity results
//!
//! The core hands over raw base units; every unit conversion and rounding
//! decision is made here.

use mixplan_core::{MetricKind, Metrics, ParameterField, Parameters, SweepResults, SweepRow};
use serde_json::{Value, json};

use crate::util::format::{format_count, format_field, format_metric};

/// Metrics shown by default in sweep tables
pub const DEFAULT_TABLE_METRICS: [MetricKind; 5] = [
    MetricKind::NumMixesRequired,
    MetricKind::ConsensusDocumentSize,
    MetricKind::ConsensusBandwidthRatio,
    MetricKind::ConsensusOverheadPerClient,
    MetricKind::ChannelBandwidthPerClient,
];

/// Labelled block describing one deployment and its metrics
pub fn render_summary(params: &Parameters, metrics: &Metrics) -> String {
    let mut lines: Vec<(String, String)> = ParameterField::ALL
        .iter()
        .map(|&f| (f.label().to_string(), format_field(f, params.get(f))))
        .collect();

    lines.push((
        "Mixes (whole)".to_string(),
        format_count(metrics.mixes_required_ceil() as f64),
    ));
    for kind in MetricKind::ALL {
        lines.push((kind.label().to_string(), format_metric(kind, kind.value(metrics))));
    }

    let width = lines.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in lines {
        out.push_str(&format!("{:<width$}  {}\n", format!("{label}:"), value, width = width + 1));
    }
    if !metrics.is_feasible() {
        out.push_str("\nCapacity exhausted: consensus overhead exceeds the per-client channel\n");
    }
    out
}

/// One line per grid point: the swept values, then the chosen metrics.
/// Failed points keep their row and show the error instead.
pub fn render_table(results: &SweepResults, metrics: &[MetricKind]) -> String {
    let mut header: Vec<String> = results.fields.iter().map(|f| f.label().to_string()).collect();
    header.extend(metrics.iter().map(|m| m.label().to_string()));

    let body: Vec<Vec<String>> = results
        .rows()
        .iter()
        .map(|row| table_row(row, &results.fields, metrics))
        .collect();

    layout(&header, &body)
}

fn table_row(row: &SweepRow, fields: &[ParameterField], metrics: &[MetricKind]) -> Vec<String> {
    let mut cells: Vec<String> = fields
        .iter()
        .map(|&f| format_field(f, row.parameters.get(f)))
        .collect();

    match &row.outcome {
        Ok(m) => cells.extend(metrics.iter().map(|&k| format_metric(k, k.value(m)))),
        Err(e) => cells.push(format!("error: {e}")),
    }
    cells
}

/// A 2-D slice of one metric: `row_dim` down, `col_dim` across, other
/// dimensions pinned by `fixed`. Returns `None` for an invalid slice.
pub fn render_matrix(
    results: &SweepResults,
    row_dim: usize,
    col_dim: usize,
    fixed: &[usize],
    metric: MetricKind,
) -> Option<String> {
    let matrix = results.metric_matrix(row_dim, col_dim, fixed, metric)?;
    let row_field = results.fields[row_dim];
    let col_field = results.fields[col_dim];

    let mut header = vec![format!("{} \\ {}", row_field.label(), col_field.label())];
    header.extend(
        results.param_values[col_dim]
            .iter()
            .map(|&v| format_field(col_field, v)),
    );

    let body: Vec<Vec<String>> = matrix
        .iter()
        .zip(&results.param_values[row_dim])
        .map(|(cells, &v)| {
            let mut line = vec![format_field(row_field, v)];
            line.extend(cells.iter().map(|cell| match cell {
                Some(x) => format_metric(metric, *x),
                None => "-".to_string(),
            }));
            line
        })
        .collect();

    let mut out = format!("{}\n", metric.label());
    out.push_str(&layout(&header, &body));
    Some(out)
}

/// Left-aligned columns separated by two spaces
fn layout(header: &[String], body: &[Vec<String>]) -> String {
    let columns = header
        .len()
        .max(body.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for line in std::iter::once(header).chain(body.iter().map(Vec::as_slice)) {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(header).chain(body.iter().map(Vec::as_slice)) {
        let rendered: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<w$}", cell, w = widths[i]))
            .collect();
        out.push_str(rendered.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// JSON document for a single evaluation, in base units
pub fn evaluation_json(params: &Parameters, metrics: &Metrics) -> Value {
    json!({
        "parameters": params,
        "metrics": metrics,
        "mixes_required_ceil": metrics.mixes_required_ceil(),
        "feasible": metrics.is_feasible(),
    })
}

/// JSON document for a sweep. Rows are in canonical order; failed rows
/// carry `error` in place of `metrics`.
pub fn render_json(results: &SweepResults) -> Value {
    let rows: Vec<Value> = results
        .rows()
        .iter()
        .map(|row| match &row.outcome {
            Ok(m) => json!({
                "index": row.index,
                "coords": row.coords,
                "parameters": row.parameters,
                "metrics": m,
            }),
            Err(e) => json!({
                "index": row.index,
                "coords": row.coords,
                "parameters": row.parameters,
                "error": e.to_string(),
                "field": e.field(),
            }),
        })
        .collect();

    json!({
        "fields": results.fields,
        "values": results.param_values,
        "shape": results.shape(),
        "failures": results.failure_count(),
        "rows": rows,
    })
}
