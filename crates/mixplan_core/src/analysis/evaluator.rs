//! Sweep evaluation - applies the capacity model at every grid point.
//!
//! Two ways in:
//! 1. **Lazy**: `SweepSpec::rows()` yields one `SweepRow` per point on demand
//! 2. **Collected**: `evaluate_sweep` evaluates every point (in parallel with
//!    the `parallel` feature) and returns `SweepResults` in canonical order
//!
//! A failing point never stops the sweep; its error rides along in the row.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{ParameterError, SweepError};
use crate::model::{MetricKind, Metrics, ParameterField, Parameters};

use super::{GridIndices, SweepGrid, SweepSpec};

/// One evaluated grid point
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    /// Position in enumeration order
    pub index: usize,
    /// Position along each dimension
    pub coords: Vec<usize>,
    pub parameters: Parameters,
    pub outcome: Result<Metrics, ParameterError>,
}

impl SweepRow {
    pub fn metrics(&self) -> Option<&Metrics> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ParameterError> {
        self.outcome.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Lazy, finite iterator over a sweep's rows
#[derive(Debug, Clone)]
pub struct SweepRows<'a> {
    spec: &'a SweepSpec,
    indices: GridIndices,
    next_index: usize,
}

impl<'a> SweepRows<'a> {
    pub(crate) fn new(spec: &'a SweepSpec) -> Self {
        Self {
            spec,
            indices: spec.grid_indices(),
            next_index: 0,
        }
    }
}

impl Iterator for SweepRows<'_> {
    type Item = SweepRow;

    fn next(&mut self) -> Option<Self::Item> {
        let coords = self.indices.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some(self.spec.row_at(index, coords))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for SweepRows<'_> {}

/// Every row of a sweep, arranged on the sweep grid
#[derive(Debug, Clone)]
pub struct SweepResults {
    /// Swept field per dimension
    pub fields: Vec<ParameterField>,
    /// Values for each dimension
    pub param_values: Vec<Vec<f64>>,
    rows: SweepGrid<SweepRow>,
}

impl SweepResults {
    pub fn ndim(&self) -> usize {
        self.fields.len()
    }

    pub fn shape(&self) -> &[usize] {
        self.rows.shape()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in canonical order
    pub fn rows(&self) -> &[SweepRow] {
        self.rows.data()
    }

    pub fn get(&self, coords: &[usize]) -> Option<&SweepRow> {
        self.rows.get(coords)
    }

    /// Rows that produced metrics
    pub fn successes(&self) -> impl Iterator<Item = (&Parameters, &Metrics)> {
        self.rows()
            .iter()
            .filter_map(|row| row.metrics().map(|m| (&row.parameters, m)))
    }

    /// Rows that failed validation, with their error
    pub fn failures(&self) -> impl Iterator<Item = (&SweepRow, &ParameterError)> {
        self.rows()
            .iter()
            .filter_map(|row| row.error().map(|e| (row, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// One metric over `row_dim` x `col_dim`, with the remaining dimensions
    /// pinned by `fixed`. Failed points are `None`.
    pub fn metric_matrix(
        &self,
        row_dim: usize,
        col_dim: usize,
        fixed: &[usize],
        metric: MetricKind,
    ) -> Option<Vec<Vec<Option<f64>>>> {
        let table = self.rows.slice_2d(row_dim, col_dim, fixed)?;
        let values = table
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.metrics().map(|m| metric.value(m)))
                    .collect()
            })
            .collect();
        Some(values)
    }
}

/// Evaluate every grid point of `spec`.
///
/// Points are computed in parallel when the `parallel` feature is enabled;
/// either way the rows come back in canonical enumeration order.
pub fn evaluate_sweep(spec: &SweepSpec) -> Result<SweepResults, SweepError> {
    spec.validate()?;

    let points: Vec<Vec<usize>> = spec.grid_indices().collect();

    #[cfg(feature = "parallel")]
    let rows: Vec<SweepRow> = points
        .into_par_iter()
        .enumerate()
        .map(|(index, coords)| spec.row_at(index, coords))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<SweepRow> = points
        .into_iter()
        .enumerate()
        .map(|(index, coords)| spec.row_at(index, coords))
        .collect();

    Ok(SweepResults {
        fields: spec.fields(),
        param_values: spec.dimensions.iter().map(|d| d.values.clone()).collect(),
        rows: SweepGrid::from_parts(spec.grid_shape(), rows),
    })
}
