//! Configuration types for parameter sweeps.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::capacity;
use crate::error::SweepError;
use crate::model::{ParameterField, Parameters};

use super::{GridIndices, SweepRow, SweepRows};

/// One grid axis: an ordered list of override values for a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDimension {
    pub field: ParameterField,
    pub values: Vec<f64>,
}

impl SweepDimension {
    #[must_use]
    pub fn new(field: ParameterField, values: Vec<f64>) -> Self {
        Self { field, values }
    }

    /// `steps` evenly spaced values from `min` to `max` inclusive.
    /// A single step yields just `min`.
    ///
    /// Values for count fields are rounded to whole numbers, so a coarse
    /// range may repeat a value.
    #[must_use]
    pub fn linear(field: ParameterField, min: f64, max: f64, steps: usize) -> Self {
        let values = if steps <= 1 {
            vec![min; steps]
        } else {
            let step_size = (max - min) / (steps - 1) as f64;
            (0..steps).map(|i| min + step_size * i as f64).collect()
        };
        Self::generated(field, values)
    }

    /// `steps` values starting at `start`, each `ratio` times the last.
    /// Count fields are rounded as in [`SweepDimension::linear`].
    #[must_use]
    pub fn geometric(field: ParameterField, start: f64, ratio: f64, steps: usize) -> Self {
        let values = (0..steps)
            .map(|i| start * ratio.powi(i as i32))
            .collect();
        Self::generated(field, values)
    }

    fn generated(field: ParameterField, mut values: Vec<f64>) -> Self {
        if field.is_count() {
            values.iter_mut().for_each(|v| *v = v.round());
        }
        Self::new(field, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }
}

/// A base parameter set plus the dimensions to vary.
///
/// The first dimension varies slowest and the last fastest, so for two
/// dimensions of sizes N and M, row `k` uses `(dims[0][k / M], dims[1][k % M])`.
/// A spec with no dimensions describes exactly one point: the base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub base: Parameters,
    #[serde(default)]
    pub dimensions: Vec<SweepDimension>,
}

impl SweepSpec {
    #[must_use]
    pub fn new(base: Parameters) -> Self {
        Self {
            base,
            dimensions: Vec::new(),
        }
    }

    /// Append a dimension; it varies faster than all existing ones
    #[must_use]
    pub fn dimension(mut self, dimension: SweepDimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn ndim(&self) -> usize {
        self.dimensions.len()
    }

    /// Number of grid points (product of dimension sizes)
    pub fn total_points(&self) -> usize {
        self.dimensions.iter().map(SweepDimension::len).product()
    }

    pub fn grid_shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(SweepDimension::len).collect()
    }

    pub fn fields(&self) -> Vec<ParameterField> {
        self.dimensions.iter().map(|d| d.field).collect()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.dimensions.iter().map(SweepDimension::label).collect()
    }

    /// Reject specs that sweep one field along two axes
    pub fn validate(&self) -> Result<(), SweepError> {
        let mut seen = FxHashSet::default();
        for dim in &self.dimensions {
            if !seen.insert(dim.field) {
                return Err(SweepError::DuplicateDimension(dim.field));
            }
        }
        Ok(())
    }

    /// Parameters at the given grid coordinates. Out-of-range coordinates
    /// leave that field at its base value.
    pub fn parameters_at(&self, coords: &[usize]) -> Parameters {
        self.dimensions
            .iter()
            .zip(coords)
            .fold(self.base, |params, (dim, &c)| match dim.values.get(c) {
                Some(&value) => params.with(dim.field, value),
                None => params,
            })
    }

    /// Lazily enumerate every grid point with its metrics or error.
    ///
    /// Each call starts a fresh pass over the same rows.
    pub fn rows(&self) -> SweepRows<'_> {
        SweepRows::new(self)
    }

    pub(crate) fn grid_indices(&self) -> GridIndices {
        GridIndices::new(&self.grid_shape())
    }

    pub(crate) fn row_at(&self, index: usize, coords: Vec<usize>) -> SweepRow {
        let parameters = self.parameters_at(&coords);
        let outcome = capacity::evaluate(&parameters);
        SweepRow {
            index,
            coords,
            parameters,
            outcome,
        }
    }
}

impl<'a> IntoIterator for &'a SweepSpec {
    type Item = SweepRow;
    type IntoIter = SweepRows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    #[test]
    fn test_linear_values() {
        let d = SweepDimension::linear(ParameterField::NoiseSignal, 0.0, 2.0, 5);
        assert_eq!(d.values, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

        let single = SweepDimension::linear(ParameterField::NoiseSignal, 3.0, 9.0, 1);
        assert_eq!(single.values, vec![3.0]);

        let none = SweepDimension::linear(ParameterField::NoiseSignal, 3.0, 9.0, 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_geometric_values() {
        let d = SweepDimension::geometric(ParameterField::NumClients, 1e3, 10.0, 4);
        assert_eq!(d.values, vec![1e3, 1e4, 1e5, 1e6]);
    }

    #[test]
    fn test_generated_counts_are_whole() {
        let d = SweepDimension::linear(ParameterField::NumClients, 1_000.0, 2_000.0, 4);
        assert_eq!(d.values, vec![1_000.0, 1_333.0, 1_667.0, 2_000.0]);

        let d = SweepDimension::geometric(ParameterField::NumAuthorities, 3.0, 1.5, 4);
        assert_eq!(d.values, vec![3.0, 5.0, 7.0, 10.0]);

        let spec = SweepSpec::new(presets::reference()).dimension(SweepDimension::linear(
            ParameterField::NumClients,
            1_000.0,
            2_000.0,
            4,
        ));
        assert!(spec.rows().all(|row| row.is_ok()));
    }

    #[test]
    fn test_generated_non_counts_keep_fractions() {
        let d = SweepDimension::linear(ParameterField::MessageInterval, 0.0, 1.0, 3);
        assert_eq!(d.values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_duplicate_dimension_rejected() {
        let spec = SweepSpec::new(presets::reference())
            .dimension(SweepDimension::new(ParameterField::NumClients, vec![1.0]))
            .dimension(SweepDimension::new(ParameterField::NoiseSignal, vec![0.0]))
            .dimension(SweepDimension::new(ParameterField::NumClients, vec![2.0]));
        assert_eq!(
            spec.validate(),
            Err(SweepError::DuplicateDimension(ParameterField::NumClients))
        );
    }

    #[test]
    fn test_parameters_at_overrides_only_swept_fields() {
        let spec = SweepSpec::new(presets::reference())
            .dimension(SweepDimension::new(
                ParameterField::NoiseSignal,
                vec![0.0, 9.0],
            ))
            .dimension(SweepDimension::new(
                ParameterField::NumClients,
                vec![10.0, 20.0, 30.0],
            ));

        let p = spec.parameters_at(&[1, 2]);
        assert_eq!(p.noise_signal, 9.0);
        assert_eq!(p.num_clients, 30.0);
        assert_eq!(p.message_size, spec.base.message_size);
        // Base is never mutated by a sweep
        assert_eq!(spec.base, presets::reference());
    }

    #[test]
    fn test_shape_and_labels() {
        let spec = presets::reference_sweep();
        assert_eq!(spec.ndim(), 2);
        assert_eq!(spec.grid_shape(), vec![4, 4]);
        assert_eq!(spec.total_points(), 16);
        assert_eq!(spec.labels(), vec!["Noise/Signal", "Clients"]);

        let empty = SweepSpec::new(presets::reference());
        assert_eq!(empty.total_points(), 1);
    }
}
