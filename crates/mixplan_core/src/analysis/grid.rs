//! N-dimensional grid storage for sweep results.

use serde::{Deserialize, Serialize};

/// N-dimensional grid with a flat backing array and stride-based indexing.
///
/// Row-major: the last dimension varies fastest, so flat index `k` of a
/// `[n, m]` grid sits at `[k / m, k % m]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T> SweepGrid<T> {
    /// Build a grid from row-major data. `None` if the length doesn't match
    /// the shape.
    pub fn from_data(shape: Vec<usize>, data: Vec<T>) -> Option<Self> {
        if data.len() != total_len(&shape) {
            return None;
        }
        Some(Self::from_parts(shape, data))
    }

    /// Build a grid by calling `f(flat_index, coords)` for every point in
    /// row-major order
    pub fn from_fn(shape: Vec<usize>, mut f: impl FnMut(usize, &[usize]) -> T) -> Self {
        let data = GridIndices::new(&shape)
            .enumerate()
            .map(|(flat, coords)| f(flat, &coords))
            .collect();
        Self::from_parts(shape, data)
    }

    pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), total_len(&shape));
        let strides = compute_strides(&shape);
        Self {
            data,
            shape,
            strides,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert coordinates to a flat index, `None` if out of bounds
    pub fn flat_index(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for ((&c, &size), &stride) in coords.iter().zip(&self.shape).zip(&self.strides) {
            if c >= size {
                return None;
            }
            flat += c * stride;
        }
        Some(flat)
    }

    /// Convert a flat index back to coordinates
    pub fn coords(&self, flat: usize) -> Option<Vec<usize>> {
        if flat >= self.data.len() {
            return None;
        }
        let mut remaining = flat;
        let coords = self
            .strides
            .iter()
            .map(|&stride| {
                let c = remaining / stride;
                remaining %= stride;
                c
            })
            .collect();
        Some(coords)
    }

    pub fn get(&self, coords: &[usize]) -> Option<&T> {
        self.flat_index(coords).map(|i| &self.data[i])
    }

    /// Row-major view of every value
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Iterate all coordinates in row-major order
    pub fn indices(&self) -> GridIndices {
        GridIndices::new(&self.shape)
    }

    /// Iterate (coords, value) pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, &T)> {
        self.indices().zip(self.data.iter())
    }

    /// Extract a 2-D table over `row_dim` x `col_dim`.
    ///
    /// `fixed` gives a coordinate for every dimension; entries at `row_dim`
    /// and `col_dim` are ignored. Returns `None` on any out-of-range input.
    pub fn slice_2d(&self, row_dim: usize, col_dim: usize, fixed: &[usize]) -> Option<Vec<Vec<&T>>> {
        if row_dim >= self.ndim() || col_dim >= self.ndim() || row_dim == col_dim {
            return None;
        }
        if fixed.len() != self.ndim() {
            return None;
        }

        let mut coords = fixed.to_vec();
        let mut table = Vec::with_capacity(self.shape[row_dim]);
        for r in 0..self.shape[row_dim] {
            coords[row_dim] = r;
            let mut row = Vec::with_capacity(self.shape[col_dim]);
            for c in 0..self.shape[col_dim] {
                coords[col_dim] = c;
                row.push(self.get(&coords)?);
            }
            table.push(row);
        }
        Some(table)
    }
}

fn total_len(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Row-major strides: the last dimension has stride 1
fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Iterator over every coordinate of a grid, last dimension fastest.
///
/// A zero-dimensional shape yields one empty coordinate; any zero-length
/// dimension yields nothing.
#[derive(Debug, Clone)]
pub struct GridIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    remaining: usize,
}

impl GridIndices {
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            current: vec![0; shape.len()],
            remaining: total_len(shape),
        }
    }
}

impl Iterator for GridIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let result = self.current.clone();

        for i in (0..self.shape.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.shape[i] {
                break;
            }
            self.current[i] = 0;
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridIndices {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_last_dimension_fastest() {
        let all: Vec<_> = GridIndices::new(&[2, 3]).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_indices_degenerate_shapes() {
        let scalar: Vec<_> = GridIndices::new(&[]).collect();
        assert_eq!(scalar, vec![Vec::<usize>::new()]);

        assert_eq!(GridIndices::new(&[3, 0, 2]).count(), 0);
        assert_eq!(GridIndices::new(&[4, 5, 6]).len(), 120);
    }

    #[test]
    fn test_flat_and_multi_index_agree() {
        let grid = SweepGrid::from_fn(vec![3, 4, 2], |flat, _| flat);
        for (coords, &flat) in grid.iter() {
            assert_eq!(grid.flat_index(&coords), Some(flat));
            assert_eq!(grid.coords(flat), Some(coords));
        }
        assert_eq!(grid.flat_index(&[3, 0, 0]), None);
        assert_eq!(grid.flat_index(&[0, 0]), None);
        assert_eq!(grid.coords(24), None);
    }

    #[test]
    fn test_from_data_checks_length() {
        assert!(SweepGrid::from_data(vec![2, 2], vec![1, 2, 3]).is_none());
        let grid = SweepGrid::from_data(vec![2, 2], vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.get(&[1, 0]), Some(&3));
    }

    #[test]
    fn test_slice_2d_transposes_and_fixes() {
        // value = 100*a + 10*b + c
        let grid = SweepGrid::from_fn(vec![2, 3, 4], |_, c| 100 * c[0] + 10 * c[1] + c[2]);

        let table = grid.slice_2d(2, 0, &[0, 1, 0]).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table[3].iter().map(|v| **v).collect::<Vec<_>>(), vec![13, 113]);

        assert!(grid.slice_2d(1, 1, &[0, 0, 0]).is_none());
        assert!(grid.slice_2d(0, 1, &[0, 0, 9]).is_none());
    }
}
