//! Parameter grids
//!
//! A grid is the cross product of two value lists, enumerated outer-major.
//! The position of a point in that enumeration is its index; results are
//! stored by index so output order never depends on scheduling.

/// Cross product of `outer` and `inner` as `(index, outer, inner)`.
pub fn cross<'a, A: Copy, B: Copy>(
    outer: &'a [A],
    inner: &'a [B],
) -> impl Iterator<Item = (usize, A, B)> + 'a {
    outer
        .iter()
        .flat_map(move |&a| inner.iter().map(move |&b| (a, b)))
        .enumerate()
        .map(|(index, (a, b))| (index, a, b))
}

/// Index of `(outer_index, inner_index)` in a [`cross`] enumeration.
pub fn cross_index(outer_index: usize, inner_index: usize, inner_len: usize) -> usize {
    outer_index * inner_len + inner_index
}

/// One (λ, μ) pair of an M/M/1 sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub index: usize,
    pub lambda: f64,
    pub mu: f64,
}

/// λ × μ grid.
///
/// ```rust
/// use queuesim_sweep::grid::ParameterGrid;
///
/// let grid = ParameterGrid::new()
///     .lambdas(vec![0.5, 1.0])
///     .mus(vec![2.0, 4.0]);
/// assert_eq!(grid.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterGrid {
    lambdas: Vec<f64>,
    mus: Vec<f64>,
}

impl ParameterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lambdas(mut self, lambdas: Vec<f64>) -> Self {
        self.lambdas = lambdas;
        self
    }

    pub fn mus(mut self, mus: Vec<f64>) -> Self {
        self.mus = mus;
        self
    }

    pub fn len(&self) -> usize {
        self.lambdas.len() * self.mus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every pair, λ-major.
    pub fn points(&self) -> Vec<GridPoint> {
        cross(&self.lambdas, &self.mus)
            .map(|(index, lambda, mu)| GridPoint { index, lambda, mu })
            .collect()
    }
}
