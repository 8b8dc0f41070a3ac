//! Recurrence tensor engine.
//!
//! Fills a dense tensor with the multidimensional Hermite recurrence
//!
//! H_{p+e_k} = y_k H_p - Σ_i p_i R_{k,i} H_{p-e_i}
//!
//! seeded at the all-zero photon index. In normalized mode the factorial
//! growth is divided out so entries are matrix elements in an orthonormal
//! Fock basis: the linear term is scaled by `1/sqrt(n_k)` and the
//! correction weights become `sqrt(p_i)/sqrt(n_k)`.

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Instant;

use crate::enumerator::PositionEnumerator;
use crate::error::{FockError, Result};
use crate::index::{flatten, flatten_decremented, tensor_len};
use crate::scalar::FockScalar;
use crate::tensor::HermiteTensor;

/// Conservation law forcing entries to be exactly zero.
///
/// Positions are the engine's 1-based multi-indices; the constant offset
/// cancels in every comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionRule {
    /// Total photon number of the bra half equals that of the ket half.
    PhotonNumberConservation,
    /// `pos[0]` and `pos[1]` have the same parity.
    ParityConservation,
    /// `pos[0] - pos[1] == pos[2] - pos[3]`.
    PairDifference,
}

impl SelectionRule {
    /// Whether the entry at `pos` may be non-zero.
    pub fn admits(&self, pos: &[usize]) -> bool {
        match self {
            SelectionRule::PhotonNumberConservation => {
                let half = pos.len() / 2;
                let bra: usize = pos[..half].iter().sum();
                let ket: usize = pos[half..].iter().sum();
                bra == ket
            }
            SelectionRule::ParityConservation => pos[0] % 2 == pos[1] % 2,
            SelectionRule::PairDifference => pos[0] + pos[3] == pos[1] + pos[2],
        }
    }
}

/// Which axes contribute to the correction sum for a step along axis `k`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisRestriction {
    #[default]
    AllAxes,
    /// Only the mode half (bra or ket) not containing `k`.
    ComplementaryHalf,
    /// Only the partner axis `k ^ 1` (`1 - k` on a two-axis tensor).
    Partner,
}

impl AxisRestriction {
    pub fn axes(&self, k: usize, dim: usize) -> Range<usize> {
        match self {
            AxisRestriction::AllAxes => 0..dim,
            AxisRestriction::ComplementaryHalf => {
                let half = dim / 2;
                if k < half {
                    half..dim
                } else {
                    0..half
                }
            }
            AxisRestriction::Partner => {
                let partner = k ^ 1;
                partner.min(dim)..(partner + 1).min(dim)
            }
        }
    }
}

/// Per-variant configuration of a fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillConfig<T> {
    /// Value at the all-zero photon index.
    pub seed: T,
    pub normalize: bool,
    pub selection: Option<SelectionRule>,
    pub restriction: AxisRestriction,
}

impl<T: FockScalar> FillConfig<T> {
    /// Unnormalized recurrence over all axes with seed `1`.
    pub fn hermite() -> Self {
        Self {
            seed: T::one(),
            normalize: false,
            selection: None,
            restriction: AxisRestriction::AllAxes,
        }
    }

    pub fn normalized() -> Self {
        Self {
            normalize: true,
            ..Self::hermite()
        }
    }

    pub fn with_seed(mut self, seed: T) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_selection(mut self, rule: SelectionRule) -> Self {
        self.selection = Some(rule);
        self
    }

    pub fn with_restriction(mut self, restriction: AxisRestriction) -> Self {
        self.restriction = restriction;
        self
    }
}

/// Drives the position enumerator and accumulates each entry from its
/// predecessors.
#[derive(Clone, Debug)]
pub struct RecurrenceEngine<T> {
    config: FillConfig<T>,
}

impl<T: FockScalar> RecurrenceEngine<T> {
    pub fn new(config: FillConfig<T>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FillConfig<T> {
        &self.config
    }

    /// Fill a tensor of `resolution^dim` entries, `dim = r.nrows()`.
    ///
    /// Without a source vector the linear term of the recurrence is zero.
    #[tracing::instrument(skip(self, r, y), fields(
        dim = r.nrows(),
        normalize = self.config.normalize,
        selection = ?self.config.selection,
    ))]
    pub fn fill(
        &self,
        r: ArrayView2<'_, T>,
        y: Option<ArrayView1<'_, T>>,
        resolution: usize,
    ) -> Result<HermiteTensor<T>> {
        let start = Instant::now();
        let dim = square_dim(&r)?;
        if let Some(y) = &y {
            if y.len() != dim {
                return Err(FockError::SourceLength {
                    expected: dim,
                    got: y.len(),
                });
            }
        }

        let len = tensor_len(resolution, dim)?;
        let mut h: Vec<T> = Vec::new();
        h.try_reserve_exact(len)
            .map_err(|_| FockError::Allocation { entries: len })?;
        h.resize(len, T::zero());
        h[0] = self.config.seed;

        let sqrt_table: Vec<f64> = (0..=resolution).map(|i| (i as f64).sqrt()).collect();
        let normalize = self.config.normalize;

        let mut positions = PositionEnumerator::new(resolution, dim)?;
        let mut rejected = 0usize;

        while let Some(k) = positions.advance() {
            let next_pos = positions.next_pos();
            let jump_from = positions.jump_from();

            if let Some(rule) = &self.config.selection {
                if !rule.admits(next_pos) {
                    rejected += 1;
                    continue;
                }
            }

            let next = flatten(next_pos, resolution);
            let from = flatten(jump_from, resolution);

            let mut value = match &y {
                Some(y) => h[from] * y[k],
                None => T::zero(),
            };

            for i in self.config.restriction.axes(k, dim) {
                let count = jump_from[i] - 1;
                if count == 0 {
                    continue;
                }
                let weight = if normalize {
                    sqrt_table[count]
                } else {
                    count as f64
                };
                let cross = flatten_decremented(jump_from, i, resolution);
                value = value - T::from_real(weight) * r[[k, i]] * h[cross];
            }

            if normalize {
                value = value / T::from_real(sqrt_table[next_pos[k] - 1]);
            }
            h[next] = value;
        }

        tracing::debug!(
            entries = len,
            written = len - 1 - rejected,
            rejected = rejected,
            elapsed_us = start.elapsed().as_micros() as u64,
            "hermite_fill"
        );

        HermiteTensor::from_flat(resolution, dim, h)
    }
}

/// Number of modes encoded by a square coupling matrix.
pub(crate) fn square_dim<T>(r: &ArrayView2<'_, T>) -> Result<usize> {
    let (rows, cols) = r.dim();
    if rows != cols {
        return Err(FockError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(FockError::EmptyCoupling);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};
    use num_complex::Complex64;

    fn hermite(r: &Array2<f64>, y: &Array1<f64>, resolution: usize) -> Vec<f64> {
        RecurrenceEngine::new(FillConfig::hermite())
            .fill(r.view(), Some(y.view()), resolution)
            .unwrap()
            .into_vec()
    }

    #[test]
    fn test_single_mode_matches_physicists_recurrence() {
        let (r, c) = (0.7, 1.3);
        let h = hermite(&array![[r]], &array![c], 3);
        assert_eq!(h.len(), 3);
        assert_eq!(h[0], 1.0);
        assert!((h[1] - c).abs() < 1e-12);
        assert!((h[2] - (c * c - r)).abs() < 1e-12);
    }

    #[test]
    fn test_physicists_hermite_polynomials() {
        // R = [2], y = [2x] gives H_n(x).
        let x: f64 = 0.4;
        let h = hermite(&array![[2.0]], &array![2.0 * x], 5);
        let expected = [
            1.0,
            2.0 * x,
            4.0 * x * x - 2.0,
            8.0 * x.powi(3) - 12.0 * x,
            16.0 * x.powi(4) - 48.0 * x * x + 12.0,
        ];
        for (got, want) in h.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-10, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_correction_term_in_isolation() {
        let h = hermite(&array![[0.0, 1.0], [1.0, 0.0]], &array![0.0, 0.0], 2);
        assert_eq!(h, vec![1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_resolution_one_is_seed_only() {
        let engine = RecurrenceEngine::new(FillConfig::hermite().with_seed(2.5));
        let r = Array2::<f64>::eye(3);
        let y = Array1::<f64>::ones(3);
        let t = engine.fill(r.view(), Some(y.view()), 1).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.seed(), 2.5);
    }

    #[test]
    fn test_zero_coupling_gives_monomials() {
        let (a, b) = (0.5, -1.5);
        let h = hermite(&Array2::zeros((2, 2)), &array![a, b], 4);
        for m in 0..4 {
            for n in 0..4 {
                let want = f64::powi(a, m as i32) * f64::powi(b, n as i32);
                assert!((h[m * 4 + n] - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_normalized_zero_coupling_divides_factorials() {
        let (a, b) = (0.8, 1.1);
        let t = RecurrenceEngine::new(FillConfig::normalized())
            .fill(Array2::zeros((2, 2)).view(), Some(array![a, b].view()), 5)
            .unwrap();
        let fact = |n: usize| (1..=n).product::<usize>() as f64;
        for m in 0..5 {
            for n in 0..5 {
                let want = f64::powi(a, m as i32) * f64::powi(b, n as i32)
                    / (fact(m) * fact(n)).sqrt();
                let got = t.get(&[m, n]).unwrap();
                assert!((got - want).abs() < 1e-12, "[{},{}]: {} vs {}", m, n, got, want);
            }
        }
    }

    #[test]
    fn test_complex_entries() {
        let i = Complex64::new(0.0, 1.0);
        let r = array![[Complex64::new(1.0, 0.0)]];
        let y = array![i];
        let t = RecurrenceEngine::new(FillConfig::hermite())
            .fill(r.view(), Some(y.view()), 3)
            .unwrap();
        // H_2 = y^2 - r = -1 - 1
        assert!((t.as_slice()[2] - Complex64::new(-2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_selection_rule_leaves_zeros() {
        let r = array![[0.3, 0.2], [0.2, 0.1]];
        let y = array![0.9, 0.4];
        let config = FillConfig::normalized().with_selection(SelectionRule::ParityConservation);
        let t = RecurrenceEngine::new(config)
            .fill(r.view(), Some(y.view()), 4)
            .unwrap();
        for m in 0..4 {
            for n in 0..4 {
                if (m + n) % 2 == 1 {
                    assert_eq!(t.get(&[m, n]), Some(0.0));
                }
            }
        }
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let engine = RecurrenceEngine::new(FillConfig::<f64>::hermite());
        let r = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            engine.fill(r.view(), None, 2).unwrap_err(),
            FockError::NotSquare { rows: 2, cols: 3 }
        );

        let r = Array2::<f64>::zeros((2, 2));
        let y = Array1::<f64>::zeros(3);
        assert_eq!(
            engine.fill(r.view(), Some(y.view()), 2).unwrap_err(),
            FockError::SourceLength {
                expected: 2,
                got: 3
            }
        );

        assert_eq!(
            engine.fill(r.view(), None, 0).unwrap_err(),
            FockError::ZeroResolution
        );

        let r = Array2::<f64>::zeros((0, 0));
        assert_eq!(
            engine.fill(r.view(), None, 2).unwrap_err(),
            FockError::EmptyCoupling
        );
    }

    #[test]
    fn test_axis_restrictions() {
        assert_eq!(AxisRestriction::AllAxes.axes(1, 4), 0..4);
        assert_eq!(AxisRestriction::ComplementaryHalf.axes(0, 4), 2..4);
        assert_eq!(AxisRestriction::ComplementaryHalf.axes(1, 4), 2..4);
        assert_eq!(AxisRestriction::ComplementaryHalf.axes(2, 4), 0..2);
        assert_eq!(AxisRestriction::Partner.axes(0, 2), 1..2);
        assert_eq!(AxisRestriction::Partner.axes(1, 2), 0..1);
    }

    #[test]
    fn test_selection_rules() {
        let photons = SelectionRule::PhotonNumberConservation;
        assert!(photons.admits(&[2, 1, 1, 2]));
        assert!(!photons.admits(&[2, 2, 1, 2]));

        let parity = SelectionRule::ParityConservation;
        assert!(parity.admits(&[3, 1]));
        assert!(!parity.admits(&[2, 1]));

        let diff = SelectionRule::PairDifference;
        assert!(diff.admits(&[3, 2, 2, 1]));
        assert!(diff.admits(&[1, 3, 2, 4]));
        assert!(!diff.admits(&[2, 1, 1, 1]));
    }
}
