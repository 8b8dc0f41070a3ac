//! Gaussian operator parameterizations of the recurrence engine.
//!
//! Each variant only chooses a seed, normalization, selection rule and
//! axis restriction. The coupling matrix `R` and source vector `y` are built
//! by the caller from the physical parameters.

use ndarray::{arr2, Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{square_dim, AxisRestriction, FillConfig, RecurrenceEngine, SelectionRule};
use crate::error::{FockError, Result};
use crate::scalar::FockScalar;
use crate::tensor::HermiteTensor;

/// The six tensor parameterizations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Hermite,
    NormalizedHermite,
    Interferometer,
    SingleModeSqueezer,
    Displacement,
    TwoModeSqueezer,
}

/// Constraint a variant places on the number of tensor axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimConstraint {
    Any,
    Even,
    Exactly(usize),
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Hermite,
        Variant::NormalizedHermite,
        Variant::Interferometer,
        Variant::SingleModeSqueezer,
        Variant::Displacement,
        Variant::TwoModeSqueezer,
    ];

    pub fn dim_constraint(self) -> DimConstraint {
        match self {
            Variant::Hermite | Variant::NormalizedHermite => DimConstraint::Any,
            Variant::Interferometer => DimConstraint::Even,
            Variant::SingleModeSqueezer | Variant::Displacement => DimConstraint::Exactly(2),
            Variant::TwoModeSqueezer => DimConstraint::Exactly(4),
        }
    }

    /// Whether the variant reads a coupling matrix.
    pub fn uses_coupling(self) -> bool {
        self != Variant::Displacement
    }

    /// Whether the variant reads a source vector.
    pub fn uses_source(self) -> bool {
        matches!(
            self,
            Variant::Hermite | Variant::NormalizedHermite | Variant::Displacement
        )
    }

    /// Reject a `dim` the variant cannot split into modes.
    pub fn check_dim(self, dim: usize) -> Result<()> {
        match self.dim_constraint() {
            DimConstraint::Any => Ok(()),
            DimConstraint::Even if dim % 2 == 0 => Ok(()),
            DimConstraint::Even => Err(FockError::OddDimension { variant: self, dim }),
            DimConstraint::Exactly(expected) if dim == expected => Ok(()),
            DimConstraint::Exactly(expected) => Err(FockError::DimensionMismatch {
                variant: self,
                expected,
                got: dim,
            }),
        }
    }

    /// Engine configuration for this variant. `r` and `y` must already have
    /// passed [`check_dim`](Self::check_dim); the seed reads their entries.
    pub(crate) fn config<T: FockScalar>(
        self,
        r: Option<&Array2<T>>,
        y: Option<&Array1<T>>,
    ) -> FillConfig<T> {
        let half = T::from_real(0.5);
        match self {
            Variant::Hermite => FillConfig::hermite(),
            Variant::NormalizedHermite => FillConfig::normalized(),
            Variant::Interferometer => FillConfig::normalized()
                .with_selection(SelectionRule::PhotonNumberConservation)
                .with_restriction(AxisRestriction::ComplementaryHalf),
            Variant::SingleModeSqueezer => {
                let seed = r.map_or_else(T::one, |r| (-r[[0, 1]]).sqrt());
                FillConfig::normalized()
                    .with_seed(seed)
                    .with_selection(SelectionRule::ParityConservation)
            }
            Variant::Displacement => {
                let seed = y.map_or_else(T::one, |y| (half * y[0] * y[1]).exp());
                FillConfig::normalized()
                    .with_seed(seed)
                    .with_restriction(AxisRestriction::Partner)
            }
            Variant::TwoModeSqueezer => {
                let seed = r.map_or_else(T::one, |r| -r[[0, 2]]);
                FillConfig::normalized()
                    .with_seed(seed)
                    .with_selection(SelectionRule::PairDifference)
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Hermite => "hermite tensor",
            Variant::NormalizedHermite => "normalized hermite tensor",
            Variant::Interferometer => "interferometer",
            Variant::SingleModeSqueezer => "single-mode squeezer",
            Variant::Displacement => "displacement",
            Variant::TwoModeSqueezer => "two-mode squeezer",
        };
        f.write_str(name)
    }
}

fn coupling_only<T: FockScalar>(
    variant: Variant,
    r: &Array2<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    let dim = square_dim(&r.view())?;
    variant.check_dim(dim)?;
    let config = variant.config(Some(r), None);
    if variant == Variant::SingleModeSqueezer && !config.seed.is_finite() {
        tracing::warn!(seed = ?config.seed, "squeezer seed is not finite, expected R[0,1] < 0");
    }
    RecurrenceEngine::new(config).fill(r.view(), None, resolution)
}

/// Unnormalized multidimensional Hermite polynomials `H_k^{(R)}(y)`.
#[tracing::instrument(skip(r, y))]
pub fn hermite_tensor<T: FockScalar>(
    r: &Array2<T>,
    y: &Array1<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    let config = Variant::Hermite.config(Some(r), Some(y));
    RecurrenceEngine::new(config).fill(r.view(), Some(y.view()), resolution)
}

/// Normalized multidimensional Hermite polynomials.
#[tracing::instrument(skip(r, y))]
pub fn normalized_hermite_tensor<T: FockScalar>(
    r: &Array2<T>,
    y: &Array1<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    let config = Variant::NormalizedHermite.config(Some(r), Some(y));
    RecurrenceEngine::new(config).fill(r.view(), Some(y.view()), resolution)
}

/// Fock matrix elements of a passive interferometer.
///
/// Axes `0..dim/2` are output (bra) modes, `dim/2..dim` input (ket) modes.
/// Entries that do not conserve total photon number are zero.
#[tracing::instrument(skip(r))]
pub fn interferometer_tensor<T: FockScalar>(
    r: &Array2<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    coupling_only(Variant::Interferometer, r, resolution)
}

/// Fock matrix elements of a single-mode squeezer, `R` is 2x2.
///
/// The seed is `sqrt(-R[0,1])`; a real non-negative `R[0,1]` yields NaN.
#[tracing::instrument(skip(r))]
pub fn single_mode_squeezer_tensor<T: FockScalar>(
    r: &Array2<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    coupling_only(Variant::SingleModeSqueezer, r, resolution)
}

/// Fock matrix elements of a displacement given `y = [y0, y1]`.
#[tracing::instrument(skip(y))]
pub fn displacement_tensor<T: FockScalar>(
    y: &Array1<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    Variant::Displacement.check_dim(y.len())?;
    let config = Variant::Displacement.config(None, Some(y));
    // Unit coupling between the two axes.
    let r = arr2(&[[T::zero(), T::one()], [T::one(), T::zero()]]);
    RecurrenceEngine::new(config).fill(r.view(), Some(y.view()), resolution)
}

/// Fock matrix elements of a two-mode squeezer, `R` is 4x4.
#[tracing::instrument(skip(r))]
pub fn two_mode_squeezer_tensor<T: FockScalar>(
    r: &Array2<T>,
    resolution: usize,
) -> Result<HermiteTensor<T>> {
    coupling_only(Variant::TwoModeSqueezer, r, resolution)
}
