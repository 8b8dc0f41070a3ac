//! Owned result of a tensor fill.

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::{FockError, Result};
use crate::scalar::FockScalar;

/// Dense Hermite tensor of shape `[resolution; dim]`.
///
/// Axis `i` is mode `i`, indexed by photon number `0..resolution`. Storage is
/// row-major, so [`as_slice`](Self::as_slice) follows the flat offset order of
/// [`crate::index::flatten`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HermiteTensor<T> {
    resolution: usize,
    data: ArrayD<T>,
}

impl<T: FockScalar> HermiteTensor<T> {
    /// Wrap a flat buffer produced by the engine.
    pub(crate) fn from_flat(resolution: usize, dim: usize, data: Vec<T>) -> Result<Self> {
        let data = ArrayD::from_shape_vec(IxDyn(&vec![resolution; dim]), data)
            .map_err(|_| FockError::TensorTooLarge { resolution, dim })?;
        Ok(Self { resolution, data })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of modes (tensor axes).
    pub fn dim(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry at the all-zero photon-number index.
    pub fn seed(&self) -> T {
        self.data.iter().next().copied().unwrap_or_else(T::zero)
    }

    /// Entry at the given photon numbers, `None` when any is out of range.
    pub fn get(&self, photons: &[usize]) -> Option<T> {
        if photons.len() != self.dim() {
            return None;
        }
        self.data.get(IxDyn(photons)).copied()
    }

    /// Flat storage in offset order.
    pub fn as_slice(&self) -> &[T] {
        // Constructed from a Vec in standard layout.
        self.data.as_slice().unwrap_or(&[])
    }

    pub fn view(&self) -> ArrayViewD<'_, T> {
        self.data.view()
    }

    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data.into_raw_vec()
    }
}
