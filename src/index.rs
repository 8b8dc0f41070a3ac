//! Multi-index flattening.
//!
//! Positions are 1-based per axis (`1..=resolution`), axis 0 is the most
//! significant digit of the flat offset. This is the same order as a
//! row-major `ndarray` of shape `[resolution; dim]` indexed by `pos - 1`.

use crate::error::{FockError, Result};

/// Flat storage offset of a 1-based multi-index.
///
/// Coordinates outside `1..=resolution` are a caller bug and are not checked.
#[inline]
pub fn flatten(pos: &[usize], resolution: usize) -> usize {
    pos.iter()
        .fold(0, |offset, &coord| offset * resolution + (coord - 1))
}

/// Offset of `pos - e_axis` without materializing the shifted position.
#[inline]
pub fn flatten_decremented(pos: &[usize], axis: usize, resolution: usize) -> usize {
    flatten(pos, resolution) - stride(pos.len(), axis, resolution)
}

/// Distance in flat storage between neighbours along `axis`.
#[inline]
pub fn stride(dim: usize, axis: usize, resolution: usize) -> usize {
    resolution.pow((dim - 1 - axis) as u32)
}

/// Inverse of [`flatten`]: writes the 1-based multi-index of `offset` into `pos`.
pub fn unflatten_into(mut offset: usize, resolution: usize, pos: &mut [usize]) {
    for coord in pos.iter_mut().rev() {
        *coord = offset % resolution + 1;
        offset /= resolution;
    }
}

pub fn unflatten(offset: usize, resolution: usize, dim: usize) -> Vec<usize> {
    let mut pos = vec![1; dim];
    unflatten_into(offset, resolution, &mut pos);
    pos
}

/// Number of entries `resolution^dim`, rejecting sizes that overflow `usize`.
pub fn tensor_len(resolution: usize, dim: usize) -> Result<usize> {
    if resolution == 0 {
        return Err(FockError::ZeroResolution);
    }
    u32::try_from(dim)
        .ok()
        .and_then(|exp| resolution.checked_pow(exp))
        .ok_or(FockError::TensorTooLarge { resolution, dim })
}
