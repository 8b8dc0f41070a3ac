//! Odometer traversal of the `[1, resolution]^dim` hypercube.
//!
//! Axis 0 varies fastest. Every step produces the next position to fill
//! together with its same-axis predecessor `jump_from = next_pos - e_k`.
//! Decrementing any coordinate of a position yields an odometer value that
//! was already visited, so both kinds of predecessor the recurrence reads
//! are always available.

use crate::error::Result;
use crate::index::tensor_len;

/// Stateful odometer producing the `resolution^dim - 1` positions after the
/// all-ones seed position.
#[derive(Clone, Debug)]
pub struct PositionEnumerator {
    resolution: usize,
    next_pos: Vec<usize>,
    jump_from: Vec<usize>,
    /// Axis that received a carry on the previous step. Its `jump_from`
    /// coordinate still holds the pre-carry value and is caught up on the
    /// next call.
    pending_carry_axis: Option<usize>,
    remaining: usize,
}

impl PositionEnumerator {
    /// Create an enumerator positioned at the seed entry.
    ///
    /// It produces exactly `resolution^dim - 1` steps.
    pub fn new(resolution: usize, dim: usize) -> Result<Self> {
        let remaining = tensor_len(resolution, dim)? - 1;
        Ok(Self {
            resolution,
            next_pos: vec![1; dim],
            jump_from: vec![1; dim],
            pending_carry_axis: None,
            remaining,
        })
    }

    /// Advance to the next position and return the changed axis `k`.
    ///
    /// Returns `None` once every position has been produced.
    pub fn advance(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if let Some(axis) = self.pending_carry_axis.take() {
            self.jump_from[axis] += 1;
        }

        let mut incremented = None;
        for axis in 0..self.next_pos.len() {
            if self.next_pos[axis] < self.resolution {
                self.jump_from[axis] = self.next_pos[axis];
                self.next_pos[axis] += 1;
                incremented = Some(axis);
                break;
            }
            self.next_pos[axis] = 1;
            self.jump_from[axis] = 1;
            self.pending_carry_axis = Some(axis + 1);
        }

        let k = self
            .next_pos
            .iter()
            .zip(&self.jump_from)
            .position(|(next, from)| next != from)?;
        debug_assert_eq!(Some(k), incremented);
        Some(k)
    }

    /// Position about to be filled.
    #[inline]
    pub fn next_pos(&self) -> &[usize] {
        &self.next_pos
    }

    /// Same-axis predecessor of [`next_pos`](Self::next_pos).
    #[inline]
    pub fn jump_from(&self) -> &[usize] {
        &self.jump_from
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}
