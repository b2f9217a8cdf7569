// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Symmetric zero padding on spatial axes.

use ndarray::{s, Array2, Array3};

use crate::{checked_cell_count, ConvscopeDataError, Grid2D, Tensor3D};

/// Pure zero padding. The result never aliases the input, including for `pad == 0`.
pub trait ZeroPad: Sized {
    /// Add `pad` zero rows/cols to every spatial edge. Depth is never padded.
    fn zero_padded(&self, pad: usize) -> Result<Self, ConvscopeDataError>;
}

fn padded_extent(extent: usize, pad: usize) -> Result<usize, ConvscopeDataError> {
    pad.checked_mul(2)
        .and_then(|border| extent.checked_add(border))
        .ok_or(ConvscopeDataError::PaddingOverflow {
            extent,
            padding: pad,
        })
}

/// Padded extents of the given spatial axes, rejected when the padded
/// container could not be allocated.
fn padded_extents<const N: usize>(
    depth: usize,
    extents: [usize; N],
    pad: usize,
) -> Result<[usize; N], ConvscopeDataError> {
    let mut padded = [0usize; N];
    for (slot, &extent) in padded.iter_mut().zip(extents.iter()) {
        *slot = padded_extent(extent, pad)?;
    }
    let mut all = Vec::with_capacity(N + 1);
    all.push(depth);
    all.extend_from_slice(&padded);
    if checked_cell_count(&all).is_none() {
        return Err(ConvscopeDataError::PaddingOverflow {
            extent: extents.iter().copied().max().unwrap_or(0),
            padding: pad,
        });
    }
    Ok(padded)
}

impl ZeroPad for Grid2D {
    fn zero_padded(&self, pad: usize) -> Result<Self, ConvscopeDataError> {
        if pad == 0 {
            return Ok(self.clone());
        }
        let (rows, cols) = (self.rows(), self.cols());
        let [padded_rows, padded_cols] = padded_extents(1, [rows, cols], pad)?;
        let mut cells = Array2::zeros((padded_rows, padded_cols));
        cells
            .slice_mut(s![pad..pad + rows, pad..pad + cols])
            .assign(self.array());
        Grid2D::try_from(cells)
    }
}

impl ZeroPad for Tensor3D {
    fn zero_padded(&self, pad: usize) -> Result<Self, ConvscopeDataError> {
        if pad == 0 {
            return Ok(self.clone());
        }
        let (depth, height, width) = (self.depth(), self.height(), self.width());
        let [padded_height, padded_width] = padded_extents(depth, [height, width], pad)?;
        let mut cells = Array3::zeros((depth, padded_height, padded_width));
        cells
            .slice_mut(s![.., pad..pad + height, pad..pad + width])
            .assign(self.array());
        Tensor3D::try_from(cells)
    }
}
