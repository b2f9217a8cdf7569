// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Output-shape derivation.
//!
//! `output = floor((input + 2 * padding - kernel) / stride) + 1` per spatial axis.
//! Every function here is a side-effect free query, usable as a live preview
//! while the configuration is being edited.

use convscope_structures::{checked_cell_count, GridShape, TensorShape};

use crate::{ConvConfig, ConvolutionError, DimensionFailure, SpatialAxis};

/// Either the derived output shape or the reason none exists.
pub type ValidationResult = Result<GridShape, ConvolutionError>;

/// Output extent along one axis.
pub fn output_extent(
    input: usize,
    kernel: usize,
    stride: usize,
    padding: usize,
    axis: SpatialAxis,
) -> Result<usize, DimensionFailure> {
    if stride == 0 {
        return Err(DimensionFailure::ZeroStride);
    }
    if input == 0 || kernel == 0 {
        return Err(DimensionFailure::ZeroExtent {
            axis,
            input,
            kernel,
        });
    }
    let padded_input = padding
        .checked_mul(2)
        .and_then(|border| input.checked_add(border))
        .ok_or(DimensionFailure::PaddingOverflow {
            axis,
            input,
            padding,
        })?;
    if kernel > padded_input {
        return Err(DimensionFailure::KernelExceedsPaddedInput {
            axis,
            padded_input,
            kernel,
        });
    }
    Ok((padded_input - kernel) / stride + 1)
}

/// `depth` counts the channels the padded input carries (1 for a grid).
fn planar_output(
    depth: usize,
    input: GridShape,
    kernel: GridShape,
    config: ConvConfig,
) -> Result<GridShape, DimensionFailure> {
    let rows = output_extent(
        input.rows(),
        kernel.rows(),
        config.stride,
        config.padding,
        SpatialAxis::Rows,
    )?;
    let cols = output_extent(
        input.cols(),
        kernel.cols(),
        config.stride,
        config.padding,
        SpatialAxis::Cols,
    )?;
    // output_extent already checked both sums
    let padded_rows = input.rows() + 2 * config.padding;
    let padded_cols = input.cols() + 2 * config.padding;
    if checked_cell_count(&[depth, padded_rows, padded_cols]).is_none() {
        return Err(DimensionFailure::PaddedInputTooLarge {
            depth,
            rows: padded_rows,
            cols: padded_cols,
        });
    }
    // both extents are >= 1 by construction
    GridShape::new(rows, cols).map_err(|_| DimensionFailure::ZeroExtent {
        axis: SpatialAxis::Rows,
        input: rows,
        kernel: cols,
    })
}

/// Output shape of a 2D convolution.
pub fn validate_planar(image: GridShape, kernel: GridShape, config: ConvConfig) -> ValidationResult {
    Ok(planar_output(1, image, kernel, config)?)
}

/// Output shape of a depth-reducing 3D convolution.
///
/// The kernel depth must equal the input depth exactly; that check runs
/// before any spatial check and has its own error variant.
pub fn validate_volumetric(
    input: TensorShape,
    kernel: TensorShape,
    config: ConvConfig,
) -> ValidationResult {
    if kernel.depth() != input.depth() {
        return Err(ConvolutionError::KernelDepthMismatch {
            kernel_depth: kernel.depth(),
            input_depth: input.depth(),
        });
    }
    Ok(planar_output(
        input.depth(),
        input.plane(),
        kernel.plane(),
        config,
    )?)
}
