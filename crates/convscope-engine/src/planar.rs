// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! 2D convolution.

use convscope_structures::{round2, Field, Grid2D, PlanarCoord, ZeroPad};
use tracing::debug;

use crate::trace::{ConvolutionOutcome, StepRecord, TapRecord, Trace, WindowPlacement};
use crate::{validate_planar, ConvConfig, ConvolutionError, OutputGrid};

pub type PlanarOutcome = ConvolutionOutcome<PlanarCoord>;

/// Convolve `image` with `kernel`.
///
/// Output positions are visited row-major; within a position, kernel taps are
/// visited row-major. Tap coordinates refer to the padded image.
///
/// # Errors
/// `InvalidConfiguration` when no output shape exists; nothing is computed then.
pub fn convolve_planar(
    image: &Grid2D,
    kernel: &Grid2D,
    config: ConvConfig,
) -> Result<PlanarOutcome, ConvolutionError> {
    let output_shape = validate_planar(image.shape(), kernel.shape(), config)?;
    let kernel_shape = kernel.shape();
    let padded = image.zero_padded(config.padding)?;
    let cells = padded.view();
    let weights = kernel.view();

    let mut output = Grid2D::zeros(output_shape);
    let mut steps = Vec::with_capacity(output_shape.cell_count());

    for i in 0..output_shape.rows() {
        for j in 0..output_shape.cols() {
            let origin = PlanarCoord::new(i * config.stride, j * config.stride);
            let mut taps = Vec::with_capacity(kernel_shape.cell_count());
            let mut sum = 0.0;

            for fi in 0..kernel_shape.rows() {
                for fj in 0..kernel_shape.cols() {
                    let input = PlanarCoord::new(origin.row + fi, origin.col + fj);
                    let input_value = cells[[input.row, input.col]];
                    let kernel_value = weights[[fi, fj]];
                    let product = input_value * kernel_value;
                    sum += product;
                    taps.push(TapRecord {
                        input,
                        kernel: PlanarCoord::new(fi, fj),
                        input_value,
                        kernel_value,
                        product,
                    });
                }
            }

            let sum = round2(sum);
            let position = PlanarCoord::new(i, j);
            output.set(position, sum)?;
            steps.push(StepRecord {
                output: position,
                window: WindowPlacement {
                    origin,
                    extent: kernel_shape,
                },
                taps,
                sum,
            });
        }
    }

    debug!(
        "[CONV2D] image={} kernel={} stride={} padding={} -> output={} ({} steps)",
        image.shape(),
        kernel_shape,
        config.stride,
        config.padding,
        output_shape,
        steps.len()
    );

    Ok(ConvolutionOutcome {
        output: OutputGrid::new(output),
        trace: Trace::new(output_shape, steps),
    })
}
