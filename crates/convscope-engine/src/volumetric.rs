// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Depth-reducing 3D convolution.
//!
//! The kernel spans the full input depth, so the output is a single 2D
//! feature map. Taps are enumerated channel-outermost, then kernel row, then
//! kernel column; traces compare equal only under this ordering.

use convscope_structures::{
    round2, Field, Grid2D, PlanarCoord, Tensor3D, VolumetricCoord, ZeroPad,
};
use tracing::debug;

use crate::trace::{ConvolutionOutcome, StepRecord, TapRecord, Trace, WindowPlacement};
use crate::{validate_volumetric, ConvConfig, ConvolutionError, OutputGrid};

pub type VolumetricOutcome = ConvolutionOutcome<VolumetricCoord>;

/// Convolve `input` with a kernel of identical depth.
///
/// # Errors
/// `KernelDepthMismatch` when depths differ, `InvalidConfiguration` when no
/// spatial output exists.
pub fn convolve_volumetric(
    input: &Tensor3D,
    kernel: &Tensor3D,
    config: ConvConfig,
) -> Result<VolumetricOutcome, ConvolutionError> {
    let output_shape = validate_volumetric(input.shape(), kernel.shape(), config)?;
    let kernel_shape = kernel.shape();
    let padded = input.zero_padded(config.padding)?;
    let cells = padded.view();
    let weights = kernel.view();

    let mut output = Grid2D::zeros(output_shape);
    let mut steps = Vec::with_capacity(output_shape.cell_count());

    for i in 0..output_shape.rows() {
        for j in 0..output_shape.cols() {
            let origin = PlanarCoord::new(i * config.stride, j * config.stride);
            let mut taps = Vec::with_capacity(kernel_shape.cell_count());
            let mut sum = 0.0;

            for kd in 0..kernel_shape.depth() {
                for kh in 0..kernel_shape.height() {
                    for kw in 0..kernel_shape.width() {
                        let source = VolumetricCoord::new(kd, origin.row + kh, origin.col + kw);
                        let input_value = cells[[source.channel, source.row, source.col]];
                        let kernel_value = weights[[kd, kh, kw]];
                        let product = input_value * kernel_value;
                        sum += product;
                        taps.push(TapRecord {
                            input: source,
                            kernel: VolumetricCoord::new(kd, kh, kw),
                            input_value,
                            kernel_value,
                            product,
                        });
                    }
                }
            }

            let sum = round2(sum);
            let position = PlanarCoord::new(i, j);
            output.set(position, sum)?;
            steps.push(StepRecord {
                output: position,
                window: WindowPlacement {
                    origin,
                    extent: kernel_shape.plane(),
                },
                taps,
                sum,
            });
        }
    }

    debug!(
        "[CONV3D] input={} kernel={} stride={} padding={} -> output={} ({} steps)",
        input.shape(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use convscope_structures::{GridShape, TensorShape};

    fn ones(depth: usize, height: usize, width: usize) -> Tensor3D {
        Tensor3D::from_fn(TensorShape::new(depth, height, width).unwrap(), |_| 1.0)
    }

    #[test]
    fn test_depth_is_fully_reduced() {
        let input = Tensor3D::from_fn(TensorShape::new(2, 3, 3).unwrap(), |c| {
            (c.channel + 1) as f64
        });
        let kernel = ones(2, 2, 2);
        let outcome = convolve_volumetric(&input, &kernel, ConvConfig::default()).unwrap();

        assert_eq!(outcome.output.shape(), GridShape::new(2, 2).unwrap());
        // 4 taps of 1.0 on channel 0 plus 4 taps of 2.0 on channel 1
        assert!(outcome.trace.iter().all(|step| step.sum == 12.0));
        assert!(outcome.trace.iter().all(|step| step.taps.len() == 8));
    }

    #[test]
    fn test_tap_order_is_depth_outermost() {
        let input = ones(2, 2, 2);
        let kernel = ones(2, 2, 2);
        let outcome = convolve_volumetric(&input, &kernel, ConvConfig::default()).unwrap();
        let kernel_coords: Vec<_> = outcome.trace.get(0).unwrap().taps.iter().map(|t| t.kernel).collect();
        let expected: Vec<_> = (0..2)
            .flat_map(|d| (0..2).flat_map(move |h| (0..2).map(move |w| VolumetricCoord::new(d, h, w))))
            .collect();
        assert_eq!(kernel_coords, expected);
    }

    #[test]
    fn test_padding_skips_depth() {
        let input = ones(3, 2, 2);
        let kernel = ones(3, 3, 3);
        let outcome = convolve_volumetric(&input, &kernel, ConvConfig::new(1, 1)).unwrap();
        assert_eq!(outcome.output.shape(), GridShape::new(2, 2).unwrap());
        let first = outcome.trace.get(0).unwrap();
        assert_eq!(first.taps[0].input, VolumetricCoord::new(0, 0, 0));
        assert_eq!(first.taps[0].input_value, 0.0);
        // every channel sees the full 2x2 image inside a 3x3 window
        assert_eq!(first.sum, 12.0);
    }

    #[test]
    fn test_depth_mismatch_yields_no_trace() {
        let input = ones(3, 4, 4);
        let kernel = ones(2, 3, 3);
        assert_eq!(
            convolve_volumetric(&input, &kernel, ConvConfig::default()),
            Err(ConvolutionError::KernelDepthMismatch {
                kernel_depth: 2,
                input_depth: 3
            })
        );
    }
}
