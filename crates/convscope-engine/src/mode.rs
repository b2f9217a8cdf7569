// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Type-level selection between the 2D and 3D engines.

use convscope_structures::{Field, Grid2D, GridShape, Tensor3D, TensorShape};

use crate::{
    convolve_planar, convolve_volumetric, validate_planar, validate_volumetric, ConvConfig,
    ConvolutionError, ConvolutionOutcome, ValidationResult,
};

/// A convolution engine over one kind of [`Field`].
pub trait ConvolutionMode {
    type Field: Field;

    /// Short label used in logs ("2D" / "3D")
    const LABEL: &'static str;

    fn validate(
        input: <Self::Field as Field>::Shape,
        kernel: <Self::Field as Field>::Shape,
        config: ConvConfig,
    ) -> ValidationResult;

    fn convolve(
        input: &Self::Field,
        kernel: &Self::Field,
        config: ConvConfig,
    ) -> Result<ConvolutionOutcome<<Self::Field as Field>::Coord>, ConvolutionError>;
}

/// 2D images and kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Planar;

/// Multi-channel inputs with a kernel of equal depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volumetric;

impl ConvolutionMode for Planar {
    type Field = Grid2D;
    const LABEL: &'static str = "2D";

    fn validate(input: GridShape, kernel: GridShape, config: ConvConfig) -> ValidationResult {
        validate_planar(input, kernel, config)
    }

    fn convolve(
        input: &Grid2D,
        kernel: &Grid2D,
        config: ConvConfig,
    ) -> Result<ConvolutionOutcome<<Grid2D as Field>::Coord>, ConvolutionError> {
        convolve_planar(input, kernel, config)
    }
}

impl ConvolutionMode for Volumetric {
    type Field = Tensor3D;
    const LABEL: &'static str = "3D";

    fn validate(input: TensorShape, kernel: TensorShape, config: ConvConfig) -> ValidationResult {
        validate_volumetric(input, kernel, config)
    }

    fn convolve(
        input: &Tensor3D,
        kernel: &Tensor3D,
        config: ConvConfig,
    ) -> Result<ConvolutionOutcome<<Tensor3D as Field>::Coord>, ConvolutionError> {
        convolve_volumetric(input, kernel, config)
    }
}
