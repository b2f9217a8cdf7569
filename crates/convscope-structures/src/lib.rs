// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # convscope-structures
//!
//! The data model shared by every convscope crate:
//! - **Shapes**: [`GridShape`] and [`TensorShape`], never zero along any axis
//! - **Coordinates**: [`PlanarCoord`] and [`VolumetricCoord`]
//! - **Containers**: [`Grid2D`] (rows × cols) and [`Tensor3D`] (depth × height × width)
//! - **Padding**: symmetric zero padding on spatial axes ([`ZeroPad`])
//!
//! Kernels use the same containers as inputs; the role is decided by the caller.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
mod field;
mod grid;
mod padding;
mod shape;
mod tensor;

pub use error::ConvscopeDataError;
pub use field::Field;
pub use grid::Grid2D;
pub use padding::ZeroPad;
pub use shape::{
    checked_cell_count, GridShape, PlanarCoord, TensorShape, VolumetricCoord, MAX_CELLS,
};
pub use tensor::Tensor3D;

/// Round to two fractional digits, the display precision used across convscope.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(-0.126), -0.13);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(6.0), 6.0);
    }
}
