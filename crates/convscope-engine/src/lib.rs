// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # convscope-engine
//!
//! Pure convolution math. Every computation:
//! 1. validates the shapes against the stride/padding configuration,
//! 2. zero-pads the input on its spatial axes,
//! 3. slides the kernel row-major over the output grid, recording one
//!    [`TapRecord`] per multiply-accumulate term and one [`StepRecord`] per
//!    output position.
//!
//! Identical inputs always yield identical traces and feature maps.
//!
//! ```
//! use convscope_engine::{convolve_planar, ConvConfig};
//! use convscope_structures::Grid2D;
//!
//! let image = Grid2D::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]])?;
//! let kernel = Grid2D::from_rows(&[[1.0, 0.0], [0.0, 1.0]])?;
//! let outcome = convolve_planar(&image, &kernel, ConvConfig::default())?;
//! assert_eq!(outcome.output.grid().to_rows(), vec![vec![6.0, 8.0], vec![12.0, 14.0]]);
//! assert_eq!(outcome.trace.len(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod error;
mod mode;
mod output;
mod planar;
mod trace;
pub mod validator;
mod volumetric;

pub use config::ConvConfig;
pub use error::{ConvolutionError, DimensionFailure, SpatialAxis};
pub use mode::{ConvolutionMode, Planar, Volumetric};
pub use output::OutputGrid;
pub use planar::{convolve_planar, PlanarOutcome};
pub use trace::{ConvolutionOutcome, StepRecord, TapRecord, Trace, WindowPlacement};
pub use validator::{output_extent, validate_planar, validate_volumetric, ValidationResult};
pub use volumetric::{convolve_volumetric, VolumetricOutcome};
