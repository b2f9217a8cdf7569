// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use convscope_structures::ConvscopeDataError;
use serde::{Deserialize, Serialize};

/// Spatial axis a dimension check failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialAxis {
    Rows,
    Cols,
}

impl Display for SpatialAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpatialAxis::Rows => write!(f, "rows"),
            SpatialAxis::Cols => write!(f, "cols"),
        }
    }
}

/// Why an output shape cannot be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum DimensionFailure {
    #[error("stride must be >= 1")]
    ZeroStride,

    #[error("{axis}: input and kernel extents must be > 0 (input={input}, kernel={kernel})")]
    ZeroExtent {
        axis: SpatialAxis,
        input: usize,
        kernel: usize,
    },

    #[error("{axis}: padding {padding} overflows input extent {input}")]
    PaddingOverflow {
        axis: SpatialAxis,
        input: usize,
        padding: usize,
    },

    #[error("{axis}: kernel extent {kernel} exceeds padded input extent {padded_input}")]
    KernelExceedsPaddedInput {
        axis: SpatialAxis,
        padded_input: usize,
        kernel: usize,
    },

    /// The padded input holds more cells than a single allocation can address.
    #[error("padded input {depth}x{rows}x{cols} is too large to allocate")]
    PaddedInputTooLarge {
        depth: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors produced by validation and convolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvolutionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] DimensionFailure),

    #[error("Kernel depth ({kernel_depth}) must match input depth ({input_depth})")]
    KernelDepthMismatch {
        kernel_depth: usize,
        input_depth: usize,
    },

    #[error(transparent)]
    Data(#[from] ConvscopeDataError),
}

impl ConvolutionError {
    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            ConvolutionError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            ConvolutionError::KernelDepthMismatch { .. } => "KERNEL_DEPTH_MISMATCH",
            ConvolutionError::Data(_) => "DATA_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let invalid = ConvolutionError::from(DimensionFailure::ZeroStride);
        let depth = ConvolutionError::KernelDepthMismatch {
            kernel_depth: 2,
            input_depth: 3,
        };
        assert_ne!(invalid.code(), depth.code());
        assert_eq!(
            depth.to_string(),
            "Kernel depth (2) must match input depth (3)"
        );
    }

    #[test]
    fn test_failure_message_names_axis() {
        let failure = DimensionFailure::KernelExceedsPaddedInput {
            axis: SpatialAxis::Cols,
            padded_input: 2,
            kernel: 3,
        };
        assert_eq!(
            failure.to_string(),
            "cols: kernel extent 3 exceeds padded input extent 2"
        );
    }
}
