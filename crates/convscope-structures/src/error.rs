// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::shape::GridShape;

/// Errors raised while building or mutating grids and tensors.
///
/// # Examples
/// ```
/// use convscope_structures::{ConvscopeDataError, GridShape};
///
/// assert!(matches!(
///     GridShape::new(0, 3),
///     Err(ConvscopeDataError::BadParameters(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvscopeDataError {
    /// Invalid parameters provided to a constructor
    #[error("Bad Parameters: {0}")]
    BadParameters(String),

    /// A coordinate does not address a cell of the container
    #[error("Coordinate {coord} is outside a container of shape {shape}")]
    OutOfBounds { coord: String, shape: String },

    /// Nested rows of different lengths
    #[error("Ragged rows: row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Channels of a tensor must share height and width
    #[error("Channel {channel} has shape {found}, expected {expected}")]
    ChannelShapeMismatch {
        channel: usize,
        expected: GridShape,
        found: GridShape,
    },

    /// A padded extent does not fit in `usize`
    #[error("Padding {padding} overflows an axis of length {extent}")]
    PaddingOverflow { extent: usize, padding: usize },
}
