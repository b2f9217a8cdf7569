// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shapes and coordinates.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ConvscopeDataError;

/// Largest number of `f64` cells a single grid or tensor may hold.
pub const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Product of `extents`, or `None` when it exceeds [`MAX_CELLS`].
pub fn checked_cell_count(extents: &[usize]) -> Option<usize> {
    extents
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
        .filter(|&count| count <= MAX_CELLS)
}

/// Shape of a 2D grid. Both extents are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConvscopeDataError> {
        if rows == 0 || cols == 0 {
            return Err(ConvscopeDataError::BadParameters(format!(
                "Grid extents must be > 0, got {}x{}",
                rows, cols
            )));
        }
        if checked_cell_count(&[rows, cols]).is_none() {
            return Err(ConvscopeDataError::BadParameters(format!(
                "Grid {}x{} exceeds {} cells",
                rows, cols, MAX_CELLS
            )));
        }
        Ok(Self { rows, cols })
    }

    /// Caller guarantees both extents are non-zero.
    pub(crate) const fn new_unchecked(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Never overflows: construction caps the product at [`MAX_CELLS`].
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, coord: PlanarCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }
}

impl Display for GridShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl TryFrom<(usize, usize)> for GridShape {
    type Error = ConvscopeDataError;

    fn try_from((rows, cols): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(rows, cols)
    }
}

impl From<GridShape> for (usize, usize) {
    fn from(shape: GridShape) -> Self {
        (shape.rows, shape.cols)
    }
}

/// Shape of a 3D tensor laid out as (depth, height, width). All extents are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize, usize)", into = "(usize, usize, usize)")]
pub struct TensorShape {
    depth: usize,
    height: usize,
    width: usize,
}

impl TensorShape {
    pub fn new(depth: usize, height: usize, width: usize) -> Result<Self, ConvscopeDataError> {
        if depth == 0 || height == 0 || width == 0 {
            return Err(ConvscopeDataError::BadParameters(format!(
                "Tensor extents must be > 0, got {}x{}x{}",
                depth, height, width
            )));
        }
        if checked_cell_count(&[depth, height, width]).is_none() {
            return Err(ConvscopeDataError::BadParameters(format!(
                "Tensor {}x{}x{} exceeds {} cells",
                depth, height, width, MAX_CELLS
            )));
        }
        Ok(Self {
            depth,
            height,
            width,
        })
    }

    /// Caller guarantees all extents are non-zero.
    pub(crate) const fn new_unchecked(depth: usize, height: usize, width: usize) -> Self {
        Self {
            depth,
            height,
            width,
        }
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// The spatial (height × width) shape of one channel.
    pub const fn plane(&self) -> GridShape {
        GridShape {
            rows: self.height,
            cols: self.width,
        }
    }

    pub const fn cell_count(&self) -> usize {
        self.depth * self.height * self.width
    }

    pub fn contains(&self, coord: VolumetricCoord) -> bool {
        coord.channel < self.depth && coord.row < self.height && coord.col < self.width
    }
}

impl Display for TensorShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.depth, self.height, self.width)
    }
}

impl TryFrom<(usize, usize, usize)> for TensorShape {
    type Error = ConvscopeDataError;

    fn try_from((depth, height, width): (usize, usize, usize)) -> Result<Self, Self::Error> {
        Self::new(depth, height, width)
    }
}

impl From<TensorShape> for (usize, usize, usize) {
    fn from(shape: TensorShape) -> Self {
        (shape.depth, shape.height, shape.width)
    }
}

/// Cell address inside a 2D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanarCoord {
    pub row: usize,
    pub col: usize,
}

impl PlanarCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for PlanarCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// Cell address inside a 3D tensor: channel (depth index), then row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VolumetricCoord {
    pub channel: usize,
    pub row: usize,
    pub col: usize,
}

impl VolumetricCoord {
    pub const fn new(channel: usize, row: usize, col: usize) -> Self {
        Self { channel, row, col }
    }

    pub const fn planar(&self) -> PlanarCoord {
        PlanarCoord {
            row: self.row,
            col: self.col,
        }
    }
}

impl Display for VolumetricCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{},{}]", self.channel, self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_rejects_zero() {
        assert!(GridShape::new(0, 1).is_err());
        assert!(GridShape::new(1, 0).is_err());
        let shape = GridShape::new(2, 3).unwrap();
        assert_eq!(shape.cell_count(), 6);
        assert_eq!(shape.to_string(), "2x3");
    }

    #[test]
    fn test_shape_rejects_unaddressable_cell_count() {
        let side = 1usize << (usize::BITS / 2);
        assert!(matches!(
            GridShape::new(side, side),
            Err(ConvscopeDataError::BadParameters(_))
        ));
        assert!(GridShape::new(MAX_CELLS, 1).is_ok());
        assert!(GridShape::new(MAX_CELLS, 2).is_err());
        assert!(TensorShape::new(2, MAX_CELLS, 1).is_err());
        assert_eq!(checked_cell_count(&[3, 4, 5]), Some(60));
        assert_eq!(checked_cell_count(&[usize::MAX, 2]), None);
    }

    #[test]
    fn test_tensor_shape_plane() {
        let shape = TensorShape::new(3, 4, 5).unwrap();
        assert_eq!(shape.plane(), GridShape::new(4, 5).unwrap());
        assert_eq!(shape.to_string(), "3x4x5");
        assert!(TensorShape::new(3, 0, 5).is_err());
    }

    #[test]
    fn test_shape_deserialize_is_validated() {
        let ok: GridShape = serde_json::from_str("[2,2]").unwrap();
        assert_eq!(ok.rows(), 2);
        assert!(serde_json::from_str::<GridShape>("[0,2]").is_err());
        assert!(serde_json::from_str::<TensorShape>("[1,2,0]").is_err());
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(PlanarCoord::new(1, 2).to_string(), "[1,2]");
        assert_eq!(VolumetricCoord::new(0, 1, 2).to_string(), "[0,1,2]");
    }
}
