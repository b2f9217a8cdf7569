// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dense 2D grid of `f64` cells.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{ConvscopeDataError, Field, GridShape, PlanarCoord};

/// Ordered rows of numeric cells. Used for images, 2D kernels and feature maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<f64>", into = "Array2<f64>")]
pub struct Grid2D {
    cells: Array2<f64>,
}

impl Grid2D {
    /// Build a grid from nested rows.
    ///
    /// # Errors
    /// `BadParameters` for empty input, `RaggedRows` when row lengths differ.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ConvscopeDataError> {
        let expected = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => {
                return Err(ConvscopeDataError::BadParameters(
                    "Grid must have at least one row".into(),
                ))
            }
        };
        let shape = GridShape::new(rows.len(), expected)?;

        let mut flat = Vec::with_capacity(shape.cell_count());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != expected {
                return Err(ConvscopeDataError::RaggedRows {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            flat.extend_from_slice(cells);
        }

        let cells = Array2::from_shape_vec((shape.rows(), shape.cols()), flat)
            .map_err(|e| ConvscopeDataError::BadParameters(e.to_string()))?;
        Ok(Self { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.cells.view()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<F: FnMut(f64) -> f64>(&self, mut f: F) -> Self {
        Self {
            cells: self.cells.mapv(|v| f(v)),
        }
    }

    pub(crate) fn array(&self) -> &Array2<f64> {
        &self.cells
    }
}

impl Field for Grid2D {
    type Shape = GridShape;
    type Coord = PlanarCoord;

    fn zeros(shape: GridShape) -> Self {
        Self {
            cells: Array2::zeros((shape.rows(), shape.cols())),
        }
    }

    fn from_fn<F>(shape: GridShape, mut f: F) -> Self
    where
        F: FnMut(PlanarCoord) -> f64,
    {
        // from_shape_fn visits indices in logical (row-major) order
        Self {
            cells: Array2::from_shape_fn((shape.rows(), shape.cols()), |(row, col)| {
                f(PlanarCoord::new(row, col))
            }),
        }
    }

    fn shape(&self) -> GridShape {
        // non-zero extents are enforced on every construction path
        GridShape::new_unchecked(self.rows(), self.cols())
    }

    fn get(&self, coord: PlanarCoord) -> Option<f64> {
        self.cells.get((coord.row, coord.col)).copied()
    }

    fn set(&mut self, coord: PlanarCoord, value: f64) -> Result<(), ConvscopeDataError> {
        let shape = self.shape();
        match self.cells.get_mut((coord.row, coord.col)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(ConvscopeDataError::OutOfBounds {
                coord: coord.to_string(),
                shape: shape.to_string(),
            }),
        }
    }
}

impl TryFrom<Array2<f64>> for Grid2D {
    type Error = ConvscopeDataError;

    fn try_from(cells: Array2<f64>) -> Result<Self, Self::Error> {
        GridShape::new(cells.nrows(), cells.ncols())?;
        Ok(Self { cells })
    }
}

impl From<Grid2D> for Array2<f64> {
    fn from(grid: Grid2D) -> Self {
        grid.cells
    }
}
