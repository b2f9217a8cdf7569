// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use convscope_structures::{Field, Grid2D, GridShape, PlanarCoord};
use serde::{Deserialize, Serialize};

/// Feature map produced by a convolution. Every cell is rounded to two
/// fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputGrid(Grid2D);

impl OutputGrid {
    pub(crate) fn new(grid: Grid2D) -> Self {
        Self(grid)
    }

    pub fn grid(&self) -> &Grid2D {
        &self.0
    }

    pub fn shape(&self) -> GridShape {
        self.0.shape()
    }

    pub fn get(&self, coord: PlanarCoord) -> Option<f64> {
        self.0.get(coord)
    }

    pub fn into_grid(self) -> Grid2D {
        self.0
    }
}

impl Display for OutputGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Feature Map ({}):", self.shape())?;
        for row in self.0.view().rows() {
            let cells = row
                .iter()
                .map(|value| format!("{:.2}", value))
                .collect::<Vec<_>>()
                .join("  ");
            write!(f, "\n{}", cells)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_map_rendering() {
        let grid = Grid2D::from_rows(&[[6.0, 8.0], [12.0, -0.5]]).unwrap();
        assert_eq!(
            OutputGrid::new(grid).to_string(),
            "Feature Map (2x2):\n6.00  8.00\n12.00  -0.50"
        );
    }
}
