// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dense 3D tensor of `f64` cells, laid out as (depth, height, width).

use ndarray::{Array3, ArrayView2, ArrayView3, Axis};
use serde::{Deserialize, Serialize};

use crate::{ConvscopeDataError, Field, Grid2D, TensorShape, VolumetricCoord};

/// Ordered sequence of equally sized 2D channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array3<f64>", into = "Array3<f64>")]
pub struct Tensor3D {
    cells: Array3<f64>,
}

impl Tensor3D {
    /// Stack channels along the depth axis. All channels must share one shape.
    pub fn from_channels(channels: &[Grid2D]) -> Result<Self, ConvscopeDataError> {
        let first = channels.first().ok_or_else(|| {
            ConvscopeDataError::BadParameters("Tensor must have at least one channel".into())
        })?;
        let plane = first.shape();

        let mut flat = Vec::with_capacity(channels.len() * plane.cell_count());
        for (channel, grid) in channels.iter().enumerate() {
            if grid.shape() != plane {
                return Err(ConvscopeDataError::ChannelShapeMismatch {
                    channel,
                    expected: plane,
                    found: grid.shape(),
                });
            }
            flat.extend(grid.array().iter().copied());
        }

        let cells = Array3::from_shape_vec((channels.len(), plane.rows(), plane.cols()), flat)
            .map_err(|e| ConvscopeDataError::BadParameters(e.to_string()))?;
        Ok(Self { cells })
    }

    /// Build a tensor from `[channel][row][col]` nested vectors.
    pub fn from_nested(channels: &[Vec<Vec<f64>>]) -> Result<Self, ConvscopeDataError> {
        let grids = channels
            .iter()
            .map(|rows| Grid2D::from_rows(rows))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_channels(&grids)
    }

    pub fn depth(&self) -> usize {
        self.cells.len_of(Axis(0))
    }

    pub fn height(&self) -> usize {
        self.cells.len_of(Axis(1))
    }

    pub fn width(&self) -> usize {
        self.cells.len_of(Axis(2))
    }

    pub fn view(&self) -> ArrayView3<'_, f64> {
        self.cells.view()
    }

    pub fn channel_view(&self, channel: usize) -> Option<ArrayView2<'_, f64>> {
        (channel < self.depth()).then(|| self.cells.index_axis(Axis(0), channel))
    }

    pub fn channels(&self) -> impl Iterator<Item = ArrayView2<'_, f64>> {
        self.cells.outer_iter()
    }

    pub fn to_nested(&self) -> Vec<Vec<Vec<f64>>> {
        self.channels()
            .map(|plane| plane.rows().into_iter().map(|row| row.to_vec()).collect())
            .collect()
    }

    pub(crate) fn array(&self) -> &Array3<f64> {
        &self.cells
    }
}

impl Field for Tensor3D {
    type Shape = TensorShape;
    type Coord = VolumetricCoord;

    fn zeros(shape: TensorShape) -> Self {
        Self {
            cells: Array3::zeros((shape.depth(), shape.height(), shape.width())),
        }
    }

    fn from_fn<F>(shape: TensorShape, mut f: F) -> Self
    where
        F: FnMut(VolumetricCoord) -> f64,
    {
        Self {
            cells: Array3::from_shape_fn(
                (shape.depth(), shape.height(), shape.width()),
                |(channel, row, col)| f(VolumetricCoord::new(channel, row, col)),
            ),
        }
    }

    fn shape(&self) -> TensorShape {
        TensorShape::new_unchecked(self.depth(), self.height(), self.width())
    }

    fn get(&self, coord: VolumetricCoord) -> Option<f64> {
        self.cells.get((coord.channel, coord.row, coord.col)).copied()
    }

    fn set(&mut self, coord: VolumetricCoord, value: f64) -> Result<(), ConvscopeDataError> {
        let shape = self.shape();
        match self.cells.get_mut((coord.channel, coord.row, coord.col)) {
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

impl TryFrom<Array3<f64>> for Tensor3D {
    type Error = ConvscopeDataError;

    fn try_from(cells: Array3<f64>) -> Result<Self, Self::Error> {
        let (depth, height, width) = cells.dim();
        TensorShape::new(depth, height, width)?;
        Ok(Self { cells })
    }
}

impl From<Tensor3D> for Array3<f64> {
    fn from(tensor: Tensor3D) -> Self {
        tensor.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridShape;

    fn nested() -> Vec<Vec<Vec<f64>>> {
        vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0], vec![7.0, 8.0]],
        ]
    }

    #[test]
    fn test_from_nested() {
        let tensor = Tensor3D::from_nested(&nested()).unwrap();
        assert_eq!(tensor.shape(), TensorShape::new(2, 2, 2).unwrap());
        assert_eq!(tensor.get(VolumetricCoord::new(1, 0, 1)), Some(6.0));
        assert_eq!(tensor.to_nested(), nested());
    }

    #[test]
    fn test_channels_must_share_plane() {
        let a = Grid2D::zeros(GridShape::new(2, 2).unwrap());
        let b = Grid2D::zeros(GridShape::new(2, 3).unwrap());
        assert!(matches!(
            Tensor3D::from_channels(&[a, b]),
            Err(ConvscopeDataError::ChannelShapeMismatch { channel: 1, .. })
        ));
        assert!(Tensor3D::from_channels(&[]).is_err());
    }

    #[test]
    fn test_channel_view() {
        let tensor = Tensor3D::from_nested(&nested()).unwrap();
        let plane = tensor.channel_view(1).unwrap();
        assert_eq!(plane[[1, 0]], 7.0);
        assert!(tensor.channel_view(2).is_none());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut tensor = Tensor3D::zeros(TensorShape::new(1, 2, 2).unwrap());
        tensor.set(VolumetricCoord::new(0, 1, 1), 3.0).unwrap();
        assert_eq!(tensor.get(VolumetricCoord::new(0, 1, 1)), Some(3.0));
        assert!(tensor.set(VolumetricCoord::new(1, 0, 0), 3.0).is_err());
    }
}
