// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::ConvscopeDataError;

/// Common surface of [`crate::Grid2D`] and [`crate::Tensor3D`].
///
/// Lets workspaces, presets and the randomizer be written once for both
/// convolution modes.
pub trait Field: Clone + PartialEq + Debug {
    type Shape: Copy + Eq + Hash + Debug + Display;
    type Coord: Copy + Eq + Debug + Display;

    fn zeros(shape: Self::Shape) -> Self;

    /// Build a container by evaluating `f` at every coordinate in row-major order
    /// (channel outermost for tensors).
    fn from_fn<F>(shape: Self::Shape, f: F) -> Self
    where
        F: FnMut(Self::Coord) -> f64;

    fn shape(&self) -> Self::Shape;

    fn get(&self, coord: Self::Coord) -> Option<f64>;

    fn set(&mut self, coord: Self::Coord, value: f64) -> Result<(), ConvscopeDataError>;
}
