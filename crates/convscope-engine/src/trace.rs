// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Replayable computation records.
//!
//! A [`Trace`] holds one [`StepRecord`] per output position in row-major
//! order; each step holds its [`TapRecord`]s in evaluation order. Values are
//! kept at full precision; two fractional digits are applied only when a
//! record is rendered, except for [`StepRecord::sum`] which is stored rounded.

use std::fmt::{Display, Formatter};

use convscope_structures::{GridShape, PlanarCoord};
use serde::{Deserialize, Serialize};

use crate::OutputGrid;

/// One multiply-accumulate term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapRecord<C> {
    /// Coordinate in the padded input
    pub input: C,
    pub kernel: C,
    pub input_value: f64,
    pub kernel_value: f64,
    pub product: f64,
}

impl<C: Display> Display for TapRecord<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} × {}: {:.2} × {:.2} = {:.2}",
            self.input, self.kernel, self.input_value, self.kernel_value, self.product
        )
    }
}

/// Receptive field of one step, in padded input space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub origin: PlanarCoord,
    pub extent: GridShape,
}

impl WindowPlacement {
    pub fn contains(&self, coord: PlanarCoord) -> bool {
        coord.row >= self.origin.row
            && coord.row < self.origin.row + self.extent.rows()
            && coord.col >= self.origin.col
            && coord.col < self.origin.col + self.extent.cols()
    }
}

/// Everything that produced one output cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord<C> {
    pub output: PlanarCoord,
    pub window: WindowPlacement,
    pub taps: Vec<TapRecord<C>>,
    /// Accumulated sum, rounded to two fractional digits
    pub sum: f64,
}

impl<C> StepRecord<C> {
    /// Is `coord` (padded input space) inside this step's receptive field?
    pub fn window_contains(&self, coord: PlanarCoord) -> bool {
        self.window.contains(coord)
    }
}

/// Ordered per-output-position records of one convolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace<C> {
    output_shape: GridShape,
    steps: Vec<StepRecord<C>>,
}

impl<C> Trace<C> {
    pub(crate) fn new(output_shape: GridShape, steps: Vec<StepRecord<C>>) -> Self {
        Self {
            output_shape,
            steps,
        }
    }

    pub fn output_shape(&self) -> GridShape {
        self.output_shape
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord<C>> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[StepRecord<C>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord<C>> {
        self.steps.iter()
    }
}

impl<'a, C> IntoIterator for &'a Trace<C> {
    type Item = &'a StepRecord<C>;
    type IntoIter = std::slice::Iter<'a, StepRecord<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Result of a successful convolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionOutcome<C> {
    pub output: OutputGrid,
    pub trace: Trace<C>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use convscope_structures::VolumetricCoord;

    #[test]
    fn test_tap_display_uses_two_decimals() {
        let tap = TapRecord {
            input: VolumetricCoord::new(0, 1, 2),
            kernel: VolumetricCoord::new(0, 0, 1),
            input_value: 1.0 / 3.0,
            kernel_value: 2.0,
            product: 2.0 / 3.0,
        };
        assert_eq!(tap.to_string(), "[0,1,2] × [0,0,1]: 0.33 × 2.00 = 0.67");
    }

    #[test]
    fn test_window_contains() {
        let window = WindowPlacement {
            origin: PlanarCoord::new(1, 2),
            extent: GridShape::new(2, 2).unwrap(),
        };
        assert!(window.contains(PlanarCoord::new(1, 2)));
        assert!(window.contains(PlanarCoord::new(2, 3)));
        assert!(!window.contains(PlanarCoord::new(3, 3)));
        assert!(!window.contains(PlanarCoord::new(1, 1)));
    }
}
