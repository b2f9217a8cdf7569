// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Stride and padding shared by both spatial axes.
///
/// Any `stride >= 1` is accepted; a zero stride is reported by the validator
/// rather than rejected here so that configuration previews can explain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConvConfig {
    pub stride: usize,
    pub padding: usize,
}

impl ConvConfig {
    pub const fn new(stride: usize, padding: usize) -> Self {
        Self { stride, padding }
    }
}

impl Default for ConvConfig {
    fn default() -> Self {
        Self {
            stride: 1,
            padding: 0,
        }
    }
}
