// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to one section of `convscope_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConvscopeConfig {
    pub planar: PlanarConfig,
    pub volumetric: VolumetricConfig,
    pub randomizer: RandomizerConfig,
    pub logging: LoggingConfig,
}

/// Initial 2D workspace
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlanarConfig {
    pub image_rows: usize,
    pub image_cols: usize,
    pub kernel_rows: usize,
    pub kernel_cols: usize,
    pub stride: usize,
    pub padding: usize,
    /// Playback interval per step
    pub speed_ms: u64,
}

impl Default for PlanarConfig {
    fn default() -> Self {
        Self {
            image_rows: 5,
            image_cols: 5,
            kernel_rows: 3,
            kernel_cols: 3,
            stride: 1,
            padding: 0,
            speed_ms: 1500,
        }
    }
}

/// Initial 3D workspace
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VolumetricConfig {
    pub depth: usize,
    pub height: usize,
    pub width: usize,
    pub kernel_depth: usize,
    pub kernel_height: usize,
    pub kernel_width: usize,
    pub stride: usize,
    pub padding: usize,
    pub speed_ms: u64,
}

impl Default for VolumetricConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            height: 4,
            width: 4,
            kernel_depth: 3,
            kernel_height: 3,
            kernel_width: 3,
            stride: 1,
            padding: 0,
            speed_ms: 1000,
        }
    }
}

/// Default value ranges for randomized grids
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomizerConfig {
    pub image_min: f64,
    pub image_max: f64,
    pub kernel_min: f64,
    pub kernel_max: f64,
}

impl Default for RandomizerConfig {
    fn default() -> Self {
        Self {
            image_min: 0.0,
            image_max: 9.0,
            kernel_min: -2.0,
            kernel_max: 2.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Crates logged at debug level regardless of `level`
    pub debug_crates: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug_crates: Vec::new(),
        }
    }
}
