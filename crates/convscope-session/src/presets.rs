// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Canned starting configurations.
//!
//! Loading a preset replaces the image, kernel, stride and padding of a
//! workspace in one step.

use convscope_engine::ConvConfig;
use convscope_structures::{Grid2D, Tensor3D};
use serde::Serialize;

use crate::{SessionError, SessionResult};

/// Catalog entry shown next to a preset button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preset<F> {
    pub info: PresetInfo,
    pub image: F,
    pub kernel: F,
    pub config: ConvConfig,
}

pub const EDGE_DETECTION: PresetInfo = PresetInfo {
    key: "edgeDetection",
    label: "Edge Detector",
    description: "Highlights horizontal gradients using a Sobel-style kernel.",
};

pub const SHARPEN: PresetInfo = PresetInfo {
    key: "sharpen",
    label: "Sharpen",
    description: "Accentuates edges by subtracting the surrounding blur.",
};

pub const BLUR: PresetInfo = PresetInfo {
    key: "blur",
    label: "Gaussian Blur",
    description: "Softens the image with a normalized Gaussian kernel.",
};

pub const RGB_EDGE: PresetInfo = PresetInfo {
    key: "rgbEdge",
    label: "RGB Edge",
    description: "Runs a Laplacian edge kernel across all three color channels.",
};

pub const PLANAR_PRESETS: &[PresetInfo] = &[EDGE_DETECTION, SHARPEN, BLUR];

pub const VOLUMETRIC_PRESETS: &[PresetInfo] = &[RGB_EDGE];

fn find(catalog: &[PresetInfo], key: &str) -> SessionResult<PresetInfo> {
    catalog
        .iter()
        .copied()
        .find(|info| info.key == key)
        .ok_or_else(|| SessionError::UnknownPreset(key.to_string()))
}

/// Build a 2D preset by key.
pub fn planar_preset(key: &str) -> SessionResult<Preset<Grid2D>> {
    let info = find(PLANAR_PRESETS, key)?;
    let (image, kernel, padding) = match info.key {
        "edgeDetection" => (
            Grid2D::from_rows(&[
                [10.0, 10.0, 10.0, 10.0, 10.0],
                [10.0, 60.0, 60.0, 60.0, 10.0],
                [10.0, 60.0, 120.0, 60.0, 10.0],
                [10.0, 60.0, 60.0, 60.0, 10.0],
                [10.0, 10.0, 10.0, 10.0, 10.0],
            ])?,
            Grid2D::from_rows(&[[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]])?,
            0,
        ),
        "sharpen" => (
            Grid2D::from_rows(&[
                [3.0, 3.0, 3.0, 3.0, 3.0],
                [3.0, 5.0, 5.0, 5.0, 3.0],
                [3.0, 5.0, 9.0, 5.0, 3.0],
                [3.0, 5.0, 5.0, 5.0, 3.0],
                [3.0, 3.0, 3.0, 3.0, 3.0],
            ])?,
            Grid2D::from_rows(&[[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])?,
            0,
        ),
        "blur" => (
            Grid2D::from_rows(&[
                [25.0, 40.0, 55.0, 40.0, 25.0],
                [40.0, 80.0, 120.0, 80.0, 40.0],
                [55.0, 120.0, 180.0, 120.0, 55.0],
                [40.0, 80.0, 120.0, 80.0, 40.0],
                [25.0, 40.0, 55.0, 40.0, 25.0],
            ])?,
            // 1/16 Gaussian, coefficients at two decimals
            Grid2D::from_rows(&[
                [0.06, 0.13, 0.06],
                [0.13, 0.25, 0.13],
                [0.06, 0.13, 0.06],
            ])?,
            1,
        ),
        other => return Err(SessionError::UnknownPreset(other.to_string())),
    };

    Ok(Preset {
        info,
        image,
        kernel,
        config: ConvConfig::new(1, padding),
    })
}

/// Build a 3D preset by key.
pub fn volumetric_preset(key: &str) -> SessionResult<Preset<Tensor3D>> {
    let info = find(VOLUMETRIC_PRESETS, key)?;
    if info.key != RGB_EDGE.key {
        return Err(SessionError::UnknownPreset(key.to_string()));
    }

    let image = Tensor3D::from_channels(&[
        Grid2D::from_rows(&[
            [255.0, 200.0, 150.0, 100.0],
            [200.0, 255.0, 200.0, 150.0],
            [150.0, 200.0, 255.0, 200.0],
            [100.0, 150.0, 200.0, 255.0],
        ])?,
        Grid2D::from_rows(&[
            [100.0, 150.0, 200.0, 255.0],
            [150.0, 200.0, 255.0, 200.0],
            [200.0, 255.0, 200.0, 150.0],
            [255.0, 200.0, 150.0, 100.0],
        ])?,
        Grid2D::from_rows(&[
            [200.0, 255.0, 200.0, 150.0],
            [255.0, 200.0, 150.0, 100.0],
            [200.0, 150.0, 100.0, 50.0],
            [150.0, 100.0, 50.0, 0.0],
        ])?,
    ])?;

    let laplacian = Grid2D::from_rows(&[
        [-1.0, -1.0, -1.0],
        [-1.0, 8.0, -1.0],
        [-1.0, -1.0, -1.0],
    ])?;
    let kernel = Tensor3D::from_channels(&[laplacian.clone(), laplacian.clone(), laplacian])?;

    Ok(Preset {
        info,
        image,
        kernel,
        config: ConvConfig::new(1, 0),
    })
}
