// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use convscope_engine::{ConvolutionMode, Planar, Volumetric};
use convscope_structures::{Grid2D, Tensor3D};
use serde::{Deserialize, Serialize};

use crate::presets::{planar_preset, volumetric_preset, PLANAR_PRESETS, VOLUMETRIC_PRESETS};
use crate::{Preset, PresetInfo, SessionResult};

/// Convolution mode plus its preset catalog.
pub trait SessionMode: ConvolutionMode {
    fn catalog() -> &'static [PresetInfo];

    fn preset(key: &str) -> SessionResult<Preset<Self::Field>>;
}

impl SessionMode for Planar {
    fn catalog() -> &'static [PresetInfo] {
        PLANAR_PRESETS
    }

    fn preset(key: &str) -> SessionResult<Preset<Grid2D>> {
        planar_preset(key)
    }
}

impl SessionMode for Volumetric {
    fn catalog() -> &'static [PresetInfo] {
        VOLUMETRIC_PRESETS
    }

    fn preset(key: &str) -> SessionResult<Preset<Tensor3D>> {
        volumetric_preset(key)
    }
}

/// The mode currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SimulationMode {
    #[default]
    Planar,
    Volumetric,
}

impl Display for SimulationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationMode::Planar => write!(f, "{}", Planar::LABEL),
            SimulationMode::Volumetric => write!(f, "{}", Volumetric::LABEL),
        }
    }
}
