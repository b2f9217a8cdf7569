// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # convscope
//!
//! Discrete 2D and 3D convolution over small, hand-editable grids, with every
//! multiply-accumulate recorded in an ordered trace that can be replayed one
//! output position at a time.
//!
//! ## Quick Start
//!
//! ```rust
//! use convscope::prelude::*;
//!
//! let image = Grid2D::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]])?;
//! let kernel = Grid2D::from_rows(&[[1.0, 0.0], [0.0, 1.0]])?;
//!
//! let outcome = convolve_planar(&image, &kernel, ConvConfig::default())?;
//! assert_eq!(outcome.output.get(PlanarCoord::new(1, 1)), Some(14.0));
//! assert_eq!(outcome.trace.len(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  convscope-session                                      │
//! │  (workspaces per mode, presets, randomizer, facade)     │
//! ├────────────────────────────┬────────────────────────────┤
//! │  convscope-engine          │  convscope-animation       │
//! │  (validator, 2D/3D, trace) │  (tick sources, scheduler) │
//! ├────────────────────────────┴────────────────────────────┤
//! │  convscope-structures                                   │
//! │  (grids, tensors, shapes, padding)                      │
//! └─────────────────────────────────────────────────────────┘
//!   convscope-config / convscope-observability (cross-cutting)
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use convscope_structures as structures;

// Re-export algorithms
pub use convscope_animation as animation;
pub use convscope_engine as engine;

// Re-export session and ambient crates
pub use convscope_config as config;
pub use convscope_observability as observability;
pub use convscope_session as session;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::structures::{
        round2, Field, Grid2D, GridShape, PlanarCoord, Tensor3D, TensorShape, VolumetricCoord,
        ZeroPad,
    };

    pub use crate::engine::{
        convolve_planar, convolve_volumetric, ConvConfig, ConvolutionError, ConvolutionMode,
        OutputGrid, Planar, StepRecord, TapRecord, Trace, Volumetric,
    };

    pub use crate::animation::{
        AnimationPhase, ClockTickSource, ManualClock, MonotonicClock, PlayOutcome, SeekTarget,
        TickSource,
    };

    pub use crate::session::{
        CellTarget, ConvolutionSession, RandomRange, RandomRanges, SessionError,
        SimulationMode, StepView, Workspace,
    };

    pub use crate::config::ConvscopeConfig;
}
