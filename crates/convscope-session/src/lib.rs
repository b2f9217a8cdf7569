// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # convscope-session
//!
//! The command surface a UI drives: one [`Workspace`] per convolution mode
//! (grids, stride, padding, the last computation and its player) and a
//! [`ConvolutionSession`] that routes commands to the displayed mode.
//!
//! ```rust
//! use convscope_animation::ManualClock;
//! use convscope_config::ConvscopeConfig;
//! use convscope_session::ConvolutionSession;
//!
//! let clock = ManualClock::new();
//! let mut session = ConvolutionSession::with_clock(&ConvscopeConfig::default(), clock.clone())?;
//! session.load_preset("sharpen")?;
//! let output = session.compute()?;
//! assert_eq!(output.shape().to_string(), "3x3");
//!
//! session.play()?;
//! clock.advance_ms(1500);
//! assert_eq!(session.pump(), 1);
//! # Ok::<(), convscope_session::SessionError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod edit;
mod error;
mod mode;
pub mod presets;
mod randomizer;
mod session;
mod workspace;

pub use edit::{parse_cell_input, CellTarget};
pub use error::{SessionError, SessionResult};
pub use mode::{SessionMode, SimulationMode};
pub use presets::{Preset, PresetInfo};
pub use randomizer::{RandomRange, RandomRanges};
pub use session::{ConvolutionSession, StepView};
pub use workspace::{CoordOf, FieldOf, ShapeOf, Workspace};
