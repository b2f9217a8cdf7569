// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # convscope-animation
//!
//! Step-wise playback of a trace, driven by a cancellable repeating tick.
//!
//! ## Design
//! - Single-threaded and cooperative: the host calls
//!   [`AnimationScheduler::pump`] from its own control flow and every due
//!   tick advances exactly one step
//! - At most one armed interval per scheduler; re-arming cancels first
//! - Cancellation is synchronous: once `pause`/`stop`/`clear` returns, no
//!   further tick is observed
//! - Time is abstracted behind [`Clock`], so tests run on a [`ManualClock`]

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod clock;
mod error;
mod scheduler;
mod tick_source;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::AnimationError;
pub use scheduler::{
    AnimationPhase, AnimationScheduler, AnimationState, PlayOutcome, SeekTarget,
    MIN_TICK_INTERVAL_MS,
};
pub use tick_source::{CancelToken, ClockTickSource, TickSource};
