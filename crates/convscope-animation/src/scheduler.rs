// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Playback state machine.
//!
//! ```text
//! Idle ──load──▶ Ready ──play──▶ Playing
//!   ▲              ▲  ◀──pause/stop/last step──┘
//!   └────clear─────┘
//! ```

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::{AnimationError, CancelToken, TickSource};

/// Floor applied to every playback interval
pub const MIN_TICK_INTERVAL_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// No trace loaded
    Idle,
    /// Trace loaded, not playing
    Ready,
    Playing,
}

/// Snapshot of one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    pub phase: AnimationPhase,
    pub current_step: usize,
    pub step_count: usize,
    pub interval: Duration,
}

impl AnimationState {
    pub fn is_playing(&self) -> bool {
        self.phase == AnimationPhase::Playing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekTarget {
    First,
    Previous,
    Next,
    Last,
    /// Clamped to the last step
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started from the first step
    Started,
    /// Playback continued from a paused or seeked position
    Resumed,
    /// Already playing; nothing changed
    AlreadyPlaying,
    /// Single-step trace: already at the last step, no tick armed
    Completed,
}

/// Steps through `0..step_count` on a repeating tick.
#[derive(Debug)]
pub struct AnimationScheduler<S: TickSource> {
    source: S,
    armed: Option<CancelToken>,
    phase: AnimationPhase,
    current: usize,
    step_count: usize,
    interval: Duration,
    label: &'static str,
}

fn clamp_interval(interval_ms: u64) -> Duration {
    Duration::from_millis(interval_ms.max(MIN_TICK_INTERVAL_MS))
}

impl<S: TickSource> AnimationScheduler<S> {
    pub fn new(source: S, interval_ms: u64) -> Self {
        Self {
            source,
            armed: None,
            phase: AnimationPhase::Idle,
            current: 0,
            step_count: 0,
            interval: clamp_interval(interval_ms),
            label: "",
        }
    }

    /// Tag used in log lines, e.g. "2D"
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn state(&self) -> AnimationState {
        AnimationState {
            phase: self.phase,
            current_step: self.current,
            step_count: self.step_count,
            interval: self.interval,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == AnimationPhase::Playing
    }

    /// Current step index, or `None` while idle.
    pub fn position(&self) -> Option<usize> {
        (self.phase != AnimationPhase::Idle).then_some(self.current)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Attach a freshly computed trace of `step_count` steps at step 0.
    /// An empty trace leaves the scheduler idle.
    pub fn load(&mut self, step_count: usize) {
        self.disarm();
        self.current = 0;
        self.step_count = step_count;
        self.phase = if step_count == 0 {
            AnimationPhase::Idle
        } else {
            AnimationPhase::Ready
        };
        debug!(
            "[ANIMATION] {} loaded trace with {} steps",
            self.label, step_count
        );
    }

    /// Drop the trace: cancel any tick and return to `Idle`.
    pub fn clear(&mut self) {
        if self.phase != AnimationPhase::Idle {
            debug!("[ANIMATION] {} trace cleared", self.label);
        }
        self.disarm();
        self.current = 0;
        self.step_count = 0;
        self.phase = AnimationPhase::Idle;
    }

    pub fn play(&mut self) -> Result<PlayOutcome, AnimationError> {
        match self.phase {
            AnimationPhase::Idle => {
                warn!("[ANIMATION] {} play requested with no trace", self.label);
                Err(AnimationError::NotReady { action: "play" })
            }
            AnimationPhase::Playing => {
                debug!("[ANIMATION] {} play ignored: already playing", self.label);
                Ok(PlayOutcome::AlreadyPlaying)
            }
            AnimationPhase::Ready => {
                let last = self.last_index();
                let outcome = if self.current == 0 || self.current >= last {
                    self.current = 0;
                    PlayOutcome::Started
                } else {
                    PlayOutcome::Resumed
                };
                if self.current >= last {
                    return Ok(PlayOutcome::Completed);
                }
                self.arm();
                self.phase = AnimationPhase::Playing;
                debug!(
                    "[ANIMATION] {} {:?} at step {} every {:?}",
                    self.label, outcome, self.current, self.interval
                );
                Ok(outcome)
            }
        }
    }

    /// Stop ticking and keep the current step. Returns `true` if playback
    /// was interrupted.
    pub fn pause(&mut self) -> bool {
        if self.phase != AnimationPhase::Playing {
            return false;
        }
        self.disarm();
        self.phase = AnimationPhase::Ready;
        debug!("[ANIMATION] {} paused at step {}", self.label, self.current);
        true
    }

    /// Same contract as [`Self::pause`].
    pub fn stop(&mut self) -> bool {
        self.pause()
    }

    /// Cancel ticking because the owning mode is no longer displayed.
    pub fn suspend(&mut self) {
        if self.pause() {
            debug!("[ANIMATION] {} suspended", self.label);
        }
    }

    /// Move to another step. Pauses first when playing; the target is clamped
    /// to `[0, last]`.
    pub fn seek(&mut self, target: SeekTarget) -> Result<usize, AnimationError> {
        if self.phase == AnimationPhase::Idle {
            return Err(AnimationError::NotReady { action: "seek" });
        }
        self.pause();
        let last = self.last_index();
        self.current = match target {
            SeekTarget::First => 0,
            SeekTarget::Previous => self.current.saturating_sub(1),
            SeekTarget::Next => (self.current + 1).min(last),
            SeekTarget::Last => last,
            SeekTarget::Index(index) => index.min(last),
        };
        trace!("[ANIMATION] {} seek {:?} -> {}", self.label, target, self.current);
        Ok(self.current)
    }

    /// Change the interval (floored at [`MIN_TICK_INTERVAL_MS`]). While
    /// playing, the tick is re-armed at the new interval and the current
    /// step is kept.
    pub fn set_speed(&mut self, interval_ms: u64) -> Duration {
        self.interval = clamp_interval(interval_ms);
        if self.phase == AnimationPhase::Playing {
            self.disarm();
            self.arm();
            debug!(
                "[ANIMATION] {} re-armed at {:?}, step {}",
                self.label, self.interval, self.current
            );
        }
        self.interval
    }

    /// Process the tick that is due, if any. A late poll still advances at
    /// most one step. Returns the number of steps advanced.
    pub fn pump(&mut self) -> usize {
        let mut advanced = 0;
        while let Some(token) = self.source.next_due() {
            if self.phase != AnimationPhase::Playing || self.armed != Some(token) {
                continue;
            }
            self.tick();
            advanced += 1;
        }
        advanced
    }

    fn tick(&mut self) {
        self.current += 1;
        trace!("[ANIMATION] {} tick -> step {}", self.label, self.current);
        if self.current >= self.last_index() {
            self.current = self.last_index();
            self.disarm();
            self.phase = AnimationPhase::Ready;
            debug!("[ANIMATION] {} reached last step", self.label);
        }
    }

    fn last_index(&self) -> usize {
        self.step_count.saturating_sub(1)
    }

    fn arm(&mut self) {
        self.disarm();
        self.armed = Some(self.source.arm(self.interval));
    }

    fn disarm(&mut self) {
        if let Some(token) = self.armed.take() {
            self.source.cancel(token);
        }
    }
}
