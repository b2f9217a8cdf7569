// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Session facade.

Holds one workspace per mode and routes mode-agnostic commands to the one
that is displayed. Shape-typed operations (configure, cell edits) go
through [`ConvolutionSession::planar_mut`] or
[`ConvolutionSession::volumetric_mut`].
*/

use std::time::Duration;

use convscope_animation::{
    AnimationState, Clock, ClockTickSource, PlayOutcome, SeekTarget, TickSource,
};
use convscope_config::ConvscopeConfig;
use convscope_engine::{
    ConvConfig, OutputGrid, Planar, StepRecord, ValidationResult, Volumetric, WindowPlacement,
};
use convscope_structures::{GridShape, PlanarCoord, TensorShape, VolumetricCoord};
use rand::Rng;
use tracing::debug;

use crate::{PresetInfo, RandomRanges, SessionResult, SimulationMode, Workspace};

/// Current step of whichever mode is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepView<'a> {
    Planar(&'a StepRecord<PlanarCoord>),
    Volumetric(&'a StepRecord<VolumetricCoord>),
}

impl StepView<'_> {
    pub fn output(&self) -> PlanarCoord {
        match self {
            StepView::Planar(step) => step.output,
            StepView::Volumetric(step) => step.output,
        }
    }

    pub fn window(&self) -> WindowPlacement {
        match self {
            StepView::Planar(step) => step.window,
            StepView::Volumetric(step) => step.window,
        }
    }

    pub fn sum(&self) -> f64 {
        match self {
            StepView::Planar(step) => step.sum,
            StepView::Volumetric(step) => step.sum,
        }
    }

    pub fn tap_count(&self) -> usize {
        match self {
            StepView::Planar(step) => step.taps.len(),
            StepView::Volumetric(step) => step.taps.len(),
        }
    }

    /// Whether `coord` (padded space) lies under the kernel for this step.
    pub fn window_contains(&self, coord: PlanarCoord) -> bool {
        self.window().contains(coord)
    }

    /// One rendered line per multiply-accumulate term.
    pub fn tap_lines(&self) -> Vec<String> {
        match self {
            StepView::Planar(step) => step.taps.iter().map(ToString::to_string).collect(),
            StepView::Volumetric(step) => step.taps.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug)]
pub struct ConvolutionSession<S: TickSource> {
    mode: SimulationMode,
    planar: Workspace<Planar, S>,
    volumetric: Workspace<Volumetric, S>,
    default_ranges: RandomRanges,
}

macro_rules! dispatch {
    ($self:ident, $ws:ident => $body:expr) => {
        match $self.mode {
            SimulationMode::Planar => {
                let $ws = &mut $self.planar;
                $body
            }
            SimulationMode::Volumetric => {
                let $ws = &mut $self.volumetric;
                $body
            }
        }
    };
}

impl<S: TickSource> ConvolutionSession<S> {
    /// Build both workspaces from configuration. Starts in 2D mode with no
    /// grids created.
    pub fn new(
        config: &ConvscopeConfig,
        planar_source: S,
        volumetric_source: S,
    ) -> SessionResult<Self> {
        Ok(Self {
            mode: SimulationMode::Planar,
            planar: Workspace::<Planar, S>::from_config(&config.planar, planar_source)?,
            volumetric: Workspace::<Volumetric, S>::from_config(
                &config.volumetric,
                volumetric_source,
            )?,
            default_ranges: RandomRanges::from_config(&config.randomizer)?,
        })
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn planar(&self) -> &Workspace<Planar, S> {
        &self.planar
    }

    pub fn planar_mut(&mut self) -> &mut Workspace<Planar, S> {
        &mut self.planar
    }

    pub fn volumetric(&self) -> &Workspace<Volumetric, S> {
        &self.volumetric
    }

    pub fn volumetric_mut(&mut self) -> &mut Workspace<Volumetric, S> {
        &mut self.volumetric
    }

    /// Ranges from the `[randomizer]` configuration section.
    pub fn default_ranges(&self) -> RandomRanges {
        self.default_ranges
    }

    /// Change the displayed mode. Playback of the mode being left is
    /// paused; its trace and step are kept. Entering 3D creates zero
    /// tensors if none exist yet.
    pub fn switch_mode(&mut self, mode: SimulationMode) {
        if mode == self.mode {
            return;
        }
        match self.mode {
            SimulationMode::Planar => self.planar.suspend(),
            SimulationMode::Volumetric => self.volumetric.suspend(),
        }
        self.mode = mode;
        if mode == SimulationMode::Volumetric && !self.volumetric.has_grids() {
            self.volumetric.initialize();
        }
        debug!("[SESSION] switched to {} mode", mode);
    }

    pub fn catalog(&self) -> &'static [PresetInfo] {
        match self.mode {
            SimulationMode::Planar => self.planar.catalog(),
            SimulationMode::Volumetric => self.volumetric.catalog(),
        }
    }

    pub fn load_preset(&mut self, key: &str) -> SessionResult<PresetInfo> {
        dispatch!(self, ws => ws.load_preset(key))
    }

    pub fn randomize(&mut self, ranges: RandomRanges) {
        dispatch!(self, ws => ws.randomize(ranges))
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, ranges: RandomRanges) {
        dispatch!(self, ws => ws.randomize_with(rng, ranges))
    }

    /// Compute the active mode and return its feature map.
    pub fn compute(&mut self) -> SessionResult<&OutputGrid> {
        match self.mode {
            SimulationMode::Planar => Ok(&self.planar.compute()?.output),
            SimulationMode::Volumetric => Ok(&self.volumetric.compute()?.output),
        }
    }

    pub fn play(&mut self) -> SessionResult<PlayOutcome> {
        dispatch!(self, ws => ws.play())
    }

    pub fn pause(&mut self) -> bool {
        dispatch!(self, ws => ws.pause())
    }

    pub fn stop(&mut self) -> bool {
        dispatch!(self, ws => ws.stop())
    }

    pub fn seek(&mut self, target: SeekTarget) -> SessionResult<usize> {
        dispatch!(self, ws => ws.seek(target))
    }

    pub fn set_speed(&mut self, interval_ms: u64) -> Duration {
        dispatch!(self, ws => ws.set_speed(interval_ms))
    }

    /// Advance the active player by every tick that is due.
    pub fn pump(&mut self) -> usize {
        dispatch!(self, ws => ws.pump())
    }

    pub fn current_step(&self) -> Option<StepView<'_>> {
        match self.mode {
            SimulationMode::Planar => self.planar.current_step().map(StepView::Planar),
            SimulationMode::Volumetric => self.volumetric.current_step().map(StepView::Volumetric),
        }
    }

    pub fn output_grid(&self) -> Option<&OutputGrid> {
        match self.mode {
            SimulationMode::Planar => self.planar.output_grid(),
            SimulationMode::Volumetric => self.volumetric.output_grid(),
        }
    }

    pub fn animation_state(&self) -> AnimationState {
        match self.mode {
            SimulationMode::Planar => self.planar.animation_state(),
            SimulationMode::Volumetric => self.volumetric.animation_state(),
        }
    }

    /// Validation preview of the active mode's current configuration.
    pub fn validation_preview(&self) -> ValidationResult {
        match self.mode {
            SimulationMode::Planar => self.planar.preview(),
            SimulationMode::Volumetric => self.volumetric.preview(),
        }
    }

    /// Dimension check of a proposed 2D configuration. Nothing is stored, so
    /// a settings form can preview edits before committing them.
    pub fn planar_preview(
        &self,
        image: GridShape,
        kernel: GridShape,
        config: ConvConfig,
    ) -> ValidationResult {
        Workspace::<Planar, S>::validation_preview(image, kernel, config)
    }

    /// Dimension check of a proposed 3D configuration.
    pub fn volumetric_preview(
        &self,
        input: TensorShape,
        kernel: TensorShape,
        config: ConvConfig,
    ) -> ValidationResult {
        Workspace::<Volumetric, S>::validation_preview(input, kernel, config)
    }
}

impl<C: Clock + Clone> ConvolutionSession<ClockTickSource<C>> {
    /// Both players tick off the same clock.
    pub fn with_clock(config: &ConvscopeConfig, clock: C) -> SessionResult<Self> {
        Self::new(
            config,
            ClockTickSource::new(clock.clone()),
            ClockTickSource::new(clock),
        )
    }
}
