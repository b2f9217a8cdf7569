// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Per-mode state: grids, configuration, the last computation and its player.

A workspace owns everything one convolution mode needs. Every mutation of
the grids, shapes, stride or padding discards the computed output and
trace and returns the player to `Idle`; only [`Workspace::compute`]
produces a new one.
*/

use std::marker::PhantomData;
use std::time::Duration;

use convscope_animation::{
    AnimationScheduler, AnimationState, PlayOutcome, SeekTarget, TickSource,
};
use convscope_config::{PlanarConfig, VolumetricConfig};
use convscope_engine::{
    ConvConfig, ConvolutionMode, ConvolutionOutcome, OutputGrid, Planar, StepRecord, Trace,
    ValidationResult, Volumetric,
};
use convscope_structures::{Field, GridShape, TensorShape};
use rand::Rng;
use tracing::{debug, warn};

use crate::edit::{ensure_finite, parse_cell_input};
use crate::{CellTarget, PresetInfo, RandomRanges, SessionError, SessionMode, SessionResult};

pub type FieldOf<K> = <K as ConvolutionMode>::Field;
pub type ShapeOf<K> = <FieldOf<K> as Field>::Shape;
pub type CoordOf<K> = <FieldOf<K> as Field>::Coord;

#[derive(Debug)]
pub struct Workspace<K: SessionMode, S: TickSource> {
    image_shape: ShapeOf<K>,
    kernel_shape: ShapeOf<K>,
    config: ConvConfig,
    image: Option<FieldOf<K>>,
    kernel: Option<FieldOf<K>>,
    selected_preset: Option<&'static str>,
    outcome: Option<ConvolutionOutcome<CoordOf<K>>>,
    animation: AnimationScheduler<S>,
    _mode: PhantomData<K>,
}

impl<K: SessionMode, S: TickSource> Workspace<K, S> {
    /// Empty workspace: shapes are set but no grid exists yet.
    pub fn new(
        image_shape: ShapeOf<K>,
        kernel_shape: ShapeOf<K>,
        config: ConvConfig,
        source: S,
        speed_ms: u64,
    ) -> Self {
        Self {
            image_shape,
            kernel_shape,
            config,
            image: None,
            kernel: None,
            selected_preset: None,
            outcome: None,
            animation: AnimationScheduler::new(source, speed_ms).with_label(K::LABEL),
            _mode: PhantomData,
        }
    }

    pub fn image_shape(&self) -> ShapeOf<K> {
        self.image_shape
    }

    pub fn kernel_shape(&self) -> ShapeOf<K> {
        self.kernel_shape
    }

    pub fn config(&self) -> ConvConfig {
        self.config
    }

    pub fn image(&self) -> Option<&FieldOf<K>> {
        self.image.as_ref()
    }

    pub fn kernel(&self) -> Option<&FieldOf<K>> {
        self.kernel.as_ref()
    }

    pub fn has_grids(&self) -> bool {
        self.image.is_some() && self.kernel.is_some()
    }

    /// Key of the preset the grids came from, until the first edit.
    pub fn selected_preset(&self) -> Option<&'static str> {
        self.selected_preset
    }

    pub fn catalog(&self) -> &'static [PresetInfo] {
        K::catalog()
    }

    pub fn animation(&self) -> &AnimationScheduler<S> {
        &self.animation
    }

    // ------------------------------------------------------------------
    // Configuration and grid creation
    // ------------------------------------------------------------------

    /// Apply new shapes, stride and padding.
    ///
    /// Existing grids whose shape changed are replaced with zero grids of
    /// the new shape. The configuration is stored even when it is not
    /// computable; the returned preview says whether it is.
    pub fn configure(
        &mut self,
        image_shape: ShapeOf<K>,
        kernel_shape: ShapeOf<K>,
        config: ConvConfig,
    ) -> ValidationResult {
        if image_shape != self.image_shape {
            self.image_shape = image_shape;
            if self.image.is_some() {
                self.image = Some(<FieldOf<K> as Field>::zeros(image_shape));
            }
        }
        if kernel_shape != self.kernel_shape {
            self.kernel_shape = kernel_shape;
            if self.kernel.is_some() {
                self.kernel = Some(<FieldOf<K> as Field>::zeros(kernel_shape));
            }
        }
        self.config = config;
        self.touch();

        let preview = self.preview();
        match &preview {
            Ok(output) => debug!(
                "[SESSION] {} configured: input {} kernel {} stride {} padding {} -> output {}",
                K::LABEL,
                image_shape,
                kernel_shape,
                config.stride,
                config.padding,
                output
            ),
            Err(err) => warn!("[SESSION] {} configuration not computable: {}", K::LABEL, err),
        }
        preview
    }

    pub fn set_stride(&mut self, stride: usize) -> ValidationResult {
        let config = ConvConfig::new(stride, self.config.padding);
        self.configure(self.image_shape, self.kernel_shape, config)
    }

    pub fn set_padding(&mut self, padding: usize) -> ValidationResult {
        let config = ConvConfig::new(self.config.stride, padding);
        self.configure(self.image_shape, self.kernel_shape, config)
    }

    /// Zero-filled image at the configured shape.
    pub fn create_image(&mut self) {
        self.image = Some(<FieldOf<K> as Field>::zeros(self.image_shape));
        self.touch();
        debug!("[SESSION] {} image created ({})", K::LABEL, self.image_shape);
    }

    /// Zero-filled kernel at the configured shape.
    pub fn create_kernel(&mut self) {
        self.kernel = Some(<FieldOf<K> as Field>::zeros(self.kernel_shape));
        self.touch();
        debug!("[SESSION] {} kernel created ({})", K::LABEL, self.kernel_shape);
    }

    pub fn initialize(&mut self) {
        self.create_image();
        self.create_kernel();
    }

    // ------------------------------------------------------------------
    // Cell edits
    // ------------------------------------------------------------------

    /// Parse `raw` and write it into one cell. Nothing changes on rejection.
    pub fn set_cell(
        &mut self,
        target: CellTarget,
        coord: CoordOf<K>,
        raw: &str,
    ) -> SessionResult<()> {
        let value = parse_cell_input(raw).map_err(|err| self.rejected(err))?;
        self.set_cell_value(target, coord, value)
    }

    pub fn set_cell_value(
        &mut self,
        target: CellTarget,
        coord: CoordOf<K>,
        value: f64,
    ) -> SessionResult<()> {
        let value = ensure_finite(value).map_err(|err| self.rejected(err))?;

        let grid = match target {
            CellTarget::Image => self.image.as_mut(),
            CellTarget::Kernel => self.kernel.as_mut(),
        };
        let result = match grid {
            Some(grid) => grid
                .set(coord, value)
                .map_err(|err| SessionError::RejectedEdit(err.to_string())),
            None => Err(SessionError::RejectedEdit(format!(
                "no {} to edit, create it first",
                target
            ))),
        };
        result.map_err(|err| self.rejected(err))?;

        self.touch();
        Ok(())
    }

    fn rejected(&self, err: SessionError) -> SessionError {
        warn!("[SESSION] {} edit rejected: {}", K::LABEL, err);
        err
    }

    // ------------------------------------------------------------------
    // Presets and randomizer
    // ------------------------------------------------------------------

    /// Replace grids, shapes, stride and padding with a catalog entry.
    pub fn load_preset(&mut self, key: &str) -> SessionResult<PresetInfo> {
        let preset = K::preset(key)?;

        self.image_shape = preset.image.shape();
        self.kernel_shape = preset.kernel.shape();
        self.image = Some(preset.image);
        self.kernel = Some(preset.kernel);
        self.config = preset.config;
        self.invalidate();
        self.selected_preset = Some(preset.info.key);

        debug!("[SESSION] {} preset loaded: {}", K::LABEL, preset.info.label);
        Ok(preset.info)
    }

    pub fn randomize(&mut self, ranges: RandomRanges) {
        self.randomize_with(&mut rand::thread_rng(), ranges);
    }

    /// Regenerate both grids at the configured shapes from `rng`.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, ranges: RandomRanges) {
        self.image = Some(ranges.image.fill(self.image_shape, rng));
        self.kernel = Some(ranges.kernel.fill(self.kernel_shape, rng));
        self.touch();
        debug!(
            "[SESSION] {} randomized: image in [{}, {}], kernel in [{}, {}]",
            K::LABEL,
            ranges.image.min(),
            ranges.image.max(),
            ranges.kernel.min(),
            ranges.kernel.max()
        );
    }

    // ------------------------------------------------------------------
    // Computation
    // ------------------------------------------------------------------

    /// Dimension check without side effects.
    pub fn validation_preview(
        image_shape: ShapeOf<K>,
        kernel_shape: ShapeOf<K>,
        config: ConvConfig,
    ) -> ValidationResult {
        K::validate(image_shape, kernel_shape, config)
    }

    /// [`Self::validation_preview`] for the current configuration.
    pub fn preview(&self) -> ValidationResult {
        Self::validation_preview(self.image_shape, self.kernel_shape, self.config)
    }

    /// Run the convolution and load its trace into the player at step 0.
    pub fn compute(&mut self) -> SessionResult<&ConvolutionOutcome<CoordOf<K>>> {
        let (image, kernel) = match (&self.image, &self.kernel) {
            (Some(image), Some(kernel)) => (image, kernel),
            _ => {
                warn!("[SESSION] {} compute requested before grids exist", K::LABEL);
                return Err(SessionError::NotReady {
                    action: "compute",
                    hint: "create the image and kernel first",
                });
            }
        };

        let outcome = K::convolve(image, kernel, self.config).map_err(|err| {
            warn!("[SESSION] {} compute rejected: {}", K::LABEL, err);
            SessionError::from(err)
        })?;

        self.animation.load(outcome.trace.len());
        debug!(
            "[SESSION] {} computed {} output with {} steps",
            K::LABEL,
            outcome.output.shape(),
            outcome.trace.len()
        );
        Ok(&*self.outcome.insert(outcome))
    }

    pub fn outcome(&self) -> Option<&ConvolutionOutcome<CoordOf<K>>> {
        self.outcome.as_ref()
    }

    pub fn output_grid(&self) -> Option<&OutputGrid> {
        self.outcome.as_ref().map(|outcome| &outcome.output)
    }

    pub fn trace(&self) -> Option<&Trace<CoordOf<K>>> {
        self.outcome.as_ref().map(|outcome| &outcome.trace)
    }

    /// The step the player is on, or `None` without a trace.
    pub fn current_step(&self) -> Option<&StepRecord<CoordOf<K>>> {
        let index = self.animation.position()?;
        self.trace()?.get(index)
    }

    /// Discard output and trace, and stop the player.
    pub fn invalidate(&mut self) {
        if self.outcome.take().is_some() {
            debug!("[SESSION] {} output and trace discarded", K::LABEL);
        }
        self.animation.clear();
    }

    fn touch(&mut self) {
        self.selected_preset = None;
        self.invalidate();
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn play(&mut self) -> SessionResult<PlayOutcome> {
        Ok(self.animation.play()?)
    }

    pub fn pause(&mut self) -> bool {
        self.animation.pause()
    }

    pub fn stop(&mut self) -> bool {
        self.animation.stop()
    }

    pub fn seek(&mut self, target: SeekTarget) -> SessionResult<usize> {
        Ok(self.animation.seek(target)?)
    }

    pub fn set_speed(&mut self, interval_ms: u64) -> Duration {
        self.animation.set_speed(interval_ms)
    }

    pub fn pump(&mut self) -> usize {
        self.animation.pump()
    }

    pub fn suspend(&mut self) {
        self.animation.suspend();
    }

    pub fn is_playing(&self) -> bool {
        self.animation.is_playing()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }
}

impl<S: TickSource> Workspace<Planar, S> {
    pub fn from_config(config: &PlanarConfig, source: S) -> SessionResult<Self> {
        Ok(Self::new(
            GridShape::new(config.image_rows, config.image_cols)?,
            GridShape::new(config.kernel_rows, config.kernel_cols)?,
            ConvConfig::new(config.stride, config.padding),
            source,
            config.speed_ms,
        ))
    }
}

impl<S: TickSource> Workspace<Volumetric, S> {
    pub fn from_config(config: &VolumetricConfig, source: S) -> SessionResult<Self> {
        Ok(Self::new(
            TensorShape::new(config.depth, config.height, config.width)?,
            TensorShape::new(
                config.kernel_depth,
                config.kernel_height,
                config.kernel_width,
            )?,
            ConvConfig::new(config.stride, config.padding),
            source,
            config.speed_ms,
        ))
    }
}
