// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Session-level behavior: invalidation, presets, randomizer and mode switching.

use convscope_animation::{AnimationPhase, ClockTickSource, ManualClock, PlayOutcome, SeekTarget};
use convscope_config::ConvscopeConfig;
use convscope_session::{
    CellTarget, ConvolutionSession, RandomRange, RandomRanges, SessionError, SimulationMode,
};
use convscope_structures::{round2, Field, PlanarCoord, VolumetricCoord};
use rand::rngs::StdRng;
use rand::SeedableRng;

type ManualSession = ConvolutionSession<ClockTickSource<ManualClock>>;

fn session(clock: &ManualClock) -> ManualSession {
    ConvolutionSession::with_clock(&ConvscopeConfig::default(), clock.clone()).unwrap()
}

#[test]
fn test_cell_edit_discards_trace() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();
    session.compute().unwrap();
    assert!(session.current_step().is_some());

    session
        .planar_mut()
        .set_cell(CellTarget::Kernel, PlanarCoord::new(1, 1), "4")
        .unwrap();

    assert!(session.current_step().is_none());
    assert!(session.output_grid().is_none());
    assert_eq!(session.animation_state().phase, AnimationPhase::Idle);
    assert!(matches!(
        session.play(),
        Err(SessionError::NotReady { action: "play", .. })
    ));
}

#[test]
fn test_rejected_edit_changes_nothing() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("edgeDetection").unwrap();
    let before = session.planar().image().cloned();
    session.compute().unwrap();

    let result = session
        .planar_mut()
        .set_cell(CellTarget::Image, PlanarCoord::new(0, 0), "twelve");

    assert!(matches!(result, Err(SessionError::RejectedEdit(_))));
    assert_eq!(session.planar().image().cloned(), before);
    assert_eq!(session.planar().selected_preset(), Some("edgeDetection"));
    assert!(session.output_grid().is_some());
}

#[test]
fn test_sharpen_preset_output() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();

    let output = session.compute().unwrap();
    assert_eq!(output.get(PlanarCoord::new(0, 0)), Some(9.0));
    assert_eq!(output.get(PlanarCoord::new(1, 1)), Some(25.0));
}

#[test]
fn test_blur_preset_keeps_shape_with_padding() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("blur").unwrap();

    let output = session.compute().unwrap();
    assert_eq!(output.shape().to_string(), "5x5");
    assert_eq!(output.get(PlanarCoord::new(2, 2)), Some(126.6));
}

#[test]
fn test_rgb_edge_preset_output() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.switch_mode(SimulationMode::Volumetric);
    session.load_preset("rgbEdge").unwrap();

    let output = session.compute().unwrap();
    assert_eq!(output.shape().to_string(), "2x2");
    assert_eq!(output.get(PlanarCoord::new(0, 0)), Some(610.0));

    let step = session.current_step().unwrap();
    assert_eq!(step.tap_count(), 27);
    assert!(step.tap_lines()[26].starts_with("[2,2,2] × [2,2,2]"));
}

#[test]
fn test_unknown_preset_leaves_workspace_alone() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();

    assert_eq!(
        session.load_preset("rgbEdge"),
        Err(SessionError::UnknownPreset("rgbEdge".to_string()))
    );
    assert_eq!(session.planar().selected_preset(), Some("sharpen"));
}

#[test]
fn test_randomize_fills_both_grids_in_range() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();
    session.compute().unwrap();

    let ranges = RandomRanges::new(
        RandomRange::new(1.0, 2.0).unwrap(),
        RandomRange::new(-0.5, 0.5).unwrap(),
    );
    session.randomize_with(&mut StdRng::seed_from_u64(3), ranges);

    let workspace = session.planar();
    assert_eq!(workspace.selected_preset(), None);
    assert!(workspace.trace().is_none());
    for value in workspace.image().unwrap().view().iter().copied() {
        assert!((1.0..=2.0).contains(&value));
        assert_eq!(value, round2(value));
    }
    for value in workspace.kernel().unwrap().view().iter().copied() {
        assert!((-0.5..=0.5).contains(&value));
    }
}

#[test]
fn test_randomize_volumetric_uses_configured_shapes() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.switch_mode(SimulationMode::Volumetric);
    let ranges = session.default_ranges();
    session.randomize_with(&mut StdRng::seed_from_u64(11), ranges);

    let workspace = session.volumetric();
    assert_eq!(workspace.image().unwrap().shape().to_string(), "3x4x4");
    let kernel = workspace.kernel().unwrap();
    let value = kernel.get(VolumetricCoord::new(2, 2, 2)).unwrap();
    assert!((-2.0..=2.0).contains(&value));
}

#[test]
fn test_playback_runs_to_the_last_step() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();
    session.compute().unwrap();

    assert_eq!(session.play(), Ok(PlayOutcome::Started));
    let mut ticks = 0;
    for _ in 0..20 {
        clock.advance_ms(1500);
        let advanced = session.pump();
        assert!(advanced <= 1);
        ticks += advanced;
    }
    assert_eq!(ticks, 8);

    let state = session.animation_state();
    assert_eq!(state.phase, AnimationPhase::Ready);
    assert_eq!(state.current_step, 8);
    assert_eq!(session.current_step().unwrap().output(), PlanarCoord::new(2, 2));
}

#[test]
fn test_switching_mode_pauses_only_the_mode_left() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();
    session.compute().unwrap();
    session.play().unwrap();
    clock.advance_ms(1500);
    assert_eq!(session.pump(), 1);

    session.switch_mode(SimulationMode::Volumetric);
    clock.advance_ms(1500 * 5);
    assert_eq!(session.pump(), 0);

    let planar = session.planar().animation_state();
    assert_eq!(planar.phase, AnimationPhase::Ready);
    assert_eq!(planar.current_step, 1);

    session.switch_mode(SimulationMode::Planar);
    assert_eq!(session.play(), Ok(PlayOutcome::Resumed));
    assert_eq!(session.seek(SeekTarget::Last), Ok(8));
    assert!(!session.animation_state().is_playing());
}

#[test]
fn test_validation_preview_has_no_side_effects() {
    let clock = ManualClock::new();
    let mut session = session(&clock);
    session.load_preset("sharpen").unwrap();
    session.compute().unwrap();

    assert!(session.validation_preview().is_ok());
    assert!(session.current_step().is_some());
}
