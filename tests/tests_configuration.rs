// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use convscope::config::{load_config, validate_config, ConvscopeConfig};
use convscope::prelude::*;

#[test]
fn test_shipped_configuration_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("convscope_configuration.toml");
    let mut config = load_config(Some(&path), None).unwrap();
    // environment overrides are not under test here
    config.planar.speed_ms = 1500;
    config.planar.stride = 1;
    config.planar.padding = 0;
    config.volumetric.speed_ms = 1000;
    config.volumetric.stride = 1;
    config.volumetric.padding = 0;
    config.logging.level = "info".to_string();

    assert!(validate_config(&config).is_ok());
    assert_eq!(config, ConvscopeConfig::default());
}

#[test]
fn test_session_follows_configuration() {
    let mut config = ConvscopeConfig::default();
    config.planar.image_rows = 7;
    config.planar.speed_ms = 50;

    let session = ConvolutionSession::with_clock(&config, ManualClock::new()).unwrap();
    let planar = session.planar();
    assert_eq!(planar.image_shape(), GridShape::new(7, 5).unwrap());
    // playback speed is floored
    assert_eq!(planar.animation_state().interval.as_millis(), 200);
    assert_eq!(session.validation_preview(), Ok(GridShape::new(5, 3).unwrap()));
}
