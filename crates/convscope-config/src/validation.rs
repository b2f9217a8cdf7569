// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every problem is collected before reporting, so one run lists them all.

use crate::{ConfigError, ConfigResult, ConvscopeConfig};

/// Slowest playback rate the animation layer accepts, in milliseconds per step
pub const MIN_SPEED_MS: u64 = 200;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    ZeroExtent { field: String },
    ZeroStride { section: String },
    SpeedTooFast { section: String, speed_ms: u64 },
    InvalidRange { field: String, min: f64, max: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExtent { field } => write!(f, "{} must be at least 1", field),
            Self::ZeroStride { section } => {
                write!(f, "{}.stride must be at least 1", section)
            }
            Self::SpeedTooFast { section, speed_ms } => write!(
                f,
                "{}.speed_ms = {} is below the minimum of {} ms",
                section, speed_ms, MIN_SPEED_MS
            ),
            Self::InvalidRange { field, min, max } => {
                write!(f, "{} range [{}, {}] is not a finite, ordered range", field, min, max)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &ConvscopeConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_planar(config, &mut errors);
    validate_volumetric(config, &mut errors);
    validate_randomizer(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn check_extents(section: &str, extents: &[(&str, usize)], errors: &mut Vec<ConfigValidationError>) {
    for (name, value) in extents {
        if *value == 0 {
            errors.push(ConfigValidationError::ZeroExtent {
                field: format!("{}.{}", section, name),
            });
        }
    }
}

fn check_playback(
    section: &str,
    stride: usize,
    speed_ms: u64,
    errors: &mut Vec<ConfigValidationError>,
) {
    if stride == 0 {
        errors.push(ConfigValidationError::ZeroStride {
            section: section.to_string(),
        });
    }
    if speed_ms < MIN_SPEED_MS {
        errors.push(ConfigValidationError::SpeedTooFast {
            section: section.to_string(),
            speed_ms,
        });
    }
}

fn validate_planar(config: &ConvscopeConfig, errors: &mut Vec<ConfigValidationError>) {
    let planar = &config.planar;
    check_extents(
        "planar",
        &[
            ("image_rows", planar.image_rows),
            ("image_cols", planar.image_cols),
            ("kernel_rows", planar.kernel_rows),
            ("kernel_cols", planar.kernel_cols),
        ],
        errors,
    );
    check_playback("planar", planar.stride, planar.speed_ms, errors);
}

fn validate_volumetric(config: &ConvscopeConfig, errors: &mut Vec<ConfigValidationError>) {
    let volumetric = &config.volumetric;
    check_extents(
        "volumetric",
        &[
            ("depth", volumetric.depth),
            ("height", volumetric.height),
            ("width", volumetric.width),
            ("kernel_depth", volumetric.kernel_depth),
            ("kernel_height", volumetric.kernel_height),
            ("kernel_width", volumetric.kernel_width),
        ],
        errors,
    );
    check_playback("volumetric", volumetric.stride, volumetric.speed_ms, errors);
}

fn validate_randomizer(config: &ConvscopeConfig, errors: &mut Vec<ConfigValidationError>) {
    let randomizer = &config.randomizer;
    for (field, min, max) in [
        ("randomizer.image", randomizer.image_min, randomizer.image_max),
        ("randomizer.kernel", randomizer.kernel_min, randomizer.kernel_max),
    ] {
        if !min.is_finite() || !max.is_finite() || min > max {
            errors.push(ConfigValidationError::InvalidRange {
                field: field.to_string(),
                min,
                max,
            });
        }
    }
}

fn validate_logging(config: &ConvscopeConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_extents_are_all_reported() {
        let mut config = ConvscopeConfig::default();
        config.planar.kernel_rows = 0;
        config.volumetric.depth = 0;

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("planar.kernel_rows must be at least 1"));
        assert!(err.contains("volumetric.depth must be at least 1"));
    }

    #[test]
    fn test_speed_below_minimum() {
        let mut config = ConvscopeConfig::default();
        config.volumetric.speed_ms = 150;

        let mut errors = Vec::new();
        validate_volumetric(&config, &mut errors);
        assert_eq!(
            errors,
            vec![ConfigValidationError::SpeedTooFast {
                section: "volumetric".to_string(),
                speed_ms: 150,
            }]
        );
    }

    #[test]
    fn test_zero_stride() {
        let mut config = ConvscopeConfig::default();
        config.planar.stride = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_inverted_random_range() {
        let mut config = ConvscopeConfig::default();
        config.randomizer.kernel_min = 3.0;

        let mut errors = Vec::new();
        validate_randomizer(&config, &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_non_finite_random_range() {
        let mut config = ConvscopeConfig::default();
        config.randomizer.image_max = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = ConvscopeConfig::default();
        config.logging.level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
