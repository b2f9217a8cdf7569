// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-convscope-engine` to raise one crate to debug level.

use std::collections::BTreeSet;
use std::env;

use convscope_config::LoggingConfig;

use crate::KNOWN_CRATES;

/// Per-crate debug flags
///
/// # Example
/// ```rust
/// use convscope_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-convscope-engine".to_string()]);
/// assert!(flags.is_enabled("convscope-engine"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`, plus `--debug-all`.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Self::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Flags listed in the `[logging]` section of the configuration file
    pub fn from_config(logging: &LoggingConfig) -> Self {
        let mut flags = Self::default();
        for crate_name in &logging.debug_crates {
            if crate_name == "all" {
                flags.enable_all();
            } else {
                flags.enable(crate_name);
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Union of two flag sets
    pub fn merge(mut self, other: &CrateDebugFlags) -> Self {
        self.enabled_crates.extend(other.enabled_crates.iter().cloned());
        self
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled_crates.iter().map(String::as_str)
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Build an `EnvFilter` directive string
    ///
    /// Tracing targets use the crate's module path, so `convscope-engine`
    /// becomes `convscope_engine=debug`. `default_level` applies to everything else.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        filters.push(default_level.to_ascii_lowercase());
        filters.join(",")
    }
}

/// Debug flags from the process arguments and the `CONVSCOPE_DEBUG` variable
///
/// `CONVSCOPE_DEBUG` is a comma-separated crate list, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var("CONVSCOPE_DEBUG") {
        if env_var == "all" {
            flags.enable_all();
        } else {
            for crate_name in env_var.split(',') {
                flags.enable(crate_name);
            }
        }
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  CONVSCOPE_DEBUG={{crate-name}}[,{{crate-name}}]
  CONVSCOPE_DEBUG=all
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-convscope-engine".to_string()]);
        assert!(flags.is_enabled("convscope-engine"));
        assert!(!flags.is_enabled("convscope-animation"));
    }

    #[test]
    fn test_non_flag_arguments_are_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "convscope".to_string(),
            "--verbose".to_string(),
        ]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_debug_all_covers_logging_setup() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        assert!(flags.is_enabled("convscope-observability"));
        assert!(flags
            .to_filter_string("info")
            .contains("convscope_observability=debug"));
        assert_eq!(flags.enabled_crates().count(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-convscope-session".to_string()]);
        assert_eq!(flags.to_filter_string("WARN"), "convscope_session=debug,warn");
        assert_eq!(CrateDebugFlags::default().to_filter_string("info"), "info");
    }

    #[test]
    fn test_from_config_and_merge() {
        let logging = LoggingConfig {
            level: "info".to_string(),
            debug_crates: vec!["convscope-animation".to_string()],
        };
        let merged = CrateDebugFlags::from_config(&logging)
            .merge(&CrateDebugFlags::from_args(vec!["--debug-convscope-engine".to_string()]));

        assert!(merged.is_enabled("convscope-animation"));
        assert!(merged.is_enabled("convscope-engine"));
        assert_eq!(merged.log_level("convscope-config"), tracing::Level::INFO);
    }
}
