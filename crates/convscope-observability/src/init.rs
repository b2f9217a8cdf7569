// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use convscope_config::LoggingConfig;

use crate::cli::CrateDebugFlags;

/// Install a console subscriber filtered by `debug_flags` over `default_level`
///
/// `RUST_LOG`, when set, replaces the computed filter entirely.
///
/// # Errors
/// Fails if the filter directives are malformed or a global subscriber
/// is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => directives,
        _ => debug_flags.to_filter_string(default_level),
    };
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter);

    Registry::default()
        .with(console_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::debug!(filter = %filter, "logging initialized");
    Ok(())
}

/// Initialize logging from the `[logging]` section plus process arguments
pub fn init_logging_from_config(logging: &LoggingConfig) -> Result<()> {
    let flags = CrateDebugFlags::from_config(logging).merge(&crate::cli::parse_debug_flags());
    init_logging(&flags, &logging.level)
}
