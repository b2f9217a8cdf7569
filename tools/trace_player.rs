// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Terminal trace player.
//!
//! Loads a preset, computes it, prints the feature map and then plays the
//! trace in real time, one output position per tick.
//!
//! ```text
//! trace_player [--mode 2d|3d] [--preset <key>] [--speed <ms>] [--config <path>] [--debug-<crate>]
//! ```

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use convscope::animation::{ClockTickSource, MonotonicClock};
use convscope::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config,
    ConfigError, ConvscopeConfig,
};
use convscope::observability::{debug_flags_help, init_logging_from_config};
use convscope::session::{ConvolutionSession, SimulationMode, StepView};
use tracing::info;

struct Args {
    mode: SimulationMode,
    preset: Option<String>,
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: trace_player [--mode 2d|3d] [--preset <key>] [--speed <ms>] [--config <path>]\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Args {
    let mut parsed = Args {
        mode: SimulationMode::Planar,
        preset: None,
        config_path: None,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().unwrap_or_else(|| usage_and_exit());
        match arg.as_str() {
            "--mode" => {
                parsed.mode = match value().to_ascii_lowercase().as_str() {
                    "2d" => SimulationMode::Planar,
                    "3d" => SimulationMode::Volumetric,
                    _ => usage_and_exit(),
                }
            }
            "--preset" => parsed.preset = Some(value()),
            "--config" => parsed.config_path = Some(PathBuf::from(value())),
            "--speed" => {
                let speed = value();
                parsed.overrides.insert("planar_speed_ms".to_string(), speed.clone());
                parsed.overrides.insert("volumetric_speed_ms".to_string(), speed);
            }
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn resolve_config(args: &Args) -> Result<ConvscopeConfig> {
    let config = match load_config(args.config_path.as_deref(), Some(&args.overrides)) {
        Ok(config) => config,
        // no file anywhere: built-in defaults, still overridable
        Err(ConfigError::FileNotFound(_)) if args.config_path.is_none() => {
            let mut config = ConvscopeConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &args.overrides);
            config
        }
        Err(err) => return Err(err).context("Failed to load configuration"),
    };
    validate_config(&config)?;
    Ok(config)
}

fn print_step(index: usize, step: StepView<'_>) {
    let output = step.output();
    println!("step {} -> output [{},{}]", index, output.row, output.col);
    for line in step.tap_lines() {
        println!("    {}", line);
    }
    println!("    sum = {:.2}", step.sum());
}

fn main() -> Result<()> {
    let args = parse_args();
    let config = resolve_config(&args)?;
    init_logging_from_config(&config.logging)?;

    let mut session = ConvolutionSession::new(
        &config,
        ClockTickSource::new(MonotonicClock::new()),
        ClockTickSource::new(MonotonicClock::new()),
    )?;
    session.switch_mode(args.mode);

    let preset = match &args.preset {
        Some(key) => key.clone(),
        None => session
            .catalog()
            .first()
            .map(|info| info.key.to_string())
            .context("No presets available")?,
    };
    let info = session.load_preset(&preset)?;
    info!("Loaded preset '{}': {}", info.label, info.description);

    let output = session.compute()?;
    println!("{}\n", output);

    session.play()?;
    let interval = session.animation_state().interval;
    let mut shown = None;
    loop {
        session.pump();
        let state = session.animation_state();
        if shown != Some(state.current_step) {
            if let Some(step) = session.current_step() {
                print_step(state.current_step, step);
            }
            shown = Some(state.current_step);
        }
        if !state.is_playing() {
            break;
        }
        thread::sleep(interval.min(Duration::from_millis(50)));
    }

    Ok(())
}
