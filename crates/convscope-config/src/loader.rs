// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, ConvscopeConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE_NAME: &str = "convscope_configuration.toml";

/// Find the convscope configuration file
///
/// Search order:
/// 1. `CONVSCOPE_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("CONVSCOPE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by CONVSCOPE_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet CONVSCOPE_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Call [`crate::validate_config`] on the result to check value ranges.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<ConvscopeConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: ConvscopeConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn override_parsed<T: FromStr>(target: &mut T, raw: Option<&str>) {
    if let Some(value) = raw.and_then(|raw| raw.trim().parse::<T>().ok()) {
        *target = value;
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `CONVSCOPE_LOG_LEVEL` -> `logging.level`
/// - `CONVSCOPE_PLANAR_SPEED_MS` -> `planar.speed_ms`
/// - `CONVSCOPE_PLANAR_STRIDE` -> `planar.stride`
/// - `CONVSCOPE_PLANAR_PADDING` -> `planar.padding`
/// - `CONVSCOPE_VOLUMETRIC_SPEED_MS` -> `volumetric.speed_ms`
/// - `CONVSCOPE_VOLUMETRIC_STRIDE` -> `volumetric.stride`
/// - `CONVSCOPE_VOLUMETRIC_PADDING` -> `volumetric.padding`
///
/// Unparsable numeric values are ignored.
pub fn apply_environment_overrides(config: &mut ConvscopeConfig) {
    if let Ok(value) = env::var("CONVSCOPE_LOG_LEVEL") {
        config.logging.level = value;
    }

    let var = |name: &str| env::var(name).ok();
    override_parsed(&mut config.planar.speed_ms, var("CONVSCOPE_PLANAR_SPEED_MS").as_deref());
    override_parsed(&mut config.planar.stride, var("CONVSCOPE_PLANAR_STRIDE").as_deref());
    override_parsed(&mut config.planar.padding, var("CONVSCOPE_PLANAR_PADDING").as_deref());
    override_parsed(
        &mut config.volumetric.speed_ms,
        var("CONVSCOPE_VOLUMETRIC_SPEED_MS").as_deref(),
    );
    override_parsed(
        &mut config.volumetric.stride,
        var("CONVSCOPE_VOLUMETRIC_STRIDE").as_deref(),
    );
    override_parsed(
        &mut config.volumetric.padding,
        var("CONVSCOPE_VOLUMETRIC_PADDING").as_deref(),
    );
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - e.g. `{"log_level": "debug", "planar_speed_ms": "600"}`
pub fn apply_cli_overrides(config: &mut ConvscopeConfig, cli_args: &HashMap<String, String>) {
    let arg = |key: &str| cli_args.get(key).map(String::as_str);

    if let Some(value) = arg("log_level") {
        config.logging.level = value.to_string();
    }
    if let Some(value) = arg("debug_crates") {
        config.logging.debug_crates = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }

    override_parsed(&mut config.planar.speed_ms, arg("planar_speed_ms"));
    override_parsed(&mut config.planar.stride, arg("planar_stride"));
    override_parsed(&mut config.planar.padding, arg("planar_padding"));
    override_parsed(&mut config.volumetric.speed_ms, arg("volumetric_speed_ms"));
    override_parsed(&mut config.volumetric.stride, arg("volumetric_stride"));
    override_parsed(&mut config.volumetric.padding, arg("volumetric_padding"));

    override_parsed(&mut config.randomizer.image_min, arg("random_image_min"));
    override_parsed(&mut config.randomizer.image_max, arg("random_image_max"));
    override_parsed(&mut config.randomizer.kernel_min, arg("random_kernel_min"));
    override_parsed(&mut config.randomizer.kernel_max, arg("random_kernel_max"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("CONVSCOPE_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("CONVSCOPE_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("CONVSCOPE_CONFIG_PATH", "/definitely/not/here.toml");
        let result = find_config_file();
        env::remove_var("CONVSCOPE_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[planar]").unwrap();
        writeln!(file, "image_rows = 7").unwrap();
        writeln!(file, "[randomizer]").unwrap();
        writeln!(file, "kernel_min = -1.5").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.planar.image_rows, 7);
        assert_eq!(config.planar.image_cols, 5);
        assert_eq!(config.randomizer.kernel_min, -1.5);
        assert_eq!(config.volumetric.depth, 3);
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = ConvscopeConfig::default();

        env::set_var("CONVSCOPE_PLANAR_SPEED_MS", "700");
        env::set_var("CONVSCOPE_VOLUMETRIC_STRIDE", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("CONVSCOPE_PLANAR_SPEED_MS");
        env::remove_var("CONVSCOPE_VOLUMETRIC_STRIDE");

        assert_eq!(config.planar.speed_ms, 700);
        assert_eq!(config.volumetric.stride, 1);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = ConvscopeConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("log_level".to_string(), "debug".to_string());
        cli_args.insert(
            "debug_crates".to_string(),
            "convscope-engine, convscope-session".to_string(),
        );
        cli_args.insert("random_image_max".to_string(), "3.5".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.debug_crates,
            vec!["convscope-engine".to_string(), "convscope-session".to_string()]
        );
        assert_eq!(config.randomizer.image_max, 3.5);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[planar]").unwrap();
        writeln!(file, "speed_ms = 900").unwrap();
        writeln!(file, "stride = 1").unwrap();

        env::set_var("CONVSCOPE_PLANAR_SPEED_MS", "800");
        env::set_var("CONVSCOPE_PLANAR_STRIDE", "2");

        let mut cli_args = HashMap::new();
        cli_args.insert("planar_speed_ms".to_string(), "600".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("CONVSCOPE_PLANAR_SPEED_MS");
        env::remove_var("CONVSCOPE_PLANAR_STRIDE");

        // CLI wins for speed, env wins for stride (no CLI override)
        assert_eq!(config.planar.speed_ms, 600);
        assert_eq!(config.planar.stride, 2);
    }
}
