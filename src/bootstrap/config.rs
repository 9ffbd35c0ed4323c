//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file into the [`AppConfig`] DTO. Loading accepts whatever
//! is in the file; defaults for missing keys live in `ec-core`, and nothing
//! is validated here.

use std::path::PathBuf;

use anyhow::Context;
use ec_core::{app_dirs::AppDirs, config::AppConfig};
use tracing::{debug, info};

/// Environment variables checked for the AI key, in order.
const API_KEY_VARS: [&str; 2] = ["ECOCYCLE_API_KEY", "API_KEY"];

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Picks the config source: an explicit path must load, the default file is
/// used when present, otherwise built-in defaults.
pub fn resolve_config(
    explicit: Option<PathBuf>,
    app_dirs: Option<&AppDirs>,
) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "loading config");
        return load_config(path);
    }

    match app_dirs.map(AppDirs::config_file) {
        Some(path) if path.is_file() => {
            info!(path = %path.display(), "loading config");
            load_config(path)
        }
        _ => {
            debug!("no config file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Applies environment overrides. A non-empty `ECOCYCLE_API_KEY` (or
/// `API_KEY`) replaces the configured key.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
    {
        config.ai.api_key = key.trim().to_string();
    }
}
