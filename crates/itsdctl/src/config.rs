//! itsdctl configuration.
//!
//! Config file: `<config dir>/itsd/config.toml`, or the path in `ITSD_CONFIG`,
//! or `--config`. A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Knowledge base used when nothing else is configured
pub const DEFAULT_KB_PATH: &str = "knowledge_base/unix_kb.json";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(&self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub color: ColorMode,
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItsdConfig {
    /// Knowledge base snapshot (JSON)
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,

    #[serde(default)]
    pub output: OutputConfig,

    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ItsdConfig {
    fn default() -> Self {
        Self {
            knowledge_base: None,
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl ItsdConfig {
    /// Default user config path: <config dir>/itsd/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("itsd").join("config.toml"))
    }

    /// Which file to read. Priority: explicit path, ITSD_CONFIG, user config.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var("ITSD_CONFIG") {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::user_config_path()
    }

    /// Load configuration; a missing file yields defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ItsdConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Knowledge base path. Priority: explicit path, ITSD_KB, config, default.
    pub fn knowledge_base_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var("ITSD_KB") {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        self.knowledge_base
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KB_PATH))
    }

    /// Set output color mode
    pub fn set_color_mode(&mut self, mode: &str) -> Result<()> {
        self.output.color = match mode.to_lowercase().as_str() {
            "auto" => ColorMode::Auto,
            "always" | "on" | "yes" | "true" => ColorMode::Always,
            "never" | "off" | "no" | "false" | "none" => ColorMode::Never,
            _ => anyhow::bail!("Invalid color mode: '{}'. Valid values: auto, always, never", mode),
        };
        Ok(())
    }
}
