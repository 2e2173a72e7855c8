//! Application configuration for patchgen.
//!
//! User config lives at `~/.patchgen/patchgen.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PatchgenError, Result};
use crate::types::DEFAULT_TOPIC;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "patchgen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".patchgen";

// ---------------------------------------------------------------------------
// Config structs (matching patchgen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// External extraction pipeline.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Topic label used when `--topic` is omitted.
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
        }
    }
}

fn default_topic() -> String {
    DEFAULT_TOPIC.into()
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// `<executable> [arg]*`, split on whitespace. Empty means synthesize
    /// patches locally.
    #[serde(default)]
    pub command: String,
}

// ---------------------------------------------------------------------------
// Generate config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime settings for one `generate` run, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Topic label for the payload.
    pub topic: String,
    /// Pipeline command line; empty selects the local synthesizer.
    pub pipeline_cmd: String,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            topic: config.defaults.topic.clone(),
            pipeline_cmd: config.pipeline.command.clone(),
        }
    }
}

impl GenerateConfig {
    /// Apply CLI overrides on top of file-level settings.
    pub fn with_overrides(mut self, topic: Option<&str>, pipeline_cmd: Option<&str>) -> Self {
        if let Some(topic) = topic {
            self.topic = topic.to_string();
        }
        if let Some(cmd) = pipeline_cmd {
            self.pipeline_cmd = cmd.to_string();
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.patchgen/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PatchgenError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.patchgen/patchgen.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PatchgenError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| PatchgenError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default config file into `dir`, creating it if needed.
/// An existing file is left untouched.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    init_config_at(&dir.join(CONFIG_FILE_NAME))
}

/// Write a default config file at exactly `path`, creating parent
/// directories if needed. An existing file is left untouched.
pub fn init_config_at(path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PatchgenError::io(parent, e))?;
    }

    let path = path.to_path_buf();
    if path.exists() {
        tracing::info!(?path, "config file already exists, leaving it unchanged");
        return Ok(path);
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| PatchgenError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PatchgenError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
