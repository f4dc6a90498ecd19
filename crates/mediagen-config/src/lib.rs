use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
}

/// Credentials for a single provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderKey {
    pub api_key: String,
}

/// Top-level mediagen settings.
///
/// API keys are passed explicitly into the upload and routing components;
/// nothing in the workspace reads them from ambient globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fal: Option<ProviderKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kie: Option<ProviderKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppio: Option<ProviderKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelscope: Option<ProviderKey>,
    /// Whether the UI should render price estimates.
    #[serde(default = "default_show_prices")]
    pub show_prices: bool,
}

fn default_show_prices() -> bool {
    true
}

impl Settings {
    pub fn fal_api_key(&self) -> Option<&str> {
        self.fal.as_ref().map(|k| k.api_key.as_str())
    }

    pub fn kie_api_key(&self) -> Option<&str> {
        self.kie.as_ref().map(|k| k.api_key.as_str())
    }

    pub fn ppio_api_key(&self) -> Option<&str> {
        self.ppio.as_ref().map(|k| k.api_key.as_str())
    }

    pub fn modelscope_api_key(&self) -> Option<&str> {
        self.modelscope.as_ref().map(|k| k.api_key.as_str())
    }
}

/// Resolve the mediagen config directory (~/.mediagen/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".mediagen"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.mediagen/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load settings from the default path, then apply environment overrides.
pub fn load_settings() -> Result<Settings, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    let mut settings = load_settings_from(&path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Load settings from a specific path, falling back to defaults if not found.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = json5::from_str(&content)?;
    Ok(settings)
}

/// Environment variables take precedence over the config file.
pub fn apply_env_overrides(settings: &mut Settings) {
    for (var, slot) in [
        ("FAL_API_KEY", &mut settings.fal),
        ("KIE_API_KEY", &mut settings.kie),
        ("PPIO_API_KEY", &mut settings.ppio),
        ("MODELSCOPE_API_KEY", &mut settings.modelscope),
    ] {
        if let Ok(key) = std::env::var(var) {
            if !key.is_empty() {
                *slot = Some(ProviderKey { api_key: key });
            }
        }
    }
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = config_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Save settings to the default path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    let dir = ensure_config_dir()?;
    let path = dir.join("config.json5");
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| ConfigError::Io(std::io::Error::other(e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
