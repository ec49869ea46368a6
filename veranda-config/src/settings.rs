// Typed application settings

use crate::{ConfigError, ConfigLoader, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings for a Veranda application, read once at startup.
///
/// The file format is auto-detected from the extension (`settings.toml`
/// being the convention).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub instance: InstanceSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub paths: PathSettings,
}

/// `[app]` section
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

/// `[instance]` section: the vendor host all upstream calls target
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceSettings {
    pub host: String,
}

/// `[auth]` section: the seed OAuth token for the vendor API
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access_token: String,
    pub access_expiry: i64,
    pub refresh_token: String,
    pub refresh_expiry: i64,
    pub token_type: String,
    pub user: String,
}

/// `[paths]` section, with conventional defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub static_dir: String,
    pub template_dir: String,
    pub token_file: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            template_dir: "templates".to_string(),
            token_file: "token.json".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| ConfigError::LoadError("non-utf8 settings path".to_string()))?;

        let loader = ConfigLoader::auto(path_str)?;
        let value = loader.load_file(path_str)?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }
}
