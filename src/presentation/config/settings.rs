use std::path::PathBuf;

use config::{Config, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub ingest: IngestSettings,
    pub streaming: StreamingSettings,
    pub filter: FilterSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{environment}.toml` (optional) under `APP__*`
    /// environment variables, e.g. `APP__SERVER__PORT=9000`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("filter.extra_phrases")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(SettingsError::from)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

/// `model` left unset resolves per provider: a Hugging Face repo id for the
/// local engine, the API's own default for the remote one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: Option<String>,
    pub device: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_concurrent_inferences: usize,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderSetting::Local,
            model: None,
            device: "cpu".to_string(),
            api_key: None,
            base_url: None,
            max_concurrent_inferences: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub temp_dir: Option<PathBuf>,
    pub max_upload_mb: usize,
    pub default_language: String,
}

impl IngestSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            temp_dir: None,
            max_upload_mb: 25,
            default_language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamingSettings {
    pub max_sessions: usize,
    pub idle_timeout_secs: u64,
    pub language: String,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            max_sessions: 10,
            idle_timeout_secs: 1800,
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub extra_phrases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
}
