mod engine_selection;
mod environment;
mod settings;

pub use engine_selection::DEFAULT_LOCAL_MODEL;
pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    FilterSettings, IngestSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    StreamingSettings, TranscriptionProviderSetting, TranscriptionSettings,
};
