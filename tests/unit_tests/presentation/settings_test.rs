use whisper_gateway::application::ports::TranscriptionError;
use whisper_gateway::presentation::config::{
    DEFAULT_LOCAL_MODEL, Environment, Settings, TranscriptionProviderSetting,
    TranscriptionSettings,
};

#[test]
fn given_default_settings_when_built_then_match_documented_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(
        settings.transcription.provider,
        TranscriptionProviderSetting::Local
    );
    assert!(settings.transcription.model.is_none());
    assert_eq!(settings.transcription.local_model(), DEFAULT_LOCAL_MODEL);
    assert_eq!(settings.transcription.max_concurrent_inferences, 1);
    assert_eq!(settings.ingest.max_upload_bytes(), 25 * 1024 * 1024);
    assert_eq!(settings.streaming.max_sessions, 10);
    assert_eq!(settings.streaming.idle_timeout_secs, 1800);
    assert!(settings.filter.extra_phrases.is_empty());
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn given_partial_toml_when_deserialized_then_missing_fields_use_defaults() {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::from_str(
            "[transcription]\nprovider = \"openai\"\n\n[streaming]\nmax_sessions = 3\n",
            config::FileFormat::Toml,
        ))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(
        settings.transcription.provider,
        TranscriptionProviderSetting::OpenAi
    );
    assert_eq!(settings.transcription.device, "cpu");
    assert_eq!(settings.streaming.max_sessions, 3);
    assert_eq!(settings.streaming.language, "en");
}

#[test]
fn given_environment_names_when_parsed_then_maps_variants() {
    assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
    assert_eq!("production".parse::<Environment>(), Ok(Environment::Prod));
    assert!("staging".parse::<Environment>().is_err());
}

#[test]
fn given_environment_when_resolving_settings_file_then_uses_lowercase_name() {
    assert_eq!(Environment::Prod.as_str(), "prod");
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
    assert_eq!(Environment::default().settings_file(), "appsettings.local");
}

fn openai_settings(api_key: Option<&str>, model: Option<&str>) -> TranscriptionSettings {
    TranscriptionSettings {
        provider: TranscriptionProviderSetting::OpenAi,
        api_key: api_key.map(str::to_string),
        model: model.map(str::to_string),
        ..TranscriptionSettings::default()
    }
}

#[test]
fn given_openai_without_model_when_building_engine_then_uses_remote_default() {
    let engine = openai_settings(Some("sk-test"), None).build_engine().unwrap();

    assert_eq!(engine.model_id(), "whisper-1");
    assert_eq!(engine.device(), "remote");
}

#[test]
fn given_openai_with_model_when_building_engine_then_keeps_it() {
    let engine = openai_settings(Some("sk-test"), Some("whisper-large-v3"))
        .build_engine()
        .unwrap();

    assert_eq!(engine.model_id(), "whisper-large-v3");
}

#[test]
fn given_openai_without_api_key_when_building_engine_then_fails_to_load() {
    for api_key in [None, Some("   ")] {
        match openai_settings(api_key, None).build_engine() {
            Err(TranscriptionError::ModelLoadFailed(message)) => {
                assert!(message.contains("api_key"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("engine built without an api key"),
        }
    }
}

#[test]
fn given_blank_model_when_resolving_then_falls_back_per_provider() {
    let settings = openai_settings(Some("sk-test"), Some("  "));

    assert_eq!(settings.configured_model(), None);
    assert_eq!(settings.local_model(), DEFAULT_LOCAL_MODEL);
    assert_eq!(settings.build_engine().unwrap().model_id(), "whisper-1");
}
