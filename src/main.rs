use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use whisper_gateway::application::ports::{AudioStore, DecodingOptions};
use whisper_gateway::application::services::{
    HallucinationFilter, SessionLimiter, TranscriptionService,
};
use whisper_gateway::domain::LanguageHint;
use whisper_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use whisper_gateway::infrastructure::storage::TempAudioStore;
use whisper_gateway::presentation::{
    AppState, EndpointConfig, Environment, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let json_logs = settings.logging.enable_json || TracingConfig::default().json_format;
    let tracing_config =
        TracingConfig::new(environment.as_str(), json_logs, &settings.logging.level);
    init_tracing(&tracing_config, settings.server.port);

    tracing::info!(
        provider = ?settings.transcription.provider,
        model = ?settings.transcription.configured_model(),
        device = %settings.transcription.device,
        "Loading transcription engine"
    );

    let engine = settings
        .transcription
        .build_engine()
        .context("Failed to load transcription engine")?;

    let audio_store: Arc<dyn AudioStore> = match &settings.ingest.temp_dir {
        Some(dir) => Arc::new(TempAudioStore::new(dir.clone())?),
        None => Arc::new(TempAudioStore::in_system_temp()?),
    };

    let filter = HallucinationFilter::with_extra_phrases(&settings.filter.extra_phrases);
    tracing::info!(phrases = filter.phrase_count(), "Hallucination filter ready");

    let transcription_service = Arc::new(TranscriptionService::new(
        engine,
        audio_store,
        filter,
        DecodingOptions::default(),
        settings.transcription.max_concurrent_inferences,
    ));

    let endpoint_config = EndpointConfig {
        default_language: LanguageHint::new(&settings.ingest.default_language),
        streaming_language: LanguageHint::new(&settings.streaming.language),
        max_upload_bytes: settings.ingest.max_upload_bytes(),
        idle_timeout: Duration::from_secs(settings.streaming.idle_timeout_secs),
    };

    let state = AppState {
        transcription_service: Arc::clone(&transcription_service),
        session_limiter: SessionLimiter::new(settings.streaming.max_sessions),
        endpoint_config,
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(transcription_service))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM and closes the engine gate, so streaming
/// sessions still open get a failure instead of queueing more inference.
async fn shutdown_signal(service: Arc<TranscriptionService>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }

    service.close();
}
