//! Process entry point: configuration, tracing, wiring, serve.

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use honeytrap::adapters::ai::{OpenAiConfig, OpenAiEngine};
use honeytrap::adapters::callback::HttpReportSink;
use honeytrap::adapters::http::{honeypot_routes, HoneypotHandlers};
use honeytrap::adapters::store::InMemorySessionStore;
use honeytrap::application::{CallbackDispatcher, MessageOrchestrator};
use honeytrap::config::AppConfig;
use honeytrap::domain::engagement::TerminationPolicy;
use honeytrap::domain::intelligence::IntelligenceExtractor;
use honeytrap::domain::persona::PersonaLibrary;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let api_key = config
        .ai
        .api_key
        .clone()
        .expect("validated configuration always carries an API key");
    let engine = Arc::new(OpenAiEngine::new(
        OpenAiConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?);

    let sink = Arc::new(HttpReportSink::new(
        config.callback.endpoint_url.clone(),
        config.callback.timeout(),
    )?);
    let dispatcher = Arc::new(CallbackDispatcher::new(
        sink,
        config.callback.max_attempts,
        config.callback.backoff_step(),
    ));

    let extractor = IntelligenceExtractor::new()
        .with_min_account_digits(config.engagement.min_account_digits)
        .with_extra_keywords(&config.engagement.extra_keywords_list());

    let orchestrator = Arc::new(MessageOrchestrator::new(
        Arc::new(InMemorySessionStore::new()),
        engine.clone(),
        engine,
        PersonaLibrary::new(),
        extractor,
        TerminationPolicy::new(config.engagement.max_messages),
        dispatcher,
    ));

    let app = honeypot_routes(HoneypotHandlers::new(orchestrator))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr();
    info!(%addr, environment = ?config.server.environment, "honeytrap listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
