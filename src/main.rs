//! Symptom Compass server entry point.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use symptom_compass::adapters::ai::{OpenAIConfig, OpenAIProvider};
use symptom_compass::adapters::clock::SystemClock;
use symptom_compass::adapters::http::{app_router, ChatAppState};
use symptom_compass::adapters::search::{RapidApiSearchConfig, RapidApiSearchProvider};
use symptom_compass::adapters::storage::InMemorySessionStore;
use symptom_compass::application::handlers::chat::{
    AnalyzerSettings, ConversationOrchestrator, SearchSettings, SourceSearchService,
    SymptomAnalyzer,
};
use symptom_compass::config::AppConfig;
use symptom_compass::ports::{AIProvider, SearchProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let orchestrator = Arc::new(build_orchestrator(&config));
    let state = ChatAppState::new(Arc::new(InMemorySessionStore::new()), orchestrator);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "symptom compass listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt().pretty().with_env_filter(filter).init();
    }
}

fn build_orchestrator(config: &AppConfig) -> ConversationOrchestrator {
    let completion = &config.completion;
    let ai_provider: Option<Arc<dyn AIProvider>> = match completion.api_key() {
        Some(key) => {
            let provider_config =
                OpenAIConfig::new(secrecy::Secret::new(key.expose_secret().clone()))
                    .with_model(completion.model.clone())
                    .with_base_url(completion.base_url.clone())
                    .with_timeout(completion.timeout());
            match OpenAIProvider::new(provider_config) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(err) => {
                    tracing::error!(error = %err, "completion client unavailable; using lookup tables");
                    None
                }
            }
        }
        None => {
            tracing::warn!("no completion API key configured; using lookup tables");
            None
        }
    };

    let search = &config.search;
    let search_provider: Option<Arc<dyn SearchProvider>> = match search.api_key() {
        Some(key) => {
            let provider_config =
                RapidApiSearchConfig::new(secrecy::Secret::new(key.expose_secret().clone()))
                    .with_base_url(search.base_url.clone())
                    .with_host(search.host.clone())
                    .with_timeout(search.timeout());
            match RapidApiSearchProvider::new(provider_config) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(err) => {
                    tracing::error!(error = %err, "search client unavailable; using static sources");
                    None
                }
            }
        }
        None => {
            tracing::warn!("no search API key configured; using static sources");
            None
        }
    };

    let search_service = SourceSearchService::new(
        search_provider,
        Arc::new(SystemClock),
        SearchSettings {
            cooldown: search.cooldown(),
            result_cap: search.result_cap,
        },
    );
    let analyzer = SymptomAnalyzer::new(
        ai_provider,
        AnalyzerSettings {
            temperature: completion.temperature,
            max_tokens: completion.max_tokens,
            history_turns: completion.history_turns,
        },
    );

    ConversationOrchestrator::new(search_service, analyzer)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
