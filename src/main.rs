// This is the entry point of the moderation relay.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (classifier API, report stores)
// - `http/` = HTTP adapter (routing, CORS, JSON responses)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Serve the moderation endpoint

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "http/http_layer.rs"]
mod http;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::{Config, StoreBackend};
use crate::core::moderation::{ContentClassifier, ModerationService, ReportStore};
use crate::http::{create_router, AppState, DynModerationService};
use crate::infra::classifier::OpenAiModerationClient;
use crate::infra::reports::{InMemoryReportStore, PostgrestReportStore, SqliteReportStore};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Initialize logging so we can see what's happening
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let state = match Config::from_env() {
        Ok(config) => AppState::ready(build_service(&config).await?),
        Err(err) => {
            // Keep serving so callers get a 500 instead of a dead socket.
            tracing::error!("{}", err);
            AppState::misconfigured(err)
        }
    };

    let bind_address = config::bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Moderation relay listening on http://{}", bind_address);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

async fn build_service(config: &Config) -> anyhow::Result<DynModerationService> {
    let classifier: Box<dyn ContentClassifier> = Box::new(OpenAiModerationClient::new(
        config.openai_api_key.clone(),
        config.moderation_api_url.clone(),
        config.moderation_model.clone(),
    ));

    let store: Box<dyn ReportStore> = match config.store_backend() {
        StoreBackend::Postgrest => Box::new(
            PostgrestReportStore::new(&config.store_url, &config.store_service_key)
                .context("Failed to create report store client")?,
        ),
        StoreBackend::Sqlite => {
            let store = SqliteReportStore::connect(&config.store_url)
                .await
                .context("Failed to open SQLite report store")?;
            store
                .migrate()
                .await
                .context("Failed to migrate SQLite report store")?;
            Box::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory report store; reports are lost on restart");
            Box::new(InMemoryReportStore::new())
        }
    };

    tracing::info!(backend = ?config.store_backend(), "Report store ready");

    Ok(ModerationService::new(classifier, store))
}
