// The http module adapts the core moderation service to HTTP.
// Routing, CORS and JSON response mapping live here; no business logic.

#[path = "handlers.rs"]
pub mod handlers;

#[path = "responses.rs"]
pub mod responses;

use crate::config::ConfigError;
use crate::core::moderation::{ContentClassifier, ModerationService, ReportStore};
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::HeaderValue;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Request headers browser clients are allowed to send.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// The moderation service with its collaborators chosen at runtime.
pub type DynModerationService =
    ModerationService<Box<dyn ContentClassifier>, Box<dyn ReportStore>>;

/// Shared application state.
///
/// A misconfigured deployment still serves requests: validation runs as
/// usual and anything that would reach the classifier gets a 500.
#[derive(Clone)]
pub enum AppState {
    Ready(Arc<DynModerationService>),
    Misconfigured(Arc<ConfigError>),
}

impl AppState {
    pub fn ready(service: DynModerationService) -> Self {
        AppState::Ready(Arc::new(service))
    }

    pub fn misconfigured(err: ConfigError) -> Self {
        AppState::Misconfigured(Arc::new(err))
    }
}

fn moderation_route() -> MethodRouter<AppState> {
    post(handlers::moderate_content)
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed)
}

pub fn create_router(state: AppState) -> Router {
    // Permissive CORS headers go on every response, preflight included.
    // OPTIONS itself is answered by the `preflight` handler.
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/", moderation_route())
        .route("/moderate-content", moderation_route())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}
