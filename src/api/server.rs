//! HTTP server setup and routing
//!
//! Sets up the Axum server: one upload-and-transform endpoint, status
//! check-in endpoints, and a health probe. Uniform error translation lives
//! on the `Error` type; handlers just return `Result`.

use crate::config::Config;
use crate::storage::OutputStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Extra room on top of the upload cap for multipart framing, so the
/// handler's own size check is what callers hit, not the body limit.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Shared application context passed to all handlers
///
/// **Note:** AppContext implements Clone, which gives us `FromRef<AppContext>`
/// via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub db_pool: SqlitePool,
    pub store: OutputStore,
}

/// Build the application router.
pub fn create_router(ctx: AppContext) -> Router {
    let body_limit = ctx.config.max_upload_bytes + BODY_LIMIT_SLACK;

    Router::new()
        // Health endpoint
        .route("/health", get(super::handlers::health))

        // API root
        .route("/api/", get(super::handlers::root))

        // Status check-ins
        .route(
            "/api/status",
            post(super::handlers::create_status_check).get(super::handlers::list_status_checks),
        )

        // Audio reversal
        .route("/api/reverse-audio", post(super::handlers::reverse_audio))

        // Attach application context
        .with_state(ctx)

        // Accept bodies up to the configured cap (plus framing)
        .layer(DefaultBodyLimit::max(body_limit))

        // Request/response logging
        .layer(TraceLayer::new_for_http())

        // Enable CORS for browser clients
        .layer(CorsLayer::permissive())
}
