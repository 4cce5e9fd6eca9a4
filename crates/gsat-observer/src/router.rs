//! Axum router construction for the HTTP API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled so the
//! UI can be served from another origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML index
/// - `GET /api/health` -- liveness probe
/// - `GET /api/config` -- effective configuration
/// - `GET /api/exact` -- exact records per guess count
/// - `GET /api/table` -- exact records per rule and guess count
/// - `GET /api/simulate` -- simulated record
/// - `GET /api/compare` -- simulated vs exact record, one rule or `all`
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/config", get(handlers::get_config))
        .route("/api/exact", get(handlers::exact))
        .route("/api/table", get(handlers::table))
        .route("/api/simulate", get(handlers::simulate))
        .route("/api/compare", get(handlers::compare))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
