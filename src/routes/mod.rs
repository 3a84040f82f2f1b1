use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod cafes;
pub mod health;

/// All routes, no middleware, no state. Used by the server and by tests.
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new().merge(cafes::router()).merge(health::router())
}

/// Fully configured application with middleware and state applied.
pub fn build_app(state: Arc<AppState>) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
