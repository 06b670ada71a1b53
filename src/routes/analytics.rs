//! Analytics routes

use axum::{routing::get, Router};

use crate::handlers::analytics::analytics_overview;
use crate::state::AppState;

/// Create analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/api/analytics/overview", get(analytics_overview))
}
