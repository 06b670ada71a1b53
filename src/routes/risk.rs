//! Ad-hoc risk scoring routes

use axum::{routing::post, Router};

use crate::handlers::risk::score_attributes;
use crate::state::AppState;

/// Create risk scoring routes
pub fn risk_routes() -> Router<AppState> {
    Router::new().route("/api/risk/score", post(score_attributes))
}
