//! Token contract routes

use axum::{routing::get, Router};

use crate::handlers::contracts::contract_risk;
use crate::state::AppState;

/// Create token contract routes
pub fn contract_routes() -> Router<AppState> {
    Router::new().route("/api/contracts/:address/risk", get(contract_risk))
}
