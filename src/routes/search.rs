//! Wallet search routes

use axum::{routing::get, Router};

use crate::handlers::search::search_wallets;
use crate::state::AppState;

/// Create search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_wallets))
}
