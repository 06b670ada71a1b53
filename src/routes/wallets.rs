//! Tracked wallet routes

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::wallets::{
    assess_wallet, get_wallet, list_wallets, list_whales, register_wallet, remove_wallet,
    update_wallet,
};
use crate::state::AppState;

/// Create wallet management routes
pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/wallets", get(list_wallets))
        .route("/api/wallets", post(register_wallet))
        .route("/api/wallets/:id", get(get_wallet))
        .route("/api/wallets/:id", put(update_wallet))
        .route("/api/wallets/:id", delete(remove_wallet))
        .route("/api/wallets/:id/assessment", get(assess_wallet))
        .route("/api/whales", get(list_whales))
}
