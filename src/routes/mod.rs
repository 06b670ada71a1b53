//! Route definitions for the ChainWatch API

use axum::{routing::get, Router};

use crate::handlers::health::health_check;
use crate::state::AppState;
use crate::websocket;

pub mod analytics;
pub mod contracts;
pub mod risk;
pub mod rules;
pub mod search;
pub mod wallets;

pub use analytics::analytics_routes;
pub use contracts::contract_routes;
pub use risk::risk_routes;
pub use rules::rule_routes;
pub use search::search_routes;
pub use wallets::wallet_routes;

async fn root() -> &'static str {
    "ChainWatch API Server"
}

/// Assemble the full application router. Callers attach state and
/// middleware layers.
pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ws", get(websocket::ws_handler))
        .merge(risk_routes())
        .merge(wallet_routes())
        .merge(rule_routes())
        .merge(search_routes())
        .merge(contract_routes())
        .merge(analytics_routes())
}
