//! Alert rule routes

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::rules::{create_rule, delete_rule, list_alerts, list_rules, update_rule};
use crate::state::AppState;

/// Create alert rule routes
pub fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/api/rules", get(list_rules))
        .route("/api/rules", post(create_rule))
        .route("/api/rules/:id", put(update_rule))
        .route("/api/rules/:id", delete(delete_rule))
        .route("/api/alerts", get(list_alerts))
}
