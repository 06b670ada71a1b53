//! Dashboard analytics handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::models::ApiResponse;
use crate::screener::ScreenerOverview;
use crate::state::AppState;

/// Rule counts for the overview payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleOverview {
    pub total: usize,
    pub enabled: usize,
}

/// Aggregated dashboard metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub wallets: ScreenerOverview,
    pub rules: RuleOverview,
    pub alerts: usize,
    pub ws_clients: usize,
}

/// GET /api/analytics/overview - Aggregated dashboard metrics
pub async fn analytics_overview(State(state): State<AppState>) -> Json<ApiResponse<AnalyticsOverview>> {
    let wallets = state.screener.overview().await;
    let rules = RuleOverview {
        total: state.alerts.rule_count().await,
        enabled: state.alerts.enabled_rule_count().await,
    };
    let alerts = state.alerts.alert_count().await;
    let ws_clients = state.ws.client_count().await;

    Json(ApiResponse::ok(AnalyticsOverview {
        wallets,
        rules,
        alerts,
        ws_clients,
    }))
}
