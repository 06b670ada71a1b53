//! Shared application state

use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::Config;
use crate::rules::AlertService;
use crate::screener::ScreenerService;
use crate::websocket::WsState;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub screener: Arc<ScreenerService>,
    pub alerts: Arc<AlertService>,
    pub ws: WsState,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        screener: Arc<ScreenerService>,
        alerts: Arc<AlertService>,
        ws: WsState,
        config: Arc<Config>,
    ) -> Self {
        AppState {
            screener,
            alerts,
            ws,
            config,
        }
    }
}

impl FromRef<AppState> for Arc<ScreenerService> {
    fn from_ref(state: &AppState) -> Self {
        state.screener.clone()
    }
}

impl FromRef<AppState> for Arc<AlertService> {
    fn from_ref(state: &AppState) -> Self {
        state.alerts.clone()
    }
}

impl FromRef<AppState> for WsState {
    fn from_ref(state: &AppState) -> Self {
        state.ws.clone()
    }
}
