//! Alert rule handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ApiResponse, MAX_PAGE_SIZE};
use crate::rules::{Alert, AlertRule, AlertService, AlertsQuery, CreateRuleRequest, UpdateRuleRequest};

/// Default number of alerts returned by the backlog endpoint
const DEFAULT_ALERTS_LIMIT: usize = 50;

/// GET /api/rules - List alert rules
pub async fn list_rules(
    State(alerts): State<Arc<AlertService>>,
) -> Json<ApiResponse<Vec<AlertRule>>> {
    Json(ApiResponse::ok(alerts.list_rules().await))
}

/// POST /api/rules - Create an alert rule
pub async fn create_rule(
    State(alerts): State<Arc<AlertService>>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AlertRule>>), ApiError> {
    req.validate()?;
    req.ensure_finite()?;

    let rule = alerts.create_rule(req).await;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(rule))))
}

/// PUT /api/rules/:id - Update an alert rule
pub async fn update_rule(
    State(alerts): State<Arc<AlertService>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRuleRequest>,
) -> Result<Json<ApiResponse<AlertRule>>, ApiError> {
    req.validate()?;
    req.ensure_finite()?;

    let rule = alerts.update_rule(id, req).await?;
    Ok(Json(ApiResponse::ok(rule)))
}

/// DELETE /api/rules/:id - Delete an alert rule
pub async fn delete_rule(
    State(alerts): State<Arc<AlertService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    alerts.delete_rule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/alerts - Recently triggered alerts, newest first
pub async fn list_alerts(
    State(alerts): State<Arc<AlertService>>,
    Query(query): Query<AlertsQuery>,
) -> Json<ApiResponse<Vec<Alert>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ALERTS_LIMIT)
        .clamp(1, MAX_PAGE_SIZE as usize);
    Json(ApiResponse::ok(alerts.recent_alerts(limit).await))
}
