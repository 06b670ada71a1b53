//! Tracked wallet handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ApiResponse, PaginatedResponse};
use crate::risk::RiskAssessment;
use crate::screener::{
    ListWalletsQuery, RegisterWalletRequest, ScreenerService, TrackedWallet, UpdateWalletRequest,
    WalletSummary, WhalesQuery,
};

/// GET /api/wallets - List tracked wallets with optional filters
pub async fn list_wallets(
    State(screener): State<Arc<ScreenerService>>,
    Query(query): Query<ListWalletsQuery>,
) -> Json<ApiResponse<PaginatedResponse<WalletSummary>>> {
    Json(ApiResponse::ok(screener.list(query).await))
}

/// POST /api/wallets - Register a wallet with the screener
pub async fn register_wallet(
    State(screener): State<Arc<ScreenerService>>,
    Json(req): Json<RegisterWalletRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TrackedWallet>>), ApiError> {
    req.validate()?;
    req.ensure_finite()?;

    let wallet = screener.register(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(wallet))))
}

/// GET /api/wallets/:id - Fetch one tracked wallet
pub async fn get_wallet(
    State(screener): State<Arc<ScreenerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TrackedWallet>>, ApiError> {
    let wallet = screener.get(id).await?;
    Ok(Json(ApiResponse::ok(wallet)))
}

/// PUT /api/wallets/:id - Update a tracked wallet
pub async fn update_wallet(
    State(screener): State<Arc<ScreenerService>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWalletRequest>,
) -> Result<Json<ApiResponse<TrackedWallet>>, ApiError> {
    req.validate()?;
    req.ensure_finite()?;

    let wallet = screener.update(id, req).await?;
    Ok(Json(ApiResponse::ok(wallet)))
}

/// DELETE /api/wallets/:id - Remove a wallet from the screener
pub async fn remove_wallet(
    State(screener): State<Arc<ScreenerService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    screener.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/wallets/:id/assessment - Screen a wallet and return its assessment
pub async fn assess_wallet(
    State(screener): State<Arc<ScreenerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RiskAssessment>>, ApiError> {
    let assessment = screener.screen(id).await?;
    Ok(Json(ApiResponse::ok(assessment)))
}

/// GET /api/whales - Largest tracked wallets above the balance floor
pub async fn list_whales(
    State(screener): State<Arc<ScreenerService>>,
    Query(query): Query<WhalesQuery>,
) -> Result<Json<ApiResponse<Vec<WalletSummary>>>, ApiError> {
    let whales = screener.whales(query.min_balance, query.limit).await?;
    Ok(Json(ApiResponse::ok(whales)))
}
