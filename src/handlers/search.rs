//! Wallet search handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::screener::{ScreenerService, SearchQuery, WalletSummary};

/// GET /api/search - Search tracked wallets by address or label
pub async fn search_wallets(
    State(screener): State<Arc<ScreenerService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<WalletSummary>>>, ApiError> {
    let hits = screener.search(&query.q, query.limit).await?;
    Ok(Json(ApiResponse::ok(hits)))
}
