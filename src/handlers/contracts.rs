//! Token contract risk handler

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::screener::model::validate_address;
use crate::screener::{ContractRiskSummary, ScreenerService};

/// GET /api/contracts/:address/risk - Dev-wallet risk rollup for one token contract
pub async fn contract_risk(
    State(screener): State<Arc<ScreenerService>>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<ContractRiskSummary>>, ApiError> {
    if validate_address(&address).is_err() {
        return Err(ApiError::BadRequest(format!(
            "Invalid contract address: {}",
            address
        )));
    }

    let summary = screener.contract_risk(&address).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
