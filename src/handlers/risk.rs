//! Ad-hoc risk scoring handlers

use axum::Json;
use validator::Validate;

use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::risk::{calculate_risk, risk_breakdown, risk_level, ScoreRequest, ScoredResponse};

/// POST /api/risk/score - Score caller-supplied wallet attributes
pub async fn score_attributes(
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ApiResponse<ScoredResponse>>, ApiError> {
    req.validate()?;
    req.ensure_finite()?;

    let input = req.to_input();
    let breakdown = risk_breakdown(&input);
    let score = calculate_risk(&input);
    let level = risk_level(score);

    Ok(Json(ApiResponse::ok(ScoredResponse {
        score,
        level,
        explanation: level.explanation().to_string(),
        breakdown,
    })))
}
