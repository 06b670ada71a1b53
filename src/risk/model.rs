//! Risk scoring model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;

/// Wallet attributes consumed by the risk scorer.
///
/// Balances are denominated in the dashboard's display currency (USD);
/// `age_days` counts whole days since the wallet's first observed activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalletRiskInput {
    pub balance: f64,
    pub transactions: u64,
    pub age_days: u64,
    pub anomaly_score: f64,
}

/// Categorical risk bucket derived from a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a clamped score onto its level.
    ///
    /// Scores below 30 are low, 30 through 69 are medium, 70 and above
    /// are high. The explanation text uses the same cut points, so level
    /// and explanation can never disagree for the same score.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=69 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    /// Human-readable summary shown next to the score in the dashboard.
    pub fn explanation(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "This wallet shows normal activity patterns and no elevated risk indicators."
            }
            RiskLevel::Medium => {
                "This wallet shows moderately elevated risk indicators and is worth monitoring."
            }
            RiskLevel::High => {
                "This wallet shows strong risk indicators consistent with high-risk activity."
            }
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Per-factor contributions to a composite score.
///
/// `raw_total` is the sum before clamping; it can exceed 100 or go
/// negative when the anomaly component dominates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub balance_points: u8,
    pub activity_points: u8,
    pub age_points: u8,
    pub anomaly_points: f64,
    pub raw_total: f64,
}

/// Full risk assessment for a tracked wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub address: String,
    pub score: u8,
    pub level: RiskLevel,
    pub explanation: String,
    pub breakdown: RiskBreakdown,
    pub anomaly_score: f64,
    pub screened_at: DateTime<Utc>,
}

/// Request body for ad-hoc scoring of caller-supplied attributes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(range(min = 0.0))]
    pub balance: f64,

    pub transactions: u64,

    pub age_days: u64,

    pub anomaly_score: f64,
}

impl ScoreRequest {
    /// Reject non-finite floats that survive JSON parsing.
    ///
    /// serde_json turns oversized literals like `1e999` into infinity,
    /// which range validation does not catch.
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        if !self.balance.is_finite() {
            return Err(ApiError::ValidationError(
                "balance must be a finite number".to_string(),
            ));
        }
        if !self.anomaly_score.is_finite() {
            return Err(ApiError::ValidationError(
                "anomaly_score must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert into scorer input
    pub fn to_input(&self) -> WalletRiskInput {
        WalletRiskInput {
            balance: self.balance,
            transactions: self.transactions,
            age_days: self.age_days,
            anomaly_score: self.anomaly_score,
        }
    }
}

/// Response body for ad-hoc scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResponse {
    pub score: u8,
    pub level: RiskLevel,
    pub explanation: String,
    pub breakdown: RiskBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_score_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(RiskLevel::Low.as_str(), "low");
        assert_eq!(RiskLevel::Medium.as_str(), "medium");
        assert_eq!(RiskLevel::High.as_str(), "high");
    }

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"medium\""
        );
    }

    #[test]
    fn test_score_request_rejects_infinite_values() {
        let req = ScoreRequest {
            balance: f64::INFINITY,
            transactions: 10,
            age_days: 10,
            anomaly_score: 0.0,
        };
        assert!(req.ensure_finite().is_err());

        let req = ScoreRequest {
            balance: 100.0,
            transactions: 10,
            age_days: 10,
            anomaly_score: f64::NEG_INFINITY,
        };
        assert!(req.ensure_finite().is_err());
    }
}
