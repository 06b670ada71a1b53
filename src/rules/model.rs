//! Alert rule model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::risk::RiskAssessment;
use crate::screener::model::WalletStats;

/// Wallet metric an alert rule watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMetric {
    RiskScore,
    Balance,
    Transactions,
    AgeDays,
    AnomalyScore,
}

impl RuleMetric {
    /// Extract the observed value for this metric from a screening result
    pub fn observe(&self, stats: &WalletStats, assessment: &RiskAssessment) -> f64 {
        match self {
            RuleMetric::RiskScore => f64::from(assessment.score),
            RuleMetric::Balance => stats.balance,
            RuleMetric::Transactions => stats.transactions as f64,
            RuleMetric::AgeDays => stats.age_days as f64,
            RuleMetric::AnomalyScore => assessment.anomaly_score,
        }
    }
}

/// Comparison operator applied between the observed value and the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A threshold rule evaluated against every screened wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: Uuid,
    pub name: String,
    pub metric: RuleMetric,
    pub comparison: Comparison,
    pub threshold: f64,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlertRule {
    /// Whether this rule fires for the given observed value
    pub fn matches(&self, observed: f64) -> bool {
        match self.comparison {
            Comparison::Gt => observed > self.threshold,
            Comparison::Gte => observed >= self.threshold,
            Comparison::Lt => observed < self.threshold,
            Comparison::Lte => observed <= self.threshold,
        }
    }
}

/// A triggered alert, retained in the in-memory backlog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub rule_id: Uuid,
    pub rule_name: String,
    pub address: String,
    pub metric: RuleMetric,
    pub comparison: Comparison,
    pub threshold: f64,
    pub observed: f64,
    pub triggered_at: DateTime<Utc>,
}

// ============================================================================
// Request / Query Types
// ============================================================================

fn default_enabled() -> bool {
    true
}

/// Request body for creating an alert rule
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    pub metric: RuleMetric,

    pub comparison: Comparison,

    pub threshold: f64,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl CreateRuleRequest {
    /// Reject non-finite thresholds that survive JSON parsing
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        if !self.threshold.is_finite() {
            return Err(ApiError::ValidationError(
                "threshold must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for updating an alert rule. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRuleRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    pub metric: Option<RuleMetric>,

    pub comparison: Option<Comparison>,

    pub threshold: Option<f64>,

    pub enabled: Option<bool>,
}

impl UpdateRuleRequest {
    /// Reject non-finite thresholds that survive JSON parsing
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        match self.threshold {
            Some(t) if !t.is_finite() => Err(ApiError::ValidationError(
                "threshold must be a finite number".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Query parameters for the alert backlog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsQuery {
    pub limit: Option<usize>,
}
