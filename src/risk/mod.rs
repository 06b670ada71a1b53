//! Wallet risk scoring
//!
//! Pure scoring functions plus the model types shared by the screener
//! and the HTTP handlers. Scores are advisory signals for the dashboard,
//! not enforcement decisions.

pub mod model;
pub mod scorer;

pub use model::{
    RiskAssessment, RiskBreakdown, RiskLevel, ScoreRequest, ScoredResponse, WalletRiskInput,
};
pub use scorer::{
    calculate_risk, risk_breakdown, risk_explanation, risk_level, MAX_RISK_SCORE, MIN_RISK_SCORE,
};
