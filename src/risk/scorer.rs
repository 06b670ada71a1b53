//! Additive risk scorer for wallet attributes
//!
//! The score is the sum of three tiered factor contributions plus the
//! upstream anomaly signal, clamped to 0-100. Factor cut points are
//! strict comparisons: a balance of exactly 1,000,000 earns the middle
//! tier, not the top one.

use crate::risk::model::{RiskBreakdown, RiskLevel, WalletRiskInput};

// ============================================================================
// Scoring Constants
// ============================================================================

/// Balance above which the top balance tier applies
const BALANCE_HIGH_THRESHOLD: f64 = 1_000_000.0;

/// Balance above which the middle balance tier applies
const BALANCE_MID_THRESHOLD: f64 = 100_000.0;

/// Points contributed by the top balance tier
const BALANCE_HIGH_POINTS: u8 = 30;

/// Points contributed by the middle balance tier
const BALANCE_MID_POINTS: u8 = 15;

/// Transaction count above which the top activity tier applies
const ACTIVITY_HIGH_THRESHOLD: u64 = 1000;

/// Transaction count above which the middle activity tier applies
const ACTIVITY_MID_THRESHOLD: u64 = 100;

/// Points contributed by the top activity tier
const ACTIVITY_HIGH_POINTS: u8 = 25;

/// Points contributed by the middle activity tier
const ACTIVITY_MID_POINTS: u8 = 10;

/// Wallets younger than this many days earn the top age tier
const AGE_NEW_DAYS: u64 = 30;

/// Wallets younger than this many days earn the middle age tier
const AGE_RECENT_DAYS: u64 = 180;

/// Points contributed by the top age tier
const AGE_NEW_POINTS: u8 = 20;

/// Points contributed by the middle age tier
const AGE_RECENT_POINTS: u8 = 10;

/// Maximum possible risk score
pub const MAX_RISK_SCORE: u8 = 100;

/// Minimum possible risk score
pub const MIN_RISK_SCORE: u8 = 0;

// ============================================================================
// Factor Contributions
// ============================================================================

/// Points for the wallet's balance tier
fn balance_points(balance: f64) -> u8 {
    if balance > BALANCE_HIGH_THRESHOLD {
        BALANCE_HIGH_POINTS
    } else if balance > BALANCE_MID_THRESHOLD {
        BALANCE_MID_POINTS
    } else {
        0
    }
}

/// Points for the wallet's transaction volume tier
fn activity_points(transactions: u64) -> u8 {
    if transactions > ACTIVITY_HIGH_THRESHOLD {
        ACTIVITY_HIGH_POINTS
    } else if transactions > ACTIVITY_MID_THRESHOLD {
        ACTIVITY_MID_POINTS
    } else {
        0
    }
}

/// Points for the wallet's age tier (newer wallets score higher)
fn age_points(age_days: u64) -> u8 {
    if age_days < AGE_NEW_DAYS {
        AGE_NEW_POINTS
    } else if age_days < AGE_RECENT_DAYS {
        AGE_RECENT_POINTS
    } else {
        0
    }
}

// ============================================================================
// Public Scoring API
// ============================================================================

/// Compute per-factor contributions without clamping.
///
/// The anomaly component is carried through as-is: it is unbounded on
/// both sides, so `raw_total` can leave the 0-100 range. Callers who
/// need the final score should use [`calculate_risk`].
pub fn risk_breakdown(input: &WalletRiskInput) -> RiskBreakdown {
    let balance = balance_points(input.balance);
    let activity = activity_points(input.transactions);
    let age = age_points(input.age_days);
    let raw_total = f64::from(balance + activity + age) + input.anomaly_score;

    RiskBreakdown {
        balance_points: balance,
        activity_points: activity,
        age_points: age,
        anomaly_points: input.anomaly_score,
        raw_total,
    }
}

/// Calculate a wallet's composite risk score.
///
/// Sums the tiered contributions for balance, transaction volume, and
/// wallet age with the upstream anomaly signal, then clamps the result
/// to [`MIN_RISK_SCORE`]..=[`MAX_RISK_SCORE`] and truncates the
/// fractional part. A large negative anomaly signal can pull an
/// otherwise risky wallet down to zero before clamping.
pub fn calculate_risk(input: &WalletRiskInput) -> u8 {
    let raw = risk_breakdown(input).raw_total;
    raw.clamp(f64::from(MIN_RISK_SCORE), f64::from(MAX_RISK_SCORE)) as u8
}

/// Categorize a clamped score into a risk level
pub fn risk_level(score: u8) -> RiskLevel {
    RiskLevel::from_score(score)
}

/// Human-readable explanation for a clamped score
pub fn risk_explanation(score: u8) -> &'static str {
    RiskLevel::from_score(score).explanation()
}
