//! Anomaly signal for tracked wallets
//!
//! The detector is the seam where a real analytics pipeline would plug
//! in. The built-in implementation is a deterministic heuristic over the
//! wallet's own stats; it never consults external state and produces the
//! same signal for the same input.

use crate::screener::model::WalletStats;

/// Produces an anomaly signal for a wallet's observed stats.
///
/// The returned value is added to the composite risk score without
/// scaling, so implementations should stay within a point range
/// comparable to the tiered factors. Negative values dampen the score.
pub trait AnomalyDetector: Send + Sync {
    fn score(&self, stats: &WalletStats) -> f64;
}

/// Transactions per day at which the velocity component saturates
const VELOCITY_SATURATION: f64 = 50.0;

/// Maximum points from the velocity component
const VELOCITY_MAX_POINTS: f64 = 25.0;

/// Wallets younger than this many days are eligible for burst points
const BURST_AGE_DAYS: u64 = 30;

/// Transaction count at which the burst component saturates
const BURST_SATURATION: f64 = 500.0;

/// Maximum points from the burst component
const BURST_MAX_POINTS: f64 = 15.0;

/// Heuristic detector keyed on transaction velocity.
///
/// Two components, both bounded: sustained velocity (transactions per
/// day of wallet age, saturating at [`VELOCITY_SATURATION`]) and early
/// burst (heavy activity inside the first month). Output is always in
/// 0.0..=40.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityHeuristic;

impl AnomalyDetector for ActivityHeuristic {
    fn score(&self, stats: &WalletStats) -> f64 {
        // Treat day zero as one day old to keep the ratio defined
        let age = stats.age_days.max(1) as f64;
        let tx_per_day = stats.transactions as f64 / age;

        let velocity = (tx_per_day / VELOCITY_SATURATION).min(1.0) * VELOCITY_MAX_POINTS;

        let burst = if stats.age_days < BURST_AGE_DAYS {
            (stats.transactions as f64 / BURST_SATURATION).min(1.0) * BURST_MAX_POINTS
        } else {
            0.0
        };

        velocity + burst
    }
}
