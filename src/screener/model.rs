//! Wallet screener model types and request validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::ApiError;
use crate::risk::RiskLevel;

/// Observed on-chain statistics for a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalletStats {
    pub balance: f64,
    pub transactions: u64,
    pub age_days: u64,
}

/// A wallet registered with the screener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedWallet {
    pub id: Uuid,
    /// Normalized (lowercase) 0x address
    pub address: String,
    pub label: Option<String>,
    /// Token contract this wallet is associated with, if any
    pub token_contract: Option<String>,
    /// Marked as a deployer/team wallet for the associated contract
    pub dev_wallet: bool,
    pub stats: WalletStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact wallet view with current score, used by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSummary {
    pub id: Uuid,
    pub address: String,
    pub label: Option<String>,
    pub token_contract: Option<String>,
    pub dev_wallet: bool,
    pub stats: WalletStats,
    pub score: u8,
    pub level: RiskLevel,
}

/// Aggregated risk view over one token contract's dev wallets.
///
/// `wallet_count` covers every tracked wallet for the contract;
/// the score aggregate and `wallets` cover only those flagged dev.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRiskSummary {
    pub token_contract: String,
    pub wallet_count: usize,
    pub dev_wallet_count: usize,
    pub max_score: u8,
    pub mean_score: f64,
    /// Level of the riskiest dev wallet
    pub level: RiskLevel,
    /// Dev wallets feeding the aggregate, riskiest first
    pub wallets: Vec<WalletSummary>,
}

/// Wallet counts per risk level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Store-wide aggregates for the analytics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerOverview {
    pub total_wallets: usize,
    pub dev_wallets: usize,
    pub whales: usize,
    pub mean_score: f64,
    pub levels: LevelCounts,
}

// ============================================================================
// Request / Query Types
// ============================================================================

/// Validate an EVM-style address: 0x followed by 40 hex characters
pub(crate) fn validate_address(address: &str) -> Result<(), ValidationError> {
    let hex = match address.strip_prefix("0x") {
        Some(rest) => rest,
        None => return Err(address_format_error()),
    };
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(address_format_error());
    }
    Ok(())
}

fn address_format_error() -> ValidationError {
    let mut err = ValidationError::new("address_format");
    err.message = Some("address must be 0x followed by 40 hex characters".into());
    err
}

/// Request body for registering a wallet with the screener
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterWalletRequest {
    #[validate(custom = "validate_address")]
    pub address: String,

    #[validate(length(min = 1, max = 64))]
    pub label: Option<String>,

    #[validate(custom = "validate_address")]
    pub token_contract: Option<String>,

    #[serde(default)]
    pub dev_wallet: bool,

    #[validate]
    pub stats: StatsPayload,
}

impl RegisterWalletRequest {
    /// Reject non-finite floats that survive JSON parsing
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        self.stats.ensure_finite()
    }
}

/// Wallet statistics as accepted on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct StatsPayload {
    #[validate(range(min = 0.0))]
    pub balance: f64,

    pub transactions: u64,

    pub age_days: u64,
}

impl StatsPayload {
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
        Ok(())
    }

    /// Convert into the stored stats representation
    pub fn into_stats(self) -> WalletStats {
        WalletStats {
            balance: self.balance,
            transactions: self.transactions,
            age_days: self.age_days,
        }
    }
}

/// Request body for updating a tracked wallet. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateWalletRequest {
    #[validate(length(min = 1, max = 64))]
    pub label: Option<String>,

    #[validate(custom = "validate_address")]
    pub token_contract: Option<String>,

    pub dev_wallet: Option<bool>,

    #[validate]
    pub stats: Option<StatsPayload>,
}

impl UpdateWalletRequest {
    /// Reject non-finite floats that survive JSON parsing
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        match &self.stats {
            Some(stats) => stats.ensure_finite(),
            None => Ok(()),
        }
    }
}

/// Query parameters for listing tracked wallets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListWalletsQuery {
    pub dev_wallet: Option<bool>,
    pub token_contract: Option<String>,
    /// Only include wallets whose current score is at least this value
    pub min_score: Option<u8>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Query parameters for wallet search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

/// Query parameters for the whale listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhalesQuery {
    pub min_balance: Option<f64>,
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterWalletRequest {
        RegisterWalletRequest {
            address: "0x1111111111111111111111111111111111111111".to_string(),
            label: Some("treasury".to_string()),
            token_contract: None,
            dev_wallet: false,
            stats: StatsPayload {
                balance: 1000.0,
                transactions: 50,
                age_days: 90,
            },
        }
    }

    #[test]
    fn test_address_validation_accepts_hex_addresses() {
        assert!(validate_address("0x1111111111111111111111111111111111111111").is_ok());
        assert!(validate_address("0xAbCdEf0123456789abcdef0123456789ABCDEF01").is_ok());
    }

    #[test]
    fn test_address_validation_rejects_malformed_input() {
        assert!(validate_address("").is_err());
        assert!(validate_address("1111111111111111111111111111111111111111").is_err());
        assert!(validate_address("0x123").is_err());
        assert!(validate_address("0xZZ11111111111111111111111111111111111111").is_err());
        assert!(validate_address("0x11111111111111111111111111111111111111111").is_err());
    }

    #[test]
    fn test_register_request_validation() {
        assert!(valid_register().validate().is_ok());

        let mut bad_address = valid_register();
        bad_address.address = "not-an-address".to_string();
        assert!(bad_address.validate().is_err());

        let mut empty_label = valid_register();
        empty_label.label = Some(String::new());
        assert!(empty_label.validate().is_err());

        let mut negative_balance = valid_register();
        negative_balance.stats.balance = -5.0;
        assert!(negative_balance.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_infinite_balance() {
        let mut req = valid_register();
        req.stats.balance = f64::INFINITY;
        assert!(req.ensure_finite().is_err());
        assert!(valid_register().ensure_finite().is_ok());
    }
}
