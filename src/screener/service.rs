//! Wallet screener service
//!
//! Orchestrates the wallet store, anomaly detector, risk scorer, and
//! alert evaluation. Every screening runs the same path whether it was
//! requested over HTTP or by the background sweep.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::anomaly::AnomalyDetector;
use crate::error::{ApiError, ApiResult};
use crate::models::{normalize_paging, PaginatedResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::risk::{
    calculate_risk, risk_breakdown, risk_level, RiskAssessment, RiskLevel, WalletRiskInput,
};
use crate::rules::AlertService;
use crate::screener::model::{
    ContractRiskSummary, LevelCounts, ListWalletsQuery, RegisterWalletRequest, ScreenerOverview,
    TrackedWallet, UpdateWalletRequest, WalletSummary,
};
use crate::screener::store::{StoreError, WalletStore};
use crate::websocket::{AlertEvent, WsState};

pub struct ScreenerService {
    wallets: Arc<dyn WalletStore>,
    detector: Arc<dyn AnomalyDetector>,
    alerts: Arc<AlertService>,
    ws: WsState,
    whale_floor: f64,
}

impl ScreenerService {
    pub fn new(
        wallets: Arc<dyn WalletStore>,
        detector: Arc<dyn AnomalyDetector>,
        alerts: Arc<AlertService>,
        ws: WsState,
        whale_floor: f64,
    ) -> Self {
        ScreenerService {
            wallets,
            detector,
            alerts,
            ws,
            whale_floor,
        }
    }

    // ========================================================================
    // Wallet CRUD
    // ========================================================================

    /// Register a new wallet with the screener
    pub async fn register(&self, req: RegisterWalletRequest) -> ApiResult<TrackedWallet> {
        let now = Utc::now();
        let wallet = TrackedWallet {
            id: Uuid::new_v4(),
            address: req.address.to_lowercase(),
            label: req.label,
            token_contract: req.token_contract.map(|c| c.to_lowercase()),
            dev_wallet: req.dev_wallet,
            stats: req.stats.into_stats(),
            created_at: now,
            updated_at: now,
        };

        match self.wallets.insert(wallet.clone()).await {
            Ok(()) => {
                tracing::info!(wallet_id = %wallet.id, address = %wallet.address, "Wallet registered");
                Ok(wallet)
            }
            Err(StoreError::AddressInUse(address)) => Err(ApiError::Conflict(format!(
                "Wallet {} is already tracked",
                address
            ))),
        }
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<TrackedWallet> {
        self.wallets
            .get(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Wallet {} not found", id)))
    }

    pub async fn wallet_count(&self) -> usize {
        self.wallets.count().await
    }

    /// List tracked wallets with optional filters, oldest first
    pub async fn list(&self, query: ListWalletsQuery) -> PaginatedResponse<WalletSummary> {
        let (page, limit) = normalize_paging(query.page, query.limit);
        let contract_filter = query.token_contract.map(|c| c.to_lowercase());

        let mut wallets = self.wallets.list().await;
        wallets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut rows = Vec::new();
        for wallet in &wallets {
            if let Some(dev) = query.dev_wallet {
                if wallet.dev_wallet != dev {
                    continue;
                }
            }
            if let Some(contract) = &contract_filter {
                if wallet.token_contract.as_deref() != Some(contract.as_str()) {
                    continue;
                }
            }

            let summary = self.summarize(wallet);
            if let Some(min_score) = query.min_score {
                if summary.score < min_score {
                    continue;
                }
            }
            rows.push(summary);
        }

        let total = rows.len();
        let start = (page as usize - 1) * limit as usize;
        let data: Vec<WalletSummary> = rows.into_iter().skip(start).take(limit as usize).collect();

        PaginatedResponse {
            data,
            total,
            page,
            limit,
        }
    }

    /// Apply a partial update to a tracked wallet
    pub async fn update(&self, id: Uuid, req: UpdateWalletRequest) -> ApiResult<TrackedWallet> {
        let mut wallet = self.get(id).await?;

        if let Some(label) = req.label {
            wallet.label = Some(label);
        }
        if let Some(contract) = req.token_contract {
            wallet.token_contract = Some(contract.to_lowercase());
        }
        if let Some(dev_wallet) = req.dev_wallet {
            wallet.dev_wallet = dev_wallet;
        }
        if let Some(stats) = req.stats {
            wallet.stats = stats.into_stats();
        }
        wallet.updated_at = Utc::now();

        if !self.wallets.update(wallet.clone()).await {
            return Err(ApiError::NotFound(format!("Wallet {} not found", id)));
        }

        tracing::info!(wallet_id = %wallet.id, "Wallet updated");
        Ok(wallet)
    }

    /// Remove a wallet from the screener
    pub async fn remove(&self, id: Uuid) -> ApiResult<()> {
        if !self.wallets.remove(id).await {
            return Err(ApiError::NotFound(format!("Wallet {} not found", id)));
        }
        tracing::info!(wallet_id = %id, "Wallet removed");
        Ok(())
    }

    // ========================================================================
    // Screening
    // ========================================================================

    /// Score a wallet's current stats without touching alerts
    fn assess(&self, wallet: &TrackedWallet) -> RiskAssessment {
        let anomaly_score = self.detector.score(&wallet.stats);
        let input = WalletRiskInput {
            balance: wallet.stats.balance,
            transactions: wallet.stats.transactions,
            age_days: wallet.stats.age_days,
            anomaly_score,
        };

        let breakdown = risk_breakdown(&input);
        let score = calculate_risk(&input);
        let level = risk_level(score);

        RiskAssessment {
            address: wallet.address.clone(),
            score,
            level,
            explanation: level.explanation().to_string(),
            breakdown,
            anomaly_score,
            screened_at: Utc::now(),
        }
    }

    fn summarize(&self, wallet: &TrackedWallet) -> WalletSummary {
        let assessment = self.assess(wallet);
        WalletSummary {
            id: wallet.id,
            address: wallet.address.clone(),
            label: wallet.label.clone(),
            token_contract: wallet.token_contract.clone(),
            dev_wallet: wallet.dev_wallet,
            stats: wallet.stats,
            score: assessment.score,
            level: assessment.level,
        }
    }

    /// Screen one wallet: score it, evaluate alert rules, and flag it
    /// to WebSocket clients if it lands in the high level.
    async fn screen_wallet(&self, wallet: &TrackedWallet) -> RiskAssessment {
        let assessment = self.assess(wallet);
        self.alerts
            .evaluate(&wallet.address, &wallet.stats, &assessment)
            .await;

        if assessment.level == RiskLevel::High {
            self.ws.broadcast(AlertEvent::WalletFlagged {
                address: assessment.address.clone(),
                score: assessment.score,
                level: assessment.level,
            });
        }

        assessment
    }

    /// Screen a tracked wallet by id
    pub async fn screen(&self, id: Uuid) -> ApiResult<RiskAssessment> {
        let wallet = self.get(id).await?;
        Ok(self.screen_wallet(&wallet).await)
    }

    /// Re-screen every tracked wallet. Returns the number screened.
    pub async fn sweep(&self) -> usize {
        let wallets = self.wallets.list().await;
        let count = wallets.len();

        for wallet in &wallets {
            let assessment = self.screen_wallet(wallet).await;
            tracing::debug!(
                address = %wallet.address,
                score = assessment.score,
                level = %assessment.level.as_str(),
                "Sweep screened wallet"
            );
        }

        if count > 0 {
            tracing::info!(wallets = count, "Risk sweep completed");
        }
        count
    }

    /// Background loop that periodically re-screens every wallet
    pub async fn sweep_loop(self: Arc<Self>, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            self.sweep().await;
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Case-insensitive search over addresses and labels, riskiest first
    pub async fn search(&self, query: &str, limit: Option<usize>) -> ApiResult<Vec<WalletSummary>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ApiError::BadRequest(
                "Search query must not be empty".to_string(),
            ));
        }
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_SIZE as usize)
            .clamp(1, MAX_PAGE_SIZE as usize);

        // A full address is an exact lookup, no scan needed
        if let Some(wallet) = self.wallets.find_by_address(&needle).await {
            return Ok(vec![self.summarize(&wallet)]);
        }

        let mut matches: Vec<WalletSummary> = self
            .wallets
            .list()
            .await
            .iter()
            .filter(|wallet| {
                wallet.address.contains(&needle)
                    || wallet
                        .label
                        .as_ref()
                        .is_some_and(|label| label.to_lowercase().contains(&needle))
            })
            .map(|wallet| self.summarize(wallet))
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.address.cmp(&b.address)));
        matches.truncate(limit);
        Ok(matches)
    }

    /// Wallets at or above the balance floor, largest first
    pub async fn whales(
        &self,
        min_balance: Option<f64>,
        limit: Option<usize>,
    ) -> ApiResult<Vec<WalletSummary>> {
        let floor = min_balance.unwrap_or(self.whale_floor);
        if !floor.is_finite() || floor < 0.0 {
            return Err(ApiError::BadRequest(
                "min_balance must be a non-negative number".to_string(),
            ));
        }
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_SIZE as usize)
            .clamp(1, MAX_PAGE_SIZE as usize);

        let mut whales: Vec<WalletSummary> = self
            .wallets
            .list()
            .await
            .iter()
            .filter(|wallet| wallet.stats.balance >= floor)
            .map(|wallet| self.summarize(wallet))
            .collect();

        whales.sort_by(|a, b| b.stats.balance.total_cmp(&a.stats.balance));
        whales.truncate(limit);
        Ok(whales)
    }

    /// Aggregate risk across the dev wallets tracked for a token contract.
    ///
    /// Non-dev holders feed `wallet_count` only; the max/mean/level
    /// aggregate and the returned wallet list cover the dev wallets.
    /// Returns `NotFound` when the contract is untracked or none of its
    /// wallets are flagged dev.
    pub async fn contract_risk(&self, contract: &str) -> ApiResult<ContractRiskSummary> {
        let contract = contract.to_lowercase();

        let tracked: Vec<TrackedWallet> = self
            .wallets
            .list()
            .await
            .into_iter()
            .filter(|wallet| wallet.token_contract.as_deref() == Some(contract.as_str()))
            .collect();

        if tracked.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No tracked wallets for contract {}",
                contract
            )));
        }

        let wallet_count = tracked.len();
        let mut dev_wallets: Vec<WalletSummary> = tracked
            .iter()
            .filter(|wallet| wallet.dev_wallet)
            .map(|wallet| self.summarize(wallet))
            .collect();

        if dev_wallets.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No dev wallets tracked for contract {}",
                contract
            )));
        }

        dev_wallets.sort_by(|a, b| b.score.cmp(&a.score).then(a.address.cmp(&b.address)));

        let dev_wallet_count = dev_wallets.len();
        let max_score = dev_wallets.iter().map(|w| w.score).max().unwrap_or(0);
        let mean_score =
            dev_wallets.iter().map(|w| f64::from(w.score)).sum::<f64>() / dev_wallet_count as f64;

        Ok(ContractRiskSummary {
            token_contract: contract,
            wallet_count,
            dev_wallet_count,
            max_score,
            mean_score,
            level: risk_level(max_score),
            wallets: dev_wallets,
        })
    }

    /// Store-wide aggregates for the analytics endpoint
    pub async fn overview(&self) -> ScreenerOverview {
        let wallets = self.wallets.list().await;
        let total_wallets = wallets.len();
        let dev_wallets = wallets.iter().filter(|w| w.dev_wallet).count();
        let whales = wallets
            .iter()
            .filter(|w| w.stats.balance >= self.whale_floor)
            .count();

        let mut levels = LevelCounts::default();
        let mut score_sum = 0.0;
        for wallet in &wallets {
            let assessment = self.assess(wallet);
            score_sum += f64::from(assessment.score);
            match assessment.level {
                RiskLevel::Low => levels.low += 1,
                RiskLevel::Medium => levels.medium += 1,
                RiskLevel::High => levels.high += 1,
            }
        }

        let mean_score = if total_wallets > 0 {
            score_sum / total_wallets as f64
        } else {
            0.0
        };

        ScreenerOverview {
            total_wallets,
            dev_wallets,
            whales,
            mean_score,
            levels,
        }
    }
}
