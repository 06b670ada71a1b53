//! Alert rule management and evaluation

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::risk::RiskAssessment;
use crate::rules::model::{Alert, AlertRule, CreateRuleRequest, UpdateRuleRequest};
use crate::rules::store::{AlertLog, RuleStore};
use crate::screener::model::WalletStats;
use crate::websocket::{AlertEvent, WsState};

/// Manages alert rules and evaluates them against screening results.
pub struct AlertService {
    rules: Arc<dyn RuleStore>,
    log: AlertLog,
    ws: WsState,
}

impl AlertService {
    pub fn new(rules: Arc<dyn RuleStore>, log: AlertLog, ws: WsState) -> Self {
        AlertService { rules, log, ws }
    }

    /// Create a new alert rule
    pub async fn create_rule(&self, req: CreateRuleRequest) -> AlertRule {
        let now = Utc::now();
        let rule = AlertRule {
            id: Uuid::new_v4(),
            name: req.name,
            metric: req.metric,
            comparison: req.comparison,
            threshold: req.threshold,
            enabled: req.enabled,
            created_at: now,
            updated_at: now,
        };

        self.rules.insert(rule.clone()).await;
        tracing::info!(rule_id = %rule.id, name = %rule.name, "Alert rule created");
        rule
    }

    /// All rules, oldest first
    pub async fn list_rules(&self) -> Vec<AlertRule> {
        let mut rules = self.rules.list().await;
        rules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        rules
    }

    /// Apply a partial update to an existing rule
    pub async fn update_rule(&self, id: Uuid, req: UpdateRuleRequest) -> ApiResult<AlertRule> {
        let mut rule = self
            .rules
            .get(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Alert rule {} not found", id)))?;

        if let Some(name) = req.name {
            rule.name = name;
        }
        if let Some(metric) = req.metric {
            rule.metric = metric;
        }
        if let Some(comparison) = req.comparison {
            rule.comparison = comparison;
        }
        if let Some(threshold) = req.threshold {
            rule.threshold = threshold;
        }
        if let Some(enabled) = req.enabled {
            rule.enabled = enabled;
        }
        rule.updated_at = Utc::now();

        if !self.rules.update(rule.clone()).await {
            return Err(ApiError::NotFound(format!("Alert rule {} not found", id)));
        }

        tracing::info!(rule_id = %rule.id, "Alert rule updated");
        Ok(rule)
    }

    /// Delete a rule
    pub async fn delete_rule(&self, id: Uuid) -> ApiResult<()> {
        if !self.rules.remove(id).await {
            return Err(ApiError::NotFound(format!("Alert rule {} not found", id)));
        }
        tracing::info!(rule_id = %id, "Alert rule deleted");
        Ok(())
    }

    /// Most recently triggered alerts, newest first
    pub async fn recent_alerts(&self, limit: usize) -> Vec<Alert> {
        self.log.recent(limit).await
    }

    pub async fn rule_count(&self) -> usize {
        self.rules.count().await
    }

    pub async fn enabled_rule_count(&self) -> usize {
        self.rules.enabled().await.len()
    }

    pub async fn alert_count(&self) -> usize {
        self.log.count().await
    }

    /// Evaluate every enabled rule against one screening result.
    ///
    /// Each match is recorded in the backlog and broadcast to WebSocket
    /// clients. Returns the alerts triggered by this screening.
    pub async fn evaluate(
        &self,
        address: &str,
        stats: &WalletStats,
        assessment: &RiskAssessment,
    ) -> Vec<Alert> {
        let mut triggered = Vec::new();

        for rule in self.rules.enabled().await {
            let observed = rule.metric.observe(stats, assessment);
            if !rule.matches(observed) {
                continue;
            }

            let alert = Alert {
                id: Uuid::new_v4(),
                rule_id: rule.id,
                rule_name: rule.name.clone(),
                address: address.to_string(),
                metric: rule.metric,
                comparison: rule.comparison,
                threshold: rule.threshold,
                observed,
                triggered_at: Utc::now(),
            };

            tracing::info!(
                rule = %alert.rule_name,
                address = %alert.address,
                observed = %alert.observed,
                threshold = %alert.threshold,
                "Alert triggered"
            );

            self.log.push(alert.clone()).await;
            self.ws.broadcast(AlertEvent::AlertTriggered {
                alert: alert.clone(),
            });
            triggered.push(alert);
        }

        triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{calculate_risk, risk_breakdown, RiskLevel, WalletRiskInput};
    use crate::rules::model::{Comparison, RuleMetric};
    use crate::rules::store::MemoryRuleStore;

    fn service() -> AlertService {
        AlertService::new(
            Arc::new(MemoryRuleStore::new()),
            AlertLog::new(16),
            WsState::new(),
        )
    }

    fn create_req(metric: RuleMetric, comparison: Comparison, threshold: f64) -> CreateRuleRequest {
        CreateRuleRequest {
            name: "test rule".to_string(),
            metric,
            comparison,
            threshold,
            enabled: true,
        }
    }

    fn screening(balance: f64, transactions: u64, age_days: u64) -> (WalletStats, RiskAssessment) {
        let stats = WalletStats {
            balance,
            transactions,
            age_days,
        };
        let input = WalletRiskInput {
            balance,
            transactions,
            age_days,
            anomaly_score: 0.0,
        };
        let score = calculate_risk(&input);
        let assessment = RiskAssessment {
            address: "0x1111111111111111111111111111111111111111".to_string(),
            score,
            level: RiskLevel::from_score(score),
            explanation: RiskLevel::from_score(score).explanation().to_string(),
            breakdown: risk_breakdown(&input),
            anomaly_score: 0.0,
            screened_at: Utc::now(),
        };
        (stats, assessment)
    }

    #[tokio::test]
    async fn test_evaluate_triggers_matching_rule() {
        let svc = service();
        svc.create_rule(create_req(RuleMetric::Balance, Comparison::Gt, 1_000_000.0))
            .await;

        let (stats, assessment) = screening(2_000_000.0, 50, 400);
        let triggered = svc.evaluate("0xabc", &stats, &assessment).await;

        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].observed, 2_000_000.0);
        assert_eq!(svc.alert_count().await, 1);
        assert_eq!(svc.recent_alerts(10).await.len(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_skips_disabled_rules() {
        let svc = service();
        let mut req = create_req(RuleMetric::Balance, Comparison::Gt, 0.0);
        req.enabled = false;
        svc.create_rule(req).await;

        let (stats, assessment) = screening(2_000_000.0, 50, 400);
        let triggered = svc.evaluate("0xabc", &stats, &assessment).await;

        assert!(triggered.is_empty());
        assert_eq!(svc.alert_count().await, 0);
    }

    #[tokio::test]
    async fn test_evaluate_broadcasts_to_subscribers() {
        let ws = WsState::new();
        let svc = AlertService::new(Arc::new(MemoryRuleStore::new()), AlertLog::new(16), ws.clone());
        let mut rx = ws.subscribe();

        svc.create_rule(create_req(RuleMetric::RiskScore, Comparison::Gte, 0.0))
            .await;
        let (stats, assessment) = screening(500_000.0, 200, 45);
        svc.evaluate("0xabc", &stats, &assessment).await;

        match rx.recv().await.unwrap() {
            AlertEvent::AlertTriggered { alert } => assert_eq!(alert.address, "0xabc"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_rule_toggles_enabled() {
        let svc = service();
        let rule = svc
            .create_rule(create_req(RuleMetric::RiskScore, Comparison::Gte, 70.0))
            .await;

        let updated = svc
            .update_rule(
                rule.id,
                UpdateRuleRequest {
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!updated.enabled);
        assert_eq!(svc.enabled_rule_count().await, 0);
        assert_eq!(svc.rule_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_rule_is_not_found() {
        let svc = service();
        let err = svc
            .update_rule(Uuid::new_v4(), UpdateRuleRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_missing_rule_is_not_found() {
        let svc = service();
        let err = svc.delete_rule(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_rules_is_oldest_first() {
        let svc = service();
        let first = svc
            .create_rule(create_req(RuleMetric::RiskScore, Comparison::Gte, 1.0))
            .await;
        let second = svc
            .create_rule(create_req(RuleMetric::Balance, Comparison::Gt, 2.0))
            .await;

        let rules = svc.list_rules().await;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, first.id);
        assert_eq!(rules[1].id, second.id);
    }
}
