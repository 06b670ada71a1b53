//! Rule storage and the triggered-alert backlog

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::rules::model::{Alert, AlertRule};

/// Storage backend for alert rules
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn insert(&self, rule: AlertRule);

    async fn get(&self, id: Uuid) -> Option<AlertRule>;

    async fn list(&self) -> Vec<AlertRule>;

    /// Rules currently eligible for evaluation
    async fn enabled(&self) -> Vec<AlertRule>;

    /// Replace an existing rule keyed by id. Returns false if absent.
    async fn update(&self, rule: AlertRule) -> bool;

    /// Remove a rule. Returns false if absent.
    async fn remove(&self, id: Uuid) -> bool;

    async fn count(&self) -> usize;
}

/// In-memory rule store
#[derive(Default)]
pub struct MemoryRuleStore {
    rules: RwLock<HashMap<Uuid, AlertRule>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn insert(&self, rule: AlertRule) {
        self.rules.write().await.insert(rule.id, rule);
    }

    async fn get(&self, id: Uuid) -> Option<AlertRule> {
        self.rules.read().await.get(&id).cloned()
    }

    async fn list(&self) -> Vec<AlertRule> {
        self.rules.read().await.values().cloned().collect()
    }

    async fn enabled(&self) -> Vec<AlertRule> {
        self.rules
            .read()
            .await
            .values()
            .filter(|rule| rule.enabled)
            .cloned()
            .collect()
    }

    async fn update(&self, rule: AlertRule) -> bool {
        let mut rules = self.rules.write().await;
        if !rules.contains_key(&rule.id) {
            return false;
        }
        rules.insert(rule.id, rule);
        true
    }

    async fn remove(&self, id: Uuid) -> bool {
        self.rules.write().await.remove(&id).is_some()
    }

    async fn count(&self) -> usize {
        self.rules.read().await.len()
    }
}

/// Bounded backlog of triggered alerts, newest retained.
pub struct AlertLog {
    alerts: RwLock<VecDeque<Alert>>,
    capacity: usize,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        AlertLog {
            alerts: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Record a triggered alert, evicting the oldest at capacity
    pub async fn push(&self, alert: Alert) {
        let mut alerts = self.alerts.write().await;
        if alerts.len() == self.capacity {
            alerts.pop_front();
        }
        alerts.push_back(alert);
    }

    /// Most recent alerts, newest first
    pub async fn recent(&self, limit: usize) -> Vec<Alert> {
        self.alerts
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.alerts.read().await.len()
    }
}
