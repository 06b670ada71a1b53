//! Alert rules and the triggered-alert backlog

pub mod model;
pub mod service;
pub mod store;

pub use model::{Alert, AlertRule, AlertsQuery, Comparison, CreateRuleRequest, RuleMetric, UpdateRuleRequest};
pub use service::AlertService;
pub use store::{AlertLog, MemoryRuleStore, RuleStore};
