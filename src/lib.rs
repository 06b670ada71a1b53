//! ChainWatch backend library
//!
//! Wallet risk scoring, screening, alert rules, and real-time alert
//! delivery for the ChainWatch dashboard.

pub mod anomaly;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod risk;
pub mod routes;
pub mod rules;
pub mod screener;
pub mod state;
pub mod websocket;
