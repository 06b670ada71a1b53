//! HTTP handlers for the ChainWatch API

pub mod analytics;
pub mod contracts;
pub mod health;
pub mod risk;
pub mod rules;
pub mod search;
pub mod wallets;
