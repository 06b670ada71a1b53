//! Wallet screener: tracked wallets, storage, and screening

pub mod model;
pub mod service;
pub mod store;

pub use model::{
    ContractRiskSummary, ListWalletsQuery, RegisterWalletRequest, ScreenerOverview, SearchQuery,
    StatsPayload, TrackedWallet, UpdateWalletRequest, WalletStats, WalletSummary, WhalesQuery,
};
pub use service::ScreenerService;
pub use store::{MemoryWalletStore, StoreError, WalletStore};
