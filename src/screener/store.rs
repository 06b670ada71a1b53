//! Wallet storage
//!
//! Storage sits behind a trait so handlers and services never touch a
//! concrete backend. The in-memory implementation keeps every map under
//! a single lock so address uniqueness is checked and the entry written
//! in one critical section.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::screener::model::TrackedWallet;

/// Errors surfaced by wallet storage
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("address {0} is already tracked")]
    AddressInUse(String),
}

/// Storage backend for tracked wallets
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Insert a new wallet. Fails if the address is already tracked.
    async fn insert(&self, wallet: TrackedWallet) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Option<TrackedWallet>;

    /// Look up a wallet by its normalized address
    async fn find_by_address(&self, address: &str) -> Option<TrackedWallet>;

    async fn list(&self) -> Vec<TrackedWallet>;

    /// Replace an existing wallet keyed by id. Returns false if absent.
    async fn update(&self, wallet: TrackedWallet) -> bool;

    /// Remove a wallet. Returns false if absent.
    async fn remove(&self, id: Uuid) -> bool;

    async fn count(&self) -> usize;
}

#[derive(Default)]
struct Inner {
    wallets: HashMap<Uuid, TrackedWallet>,
    by_address: HashMap<String, Uuid>,
}

/// In-memory wallet store
#[derive(Default)]
pub struct MemoryWalletStore {
    inner: RwLock<Inner>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn insert(&self, wallet: TrackedWallet) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if inner.by_address.contains_key(&wallet.address) {
            return Err(StoreError::AddressInUse(wallet.address.clone()));
        }

        inner.by_address.insert(wallet.address.clone(), wallet.id);
        inner.wallets.insert(wallet.id, wallet);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Option<TrackedWallet> {
        self.inner.read().await.wallets.get(&id).cloned()
    }

    async fn find_by_address(&self, address: &str) -> Option<TrackedWallet> {
        let inner = self.inner.read().await;
        let id = inner.by_address.get(address)?;
        inner.wallets.get(id).cloned()
    }

    async fn list(&self) -> Vec<TrackedWallet> {
        self.inner.read().await.wallets.values().cloned().collect()
    }

    async fn update(&self, wallet: TrackedWallet) -> bool {
        let mut inner = self.inner.write().await;

        let old_address = match inner.wallets.get(&wallet.id) {
            Some(existing) => existing.address.clone(),
            None => return false,
        };

        // Keep the address index in sync if a caller ever swaps the address
        if old_address != wallet.address {
            inner.by_address.remove(&old_address);
            inner.by_address.insert(wallet.address.clone(), wallet.id);
        }

        inner.wallets.insert(wallet.id, wallet);
        true
    }

    async fn remove(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write().await;

        match inner.wallets.remove(&id) {
            Some(wallet) => {
                inner.by_address.remove(&wallet.address);
                true
            }
            None => false,
        }
    }

    async fn count(&self) -> usize {
        self.inner.read().await.wallets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::model::WalletStats;
    use chrono::Utc;

    fn wallet(address: &str) -> TrackedWallet {
        let now = Utc::now();
        TrackedWallet {
            id: Uuid::new_v4(),
            address: address.to_string(),
            label: None,
            token_contract: None,
            dev_wallet: false,
            stats: WalletStats {
                balance: 100.0,
                transactions: 10,
                age_days: 30,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryWalletStore::new();
        let w = wallet("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let id = w.id;

        store.insert(w).await.unwrap();
        assert_eq!(store.count().await, 1);

        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.address, "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_address() {
        let store = MemoryWalletStore::new();
        let address = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

        store.insert(wallet(address)).await.unwrap();
        let err = store.insert(wallet(address)).await.unwrap_err();
        assert_eq!(err, StoreError::AddressInUse(address.to_string()));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_address() {
        let store = MemoryWalletStore::new();
        let address = "0xcccccccccccccccccccccccccccccccccccccccc";
        store.insert(wallet(address)).await.unwrap();

        assert!(store.find_by_address(address).await.is_some());
        assert!(store
            .find_by_address("0xdddddddddddddddddddddddddddddddddddddddd")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_existing() {
        let store = MemoryWalletStore::new();
        let mut w = wallet("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
        store.insert(w.clone()).await.unwrap();

        w.stats.balance = 9999.0;
        assert!(store.update(w.clone()).await);
        assert_eq!(store.get(w.id).await.unwrap().stats.balance, 9999.0);

        let missing = wallet("0xffffffffffffffffffffffffffffffffffffffff");
        assert!(!store.update(missing).await);
    }

    #[tokio::test]
    async fn test_update_resyncs_the_address_index() {
        let store = MemoryWalletStore::new();
        let old = "0x0101010101010101010101010101010101010101";
        let new = "0x0202020202020202020202020202020202020202";
        let mut w = wallet(old);
        store.insert(w.clone()).await.unwrap();

        w.address = new.to_string();
        assert!(store.update(w.clone()).await);

        assert!(store.find_by_address(old).await.is_none());
        assert_eq!(store.find_by_address(new).await.unwrap().id, w.id);

        // The old address is free for a fresh wallet again
        store.insert(wallet(old)).await.unwrap();
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_remove_frees_the_address() {
        let store = MemoryWalletStore::new();
        let address = "0x1234567890123456789012345678901234567890";
        let w = wallet(address);
        let id = w.id;
        store.insert(w).await.unwrap();

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert_eq!(store.count().await, 0);

        // Address becomes available again after removal
        store.insert(wallet(address)).await.unwrap();
    }
}
