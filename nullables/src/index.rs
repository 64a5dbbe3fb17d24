//! Nullable ownership index: canned assets per owner, recorded calls.

use async_trait::async_trait;
use gate_index::{IndexError, OwnershipIndex};
use gate_types::{OwnedAsset, WalletAddress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

type Answer = Result<Vec<OwnedAsset>, IndexError>;

struct Inner {
    default: Answer,
    per_owner: HashMap<WalletAddress, Answer>,
    calls: Vec<WalletAddress>,
    gate: Option<IndexGate>,
}

/// A test index that answers from memory.
#[derive(Clone)]
pub struct NullOwnershipIndex {
    inner: Arc<Mutex<Inner>>,
}

impl NullOwnershipIndex {
    /// Every owner holds nothing.
    pub fn new() -> Self {
        Self::with_assets(Vec::new())
    }

    /// Every owner holds `assets` unless overridden with [`respond`](Self::respond).
    pub fn with_assets(assets: Vec<OwnedAsset>) -> Self {
        Self::answering(Ok(assets))
    }

    /// Every query fails with `error`.
    pub fn failing(error: IndexError) -> Self {
        Self::answering(Err(error))
    }

    fn answering(default: Answer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                default,
                per_owner: HashMap::new(),
                calls: Vec::new(),
                gate: None,
            })),
        }
    }

    /// Answer for one specific owner.
    pub fn respond(&self, owner: &WalletAddress, answer: Result<Vec<OwnedAsset>, IndexError>) {
        self.lock().per_owner.insert(owner.clone(), answer);
    }

    /// Hold every subsequent query until the returned gate releases it.
    pub fn pause(&self) -> IndexGate {
        let gate = IndexGate::new();
        self.lock().gate = Some(gate.clone());
        gate
    }

    /// Owners queried so far, in order.
    pub fn calls(&self) -> Vec<WalletAddress> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NullOwnershipIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OwnershipIndex for NullOwnershipIndex {
    async fn assets_by_owner(&self, owner: &WalletAddress) -> Result<Vec<OwnedAsset>, IndexError> {
        let (answer, gate) = {
            let mut inner = self.lock();
            inner.calls.push(owner.clone());
            let answer = inner
                .per_owner
                .get(owner)
                .cloned()
                .unwrap_or_else(|| inner.default.clone());
            (answer, inner.gate.clone())
        };
        if let Some(gate) = gate {
            gate.enter().await;
        }
        answer
    }
}

/// Holds paused index calls open.
///
/// Each call signals that it has started, then waits for one release.
#[derive(Clone)]
pub struct IndexGate {
    entered: Arc<Semaphore>,
    released: Arc<Semaphore>,
}

impl IndexGate {
    fn new() -> Self {
        Self {
            entered: Arc::new(Semaphore::new(0)),
            released: Arc::new(Semaphore::new(0)),
        }
    }

    async fn enter(&self) {
        self.entered.add_permits(1);
        if let Ok(permit) = self.released.acquire().await {
            permit.forget();
        }
    }

    /// Wait until one more call has reached the gate.
    pub async fn wait_entered(&self) {
        if let Ok(permit) = self.entered.acquire().await {
            permit.forget();
        }
    }

    /// Let one waiting (or future) call return.
    pub fn release_one(&self) {
        self.released.add_permits(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_types::CollectionTag;

    fn owner(s: &str) -> WalletAddress {
        WalletAddress::parse(s).unwrap()
    }

    const A: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
    const B: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[tokio::test]
    async fn answers_default_and_per_owner() {
        let index = NullOwnershipIndex::new();
        let asset = OwnedAsset::new("x", vec![CollectionTag::collection("C")]);
        index.respond(&owner(B), Ok(vec![asset.clone()]));

        assert!(index.assets_by_owner(&owner(A)).await.unwrap().is_empty());
        assert_eq!(index.assets_by_owner(&owner(B)).await.unwrap(), vec![asset]);
        assert_eq!(index.calls(), vec![owner(A), owner(B)]);
    }

    #[tokio::test]
    async fn failing_index_returns_error() {
        let index = NullOwnershipIndex::failing(IndexError::Unreachable("down".into()));
        assert!(index.assets_by_owner(&owner(A)).await.is_err());
        assert_eq!(index.call_count(), 1);
    }

    #[tokio::test]
    async fn paused_call_waits_for_release() {
        let index = NullOwnershipIndex::new();
        let gate = index.pause();
        let handle = {
            let index = index.clone();
            tokio::spawn(async move { index.assets_by_owner(&owner(A)).await })
        };
        gate.wait_entered().await;
        assert_eq!(index.call_count(), 1);
        assert!(!handle.is_finished());
        gate.release_one();
        assert!(handle.await.unwrap().is_ok());
    }
}
