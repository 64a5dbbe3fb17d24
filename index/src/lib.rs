//! Ownership index: which assets does a wallet hold?
//!
//! The verification workflow only needs one question answered, so the
//! interface is a single trait. [`HeliusIndexClient`] answers it over HTTP
//! with the DAS `getAssetsByOwner` JSON-RPC method; tests swap in a nullable.
//!
//! Only the first page of results is fetched (`page = 1`, `limit = 1000`).
//! Wallets holding more than one page of assets are undercounted.

pub mod client;
pub mod error;
pub mod rpc;

pub use client::HeliusIndexClient;
pub use error::IndexError;

use async_trait::async_trait;
use gate_types::{OwnedAsset, WalletAddress};

/// A service that lists the assets owned by an address.
#[async_trait]
pub trait OwnershipIndex: Send + Sync {
    /// Fetch the assets held by `owner`. Exactly one request per call.
    async fn assets_by_owner(&self, owner: &WalletAddress) -> Result<Vec<OwnedAsset>, IndexError>;
}
