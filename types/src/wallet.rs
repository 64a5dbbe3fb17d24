//! Connection state reported by the wallet connector.

use serde::{Deserialize, Serialize};

use crate::WalletAddress;

/// Snapshot of the wallet connector. Read-only to the verification workflow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub connected: bool,
    pub address: Option<WalletAddress>,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(address: WalletAddress) -> Self {
        Self {
            connected: true,
            address: Some(address),
        }
    }

    /// The address to query, available only when connected with a known key.
    pub fn ready_address(&self) -> Option<&WalletAddress> {
        if self.connected {
            self.address.as_ref()
        } else {
            None
        }
    }
}
