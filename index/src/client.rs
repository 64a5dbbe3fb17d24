//! HTTP client for the DAS ownership index.

use crate::error::IndexError;
use crate::rpc::{RpcRequest, RpcResponse};
use crate::OwnershipIndex;

use async_trait::async_trait;
use gate_types::{OwnedAsset, WalletAddress};
use std::fmt;
use tracing::debug;

/// Default index endpoint (Helius mainnet RPC).
pub const DEFAULT_INDEX_URL: &str = "https://mainnet.helius-rpc.com";

/// JSON-RPC request id sent with every query.
const REQUEST_ID: &str = "holder-gate";

/// Client for a DAS-compatible index.
///
/// Sends `POST {base_url}/?api-key={key}` with a `getAssetsByOwner` body.
/// No timeout and no retry: one request per call, and the caller decides
/// what a failure means.
pub struct HeliusIndexClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HeliusIndexClient {
    /// Create a client. An empty API key is a configuration error.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, IndexError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(IndexError::NotConfigured("missing index API key".into()));
        }
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(IndexError::NotConfigured("missing index URL".into()));
        }
        Ok(Self {
            http_client: reqwest::Client::new(),
            base_url,
            api_key,
        })
    }

    /// Create a client for the public Helius mainnet endpoint.
    pub fn mainnet(api_key: impl Into<String>) -> Result<Self, IndexError> {
        Self::new(DEFAULT_INDEX_URL, api_key)
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for HeliusIndexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeliusIndexClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl OwnershipIndex for HeliusIndexClient {
    async fn assets_by_owner(&self, owner: &WalletAddress) -> Result<Vec<OwnedAsset>, IndexError> {
        let request = RpcRequest::assets_by_owner(REQUEST_ID, owner.as_str());
        debug!(
            owner = %owner,
            page = request.params.page,
            limit = request.params.limit,
            "querying ownership index"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("api-key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest embeds the URL (and thus the API key) in its message
                let e = e.without_url();
                if e.is_connect() {
                    IndexError::Unreachable(format!("connection failed: {e}"))
                } else {
                    IndexError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IndexError::Unreachable(format!("failed to read body: {}", e.without_url())))?;

        let parsed = serde_json::from_str::<RpcResponse>(&body);

        if !status.is_success() {
            // Some gateways still send a JSON-RPC error body with a non-2xx status.
            if let Ok(RpcResponse {
                error: Some(err), ..
            }) = parsed
            {
                return Err(IndexError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            return Err(IndexError::RequestFailed(format!("HTTP status {status}")));
        }

        let parsed = parsed.map_err(|e| {
            IndexError::InvalidResponse(format!("failed to parse index response: {e}"))
        })?;

        if let Some(err) = parsed.error {
            return Err(IndexError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let page = parsed.result.ok_or_else(|| {
            IndexError::InvalidResponse("response has neither result nor error".into())
        })?;

        debug!(
            owner = %owner,
            items = page.items.len(),
            total = ?page.total,
            "ownership index answered"
        );
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        assert!(matches!(
            HeliusIndexClient::mainnet("  "),
            Err(IndexError::NotConfigured(_))
        ));
    }

    #[test]
    fn rejects_empty_url() {
        assert!(matches!(
            HeliusIndexClient::new("", "key"),
            Err(IndexError::NotConfigured(_))
        ));
    }

    #[test]
    fn endpoint_normalises_trailing_slash() {
        let a = HeliusIndexClient::new("http://localhost:8899", "k").unwrap();
        let b = HeliusIndexClient::new("http://localhost:8899/", "k").unwrap();
        assert_eq!(a.endpoint(), "http://localhost:8899/");
        assert_eq!(a.endpoint(), b.endpoint());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = HeliusIndexClient::mainnet("super-secret").unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("mainnet.helius-rpc.com"));
    }
}
