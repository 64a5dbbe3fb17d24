//! HTTP client for the verification backend.

use crate::error::BackendError;
use crate::VerificationBackend;

use async_trait::async_trait;
use gate_types::ExternalIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Path of the mark-verified endpoint, relative to the base URL.
pub const MARK_VERIFIED_PATH: &str = "/api/v1/mark-verified";

/// Header carrying the optional shared secret.
pub const SECRET_HEADER: &str = "X-Verification-Secret";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkVerifiedRequest {
    user_id: i64,
}

/// Error body shape returned by the backend on rejection.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the backend's mark-verified endpoint.
///
/// Built with `base_url = None` when the deployment has no backend configured;
/// every call then fails with [`BackendError::NotConfigured`] without touching
/// the network.
pub struct HttpVerificationBackend {
    http_client: reqwest::Client,
    base_url: Option<String>,
    secret: Option<String>,
}

impl HttpVerificationBackend {
    pub fn new(base_url: Option<String>, secret: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.filter(|u| !u.trim().is_empty()),
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), MARK_VERIFIED_PATH))
    }
}

impl fmt::Debug for HttpVerificationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpVerificationBackend")
            .field("base_url", &self.base_url)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl VerificationBackend for HttpVerificationBackend {
    async fn mark_verified(&self, identity: &ExternalIdentity) -> Result<(), BackendError> {
        let url = self
            .endpoint()
            .ok_or_else(|| BackendError::NotConfigured("missing backend URL".into()))?;
        let user_id = identity
            .as_user_id()
            .map_err(|e| BackendError::InvalidIdentity(e.to_string()))?;

        debug!(%url, user_id, with_secret = self.secret.is_some(), "notifying verification backend");

        let mut request = self
            .http_client
            .post(&url)
            .json(&MarkVerifiedRequest { user_id });
        if let Some(secret) = &self.secret {
            request = request.header(SECRET_HEADER, secret);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                BackendError::Unreachable(format!("connection failed: {e}"))
            } else {
                BackendError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(BackendError::Rejected {
            status: status.as_u16(),
            detail: body.error.or(body.message),
        })
    }
}
