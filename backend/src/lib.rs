//! Verification backend: records that an external user passed the gate.
//!
//! The backend exposes one endpoint, `POST {base}/api/v1/mark-verified` with
//! body `{"userId": <integer>}`. A shared secret may be sent in the
//! `X-Verification-Secret` header. Any 2xx status counts as success.

pub mod client;
pub mod error;

pub use client::HttpVerificationBackend;
pub use error::BackendError;

use async_trait::async_trait;
use gate_types::ExternalIdentity;

/// A service that records a successful verification.
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Mark `identity` as verified. Exactly one request per call.
    async fn mark_verified(&self, identity: &ExternalIdentity) -> Result<(), BackendError>;
}
