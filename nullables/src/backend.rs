//! Nullable verification backend: records notifications without sending them.

use async_trait::async_trait;
use gate_backend::{BackendError, VerificationBackend};
use gate_types::ExternalIdentity;
use std::sync::{Arc, Mutex};

struct Inner {
    answer: Result<(), BackendError>,
    calls: Vec<ExternalIdentity>,
}

/// A test backend that records every identity it is asked to mark.
#[derive(Clone)]
pub struct NullVerificationBackend {
    inner: Arc<Mutex<Inner>>,
}

impl NullVerificationBackend {
    /// Accepts every notification.
    pub fn new() -> Self {
        Self::answering(Ok(()))
    }

    /// Rejects every notification with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self::answering(Err(error))
    }

    fn answering(answer: Result<(), BackendError>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                answer,
                calls: Vec::new(),
            })),
        }
    }

    /// Identities notified so far, in order.
    pub fn calls(&self) -> Vec<ExternalIdentity> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NullVerificationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationBackend for NullVerificationBackend {
    async fn mark_verified(&self, identity: &ExternalIdentity) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.calls.push(identity.clone());
        inner.answer.clone()
    }
}
