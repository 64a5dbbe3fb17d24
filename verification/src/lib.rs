//! Holder verification workflow.
//!
//! A session moves through:
//! 1. **Identity**: the `tgUserId` entry parameter is read once. Without it
//!    the session sits in `no_identity` and makes no network calls.
//! 2. **Ownership check**: once a wallet is connected, the ownership index is
//!    asked for the wallet's assets and the ones tagged with the target
//!    collection are counted.
//! 3. **Notification**: if the count reaches the threshold, the backend is
//!    told to mark the identity as verified.
//!
//! One attempt per trigger. No retries, no backoff, no timeouts; a failed
//! attempt stays failed until the wallet reconnects.

pub mod config;
pub mod entry;
pub mod error;
pub mod machine;
pub mod rule;
pub mod workflow;

pub use config::GateConfig;
pub use entry::{identity_from_page_url, IDENTITY_PARAM};
pub use error::WorkflowError;
pub use machine::{AttemptId, Effect, Event, StateMachine};
pub use rule::OwnershipRule;
pub use workflow::VerificationWorkflow;
