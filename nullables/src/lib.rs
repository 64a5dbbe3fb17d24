//! Nullable infrastructure for deterministic testing.
//!
//! Both external services the workflow talks to are abstracted behind traits
//! (`OwnershipIndex`, `VerificationBackend`). This crate provides test-friendly
//! implementations that:
//! - Return canned answers
//! - Record every call for assertions
//! - Can hold a call open until the test releases it
//! - Never touch the network
//!
//! Handles are cheap to clone and share state, so a test can keep one copy
//! while the workflow owns another.

pub mod backend;
pub mod index;

pub use backend::NullVerificationBackend;
pub use index::{IndexGate, NullOwnershipIndex};
