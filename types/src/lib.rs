//! Fundamental types for holder-gate.
//!
//! This crate defines the values shared by every other crate in the workspace:
//! the external identity being verified, the connected wallet, the assets an
//! indexing service reports, and the outcome of a verification attempt.

pub mod address;
pub mod asset;
pub mod error;
pub mod identity;
pub mod outcome;
pub mod wallet;

pub use address::WalletAddress;
pub use asset::{count_matching, CollectionTag, OwnedAsset, COLLECTION_GROUP_KEY};
pub use error::TypesError;
pub use identity::ExternalIdentity;
pub use outcome::{FailureKind, VerificationOutcome, VerificationStatus};
pub use wallet::WalletState;

/// Minimum number of matching collection assets needed to pass verification.
pub const DEFAULT_REQUIRED_COUNT: u32 = 3;
