//! Errors raised while constructing the shared types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("external identity {0:?} is not an integer user id")]
    NonNumericIdentity(String),
}
