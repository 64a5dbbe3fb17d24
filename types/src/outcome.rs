//! Verification status and the outcome record surfaced to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// States of the verification workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No external identity was supplied; nothing will be checked.
    NoIdentity,
    /// Waiting for a connected wallet.
    Idle,
    /// Ownership query in flight.
    Checking,
    /// Threshold met; backend notification pending.
    Success,
    /// Ownership check failed or threshold not met.
    Failure,
    /// Threshold met and the backend recorded the verification.
    BackendNotified,
    /// Threshold met but the backend could not be notified.
    BackendError,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoIdentity => "no_identity",
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::BackendNotified => "backend_notified",
            Self::BackendError => "backend_error",
        }
    }

    /// Fixed user-facing text for this state.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::NoIdentity => "Missing Telegram user id. Open this page from the Telegram bot link.",
            Self::Idle => "Please connect your Solana wallet to verify.",
            Self::Checking => "Checking NFT holdings...",
            Self::Success => "Verification Successful!",
            Self::Failure => "Verification Failed",
            Self::BackendNotified => "Verification Successful! Your Telegram account is now verified.",
            Self::BackendError => {
                "Holdings verified, but we could not confirm your Telegram account. Please try again later."
            }
        }
    }

    /// No further transition happens without a new wallet or identity event.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            Self::NoIdentity | Self::Failure | Self::BackendNotified | Self::BackendError
        )
    }

    /// The ownership check itself passed.
    pub fn holdings_verified(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::BackendNotified | Self::BackendError
        )
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an attempt did not end in `backend_notified`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Required configuration missing. Never retried.
    Configuration,
    /// Network failure reaching an external service.
    Transport,
    /// External service answered with an error payload.
    Service,
    /// Valid answer, not enough matching assets.
    ThresholdNotMet,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Service => "service",
            Self::ThresholdNotMet => "threshold_not_met",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable result of the workflow, owned and mutated only by the workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    /// Only meaningful after a completed ownership query.
    pub owned_count: u32,
    pub message: Option<String>,
    pub failure: Option<FailureKind>,
    /// Where to acquire more assets, set on threshold failures when configured.
    pub marketplace_hint: Option<String>,
}

impl VerificationOutcome {
    pub fn new(status: VerificationStatus) -> Self {
        Self {
            status,
            owned_count: 0,
            message: None,
            failure: None,
            marketplace_hint: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == VerificationStatus::Checking
    }
}

impl Default for VerificationOutcome {
    fn default() -> Self {
        Self::new(VerificationStatus::Idle)
    }
}
