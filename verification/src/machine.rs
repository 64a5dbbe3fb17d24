//! The verification state machine, free of I/O.
//!
//! Inputs arrive as [`Event`]s; the machine updates its [`VerificationOutcome`]
//! and may ask for exactly one network call by returning an [`Effect`]. The
//! driver performs the call and feeds the result back as another event, so
//! the ownership query and the backend notification are two ordered steps of
//! the transition table rather than side effects of each other.
//!
//! Every effect carries the [`AttemptId`] that was current when it was issued.
//! Disconnecting, switching wallets, or losing the identity bumps the attempt,
//! and a result tagged with an older attempt is dropped on arrival.

use gate_types::{
    ExternalIdentity, OwnedAsset, VerificationOutcome, VerificationStatus, WalletAddress,
    WalletState,
};
use tracing::{debug, info, warn};

use crate::{OwnershipRule, WorkflowError};

/// Monotonic id of one verification attempt.
pub type AttemptId = u64;

#[derive(Debug, Clone)]
pub enum Event {
    /// The entry parameter was (re)read.
    IdentityChanged(Option<ExternalIdentity>),
    /// The wallet connector reported a new state.
    WalletChanged(WalletState),
    /// The ownership query issued for `attempt` finished.
    OwnershipResolved {
        attempt: AttemptId,
        result: Result<Vec<OwnedAsset>, WorkflowError>,
    },
    /// The backend notification issued for `attempt` finished.
    BackendResolved {
        attempt: AttemptId,
        result: Result<(), WorkflowError>,
    },
}

/// A network call the driver must perform next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QueryOwnership {
        attempt: AttemptId,
        owner: WalletAddress,
    },
    NotifyBackend {
        attempt: AttemptId,
        identity: ExternalIdentity,
    },
}

impl Effect {
    pub fn attempt(&self) -> AttemptId {
        match self {
            Self::QueryOwnership { attempt, .. } | Self::NotifyBackend { attempt, .. } => *attempt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StateMachine {
    rule: OwnershipRule,
    marketplace_url: Option<String>,
    identity: Option<ExternalIdentity>,
    wallet: WalletState,
    outcome: VerificationOutcome,
    attempt: AttemptId,
    /// Attempt whose effect is currently outstanding.
    in_flight: Option<AttemptId>,
}

impl StateMachine {
    /// Start a session. The identity is read once, here.
    pub fn new(
        rule: OwnershipRule,
        marketplace_url: Option<String>,
        identity: Option<ExternalIdentity>,
    ) -> Self {
        let status = if identity.is_some() {
            VerificationStatus::Idle
        } else {
            VerificationStatus::NoIdentity
        };
        Self {
            rule,
            marketplace_url,
            identity,
            wallet: WalletState::disconnected(),
            outcome: VerificationOutcome::new(status),
            attempt: 0,
            in_flight: None,
        }
    }

    pub fn outcome(&self) -> &VerificationOutcome {
        &self.outcome
    }

    pub fn status(&self) -> VerificationStatus {
        self.outcome.status
    }

    pub fn identity(&self) -> Option<&ExternalIdentity> {
        self.identity.as_ref()
    }

    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    pub fn current_attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    /// Apply one event. Returns the network call to make next, if any.
    pub fn handle(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::IdentityChanged(identity) => self.on_identity(identity),
            Event::WalletChanged(wallet) => self.on_wallet(wallet),
            Event::OwnershipResolved { attempt, result } => self.on_ownership(attempt, result),
            Event::BackendResolved { attempt, result } => self.on_backend(attempt, result),
        }
    }

    fn on_identity(&mut self, identity: Option<ExternalIdentity>) -> Option<Effect> {
        match identity {
            None => {
                if self.identity.is_some() {
                    warn!("external identity disappeared mid-session");
                }
                self.identity = None;
                self.invalidate();
                self.reset(VerificationStatus::NoIdentity);
                None
            }
            Some(identity) => {
                let changed = self.identity.as_ref() != Some(&identity);
                if changed || self.status() == VerificationStatus::NoIdentity {
                    if self.identity.is_some() {
                        warn!("external identity replaced mid-session, restarting");
                    }
                    self.identity = Some(identity);
                    self.invalidate();
                    self.reset(VerificationStatus::Idle);
                }
                self.try_start()
            }
        }
    }

    fn on_wallet(&mut self, wallet: WalletState) -> Option<Effect> {
        if !wallet.connected {
            self.wallet = wallet;
            if self.status() != VerificationStatus::NoIdentity {
                self.invalidate();
                self.reset(VerificationStatus::Idle);
            }
            return None;
        }

        let switched = self.wallet.ready_address() != wallet.ready_address();
        self.wallet = wallet;
        if switched && !matches!(self.status(), VerificationStatus::NoIdentity | VerificationStatus::Idle) {
            info!("wallet changed while connected, restarting verification");
            self.invalidate();
            self.reset(VerificationStatus::Idle);
        }
        self.try_start()
    }

    /// `idle` → `checking` once both an identity and a ready wallet exist.
    fn try_start(&mut self) -> Option<Effect> {
        if self.status() != VerificationStatus::Idle || self.in_flight.is_some() {
            return None;
        }
        self.identity.as_ref()?;
        let owner = self.wallet.ready_address()?.clone();

        self.attempt += 1;
        self.in_flight = Some(self.attempt);
        self.reset(VerificationStatus::Checking);
        info!(attempt = self.attempt, owner = %owner.abbreviated(), "checking ownership");
        Some(Effect::QueryOwnership {
            attempt: self.attempt,
            owner,
        })
    }

    fn on_ownership(
        &mut self,
        attempt: AttemptId,
        result: Result<Vec<OwnedAsset>, WorkflowError>,
    ) -> Option<Effect> {
        if !self.accepts(attempt, VerificationStatus::Checking) {
            return None;
        }
        self.in_flight = None;

        let assets = match result {
            Ok(assets) => assets,
            Err(e) => {
                warn!(attempt, kind = %e.kind(), error = %e, "ownership query failed");
                self.fail(VerificationStatus::Failure, 0, format!("Verification failed: {e}"), &e);
                return None;
            }
        };

        match self.rule.evaluate(&assets) {
            Ok(count) => {
                self.outcome.owned_count = count;
                self.transition(VerificationStatus::Success);
                let Some(identity) = self.identity.clone() else {
                    // on_identity(None) invalidates, so this cannot be reached with a live attempt
                    self.reset(VerificationStatus::NoIdentity);
                    return None;
                };
                self.in_flight = Some(attempt);
                Some(Effect::NotifyBackend { attempt, identity })
            }
            Err(e @ WorkflowError::ThresholdNotMet { actual, .. }) => {
                info!(attempt, actual, required = self.rule.required_count, "threshold not met");
                self.fail(VerificationStatus::Failure, actual, e.to_string(), &e);
                None
            }
            Err(e) => {
                self.fail(VerificationStatus::Failure, 0, format!("Verification failed: {e}"), &e);
                None
            }
        }
    }

    fn on_backend(&mut self, attempt: AttemptId, result: Result<(), WorkflowError>) -> Option<Effect> {
        if !self.accepts(attempt, VerificationStatus::Success) {
            return None;
        }
        self.in_flight = None;

        match result {
            Ok(()) => self.transition(VerificationStatus::BackendNotified),
            Err(e) => {
                warn!(attempt, kind = %e.kind(), error = %e, "backend notification failed");
                let count = self.outcome.owned_count;
                self.fail(VerificationStatus::BackendError, count, e.to_string(), &e);
            }
        }
        None
    }

    /// Stale-result guard: only the outstanding attempt, in the expected state, may land.
    fn accepts(&self, attempt: AttemptId, expected: VerificationStatus) -> bool {
        let live = self.in_flight == Some(attempt) && self.status() == expected;
        if !live {
            debug!(
                attempt,
                current = self.attempt,
                status = %self.status(),
                "discarding stale result"
            );
        }
        live
    }

    fn invalidate(&mut self) {
        if let Some(attempt) = self.in_flight.take() {
            debug!(attempt, "invalidating in-flight attempt");
        }
    }

    /// Enter `status` with a fresh outcome (count 0, no message).
    fn reset(&mut self, status: VerificationStatus) {
        let from = self.status();
        self.outcome = VerificationOutcome::new(status);
        if from != status {
            info!(from = %from, to = %status, "verification state changed");
        }
    }

    /// Enter `status` keeping the collected count.
    fn transition(&mut self, status: VerificationStatus) {
        let from = self.status();
        self.outcome.status = status;
        info!(from = %from, to = %status, owned = self.outcome.owned_count, "verification state changed");
    }

    /// A `failure` below the threshold also points at the marketplace,
    /// whatever the cause.
    fn fail(&mut self, status: VerificationStatus, count: u32, message: String, cause: &WorkflowError) {
        self.outcome.owned_count = count;
        self.outcome.message = Some(message);
        self.outcome.failure = Some(cause.kind());
        if status == VerificationStatus::Failure && count < self.rule.required_count {
            self.outcome.marketplace_hint = self.marketplace_url.clone();
        }
        self.transition(status);
    }
}
