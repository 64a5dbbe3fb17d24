//! Async driver that executes the state machine's effects.

use gate_backend::VerificationBackend;
use gate_index::OwnershipIndex;
use gate_types::{ExternalIdentity, VerificationOutcome, WalletState};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::machine::{Effect, Event, StateMachine};
use crate::{GateConfig, OwnershipRule, WorkflowError};

/// One verification session: an identity, a wallet, and two external services.
///
/// All methods take `&self`, so wallet events can be delivered while a
/// network call started by an earlier event is still pending. The machine
/// lock is only held while applying an event, never across a request.
pub struct VerificationWorkflow<I, B> {
    index: I,
    backend: B,
    machine: Mutex<StateMachine>,
}

impl<I, B> VerificationWorkflow<I, B>
where
    I: OwnershipIndex,
    B: VerificationBackend,
{
    /// Build a workflow from a validated configuration.
    pub fn new(
        config: &GateConfig,
        identity: Option<ExternalIdentity>,
        index: I,
        backend: B,
    ) -> Result<Self, WorkflowError> {
        config.validate()?;
        if !config.has_backend() {
            warn!("no backend URL configured; successful checks will end in backend_error");
        }
        let machine = StateMachine::new(
            OwnershipRule::from_config(config),
            config.marketplace_url.clone(),
            identity,
        );
        Ok(Self {
            index,
            backend,
            machine: Mutex::new(machine),
        })
    }

    /// Current outcome snapshot.
    pub async fn outcome(&self) -> VerificationOutcome {
        self.machine.lock().await.outcome().clone()
    }

    /// Report a wallet connector change and run any resulting checks to completion.
    pub async fn wallet_changed(&self, wallet: WalletState) -> VerificationOutcome {
        self.dispatch(Event::WalletChanged(wallet)).await
    }

    /// Re-read the entry parameter.
    pub async fn identity_changed(&self, identity: Option<ExternalIdentity>) -> VerificationOutcome {
        self.dispatch(Event::IdentityChanged(identity)).await
    }

    async fn dispatch(&self, event: Event) -> VerificationOutcome {
        let mut next = self.machine.lock().await.handle(event);
        while let Some(effect) = next {
            let resolved = self.execute(effect).await;
            next = self.machine.lock().await.handle(resolved);
        }
        self.outcome().await
    }

    async fn execute(&self, effect: Effect) -> Event {
        match effect {
            Effect::QueryOwnership { attempt, owner } => {
                debug!(attempt, "running ownership query");
                let result = self
                    .index
                    .assets_by_owner(&owner)
                    .await
                    .map_err(WorkflowError::from);
                Event::OwnershipResolved { attempt, result }
            }
            Effect::NotifyBackend { attempt, identity } => {
                debug!(attempt, "running backend notification");
                let result = self
                    .backend
                    .mark_verified(&identity)
                    .await
                    .map_err(WorkflowError::from);
                Event::BackendResolved { attempt, result }
            }
        }
    }
}
