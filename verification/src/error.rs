use gate_backend::BackendError;
use gate_index::IndexError;
use gate_types::FailureKind;
use thiserror::Error;

/// Every way a verification attempt can stop short of `backend_notified`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Transport(String),

    /// Message from the external service, unmodified.
    #[error("{0}")]
    Service(String),

    #[error("You need at least {required} NFTs from the specified collection. You currently hold {actual}.")]
    ThresholdNotMet { required: u32, actual: u32 },
}

impl WorkflowError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration(_) => FailureKind::Configuration,
            Self::Transport(_) => FailureKind::Transport,
            Self::Service(_) => FailureKind::Service,
            Self::ThresholdNotMet { .. } => FailureKind::ThresholdNotMet,
        }
    }
}

impl From<IndexError> for WorkflowError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::NotConfigured(m) => Self::Configuration(m),
            IndexError::Rpc { message, .. } => Self::Service(message),
            IndexError::InvalidResponse(_) => Self::Service(e.to_string()),
            IndexError::Unreachable(_) | IndexError::RequestFailed(_) => {
                Self::Transport(e.to_string())
            }
        }
    }
}

impl From<BackendError> for WorkflowError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NotConfigured(m) | BackendError::InvalidIdentity(m) => {
                Self::Configuration(m)
            }
            BackendError::Rejected {
                detail: Some(detail),
                ..
            } => Self::Service(detail),
            // a bare status with no error body is not a service answer
            BackendError::Unreachable(_) | BackendError::Rejected { detail: None, .. } => {
                Self::Transport(e.to_string())
            }
        }
    }
}
