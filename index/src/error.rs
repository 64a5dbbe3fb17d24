use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("index service is not configured: {0}")]
    NotConfigured(String),

    #[error("index service unreachable: {0}")]
    Unreachable(String),

    #[error("index request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a JSON-RPC error object.
    #[error("{message}")]
    Rpc { code: Option<i64>, message: String },

    #[error("invalid response from index service: {0}")]
    InvalidResponse(String),
}

impl IndexError {
    /// The failure happened before a well-formed answer came back.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::RequestFailed(_))
    }
}
