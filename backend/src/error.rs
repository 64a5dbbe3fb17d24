use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("verification backend is not configured: {0}")]
    NotConfigured(String),

    #[error("invalid identity for backend: {0}")]
    InvalidIdentity(String),

    #[error("verification backend unreachable: {0}")]
    Unreachable(String),

    /// Non-2xx answer. `detail` is the `error`/`message` field of a JSON body, if any.
    #[error("verification backend rejected request (HTTP {status}){}", suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },
}

fn suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}
