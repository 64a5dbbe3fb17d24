//! External identity correlating a verification session to a messaging-app user.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Opaque identifier of the user in the external system (a Telegram user id).
///
/// Read once when the session starts and never changed afterwards. The value is
/// kept as text; it only has to be an integer when it is handed to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalIdentity(String);

impl ExternalIdentity {
    /// Wrap a raw parameter value. Blank input means "no identity".
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identity as the integer user id expected by the backend.
    pub fn as_user_id(&self) -> Result<i64, TypesError> {
        self.0
            .parse::<i64>()
            .map_err(|_| TypesError::NonNumericIdentity(self.0.clone()))
    }
}

impl fmt::Display for ExternalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
