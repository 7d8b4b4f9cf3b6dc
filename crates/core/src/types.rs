use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All internal timestamps are UTC; wall-clock rendering happens at the edge.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque participant identifier, issued once per browsing session.
///
/// Not a secret: it only correlates a submission with the session that made
/// it, so duplicate checks are as strong as session continuity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
