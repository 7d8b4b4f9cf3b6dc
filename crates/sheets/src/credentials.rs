//! Service-account key loading.
//!
//! The key bundle is the JSON file Google issues for a service account. Only
//! the fields needed to mint an access token are read.

use std::path::Path;

use serde::Deserialize;

use crate::error::SheetsError;

/// Google's OAuth 2.0 token endpoint, used when the key omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Scopes needed to read and append to the worksheet.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| SheetsError::Credentials(format!("malformed key JSON: {e}")))?;

        if key.client_email.trim().is_empty() {
            return Err(SheetsError::Credentials("client_email is empty".into()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetsError::Credentials(
                "private_key is not a PEM private key".into(),
            ));
        }
        Ok(key)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SheetsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SheetsError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}
