/// Errors from the sheet store layer.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Sheets API returned a non-2xx status code.
    #[error("Sheets API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The OAuth token endpoint refused the service-account assertion.
    #[error("Token exchange failed ({status}): {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Invalid service-account credentials: {0}")]
    Credentials(String),

    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Store configuration that cannot produce a valid request.
    #[error("Invalid sheet configuration: {0}")]
    Config(String),

    /// Full-record scan found no column under the identifier header.
    #[error("Worksheet has no '{0}' header column")]
    MissingHeader(String),

    /// The store is deliberately offline (memory store failure injection).
    #[error("Sheet store unavailable: {0}")]
    Unavailable(String),
}
