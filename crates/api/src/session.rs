//! Per-browser participant identity.
//!
//! The identifier is minted lazily the first time a handler asks for it and
//! kept in the server-side session, so every later request carrying the same
//! session cookie sees the same value. Nothing survives the browser session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gongryak_core::types::SessionId;
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;

/// Session key under which the participant identifier is stored.
pub const SESSION_ID_KEY: &str = "participant_id";

/// The participant identifier of the current browser session.
///
/// ```ignore
/// async fn handler(ctx: SessionContext) -> AppResult<Json<()>> {
///     tracing::info!(session_id = %ctx.session_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: SessionId,
    /// `true` when this request minted the identifier.
    pub issued: bool,
}

impl SessionContext {
    /// Return the stored identifier, generating and storing one if absent.
    pub async fn resolve(session: &Session) -> Result<Self, AppError> {
        if let Some(session_id) = session.get::<SessionId>(SESSION_ID_KEY).await? {
            return Ok(Self {
                session_id,
                issued: false,
            });
        }

        let session_id = SessionId::generate();
        session.insert(SESSION_ID_KEY, &session_id).await?;
        tracing::debug!(session_id = %session_id, "Issued participant identifier");

        Ok(Self {
            session_id,
            issued: true,
        })
    }
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalError(msg.to_string()))?;

        Self::resolve(&session).await
    }
}
