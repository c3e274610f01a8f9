//! Gate extractors.
//!
//! Provides an extractor for pages behind the wholesale password gate.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use loam_core::GateState;
use tower_sessions::Session;

use crate::models::session::access_flag;

/// Path of the password prompt.
pub const GATE_PATH: &str = "/gate";

/// Extractor that requires an unlocked gate for this session.
///
/// Locked sessions are redirected to the prompt.
///
/// # Example
///
/// ```rust,ignore
/// async fn wholesale(_: RequireAccess) -> impl IntoResponse {
///     "Trade prices"
/// }
/// ```
pub struct RequireAccess;

/// Why a request was turned away from a gated page.
pub enum AccessRejection {
    /// Send the visitor to the password prompt.
    RedirectToGate,
    /// The session layer is missing or failed.
    SessionUnavailable,
}

impl IntoResponse for AccessRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToGate => Redirect::to(GATE_PATH).into_response(),
            Self::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAccess
where
    S: Send + Sync,
{
    type Rejection = AccessRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or_else(|| {
            tracing::error!("Session not found in request extensions - layer may be misconfigured");
            AccessRejection::SessionUnavailable
        })?;

        let flag = access_flag(session).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read gate flag");
            AccessRejection::SessionUnavailable
        })?;

        match GateState::from_flag(flag.as_deref()) {
            GateState::Unlocked => Ok(Self),
            GateState::Locked => {
                tracing::debug!(path = %parts.uri.path(), "Gate locked, redirecting to prompt");
                Err(AccessRejection::RedirectToGate)
            }
        }
    }
}
