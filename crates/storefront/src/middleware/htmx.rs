//! HTMX request detection.

use axum::{extract::FromRequestParts, http::request::Parts};

/// Request header HTMX sets on every request it issues.
pub const HX_REQUEST_HEADER: &str = "hx-request";

/// Response header used to fire client-side events.
pub const HX_TRIGGER_HEADER: &str = "HX-Trigger";

/// Client event fired after any cart change; the count badge listens for it.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Whether the request came from HTMX (and wants a fragment back).
///
/// Plain form posts get a full page or a redirect instead, so every control
/// still works with scripts disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get(HX_REQUEST_HEADER)
            .is_some_and(|value| value.as_bytes() == b"true");
        Ok(Self(is_htmx))
    }
}
