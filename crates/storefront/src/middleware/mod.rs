//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID (assign or propagate `x-request-id`)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Security headers (CSP, framing, caching)
//! 5. Session layer (tower-sessions with in-memory store)
//!
//! Extractors: [`HxRequest`] for fragment-vs-page responses and
//! [`RequireAccess`] for pages behind the password gate.

pub mod access;
pub mod htmx;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use access::{GATE_PATH, RequireAccess};
pub use htmx::HxRequest;
pub use request_id::{make_request_span, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
