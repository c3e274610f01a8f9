//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (?<group>=<tab> selects tabs)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments, redirect to /#cart without HTMX)
//! GET  /cart                   - Cart panel fragment
//! GET  /cart/count             - Cart count badge fragment
//! POST /cart/add               - Add one unit (triggers cart-updated)
//! POST /cart/update            - Increase or decrease quantity
//! POST /cart/remove            - Remove a line
//!
//! # Checkout
//! POST /checkout               - Read-only checkout summary
//!
//! # Contact
//! POST /contact                - Contact form acknowledgement
//!
//! # Tabs
//! GET  /tabs/{group}/{tab}     - Tab group fragment
//!
//! # Wholesale gate
//! GET  /gate                   - Password prompt
//! POST /gate                   - Unlock or cancel
//! GET  <destination>           - Wholesale page (requires unlocked gate)
//! ```

pub mod cart;
pub mod contact;
pub mod gate;
pub mod home;
pub mod tabs;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::GATE_PATH;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
///
/// `gate_destination` is the path of the wholesale page.
pub fn routes(gate_destination: &str) -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout summary
        .route("/checkout", post(cart::checkout))
        // Contact form
        .route("/contact", post(contact::submit))
        // Tab switching
        .route("/tabs/{group}/{tab}", get(tabs::select))
        // Wholesale gate
        .route(GATE_PATH, get(gate::prompt).post(gate::submit))
        .route(gate_destination, get(gate::wholesale))
}
