//! Session-stored visitor state.
//!
//! The cart and the gate flag are the only things a visitor's session holds.
//! Both disappear when the browser session ends.

use loam_core::{AccessGate, CartStore, Catalog};
use tower_sessions::Session;

/// Session keys for visitor state.
pub mod keys {
    /// Key for the serialized cart.
    pub const CART: &str = "cart";

    /// Key for the wholesale gate flag (`"true"` when unlocked).
    pub const ACCESS_FLAG: &str = loam_core::ACCESS_FLAG_KEY;
}

/// Load the visitor's cart, dropping lines for products no longer sold.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(
    session: &Session,
    catalog: &Catalog,
) -> Result<CartStore, tower_sessions::session::Error> {
    let mut cart = session
        .get::<CartStore>(keys::CART)
        .await?
        .unwrap_or_default();

    let dropped = cart.retain_known(catalog);
    if dropped > 0 {
        tracing::info!(dropped, "Dropped cart lines for products no longer in the catalog");
    }
    Ok(cart)
}

/// Write the visitor's cart back to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &CartStore,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Read the raw gate flag.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn access_flag(session: &Session) -> Result<Option<String>, tower_sessions::session::Error> {
    session.get::<String>(keys::ACCESS_FLAG).await
}

/// Persist the flag for an unlocked gate. Locked gates write nothing.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_access_flag(
    session: &Session,
    gate: &AccessGate<'_>,
) -> Result<(), tower_sessions::session::Error> {
    if let Some(flag) = gate.flag() {
        session.insert(keys::ACCESS_FLAG, flag).await?;
    }
    Ok(())
}
