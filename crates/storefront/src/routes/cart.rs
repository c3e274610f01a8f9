//! Cart route handlers.
//!
//! Cart operations use HTMX for in-place updates: an HTMX request gets the
//! cart fragment back plus an `HX-Trigger: cart-updated` header so the count
//! badge refreshes. A plain form post is redirected back to the cart section
//! of the home page.
//!
//! The cart itself is stored in the visitor's session and passed to the
//! presenter on every request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use loam_core::{CartOutcome, CartView, Effect, Presenter, ProductId, UiEvent};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::HxRequest;
use crate::middleware::htmx::{CART_UPDATED_EVENT, HX_TRIGGER_HEADER};
use crate::models::session::{load_cart, save_cart};
use crate::routes::home::{HomeNotices, HomeTemplate};
use crate::state::AppState;

/// Where non-HTMX cart posts land.
const CART_ANCHOR: &str = "/#cart";

/// Add or remove form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: String,
}

/// Quantity step direction.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    Increase,
    Decrease,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub action: QuantityAction,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Checkout summary fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout.html")]
pub struct CheckoutTemplate {
    pub checkout_message: Option<String>,
}

// =============================================================================
// Shared dispatch
// =============================================================================

/// Run one cart event against the session cart and render the result.
async fn apply_cart_event(
    state: &AppState,
    session: &Session,
    HxRequest(is_htmx): HxRequest,
    event: UiEvent,
) -> Result<Response> {
    let kind = event.kind();
    let presenter = Presenter::new(state.catalog());
    let mut cart = load_cart(session, state.catalog()).await?;
    let mut tabs = state.home_tabs();

    let effect = presenter.dispatch(event, &mut cart, &mut tabs);
    let changed = effect.cart_changed();

    match effect {
        Effect::Cart(outcome @ CartOutcome::Updated) => {
            save_cart(session, &cart).await?;
            add_breadcrumb("cart", kind, None);
            tracing::info!(
                event = kind,
                outcome = outcome.as_str(),
                item_count = cart.item_count(),
                "Cart updated"
            );
        }
        Effect::Cart(outcome @ CartOutcome::NotFound) => {
            tracing::debug!(
                event = kind,
                outcome = outcome.as_str(),
                "Ignoring cart event for unknown product"
            );
        }
        other => {
            return Err(AppError::Internal(format!(
                "cart event {kind} produced {other:?}"
            )));
        }
    }

    if !is_htmx {
        return Ok(Redirect::to(CART_ANCHOR).into_response());
    }

    let fragment = CartTemplate {
        cart: presenter.cart(&cart),
    };
    if changed {
        Ok((AppendHeaders([(HX_TRIGGER_HEADER, CART_UPDATED_EVENT)]), fragment).into_response())
    } else {
        Ok(fragment.into_response())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart panel fragment.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartTemplate> {
    let cart = load_cart(&session, state.catalog()).await?;
    Ok(CartTemplate {
        cart: Presenter::new(state.catalog()).cart(&cart),
    })
}

/// Cart count badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session, state.catalog()).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Add one unit of a product.
#[instrument(skip(state, session, hx), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let event = UiEvent::AddToCart(ProductId::new(form.product_id));
    apply_cart_event(&state, &session, hx, event).await
}

/// Step a line's quantity up or down (never below 1).
#[instrument(skip(state, session, hx), fields(product_id = %form.product_id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let event = match form.action {
        QuantityAction::Increase => UiEvent::IncreaseQuantity(id),
        QuantityAction::Decrease => UiEvent::DecreaseQuantity(id),
    };
    apply_cart_event(&state, &session, hx, event).await
}

/// Remove a line regardless of quantity.
#[instrument(skip(state, session, hx), fields(product_id = %form.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let event = UiEvent::RemoveFromCart(ProductId::new(form.product_id));
    apply_cart_event(&state, &session, hx, event).await
}

/// Confirm checkout with a read-only summary of the item count.
///
/// The checkout control is disabled for an empty cart, so an empty-cart post
/// is a stale or forged request and gets a 400.
#[instrument(skip(state, session, hx))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
) -> Result<Response> {
    let presenter = Presenter::new(state.catalog());
    let mut cart = load_cart(&session, state.catalog()).await?;
    let mut tabs = state.home_tabs();

    let summary = match presenter.dispatch(UiEvent::Checkout, &mut cart, &mut tabs) {
        Effect::Checkout(summary) => summary,
        Effect::CheckoutUnavailable => {
            return Err(AppError::BadRequest("Cart is empty".to_string()));
        }
        other => {
            return Err(AppError::Internal(format!("checkout produced {other:?}")));
        }
    };

    let item_count = summary.item_count.to_string();
    add_breadcrumb(
        "cart",
        "Checkout requested",
        Some(&[("item_count", item_count.as_str())]),
    );
    tracing::info!(item_count = summary.item_count, "Checkout requested");

    let checkout_message = Some(summary.message());
    if hx.0 {
        return Ok(CheckoutTemplate { checkout_message }.into_response());
    }

    let notices = HomeNotices {
        checkout_message,
        ..HomeNotices::default()
    };
    Ok(HomeTemplate::build(&state, &cart, &tabs, notices).into_response())
}
