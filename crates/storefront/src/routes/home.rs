//! Home page route handler.
//!
//! The home page is the whole storefront: product grid, cart, growing guides,
//! and the contact form. Other handlers fall back to rendering it (with a
//! message filled in) when a form is posted without HTMX.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use loam_core::{
    CartStore, CartView, Presenter, ProductCardView, TabGroupId, TabGroupView, TabId, TabSet,
    UiEvent,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::GATE_PATH;
use crate::models::session::load_cart;
use crate::state::AppState;

/// Message shown under the contact form.
#[derive(Clone, Debug)]
pub struct FeedbackView {
    pub message: String,
    pub is_error: bool,
}

impl FeedbackView {
    #[must_use]
    pub const fn success(message: String) -> Self {
        Self {
            message,
            is_error: false,
        }
    }

    #[must_use]
    pub const fn error(message: String) -> Self {
        Self {
            message,
            is_error: true,
        }
    }
}

/// One-off messages a home page render may carry.
#[derive(Clone, Debug, Default)]
pub struct HomeNotices {
    pub feedback: Option<FeedbackView>,
    pub checkout_message: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub cart: CartView,
    pub tab_groups: Vec<TabGroupView>,
    pub feedback: Option<FeedbackView>,
    pub checkout_message: Option<String>,
    pub gate_path: &'static str,
}

impl HomeTemplate {
    /// Render views for the given cart and tab state.
    #[must_use]
    pub fn build(state: &AppState, cart: &CartStore, tabs: &TabSet, notices: HomeNotices) -> Self {
        let presenter = Presenter::new(state.catalog());
        Self {
            products: presenter.product_grid(),
            cart: presenter.cart(cart),
            tab_groups: presenter.tabs(tabs),
            feedback: notices.feedback,
            checkout_message: notices.checkout_message,
            gate_path: GATE_PATH,
        }
    }
}

/// Display the home page.
///
/// Query parameters select tabs: `/?guides=delivery` activates the delivery
/// tab of the guides group. Unknown groups and tabs are ignored.
#[instrument(skip(state, session, query))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HashMap<String, String>>,
) -> Result<HomeTemplate> {
    let presenter = Presenter::new(state.catalog());
    let mut cart = load_cart(&session, state.catalog()).await?;
    let mut tabs = state.home_tabs();

    for (group, tab) in query {
        let event = UiEvent::SelectTab {
            group: TabGroupId::new(group),
            tab: TabId::new(tab),
        };
        let effect = presenter.dispatch(event, &mut cart, &mut tabs);
        tracing::debug!(?effect, "Applied tab selection from query");
    }

    Ok(HomeTemplate::build(
        &state,
        &cart,
        &tabs,
        HomeNotices::default(),
    ))
}
