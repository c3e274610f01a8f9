//! Tab switching.
//!
//! HTMX swaps a single tab group in place. Without HTMX the tab links fall
//! back to the home page with the selection carried in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use loam_core::{CartStore, Effect, Presenter, Selection, TabGroupId, TabGroupView, TabId, UiEvent};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::HxRequest;
use crate::state::AppState;

/// Tab group fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/tab_group.html")]
pub struct TabGroupTemplate {
    pub group: TabGroupView,
}

/// Home page URL with `tab` selected in `group`, anchored at the group.
fn home_with_selection(group: &str, tab: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(group, tab)
        .finish();
    let anchor: String = url::form_urlencoded::byte_serialize(group.as_bytes()).collect();
    format!("/?{query}#{anchor}")
}

/// Select a tab.
///
/// GET /tabs/{group}/{tab}
///
/// An unknown tab leaves the group as it was. An unknown group is a 404.
#[instrument(skip_all, fields(group = %group, tab = %tab))]
pub async fn select(
    State(state): State<AppState>,
    hx: HxRequest,
    Path((group, tab)): Path<(String, String)>,
) -> Result<Response> {
    if state.home_tabs().group(&group).is_none() {
        return Err(AppError::NotFound(format!("Tab group {group}")));
    }

    if !hx.0 {
        return Ok(Redirect::to(&home_with_selection(&group, &tab)).into_response());
    }

    let presenter = Presenter::new(state.catalog());
    // Tab switches never touch the cart.
    let mut cart = CartStore::default();
    let mut tabs = state.home_tabs();

    let event = UiEvent::SelectTab {
        group: TabGroupId::new(group.as_str()),
        tab: TabId::new(tab.as_str()),
    };
    match presenter.dispatch(event, &mut cart, &mut tabs) {
        Effect::Tab(Selection::Activated) => {}
        Effect::Tab(Selection::Unknown) => {
            tracing::debug!(%group, %tab, "Unknown tab, keeping current selection");
        }
        other => return Err(AppError::Internal(format!("tab select produced {other:?}"))),
    }

    let group = tabs
        .group(&group)
        .map(TabGroupView::from)
        .ok_or_else(|| AppError::NotFound(format!("Tab group {group}")))?;

    Ok(TabGroupTemplate { group }.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_with_selection() {
        assert_eq!(
            home_with_selection("guides", "delivery"),
            "/?guides=delivery#guides"
        );
    }

    #[test]
    fn test_home_with_selection_encodes() {
        assert_eq!(home_with_selection("a b", "c&d"), "/?a+b=c%26d#a+b");
    }
}
