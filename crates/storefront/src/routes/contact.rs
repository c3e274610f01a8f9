//! Contact form route handler.
//!
//! The form only collects a name. Nothing is sent anywhere: the visitor gets
//! an acknowledgement and the form is cleared.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use loam_core::{Effect, Presenter, UiEvent};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::HxRequest;
use crate::models::session::load_cart;
use crate::routes::home::{FeedbackView, HomeNotices, HomeTemplate};
use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
}

/// Contact form fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact.html")]
pub struct ContactTemplate {
    pub feedback: Option<FeedbackView>,
}

/// Submit the contact form.
///
/// POST /contact
///
/// A blank name re-renders the form with an error and a 422 status.
#[instrument(skip(state, session, hx, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let presenter = Presenter::new(state.catalog());
    let mut cart = load_cart(&session, state.catalog()).await?;
    let mut tabs = state.home_tabs();

    let event = UiEvent::SubmitContact { name: form.name };
    let (status, feedback) = match presenter.dispatch(event, &mut cart, &mut tabs) {
        Effect::Contact(Ok(ack)) => {
            add_breadcrumb("contact", "Contact form submitted", None);
            tracing::info!("Contact form submitted");
            (StatusCode::OK, FeedbackView::success(ack.message()))
        }
        Effect::Contact(Err(e)) => {
            tracing::debug!(error = %e, "Contact form rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, FeedbackView::error(e.to_string()))
        }
        other => {
            return Err(AppError::Internal(format!("contact produced {other:?}")));
        }
    };

    if hx.0 {
        let fragment = ContactTemplate {
            feedback: Some(feedback),
        };
        return Ok((status, fragment).into_response());
    }

    let notices = HomeNotices {
        feedback: Some(feedback),
        ..HomeNotices::default()
    };
    Ok((status, HomeTemplate::build(&state, &cart, &tabs, notices)).into_response())
}
