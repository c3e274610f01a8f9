//! Wholesale password gate.
//!
//! A cosmetic speed bump in front of the wholesale page, not access control:
//! the password ships in config and the flag lives in a browser-session
//! cookie. Once unlocked, the visitor is never prompted again in that
//! browser session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use loam_core::{AccessGate, GateAttempt};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{GATE_PATH, RequireAccess};
use crate::models::session::{access_flag, store_access_flag};
use crate::state::AppState;

/// Shown when the entered password does not match.
const MISMATCH_MESSAGE: &str = "That password didn't match. Try again or cancel.";

/// What the visitor pressed on the prompt.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateIntent {
    #[default]
    Unlock,
    Cancel,
}

/// Password prompt form data.
#[derive(Debug, Default, Deserialize)]
pub struct GateForm {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub intent: Option<GateIntent>,
}

/// Password prompt page.
#[derive(Template, WebTemplate)]
#[template(path = "gate/prompt.html")]
pub struct PromptTemplate {
    pub gate_path: &'static str,
    pub error: Option<String>,
}

/// Wholesale page, only reachable once the gate is unlocked.
#[derive(Template, WebTemplate)]
#[template(path = "gate/wholesale.html")]
pub struct WholesaleTemplate {
    pub gate_path: &'static str,
    pub products: Vec<loam_core::ProductCardView>,
}

/// Show the prompt, or go straight through if already unlocked.
///
/// GET /gate
#[instrument(skip(state, session))]
pub async fn prompt(State(state): State<AppState>, session: Session) -> Result<Response> {
    let password = state.config().gate.password();
    let flag = access_flag(&session).await?;

    if AccessGate::new(password, flag.as_deref()).is_unlocked() {
        return Ok(Redirect::to(&state.config().gate.destination).into_response());
    }

    Ok(PromptTemplate {
        gate_path: GATE_PATH,
        error: None,
    }
    .into_response())
}

/// Handle the prompt.
///
/// POST /gate
///
/// A matching password stores the session flag and redirects to the
/// wholesale page. A mismatch re-prompts with a 401. Cancel goes home.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GateForm>,
) -> Result<Response> {
    let config = &state.config().gate;
    let flag = access_flag(&session).await?;
    let mut gate = AccessGate::new(config.password(), flag.as_deref());

    let input = match form.intent.unwrap_or_default() {
        GateIntent::Unlock => Some(form.password.unwrap_or_default()),
        GateIntent::Cancel => None,
    };

    let attempt = gate.submit(input.as_deref());
    tracing::info!(attempt = attempt.as_str(), "Gate prompt answered");

    match attempt {
        GateAttempt::Unlocked => {
            store_access_flag(&session, &gate).await?;
            add_breadcrumb("gate", "Wholesale unlocked", None);
            Ok(Redirect::to(&config.destination).into_response())
        }
        GateAttempt::Mismatch => Ok((
            StatusCode::UNAUTHORIZED,
            PromptTemplate {
                gate_path: GATE_PATH,
                error: Some(MISMATCH_MESSAGE.to_string()),
            },
        )
            .into_response()),
        GateAttempt::Cancelled => Ok(Redirect::to("/").into_response()),
    }
}

/// Wholesale page.
///
/// GET <destination>
#[instrument(skip_all)]
pub async fn wholesale(_access: RequireAccess, State(state): State<AppState>) -> WholesaleTemplate {
    WholesaleTemplate {
        gate_path: GATE_PATH,
        products: loam_core::Presenter::new(state.catalog()).product_grid(),
    }
}
