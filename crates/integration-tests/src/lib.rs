//! Integration tests for the Loam storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loam-integration-tests
//! ```
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! so no listener or browser is needed. [`TestContext`] plays the part of a
//! single browser: it remembers the session cookie between requests.
//!
//! # Test Categories
//!
//! - `storefront_cart` - cart, count badge, and checkout
//! - `storefront_gate` - wholesale password gate
//! - `storefront_pages` - home page, tabs, contact form, and headers

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use loam_core::Catalog;
use loam_storefront::{app, config::StorefrontConfig, state::AppState};
use tower::ServiceExt;

/// Path to the storefront's static assets, independent of the test cwd.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION.as_str())
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One simulated browser talking to one storefront instance.
pub struct TestContext {
    app: Router,
    cookie: Option<String>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Storefront with default settings and the built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Storefront configured from the given environment pairs.
    #[must_use]
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = test_config(vars);
        let state = AppState::with_catalog(config, Catalog::default()).unwrap();
        Self::from_router(app(state))
    }

    #[must_use]
    pub const fn from_router(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// A second browser on the same server, starting with no cookie.
    #[must_use]
    pub fn fresh_browser(&self) -> Self {
        Self::from_router(self.app.clone())
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// GET as HTMX would issue it.
    pub async fn get_htmx(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path).header("hx-request", "true"), Body::empty())
            .await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(form_request(path), encode(fields)).await
    }

    /// Form POST as HTMX would issue it.
    pub async fn post_form_htmx(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(form_request(path).header("hx-request", "true"), encode(fields))
            .await
    }

    /// Send a request with the remembered cookie and remember any new one.
    pub async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

/// Build a config from explicit pairs, ignoring the process environment.
#[must_use]
pub fn test_config(vars: &[(&str, &str)]) -> StorefrontConfig {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    StorefrontConfig::from_lookup(|key| {
        if key == "STOREFRONT_STATIC_DIR" {
            return Some(STATIC_DIR.to_string());
        }
        vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .unwrap()
}

fn form_request(path: &str) -> axum::http::request::Builder {
    Request::post(path).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
}

fn encode(fields: &[(&str, &str)]) -> Body {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    Body::from(encoded)
}
