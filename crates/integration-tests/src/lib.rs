//! Integration tests for the Appliance Masters site.
//!
//! The full router, middleware included, is driven in-process with
//! `tower::ServiceExt::oneshot`; no server or network is needed.
//!
//! ```bash
//! cargo test -p appliance-masters-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;

use appliance_masters_site::config::SiteConfig;
use appliance_masters_site::state::AppState;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode};
use tower::ServiceExt;

pub const TAG_ID: &str = "AW-17395932761";
pub const PHONE_CALL_LABEL: &str = "PhOnEcAlL01";
pub const WHATSAPP_LABEL: &str = "WhAtSaPp02";
pub const BUSINESS_PHONE: &str = "+971501234567";

/// Minimal environment for a working site.
#[must_use]
pub fn base_env() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("SITE_BASE_URL", "https://appliancemasters.test"),
        ("BUSINESS_PHONE", BUSINESS_PHONE),
        ("BUSINESS_EMAIL", "Info@ApplianceMasters.test"),
    ])
}

/// Environment with a Google tag and real conversion labels.
#[must_use]
pub fn tracked_env() -> HashMap<&'static str, &'static str> {
    let mut env = base_env();
    env.insert("GOOGLE_ADS_ID", TAG_ID);
    env.insert("GOOGLE_ADS_PHONE_CALL_LABEL", PHONE_CALL_LABEL);
    env.insert("GOOGLE_ADS_WHATSAPP_LABEL", WHATSAPP_LABEL);
    env
}

/// Build the application from an in-memory environment.
///
/// # Panics
///
/// Panics if the environment is not a valid configuration.
#[must_use]
pub fn app_with_env(env: &HashMap<&'static str, &'static str>) -> Router {
    let config = SiteConfig::from_lookup(|key| env.get(key).map(ToString::to_string))
        .unwrap_or_else(|e| panic!("invalid test configuration: {e}"));
    appliance_masters_site::app(AppState::new(config))
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("failed to read body: {e}"));
        Self {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Value of a response header, or an empty string.
    #[must_use]
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Send one request through a fresh copy of `app`.
///
/// # Panics
///
/// Panics if the router fails to produce a response.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|e| panic!("router error: {e}"));
    TestResponse::collect(response).await
}

/// GET `uri`.
///
/// # Panics
///
/// Panics if the request cannot be built or the router fails.
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::get(uri)
        .body(Body::empty())
        .unwrap_or_else(|e| panic!("bad request: {e}"));
    send(app, request).await
}

/// POST a urlencoded form to `uri` from `client_ip`.
///
/// # Panics
///
/// Panics if the request cannot be built or the router fails.
pub async fn post_form(app: &Router, uri: &str, form: &str, client_ip: &str) -> TestResponse {
    let request = Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("x-forwarded-for", client_ip)
        .body(Body::from(form.to_string()))
        .unwrap_or_else(|e| panic!("bad request: {e}"));
    send(app, request).await
}
