//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, services, lead form)
//! GET  /appliance/{id}         - Service landing page
//!
//! # Contact (every call-to-action lands here)
//! GET  /contact                - Lead form page
//! POST /contact                - Lead form submission (rate limited)
//! GET  /contact/call           - Phone call hand-off
//! GET  /contact/chat           - Chat hand-off (?message=)
//! GET  /contact/email          - Email hand-off (?subject=&body=)
//! ```
//!
//! `/health` is mounted by the binary.

pub mod appliance;
pub mod contact;
pub mod home;

use appliance_masters_core::GtagCommand;
use axum::{
    Router,
    routing::{get, post},
};

use crate::config::SiteConfig;
use crate::content::Service;
use crate::middleware::{CspNonce, lead_form_rate_limiter};
use crate::services::bootstrap_commands;
use crate::state::AppState;

/// Shared page chrome: business details and the Google tag bootstrap.
#[derive(Debug, Clone)]
pub struct Layout {
    pub business_name: String,
    pub phone_number: String,
    pub email: String,
    pub locations: String,
    pub base_url: String,
    /// Google tag ID; `gtag.js` is only loaded when set.
    pub tag_id: Option<String>,
    /// Inline `gtag` bootstrap statements.
    pub bootstrap_script: String,
    pub nonce: String,
    pub services: &'static [Service],
}

impl Layout {
    #[must_use]
    pub fn new(state: &AppState, nonce: &CspNonce) -> Self {
        let config: &SiteConfig = state.config();
        let tag_id = config.analytics.google_ads_id.clone();
        let bootstrap_script = tag_id
            .as_deref()
            .map(|id| {
                bootstrap_commands(id)
                    .iter()
                    .map(GtagCommand::to_script)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        Self {
            business_name: config.business.name.clone(),
            phone_number: config.business.phone_number.clone(),
            email: config.business.email.to_string(),
            locations: config.business.locations.clone(),
            base_url: config.base_url.clone(),
            tag_id,
            bootstrap_script,
            nonce: nonce.value().to_string(),
            services: state.catalog().all(),
        }
    }
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contact::form_page)
                .merge(post(contact::submit_lead).layer(lead_form_rate_limiter())),
        )
        .route("/call", get(contact::call))
        .route("/chat", get(contact::chat))
        .route("/email", get(contact::email))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/appliance/{id}", get(appliance::show))
        .nest("/contact", contact_routes())
}
