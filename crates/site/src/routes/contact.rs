//! Contact route handlers.
//!
//! Every call-to-action on the site points here. The handler runs the contact
//! dispatcher against a per-request `gtag` sink and a captured navigation,
//! then renders a hand-off page that replays the reports in the browser and
//! performs the navigation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use appliance_masters_core::conversion::event::script_json;
use appliance_masters_core::{ContactAction, ContactDispatcher, LeadForm, LeadFormError};

use crate::content::Service;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::Layout;
use crate::services::CapturedNavigation;
use crate::state::AppState;

/// Longest prefilled chat message or email body accepted from a query string.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Query parameters for `/contact/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    pub message: Option<String>,
}

/// Query parameters for `/contact/email`.
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Hand-off page: runs the collected `gtag` calls, then navigates.
#[derive(Template, WebTemplate)]
#[template(path = "handoff.html")]
pub struct HandoffTemplate {
    pub layout: Layout,
    pub heading: &'static str,
    /// Collected `gtag` statements, already safe for a script element.
    pub report_script: String,
    /// Statement performing the navigation.
    pub navigation_script: String,
    /// Fallback link target.
    pub action_url: String,
}

impl HandoffTemplate {
    /// Chat CTAs and the lead form target `_blank`, so for
    /// `OpenInNewContext` this page already is the new context and both
    /// kinds of action replace its location.
    fn new(layout: Layout, heading: &'static str, scripts: &[String], action: &ContactAction) -> Self {
        let url = script_json(&serde_json::Value::from(action.url()));
        let navigation_script = format!("window.location.href = {url};");

        Self {
            layout,
            heading,
            report_script: scripts.join("\n"),
            navigation_script,
            action_url: action.url().to_string(),
        }
    }
}

/// The lead form and any validation messages.
#[derive(Debug, Clone, Default)]
pub struct LeadFormView {
    pub form: LeadForm,
    pub errors: Vec<LeadFormError>,
}

impl LeadFormView {
    /// Message for `field`, or an empty string.
    #[must_use]
    pub fn error(&self, field: &str) -> String {
        self.errors
            .iter()
            .find(|e| e.field() == field)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Whether `service` is the current choice, by name or id.
    #[must_use]
    pub fn is_selected(&self, service: &Service) -> bool {
        let choice = self.form.service.trim();
        choice == service.name || choice == service.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.form.message.as_deref().unwrap_or_default()
    }
}

/// Standalone lead form page.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub lead: LeadFormView,
}

/// Run one dispatch and build the hand-off page for the captured navigation.
fn hand_off(
    state: &AppState,
    nonce: &CspNonce,
    heading: &'static str,
    dispatch: impl FnOnce(&ContactDispatcher<'_>),
) -> Result<HandoffTemplate> {
    let sink = state.gtag_sink();
    let navigation = CapturedNavigation::default();
    dispatch(&state.dispatcher(&sink, &navigation));

    let action = navigation
        .into_action()
        .ok_or_else(|| AppError::Internal("contact dispatch did not navigate".to_string()))?;
    let scripts = sink.into_scripts();
    let reports = scripts.len().to_string();

    add_breadcrumb(
        "contact",
        heading,
        Some(&[("url", action.url()), ("reports", reports.as_str())]),
    );
    tracing::info!(url = %action.url(), reports = scripts.len(), "contact hand-off");

    Ok(HandoffTemplate::new(
        Layout::new(state, nonce),
        heading,
        &scripts,
        &action,
    ))
}

fn check_length(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > MAX_MESSAGE_CHARS => Err(AppError::BadRequest(format!(
            "{field} must be at most {MAX_MESSAGE_CHARS} characters"
        ))),
        _ => Ok(()),
    }
}

/// Dial the business.
///
/// GET /contact/call
#[instrument(skip(state, nonce))]
pub async fn call(State(state): State<AppState>, nonce: CspNonce) -> Result<HandoffTemplate> {
    hand_off(&state, &nonce, "Calling us", |dispatcher| {
        dispatcher.make_phone_call();
    })
}

/// Open a chat with an optional prefilled message.
///
/// GET /contact/chat?message=
#[instrument(skip(state, nonce, query))]
pub async fn chat(
    State(state): State<AppState>,
    nonce: CspNonce,
    Query(query): Query<ChatQuery>,
) -> Result<HandoffTemplate> {
    check_length("message", query.message.as_deref())?;
    hand_off(&state, &nonce, "Opening chat", |dispatcher| {
        dispatcher.open_chat(query.message.as_deref());
    })
}

/// Open the visitor's mail client.
///
/// GET /contact/email?subject=&body=
#[instrument(skip(state, nonce, query))]
pub async fn email(
    State(state): State<AppState>,
    nonce: CspNonce,
    Query(query): Query<EmailQuery>,
) -> Result<HandoffTemplate> {
    check_length("subject", query.subject.as_deref())?;
    check_length("body", query.body.as_deref())?;
    hand_off(&state, &nonce, "Opening your email", |dispatcher| {
        dispatcher.send_email(query.subject.as_deref(), query.body.as_deref());
    })
}

/// Display the lead form.
///
/// GET /contact
#[instrument(skip(state, nonce))]
pub async fn form_page(State(state): State<AppState>, nonce: CspNonce) -> ContactTemplate {
    ContactTemplate {
        layout: Layout::new(&state, &nonce),
        lead: LeadFormView::default(),
    }
}

/// Submit the lead form.
///
/// POST /contact
///
/// A valid lead becomes a chat message to the business, reported as a chat
/// conversion with the visitor's name and phone. Invalid input re-renders the
/// form with `400`.
#[instrument(skip(state, nonce, form), fields(service = %form.service))]
pub async fn submit_lead(
    State(state): State<AppState>,
    nonce: CspNonce,
    Form(form): Form<LeadForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        tracing::debug!(count = errors.len(), "lead form rejected");
        return (
            StatusCode::BAD_REQUEST,
            ContactTemplate {
                layout: Layout::new(&state, &nonce),
                lead: LeadFormView { form, errors },
            },
        )
            .into_response();
    }

    let message = form.chat_message();
    let identity = form.identity();
    hand_off(&state, &nonce, "Sending your request", |dispatcher| {
        dispatcher.open_chat_with_identity(&message, &identity);
    })
    .into_response()
}
