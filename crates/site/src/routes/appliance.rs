//! Service landing pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::content::Service;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::Layout;
use crate::routes::contact::LeadFormView;
use crate::state::AppState;

/// Landing page for one service.
#[derive(Template, WebTemplate)]
#[template(path = "appliance.html")]
pub struct ApplianceTemplate {
    pub layout: Layout,
    pub service: &'static Service,
    /// Chat CTA prefilled with this service.
    pub chat_href: String,
    pub lead: LeadFormView,
}

/// Display a service landing page.
///
/// GET /appliance/{id}
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    nonce: CspNonce,
    Path(id): Path<String>,
) -> Result<ApplianceTemplate> {
    let service = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    let mut lead = LeadFormView::default();
    lead.form.service = service.name.to_string();

    Ok(ApplianceTemplate {
        layout: Layout::new(&state, &nonce),
        service,
        chat_href: service.chat_href(),
        lead,
    })
}
