//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::Layout;
use crate::routes::contact::LeadFormView;
use crate::state::AppState;

/// Reasons to pick us, shown under the hero.
const HIGHLIGHTS: &[(&str, &str)] = &[
    ("Same-day visits", "Technicians across the city, most repairs done on the first visit."),
    ("Genuine parts", "Original manufacturer parts with a 90-day warranty."),
    ("Upfront pricing", "You approve the quote before any work starts."),
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub highlights: &'static [(&'static str, &'static str)],
    pub lead: LeadFormView,
}

/// Display the home page.
#[instrument(skip(state, nonce))]
pub async fn home(State(state): State<AppState>, nonce: CspNonce) -> HomeTemplate {
    HomeTemplate {
        layout: Layout::new(&state, &nonce),
        highlights: HIGHLIGHTS,
        lead: LeadFormView::default(),
    }
}
