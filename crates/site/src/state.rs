//! Application state shared across handlers.

use std::sync::Arc;

use appliance_masters_core::{
    ContactDispatcher, ContactSettings, ConversionConfig, ConversionReporter, Navigator,
    ReportingSink,
};

use crate::config::SiteConfig;
use crate::content::ServiceCatalog;
use crate::services::GtagScriptSink;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything inside is built once
/// at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    conversion: ConversionConfig,
    contact: ContactSettings,
    catalog: ServiceCatalog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let conversion = config.conversion_config();
        let contact = config.contact_settings();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                conversion,
                contact,
                catalog: ServiceCatalog::default(),
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the conversion configuration.
    #[must_use]
    pub fn conversion(&self) -> &ConversionConfig {
        &self.inner.conversion
    }

    /// Get a reference to the contact settings.
    #[must_use]
    pub fn contact(&self) -> &ContactSettings {
        &self.inner.contact
    }

    /// Get a reference to the service catalog.
    #[must_use]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.inner.catalog
    }

    /// A fresh per-request sink for the configured tag.
    #[must_use]
    pub fn gtag_sink(&self) -> GtagScriptSink {
        GtagScriptSink::new(self.config().analytics.google_ads_id.clone())
    }

    /// A dispatcher reporting into `sink` and navigating through `navigator`.
    #[must_use]
    pub fn dispatcher<'a>(
        &'a self,
        sink: &'a dyn ReportingSink,
        navigator: &'a dyn Navigator,
    ) -> ContactDispatcher<'a> {
        ContactDispatcher::new(
            self.contact(),
            ConversionReporter::new(self.conversion(), sink),
            navigator,
        )
    }
}
