//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_BASE_URL` - Public URL for the site
//! - `BUSINESS_PHONE` - Business phone number as displayed (e.g., +971 50 123 4567)
//! - `BUSINESS_EMAIL` - Contact email address
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `BUSINESS_NAME` - Display name (default: Appliance Masters UAE)
//! - `BUSINESS_LOCATIONS` - Service area (default: Dubai and Abu Dhabi)
//! - `GOOGLE_ADS_ID` - Google Ads tag ID; without it no tag is installed
//! - `GOOGLE_ADS_PHONE_CALL_LABEL` - Phone call conversion label
//! - `GOOGLE_ADS_WHATSAPP_LABEL` - `WhatsApp` conversion label
//! - `CONVERSION_TRACKING_ENABLED` - `true`/`false` (default: true)
//! - `CONVERSION_VALUE` - Value per call/chat conversion (default: 3500)
//! - `CONVERSION_CURRENCY` - ISO 4217 code (default: AED)
//! - `DEFAULT_COUNTRY_CODE` - Prepended to local phone numbers (default: 971)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use appliance_masters_core::{
    ContactSettings, ConversionConfig, ConversionKind, ConversionTarget, DEFAULT_COUNTRY_CODE,
    Email,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Business contact details
    pub business: BusinessConfig,
    /// Google Ads conversion configuration
    pub analytics: AnalyticsConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Business contact details shown on every page.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub name: String,
    pub phone_number: String,
    pub email: Email,
    pub locations: String,
}

/// Google Ads conversion tracking configuration.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Google Ads tag ID (e.g., AW-17395932761)
    pub google_ads_id: Option<String>,
    pub phone_call_label: String,
    pub whatsapp_label: String,
    pub tracking_enabled: bool,
    pub conversion_value: Decimal,
    pub conversion_currency: String,
    pub default_country_code: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            google_ads_id: None,
            phone_call_label: ConversionKind::PhoneCall.placeholder_label().to_string(),
            whatsapp_label: ConversionKind::WhatsApp.placeholder_label().to_string(),
            tracking_enabled: true,
            conversion_value: ConversionConfig::DEFAULT_VALUE,
            conversion_currency: ConversionConfig::DEFAULT_CURRENCY.to_string(),
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env.parsed_or("SITE_HOST", "127.0.0.1".parse::<IpAddr>().ok())?;
        let port = env.parsed_or("SITE_PORT", Some(3000u16))?;
        let base_url = env.required("SITE_BASE_URL")?;

        let business = BusinessConfig::from_env(&env)?;
        let analytics = AnalyticsConfig::from_env(&env)?;

        Ok(Self {
            host,
            port,
            base_url,
            business,
            analytics,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed_or("SENTRY_SAMPLE_RATE", Some(1.0))?,
            sentry_traces_sample_rate: env.parsed_or("SENTRY_TRACES_SAMPLE_RATE", Some(0.1))?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Immutable conversion settings shared by every request.
    #[must_use]
    pub fn conversion_config(&self) -> ConversionConfig {
        let analytics = &self.analytics;
        let account_id = analytics.google_ads_id.clone().unwrap_or_default();

        ConversionConfig {
            phone_call: ConversionTarget::new(account_id.clone(), &analytics.phone_call_label),
            whatsapp: ConversionTarget::new(account_id, &analytics.whatsapp_label),
            tracking_enabled: analytics.tracking_enabled,
            value: analytics.conversion_value,
            currency: analytics.conversion_currency.clone(),
            default_country_code: analytics.default_country_code.clone(),
        }
    }

    /// Contact details and default texts for the dispatcher.
    #[must_use]
    pub fn contact_settings(&self) -> ContactSettings {
        ContactSettings::new(
            self.business.phone_number.clone(),
            self.business.email.as_str(),
        )
    }
}

impl BusinessConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let email = env.required("BUSINESS_EMAIL")?;
        let email = Email::normalize(&email)
            .map_err(|e| ConfigError::InvalidEnvVar("BUSINESS_EMAIL".to_string(), e.to_string()))?;

        let phone_number = env.required("BUSINESS_PHONE")?;
        if !phone_number.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "BUSINESS_PHONE".to_string(),
                "must contain digits".to_string(),
            ));
        }

        Ok(Self {
            name: env.or_default("BUSINESS_NAME", "Appliance Masters UAE"),
            phone_number,
            email,
            locations: env.or_default("BUSINESS_LOCATIONS", "Dubai and Abu Dhabi"),
        })
    }
}

impl AnalyticsConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            google_ads_id: env.optional("GOOGLE_ADS_ID"),
            phone_call_label: env
                .optional("GOOGLE_ADS_PHONE_CALL_LABEL")
                .unwrap_or(defaults.phone_call_label),
            whatsapp_label: env
                .optional("GOOGLE_ADS_WHATSAPP_LABEL")
                .unwrap_or(defaults.whatsapp_label),
            tracking_enabled: env.flag("CONVERSION_TRACKING_ENABLED", defaults.tracking_enabled)?,
            conversion_value: env
                .parsed_or("CONVERSION_VALUE", Some(defaults.conversion_value))?,
            conversion_currency: env
                .optional("CONVERSION_CURRENCY")
                .unwrap_or(defaults.conversion_currency),
            default_country_code: country_code(env)?.unwrap_or(defaults.default_country_code),
        })
    }

    /// Conversion kinds whose label is still the placeholder.
    #[must_use]
    pub fn unconfigured_kinds(&self) -> Vec<ConversionKind> {
        [
            (ConversionKind::PhoneCall, &self.phone_call_label),
            (ConversionKind::WhatsApp, &self.whatsapp_label),
        ]
        .into_iter()
        .filter(|(kind, label)| label.as_str() == kind.placeholder_label())
        .map(|(kind, _)| kind)
        .collect()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// `DEFAULT_COUNTRY_CODE`, which must be bare digits (`971`, not `+971`).
fn country_code(env: &Env<'_>) -> Result<Option<String>, ConfigError> {
    match env.optional("DEFAULT_COUNTRY_CODE") {
        Some(code) if !code.chars().all(|c| c.is_ascii_digit()) => Err(ConfigError::InvalidEnvVar(
            "DEFAULT_COUNTRY_CODE".to_string(),
            format!("expected digits only, got '{code}'"),
        )),
        code => Ok(code),
    }
}

/// Variable lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => default.ok_or_else(|| ConfigError::MissingEnvVar(key.to_string())),
        }
    }

    /// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
    fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got '{other}'"),
            )),
        }
    }
}
