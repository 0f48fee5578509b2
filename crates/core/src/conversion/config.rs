//! Conversion configuration.
//!
//! Built once at startup and never mutated; the site shares it behind its
//! application state.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_COUNTRY_CODE;

/// The tracked contact actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    PhoneCall,
    WhatsApp,
}

impl ConversionKind {
    /// The label a freshly generated config carries until someone pastes the
    /// real one from the ad platform.
    #[must_use]
    pub const fn placeholder_label(self) -> &'static str {
        match self {
            Self::PhoneCall => "YOUR_PHONE_CALL_LABEL",
            Self::WhatsApp => "YOUR_WHATSAPP_LABEL",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhoneCall => "phone_call",
            Self::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a conversion is sent: an ads account and one of its conversion labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTarget {
    /// Ads account / tag ID, e.g. `AW-17395932761`.
    pub account_id: String,
    pub event_label: String,
}

impl ConversionTarget {
    #[must_use]
    pub fn new(account_id: impl Into<String>, event_label: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            event_label: event_label.into(),
        }
    }

    /// A target whose label is still the placeholder for `kind`.
    #[must_use]
    pub fn placeholder(account_id: impl Into<String>, kind: ConversionKind) -> Self {
        Self::new(account_id, kind.placeholder_label())
    }

    /// The `send_to` value: `<account_id>/<event_label>`.
    #[must_use]
    pub fn send_to(&self) -> String {
        format!("{}/{}", self.account_id, self.event_label)
    }
}

/// Process-wide conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub phone_call: ConversionTarget,
    pub whatsapp: ConversionTarget,
    /// Master switch; `false` turns every report into a logged no-op.
    pub tracking_enabled: bool,
    /// Value attached to phone-call and chat conversions.
    pub value: Decimal,
    /// ISO 4217 code for `value`.
    pub currency: String,
    /// Prepended to local phone numbers during normalization.
    pub default_country_code: String,
}

impl ConversionConfig {
    /// Value attached to phone-call and chat conversions unless configured.
    pub const DEFAULT_VALUE: Decimal = Decimal::from_parts(3500, 0, 0, false, 0);
    /// Value used for custom conversions when the caller gives none.
    pub const DEFAULT_CUSTOM_VALUE: Decimal = Decimal::ONE;
    /// Currency of the business's market.
    pub const DEFAULT_CURRENCY: &'static str = "AED";

    /// Tracking enabled, both labels left at their placeholders.
    #[must_use]
    pub fn new(account_id: &str) -> Self {
        Self {
            phone_call: ConversionTarget::placeholder(account_id, ConversionKind::PhoneCall),
            whatsapp: ConversionTarget::placeholder(account_id, ConversionKind::WhatsApp),
            tracking_enabled: true,
            value: Self::DEFAULT_VALUE,
            currency: Self::DEFAULT_CURRENCY.to_string(),
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }

    /// The configured target for `kind`.
    #[must_use]
    pub const fn target(&self, kind: ConversionKind) -> &ConversionTarget {
        match kind {
            ConversionKind::PhoneCall => &self.phone_call,
            ConversionKind::WhatsApp => &self.whatsapp,
        }
    }

    /// Whether the label for `kind` was never filled in.
    #[must_use]
    pub fn is_placeholder(&self, kind: ConversionKind) -> bool {
        self.target(kind).event_label == kind.placeholder_label()
    }
}
