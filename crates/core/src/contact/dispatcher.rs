//! The contact dispatcher.
//!
//! Each operation reports first and acts second. The report's outcome never
//! gates the action: a dial, chat, or email always happens.

use serde::{Deserialize, Serialize};

use super::links::{chat_link, mailto_uri, tel_uri};
use crate::conversion::{ConversionKind, ConversionReporter};
use crate::types::ContactIdentity;

/// Static contact details and default texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSettings {
    /// Business phone number as displayed, e.g. `+971 50 123 4567`.
    pub phone_number: String,
    pub email: String,
    /// Chat provider base URL, without a trailing slash.
    pub chat_base_url: String,
    pub default_chat_message: String,
    pub default_email_subject: String,
    pub default_email_body: String,
}

impl ContactSettings {
    pub const DEFAULT_CHAT_BASE_URL: &'static str = "https://wa.me";
    pub const DEFAULT_CHAT_MESSAGE: &'static str = "Hey! I want Home Appliance Repair Services";
    pub const DEFAULT_EMAIL_SUBJECT: &'static str = "Appliance Repair Service Inquiry";
    pub const DEFAULT_EMAIL_BODY: &'static str =
        "Hello, I need appliance repair services. Please contact me.";

    /// Settings for `phone_number` and `email` with the default texts.
    #[must_use]
    pub fn new(phone_number: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            email: email.into(),
            chat_base_url: Self::DEFAULT_CHAT_BASE_URL.to_string(),
            default_chat_message: Self::DEFAULT_CHAT_MESSAGE.to_string(),
            default_email_subject: Self::DEFAULT_EMAIL_SUBJECT.to_string(),
            default_email_body: Self::DEFAULT_EMAIL_BODY.to_string(),
        }
    }

    /// `tel:` URI for the business number.
    #[must_use]
    pub fn tel_uri(&self) -> String {
        tel_uri(&self.phone_number)
    }

    /// Chat deep link; a missing or blank message uses the default.
    #[must_use]
    pub fn chat_link(&self, message: Option<&str>) -> String {
        let message = non_blank(message).unwrap_or(&self.default_chat_message);
        chat_link(&self.chat_base_url, &self.phone_number, message)
    }

    /// `mailto:` URI; a missing or blank subject or body uses the default.
    #[must_use]
    pub fn mailto_uri(&self, subject: Option<&str>, body: Option<&str>) -> String {
        mailto_uri(
            &self.email,
            non_blank(subject).unwrap_or(&self.default_email_subject),
            non_blank(body).unwrap_or(&self.default_email_body),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A navigation the visitor's browser should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ContactAction {
    /// Replace the current location (dial intents, mail client).
    Navigate(String),
    /// Open in a new browsing context (chat).
    OpenInNewContext(String),
}

impl ContactAction {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Navigate(url) | Self::OpenInNewContext(url) => url,
        }
    }
}

/// The navigation primitive. How it fails, if it can, is its own business.
pub trait Navigator {
    fn perform(&self, action: ContactAction);
}

/// Entry points used by every call-to-action.
pub struct ContactDispatcher<'a> {
    settings: &'a ContactSettings,
    reporter: ConversionReporter<'a>,
    navigator: &'a dyn Navigator,
}

impl<'a> ContactDispatcher<'a> {
    #[must_use]
    pub const fn new(
        settings: &'a ContactSettings,
        reporter: ConversionReporter<'a>,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            settings,
            reporter,
            navigator,
        }
    }

    /// Report a phone-call conversion, then dial the business number.
    pub fn make_phone_call(&self) -> ContactAction {
        self.reporter.track_conversion(ConversionKind::PhoneCall, None);
        self.perform(ContactAction::Navigate(self.settings.tel_uri()))
    }

    /// Report a chat conversion, then open the chat in a new context.
    pub fn open_chat(&self, message: Option<&str>) -> ContactAction {
        self.reporter.track_conversion(ConversionKind::WhatsApp, None);
        self.perform(ContactAction::OpenInNewContext(
            self.settings.chat_link(message),
        ))
    }

    /// Like [`open_chat`](Self::open_chat), with visitor details for
    /// enhanced conversions.
    pub fn open_chat_with_identity(
        &self,
        message: &str,
        identity: &ContactIdentity,
    ) -> ContactAction {
        self.reporter
            .track_conversion(ConversionKind::WhatsApp, Some(identity));
        self.perform(ContactAction::OpenInNewContext(
            self.settings.chat_link(Some(message)),
        ))
    }

    /// Open the mail client. Email is not a tracked conversion.
    pub fn send_email(&self, subject: Option<&str>, body: Option<&str>) -> ContactAction {
        self.perform(ContactAction::Navigate(
            self.settings.mailto_uri(subject, body),
        ))
    }

    fn perform(&self, action: ContactAction) -> ContactAction {
        tracing::debug!(?action, "performing contact action");
        self.navigator.perform(action.clone());
        action
    }
}
