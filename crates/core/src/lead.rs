//! The "request a technician" form.
//!
//! There is no backend for leads: a valid submission becomes a prefilled chat
//! message and is then forgotten.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ContactIdentity;

/// A validation problem with a [`LeadForm`], shown next to its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadFormError {
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("Please enter a valid phone number")]
    PhoneTooShort { min: usize },
    #[error("Please select a service")]
    MissingService,
}

impl LeadFormError {
    /// Name of the form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name",
            Self::PhoneTooShort { .. } => "phone",
            Self::MissingService => "service",
        }
    }
}

/// A submitted lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Service id or name picked from the catalog.
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl LeadForm {
    pub const MIN_NAME_CHARS: usize = 2;
    pub const MIN_PHONE_CHARS: usize = 10;

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns all problems found, in field order.
    pub fn validate(&self) -> Result<(), Vec<LeadFormError>> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < Self::MIN_NAME_CHARS {
            errors.push(LeadFormError::NameTooShort {
                min: Self::MIN_NAME_CHARS,
            });
        }
        if self.phone.trim().chars().count() < Self::MIN_PHONE_CHARS {
            errors.push(LeadFormError::PhoneTooShort {
                min: Self::MIN_PHONE_CHARS,
            });
        }
        if self.service.trim().is_empty() {
            errors.push(LeadFormError::MissingService);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The chat message sent to the business.
    #[must_use]
    pub fn chat_message(&self) -> String {
        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("N/A");

        format!(
            "New Service Request:\nName: {}\nPhone: {}\nService: {}\nMessage: {message}",
            self.name.trim(),
            self.phone.trim(),
            self.service.trim(),
        )
    }

    /// Visitor details for enhanced conversions.
    #[must_use]
    pub fn identity(&self) -> ContactIdentity {
        ContactIdentity::with_name_and_phone(self.name.trim(), self.phone.trim())
    }
}
