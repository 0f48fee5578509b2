//! Visitor identity for enhanced conversions.
//!
//! A [`ContactIdentity`] is whatever the visitor typed; it lives only for the
//! duration of one reporting call. [`NormalizedIdentity`] is the projection
//! that is safe to hand to the ad platform: every field in it passed
//! validation, and anything that did not is silently dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::email::normalize_email;
use super::name::split_name;
use super::phone::normalize_phone;

/// Raw, optional contact details supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIdentity {
    /// Full name; takes precedence over `first_name` / `last_name`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl ContactIdentity {
    /// Identity carrying only a full name and a phone number.
    #[must_use]
    pub fn with_name_and_phone(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            phone: Some(phone.into()),
            ..Self::default()
        }
    }

    /// Validate every field, dropping the ones that fail.
    #[must_use]
    pub fn normalize(&self, country_code: &str) -> NormalizedIdentity {
        let email = self.email.as_deref().and_then(normalize_email);
        let phone_number = self
            .phone
            .as_deref()
            .and_then(|phone| normalize_phone(phone, country_code));

        let (first_name, last_name) = match self.name.as_deref() {
            Some(full) if !full.trim().is_empty() => {
                let parts = split_name(full);
                (parts.first, parts.last)
            }
            _ => (trimmed(self.first_name.as_deref()), trimmed(self.last_name.as_deref())),
        };

        NormalizedIdentity {
            email,
            phone_number,
            first_name,
            last_name,
        }
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// The validated projection of a [`ContactIdentity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedIdentity {
    /// Trimmed, lower-cased email.
    pub email: Option<String>,
    /// E.164 phone number.
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NormalizedIdentity {
    /// Enhanced conversions need at least one of email or phone to match on.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        self.email.is_some() || self.phone_number.is_some()
    }

    /// The `user_data` object for `gtag('set', 'user_data', ...)`.
    ///
    /// Names are nested under `address`; absent fields are omitted.
    #[must_use]
    pub fn user_data(&self) -> Value {
        let mut data = Map::new();
        if let Some(email) = &self.email {
            data.insert("email".to_string(), Value::String(email.clone()));
        }
        if let Some(phone) = &self.phone_number {
            data.insert("phone_number".to_string(), Value::String(phone.clone()));
        }

        let mut address = Map::new();
        if let Some(first) = &self.first_name {
            address.insert("first_name".to_string(), Value::String(first.clone()));
        }
        if let Some(last) = &self.last_name {
            address.insert("last_name".to_string(), Value::String(last.clone()));
        }
        if !address.is_empty() {
            data.insert("address".to_string(), Value::Object(address));
        }

        Value::Object(data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::DEFAULT_COUNTRY_CODE;

    #[test]
    fn test_normalize_full_identity() {
        let identity = ContactIdentity {
            name: Some("Sarah Ali Khan".to_string()),
            email: Some(" Sarah@Example.com".to_string()),
            phone: Some("050 123 4567".to_string()),
            ..ContactIdentity::default()
        };

        let normalized = identity.normalize(DEFAULT_COUNTRY_CODE);
        assert_eq!(normalized.email.as_deref(), Some("sarah@example.com"));
        assert_eq!(normalized.phone_number.as_deref(), Some("+971501234567"));
        assert_eq!(normalized.first_name.as_deref(), Some("Sarah"));
        assert_eq!(normalized.last_name.as_deref(), Some("Ali Khan"));
        assert!(normalized.is_reportable());
    }

    #[test]
    fn test_invalid_fields_are_dropped() {
        let identity = ContactIdentity {
            email: Some("not-an-email".to_string()),
            phone: Some("123".to_string()),
            ..ContactIdentity::default()
        };

        let normalized = identity.normalize(DEFAULT_COUNTRY_CODE);
        assert_eq!(normalized, NormalizedIdentity::default());
        assert!(!normalized.is_reportable());
    }

    #[test]
    fn test_separate_names_used_without_full_name() {
        let identity = ContactIdentity {
            email: Some("a@b.co".to_string()),
            first_name: Some("  Ahmed ".to_string()),
            last_name: Some("   ".to_string()),
            ..ContactIdentity::default()
        };

        let normalized = identity.normalize(DEFAULT_COUNTRY_CODE);
        assert_eq!(normalized.first_name.as_deref(), Some("Ahmed"));
        assert_eq!(normalized.last_name, None);
    }

    #[test]
    fn test_full_name_wins_over_parts() {
        let identity = ContactIdentity {
            name: Some("Ahmed".to_string()),
            first_name: Some("Ignored".to_string()),
            last_name: Some("Also Ignored".to_string()),
            ..ContactIdentity::default()
        };

        let normalized = identity.normalize(DEFAULT_COUNTRY_CODE);
        assert_eq!(normalized.first_name.as_deref(), Some("Ahmed"));
        assert_eq!(normalized.last_name, None);
    }

    #[test]
    fn test_user_data_shape() {
        let normalized = NormalizedIdentity {
            email: Some("sarah@example.com".to_string()),
            phone_number: Some("+971501234567".to_string()),
            first_name: Some("Sarah".to_string()),
            last_name: None,
        };

        assert_eq!(
            normalized.user_data(),
            json!({
                "email": "sarah@example.com",
                "phone_number": "+971501234567",
                "address": { "first_name": "Sarah" }
            })
        );
    }

    #[test]
    fn test_user_data_omits_empty_address() {
        let normalized = NormalizedIdentity {
            phone_number: Some("+971501234567".to_string()),
            ..NormalizedIdentity::default()
        };

        assert_eq!(
            normalized.user_data(),
            json!({ "phone_number": "+971501234567" })
        );
    }
}
