//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when normalizing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input contains whitespace inside the address.
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The input contains more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) has no dot-separated suffix.
    #[error("email domain must have a dot-separated suffix")]
    MissingDomainSuffix,
}

/// A normalized email address.
///
/// The stored value is trimmed and lower-cased, and has the simple
/// `local@domain.tld` shape ad platforms expect for enhanced conversions.
///
/// ## Constraints
///
/// - No whitespace once trimmed
/// - Exactly one @ symbol with a non-empty local part
/// - The domain has a dot with at least one character on each side
///
/// ## Examples
///
/// ```
/// use appliance_masters_core::Email;
///
/// let email = Email::normalize("  John@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "john@example.com");
///
/// assert!(Email::normalize("no-at-symbol").is_err());
/// assert!(Email::normalize("user@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trim, lower-case, and validate an email address.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first shape violation found.
    pub fn normalize(raw: &str) -> Result<Self, EmailError> {
        let value = raw.trim().to_lowercase();

        if value.is_empty() {
            return Err(EmailError::Empty);
        }

        if value.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = value.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        let has_suffix = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
        if !has_suffix {
            return Err(EmailError::MissingDomainSuffix);
        }

        Ok(Self(value))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

/// Lenient normalization: the canonical address, or `None` if it is malformed.
#[must_use]
pub fn normalize_email(raw: &str) -> Option<String> {
    Email::normalize(raw).ok().map(Email::into_inner)
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
