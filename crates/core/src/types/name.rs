//! Full-name splitting for enhanced conversions.

/// First and last name derived from a full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Split a full name on whitespace.
///
/// One token becomes the first name. With several tokens the first is the
/// first name and the rest, joined by single spaces, is the last name.
///
/// ```
/// use appliance_masters_core::split_name;
///
/// let parts = split_name("Sarah Ali Khan");
/// assert_eq!(parts.first.as_deref(), Some("Sarah"));
/// assert_eq!(parts.last.as_deref(), Some("Ali Khan"));
/// ```
#[must_use]
pub fn split_name(full_name: &str) -> NameParts {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().map(str::to_owned);
    let rest: Vec<&str> = tokens.collect();
    let last = (!rest.is_empty()).then(|| rest.join(" "));
    NameParts { first, last }
}
