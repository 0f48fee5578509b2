//! URI builders for the three contact channels.

/// Keep only ASCII digits.
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Telephone dial intent for `number`, without display separators.
#[must_use]
pub fn tel_uri(number: &str) -> String {
    let dialable: String = number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{dialable}")
}

/// Chat deep link: `<base>/<digits>?text=<encoded message>`.
///
/// ```
/// use appliance_masters_core::contact::chat_link;
///
/// assert_eq!(
///     chat_link("https://wa.me", "+971 50 123 4567", "Hi there"),
///     "https://wa.me/971501234567?text=Hi%20there"
/// );
/// ```
#[must_use]
pub fn chat_link(base_url: &str, number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        digits_only(number),
        urlencoding::encode(message)
    )
}

/// Mail-compose URI with encoded subject and body.
#[must_use]
pub fn mailto_uri(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{address}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
