//! CSP nonce middleware for inline `gtag` scripts.
//!
//! Every page bootstraps the Google tag inline, and the contact hand-off page
//! runs the collected conversion calls inline. Both script elements carry the
//! per-request nonce, which the CSP header then allows.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;

/// A CSP nonce value for inline scripts (128-bit, base64-encoded).
#[derive(Clone, Debug, Default)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Generate a new random nonce.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    /// Get the nonce value for use in templates.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// The `'nonce-...'` source expression, or `None` for an empty nonce.
    #[must_use]
    pub fn source(&self) -> Option<String> {
        (!self.0.is_empty()).then(|| format!("'nonce-{}'", self.0))
    }
}

/// Middleware that generates a CSP nonce and stores it in request extensions.
///
/// The nonce is also copied to the response extensions so
/// `security_headers_middleware` can build the matching CSP header.
pub async fn csp_nonce_middleware(mut request: Request, next: Next) -> Response {
    let nonce = CspNonce::generate();
    request.extensions_mut().insert(nonce.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(nonce);
    response
}

impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!(
                "CSP nonce not found in request extensions - middleware may be misconfigured"
            );
            Self::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique_base64() {
        let a = CspNonce::generate();
        let b = CspNonce::generate();
        assert_ne!(a.value(), b.value());
        assert_eq!(a.value().len(), 24);
    }

    #[test]
    fn test_source() {
        assert_eq!(
            CspNonce("abc".to_string()).source().as_deref(),
            Some("'nonce-abc'")
        );
        assert_eq!(CspNonce::default().source(), None);
    }
}
