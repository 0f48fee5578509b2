//! Security headers middleware.
//!
//! Locked down by default. The only openings are the ones the Google tag
//! needs: its script origin, its beacon endpoints, and nonce-tagged inline
//! scripts.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::csp::CspNonce;

/// Origins the Google tag loads from and reports to.
const GTAG_SCRIPT_ORIGIN: &str = "https://www.googletagmanager.com";
const GTAG_CONNECT_ORIGINS: &str = "https://www.google.com \
     https://www.googleadservices.com \
     https://googleads.g.doubleclick.net \
     https://www.google-analytics.com";

/// Build the CSP header value for a response.
#[must_use]
pub fn content_security_policy(nonce: Option<&CspNonce>) -> String {
    let nonce_source = nonce.and_then(CspNonce::source);
    let script_src = match nonce_source {
        Some(source) => format!("'self' {source} {GTAG_SCRIPT_ORIGIN}"),
        None => format!("'self' {GTAG_SCRIPT_ORIGIN}"),
    };

    format!(
        "default-src 'none'; \
         script-src {script_src}; \
         style-src 'self' 'unsafe-inline'; \
         font-src 'self'; \
         img-src 'self' data: {GTAG_CONNECT_ORIGINS}; \
         connect-src 'self' {GTAG_CONNECT_ORIGINS}; \
         frame-src 'none'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: strict-origin-when-cross-origin` - Ads attribution needs the origin
/// - `Content-Security-Policy` - See [`content_security_policy`]
/// - `Permissions-Policy` - Deny sensitive features
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let csp = content_security_policy(response.extensions().get::<CspNonce>());
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    match HeaderValue::from_str(&csp) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::error!(error = %e, "invalid CSP header value"),
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), \
             geolocation=(), \
             microphone=(), \
             payment=(), \
             usb=(), \
             browsing-topics=()",
        ),
    );

    response
}
