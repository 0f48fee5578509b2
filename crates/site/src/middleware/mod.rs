//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing, span carries `request_id`)
//! 3. Request ID (add unique ID to each request)
//! 4. CSP nonce (generate per-request nonce for inline `gtag` scripts)
//! 5. Security headers (CSP allowing the Google tag, HSTS-style hardening)
//! 6. Rate limiting on the lead form (governor)

pub mod csp;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use rate_limit::lead_form_rate_limiter;
pub use request_id::{make_request_span, request_id_middleware};
pub use security_headers::security_headers_middleware;
