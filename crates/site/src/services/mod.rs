//! Request-scoped collaborators for the contact dispatcher.
//!
//! # Services
//!
//! - `gtag` - Reporting sink that turns conversion reports into inline `gtag()` calls
//! - `handoff` - Navigator that captures the contact action for the hand-off page

pub mod gtag;
pub mod handoff;

pub use gtag::{GtagScriptSink, bootstrap_commands};
pub use handoff::CapturedNavigation;
