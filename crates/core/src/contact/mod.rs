//! Contact actions behind every call-to-action.
//!
//! - [`links`] - `tel:`, chat deep link, and `mailto:` builders
//! - [`dispatcher`] - reports the conversion, then performs the action

pub mod dispatcher;
pub mod links;

pub use dispatcher::{ContactAction, ContactDispatcher, ContactSettings, Navigator};
pub use links::{chat_link, digits_only, mailto_uri, tel_uri};
