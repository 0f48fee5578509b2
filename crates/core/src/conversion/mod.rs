//! Conversion reporting for the ad platform.
//!
//! # Flow
//!
//! ```text
//! dispatcher ─► ConversionReporter ─► ReportingSink (gtag)
//!                 │
//!                 ├─ set_user_data: normalize identity, `set user_data`
//!                 └─ track_conversion: guards, then `event conversion`
//! ```
//!
//! Tracking is an auxiliary signal. Every guard and every sink failure ends
//! in a logged, silent no-op; nothing here returns an error to the caller.

pub mod config;
pub mod event;
pub mod reporter;
pub mod sink;

pub use config::{ConversionConfig, ConversionKind, ConversionTarget};
pub use event::{ConversionEvent, GtagCommand};
pub use reporter::{ConversionReporter, ReportOutcome, UserDataOutcome};
pub use sink::{ReportingSink, SinkError, UnavailableSink};
