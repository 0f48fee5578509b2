//! Appliance Masters Core - conversion tracking and contact dispatch.
//!
//! This crate holds the only part of the marketing site with real logic:
//! - normalizing visitor contact data for enhanced conversions
//! - deciding whether a conversion event is reported to the ad platform
//! - building the phone, chat, and email actions behind every call-to-action
//!
//! # Architecture
//!
//! The core crate performs no I/O. The reporting sink (the `gtag` function in
//! the browser) and the navigation primitive are injected through the
//! [`ReportingSink`] and [`Navigator`] traits, so the site crate decides how
//! commands and navigations actually reach the visitor.
//!
//! # Modules
//!
//! - [`types`] - Validated email, E.164 phone, name parts, contact identities
//! - [`conversion`] - Conversion config, events, sink trait, and the reporter
//! - [`contact`] - Contact links, navigation actions, and the dispatcher
//! - [`lead`] - The "request a technician" form and its chat message

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contact;
pub mod conversion;
pub mod lead;
pub mod types;

pub use contact::{ContactAction, ContactDispatcher, ContactSettings, Navigator};
pub use conversion::{
    ConversionConfig, ConversionEvent, ConversionKind, ConversionReporter, ConversionTarget,
    GtagCommand, ReportOutcome, ReportingSink, SinkError, UnavailableSink, UserDataOutcome,
};
pub use lead::{LeadForm, LeadFormError};
pub use types::*;
