//! The conversion reporter.

use rust_decimal::Decimal;

use super::config::{ConversionConfig, ConversionKind, ConversionTarget};
use super::event::{ConversionEvent, GtagCommand};
use super::sink::ReportingSink;
use crate::types::ContactIdentity;

/// What happened to a conversion report.
///
/// Purely informational: callers are free to ignore it, and the contact
/// action must go ahead whatever it says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// One event was handed to the sink.
    Sent,
    /// Tracking is switched off.
    Disabled,
    /// The tag function is not loaded.
    SinkUnavailable,
    /// The label for this kind was never configured.
    PlaceholderLabel,
    /// The sink raised; the error was logged.
    Failed,
}

/// What happened to an enhanced-conversions user-data report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDataOutcome {
    Sent,
    /// Neither email nor phone survived validation.
    NothingToSend,
    SinkUnavailable,
    Failed,
}

/// Turns contact attempts into at most one `gtag` event each.
///
/// Guards short-circuit in a fixed order: tracking disabled, then sink
/// unavailable, then placeholder label.
#[derive(Clone, Copy)]
pub struct ConversionReporter<'a> {
    config: &'a ConversionConfig,
    sink: &'a dyn ReportingSink,
}

impl<'a> ConversionReporter<'a> {
    #[must_use]
    pub const fn new(config: &'a ConversionConfig, sink: &'a dyn ReportingSink) -> Self {
        Self { config, sink }
    }

    #[must_use]
    pub const fn config(&self) -> &'a ConversionConfig {
        self.config
    }

    /// Attach normalized visitor details for enhanced conversions.
    ///
    /// Invalid fields are dropped. Nothing is sent unless an email or phone
    /// number survives.
    pub fn set_user_data(&self, identity: &ContactIdentity) -> UserDataOutcome {
        if !self.sink.is_available() {
            tracing::debug!("tag not loaded, skipping enhanced conversions user data");
            return UserDataOutcome::SinkUnavailable;
        }

        let normalized = identity.normalize(&self.config.default_country_code);
        if !normalized.is_reportable() {
            tracing::debug!("no valid email or phone, skipping enhanced conversions user data");
            return UserDataOutcome::NothingToSend;
        }

        match self.sink.emit(GtagCommand::set_user_data(normalized.user_data())) {
            Ok(()) => {
                tracing::info!(
                    has_email = normalized.email.is_some(),
                    has_phone = normalized.phone_number.is_some(),
                    has_name = normalized.first_name.is_some(),
                    "enhanced conversions user data set"
                );
                UserDataOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to set enhanced conversions user data");
                UserDataOutcome::Failed
            }
        }
    }

    /// Report a phone-call or chat conversion.
    ///
    /// With an identity, user data is set first on a best-effort basis.
    pub fn track_conversion(
        &self,
        kind: ConversionKind,
        identity: Option<&ContactIdentity>,
    ) -> ReportOutcome {
        if let Some(identity) = identity {
            self.set_user_data(identity);
        }

        if !self.config.tracking_enabled {
            tracing::debug!(%kind, "conversion tracking is disabled");
            return ReportOutcome::Disabled;
        }

        if !self.sink.is_available() {
            tracing::warn!(%kind, "tag not loaded, conversion tracking skipped");
            return ReportOutcome::SinkUnavailable;
        }

        if self.config.is_placeholder(kind) {
            tracing::warn!(
                %kind,
                label = kind.placeholder_label(),
                "conversion label not configured, conversion tracking skipped"
            );
            return ReportOutcome::PlaceholderLabel;
        }

        let event = ConversionEvent::new(
            self.config.target(kind),
            self.config.value,
            &self.config.currency,
        );
        self.send(event, Some(kind))
    }

    /// Report an arbitrary conversion addressed by account and label.
    ///
    /// Value defaults to 1 and currency to the configured one. There is no
    /// placeholder check: custom labels have no default.
    pub fn track_custom_conversion(
        &self,
        account_id: &str,
        event_label: &str,
        value: Option<Decimal>,
        currency: Option<&str>,
    ) -> ReportOutcome {
        if !self.config.tracking_enabled {
            tracing::debug!(event_label, "conversion tracking is disabled");
            return ReportOutcome::Disabled;
        }

        if !self.sink.is_available() {
            tracing::warn!(event_label, "tag not loaded, conversion tracking skipped");
            return ReportOutcome::SinkUnavailable;
        }

        let event = ConversionEvent::new(
            &ConversionTarget::new(account_id, event_label),
            value.unwrap_or(ConversionConfig::DEFAULT_CUSTOM_VALUE),
            currency.unwrap_or(&self.config.currency),
        );
        self.send(event, None)
    }

    fn send(&self, event: ConversionEvent, kind: Option<ConversionKind>) -> ReportOutcome {
        let send_to = event.send_to();
        let value = event.value;
        let currency = event.currency.clone();

        match self.sink.emit(event.into_command()) {
            Ok(()) => {
                tracing::info!(?kind, %send_to, %value, %currency, "conversion tracked");
                ReportOutcome::Sent
            }
            Err(e) => {
                tracing::error!(?kind, %send_to, error = %e, "failed to track conversion");
                ReportOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::conversion::sink::testing::RecordingSink;

    fn configured() -> ConversionConfig {
        let mut config = ConversionConfig::new("AW-17395932761");
        config.phone_call.event_label = "call-label".to_string();
        config.whatsapp.event_label = "chat-label".to_string();
        config
    }

    #[test]
    fn test_track_conversion_sends_event() {
        let config = configured();
        let sink = RecordingSink::default();
        let reporter = ConversionReporter::new(&config, &sink);

        let outcome = reporter.track_conversion(ConversionKind::PhoneCall, None);

        assert_eq!(outcome, ReportOutcome::Sent);
        let commands = sink.commands();
        assert_eq!(commands.len(), 1);
        let GtagCommand::Event { name, params } = commands.first().unwrap() else {
            panic!("expected event command");
        };
        assert_eq!(name, "conversion");
        assert_eq!(
            serde_json::Value::Object(params.clone()),
            json!({
                "send_to": "AW-17395932761/call-label",
                "value": 3500.0,
                "currency": "AED",
            })
        );
    }

    #[test]
    fn test_whatsapp_uses_its_own_label() {
        let config = configured();
        let sink = RecordingSink::default();
        ConversionReporter::new(&config, &sink).track_conversion(ConversionKind::WhatsApp, None);

        let commands = sink.commands();
        let GtagCommand::Event { params, .. } = commands.first().unwrap() else {
            panic!("expected event command");
        };
        assert_eq!(params["send_to"], "AW-17395932761/chat-label");
    }

    #[test]
    #[traced_test]
    fn test_disabled_tracking_is_a_noop() {
        let mut config = configured();
        config.tracking_enabled = false;
        let sink = RecordingSink::default();

        let outcome =
            ConversionReporter::new(&config, &sink).track_conversion(ConversionKind::PhoneCall, None);

        assert_eq!(outcome, ReportOutcome::Disabled);
        assert!(sink.commands().is_empty());
        assert!(logs_contain("conversion tracking is disabled"));
    }

    #[test]
    #[traced_test]
    fn test_identity_with_unavailable_sink_sends_nothing() {
        let config = configured();
        let sink = RecordingSink::unavailable();
        let reporter = ConversionReporter::new(&config, &sink);
        let identity = ContactIdentity::with_name_and_phone("Ahmed Khan", "0501234567");

        assert_eq!(
            reporter.set_user_data(&identity),
            UserDataOutcome::SinkUnavailable
        );
        assert_eq!(
            reporter.track_conversion(ConversionKind::WhatsApp, Some(&identity)),
            ReportOutcome::SinkUnavailable
        );
        assert!(sink.commands().is_empty());
        assert!(logs_contain("tag not loaded, conversion tracking skipped"));
    }

    #[test]
    fn test_identity_is_set_before_disabled_guard() {
        let mut config = configured();
        config.tracking_enabled = false;
        let sink = RecordingSink::default();
        let identity = ContactIdentity::with_name_and_phone("Ahmed Khan", "0501234567");

        let outcome = ConversionReporter::new(&config, &sink)
            .track_conversion(ConversionKind::WhatsApp, Some(&identity));

        assert_eq!(outcome, ReportOutcome::Disabled);
        let commands = sink.commands();
        assert_eq!(commands.len(), 1);
        let GtagCommand::Set { target, params } = commands.first().unwrap() else {
            panic!("expected set command");
        };
        assert_eq!(target, "user_data");
        assert_eq!(params["phone_number"], "+971501234567");
    }

    #[test]
    #[traced_test]
    fn test_unavailable_sink_is_a_noop() {
        let config = configured();
        let before = config.clone();
        let sink = RecordingSink::unavailable();
        let reporter = ConversionReporter::new(&config, &sink);

        assert_eq!(
            reporter.track_conversion(ConversionKind::PhoneCall, None),
            ReportOutcome::SinkUnavailable
        );
        assert_eq!(
            reporter.track_conversion(ConversionKind::PhoneCall, None),
            ReportOutcome::SinkUnavailable
        );
        assert!(sink.commands().is_empty());
        assert_eq!(config, before);
        assert!(logs_contain("tag not loaded"));
    }

    #[test]
    #[traced_test]
    fn test_placeholder_label_never_reaches_sink() {
        let config = ConversionConfig::new("AW-17395932761");
        let sink = RecordingSink::default();

        let outcome =
            ConversionReporter::new(&config, &sink).track_conversion(ConversionKind::WhatsApp, None);

        assert_eq!(outcome, ReportOutcome::PlaceholderLabel);
        assert!(sink.commands().is_empty());
        assert!(logs_contain("conversion label not configured"));
    }

    #[test]
    fn test_disabled_guard_runs_before_availability_guard() {
        let mut config = ConversionConfig::new("AW-1");
        config.tracking_enabled = false;
        let sink = RecordingSink::unavailable();

        assert_eq!(
            ConversionReporter::new(&config, &sink).track_conversion(ConversionKind::PhoneCall, None),
            ReportOutcome::Disabled
        );
    }

    #[test]
    fn test_availability_guard_runs_before_placeholder_guard() {
        let config = ConversionConfig::new("AW-1");
        let sink = RecordingSink::unavailable();

        assert_eq!(
            ConversionReporter::new(&config, &sink).track_conversion(ConversionKind::PhoneCall, None),
            ReportOutcome::SinkUnavailable
        );
    }

    #[test]
    #[traced_test]
    fn test_failing_sink_is_absorbed() {
        let config = configured();
        let sink = RecordingSink::failing();

        let outcome =
            ConversionReporter::new(&config, &sink).track_conversion(ConversionKind::PhoneCall, None);

        assert_eq!(outcome, ReportOutcome::Failed);
        assert!(logs_contain("failed to track conversion"));
    }

    #[test]
    fn test_identity_sets_user_data_before_event() {
        let config = configured();
        let sink = RecordingSink::default();
        let identity = ContactIdentity {
            name: Some("Sarah Ali Khan".to_string()),
            email: Some("  Sarah@Example.COM ".to_string()),
            phone: Some("0501234567".to_string()),
            ..ContactIdentity::default()
        };

        ConversionReporter::new(&config, &sink)
            .track_conversion(ConversionKind::WhatsApp, Some(&identity));

        let commands = sink.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands.first(),
            Some(&GtagCommand::Set {
                target: "user_data".to_string(),
                params: json!({
                    "email": "sarah@example.com",
                    "phone_number": "+971501234567",
                    "address": { "first_name": "Sarah", "last_name": "Ali Khan" },
                }),
            })
        );
        assert_eq!(commands.get(1).map(GtagCommand::command), Some("event"));
    }

    #[test]
    fn test_user_data_set_even_when_label_is_placeholder() {
        let config = ConversionConfig::new("AW-1");
        let sink = RecordingSink::default();
        let identity = ContactIdentity::with_name_and_phone("Ahmed", "0501234567");

        let outcome = ConversionReporter::new(&config, &sink)
            .track_conversion(ConversionKind::PhoneCall, Some(&identity));

        assert_eq!(outcome, ReportOutcome::PlaceholderLabel);
        assert_eq!(sink.commands().len(), 1);
    }

    #[test]
    fn test_user_data_without_email_or_phone_is_skipped() {
        let config = configured();
        let sink = RecordingSink::default();
        let identity = ContactIdentity {
            name: Some("Ahmed".to_string()),
            email: Some("nope".to_string()),
            phone: Some("12".to_string()),
            ..ContactIdentity::default()
        };

        let outcome = ConversionReporter::new(&config, &sink).set_user_data(&identity);

        assert_eq!(outcome, UserDataOutcome::NothingToSend);
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_user_data_failure_does_not_block_event() {
        let config = configured();
        let sink = RecordingSink::failing();
        let identity = ContactIdentity::with_name_and_phone("Ahmed", "0501234567");
        let reporter = ConversionReporter::new(&config, &sink);

        assert_eq!(reporter.set_user_data(&identity), UserDataOutcome::Failed);
        assert_eq!(
            reporter.track_conversion(ConversionKind::PhoneCall, Some(&identity)),
            ReportOutcome::Failed
        );
    }

    #[test]
    fn test_custom_conversion_defaults() {
        let config = ConversionConfig::new("AW-1");
        let sink = RecordingSink::default();

        let outcome = ConversionReporter::new(&config, &sink).track_custom_conversion(
            "AW-2",
            "quote-request",
            None,
            None,
        );

        assert_eq!(outcome, ReportOutcome::Sent);
        let commands = sink.commands();
        let GtagCommand::Event { params, .. } = commands.first().unwrap() else {
            panic!("expected event command");
        };
        assert_eq!(params["send_to"], "AW-2/quote-request");
        assert_eq!(params["value"], 1.0);
        assert_eq!(params["currency"], "AED");
    }

    #[test]
    fn test_custom_conversion_with_value_and_currency() {
        let config = ConversionConfig::new("AW-1");
        let sink = RecordingSink::default();

        ConversionReporter::new(&config, &sink).track_custom_conversion(
            "AW-2",
            "YOUR_PHONE_CALL_LABEL",
            Some(Decimal::new(25050, 2)),
            Some("USD"),
        );

        let commands = sink.commands();
        let GtagCommand::Event { params, .. } = commands.first().unwrap() else {
            panic!("expected event command");
        };
        assert_eq!(params["value"], 250.5);
        assert_eq!(params["currency"], "USD");
    }

    #[test]
    fn test_custom_conversion_respects_guards() {
        let mut config = ConversionConfig::new("AW-1");
        let unavailable = RecordingSink::unavailable();
        assert_eq!(
            ConversionReporter::new(&config, &unavailable)
                .track_custom_conversion("AW-2", "x", None, None),
            ReportOutcome::SinkUnavailable
        );

        config.tracking_enabled = false;
        let sink = RecordingSink::default();
        assert_eq!(
            ConversionReporter::new(&config, &sink).track_custom_conversion("AW-2", "x", None, None),
            ReportOutcome::Disabled
        );
        assert!(sink.commands().is_empty());
    }
}
