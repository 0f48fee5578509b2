//! Conversion events and the commands understood by the reporting sink.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::{Map, Number, Value, json};

use super::config::ConversionTarget;

/// One reportable contact attempt. Built per call and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionEvent {
    pub account_id: String,
    pub event_label: String,
    pub value: Decimal,
    pub currency: String,
}

impl ConversionEvent {
    #[must_use]
    pub fn new(target: &ConversionTarget, value: Decimal, currency: &str) -> Self {
        Self {
            account_id: target.account_id.clone(),
            event_label: target.event_label.clone(),
            value,
            currency: currency.to_string(),
        }
    }

    /// The `send_to` value: `<account_id>/<event_label>`.
    #[must_use]
    pub fn send_to(&self) -> String {
        format!("{}/{}", self.account_id, self.event_label)
    }

    /// Parameters of the `gtag('event', 'conversion', ...)` call.
    ///
    /// `value` is emitted as a JSON number, as the tag expects.
    #[must_use]
    pub fn params(&self) -> Value {
        let value = self
            .value
            .to_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number);

        json!({
            "send_to": self.send_to(),
            "value": value,
            "currency": self.currency,
        })
    }

    /// The sink command reporting this event.
    #[must_use]
    pub fn into_command(self) -> GtagCommand {
        let params = match self.params() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        GtagCommand::Event {
            name: "conversion".to_string(),
            params,
        }
    }
}

/// A call to the ad platform's global tag function: `gtag(command, target, params)`.
#[derive(Debug, Clone, PartialEq)]
pub enum GtagCommand {
    /// `gtag('js', new Date())` - marks the tag as loaded.
    Js,
    /// `gtag('config', target)` - registers a tag ID.
    Config { target: String },
    /// `gtag('event', name, params)`.
    Event {
        name: String,
        params: Map<String, Value>,
    },
    /// `gtag('set', target, params)`, e.g. `user_data` for enhanced conversions.
    Set { target: String, params: Value },
}

impl GtagCommand {
    /// Enhanced-conversion user data.
    #[must_use]
    pub fn set_user_data(params: Value) -> Self {
        Self::Set {
            target: "user_data".to_string(),
            params,
        }
    }

    /// The command name passed as the first argument.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Config { .. } => "config",
            Self::Event { .. } => "event",
            Self::Set { .. } => "set",
        }
    }

    /// Render as a JavaScript statement safe to place inside a `<script>` element.
    #[must_use]
    pub fn to_script(&self) -> String {
        match self {
            Self::Js => "gtag('js', new Date());".to_string(),
            Self::Config { target } => {
                format!("gtag('config', {});", script_json(&Value::from(target.as_str())))
            }
            Self::Event { name, params } => format!(
                "gtag('event', {}, {});",
                script_json(&Value::from(name.as_str())),
                script_json(&Value::Object(params.clone()))
            ),
            Self::Set { target, params } => format!(
                "gtag('set', {}, {});",
                script_json(&Value::from(target.as_str())),
                script_json(params)
            ),
        }
    }
}

/// JSON text with `<` escaped so user data cannot close the script element.
#[must_use]
pub fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> ConversionEvent {
        ConversionEvent::new(
            &ConversionTarget::new("AW-17395932761", "call-label"),
            Decimal::new(3500, 0),
            "AED",
        )
    }

    #[test]
    fn test_params_shape() {
        assert_eq!(
            event().params(),
            json!({
                "send_to": "AW-17395932761/call-label",
                "value": 3500.0,
                "currency": "AED",
            })
        );
    }

    #[test]
    fn test_into_command() {
        let command = event().into_command();
        assert_eq!(command.command(), "event");
        let GtagCommand::Event { name, params } = command else {
            panic!("expected event command");
        };
        assert_eq!(name, "conversion");
        assert_eq!(params["send_to"], "AW-17395932761/call-label");
    }

    #[test]
    fn test_event_script() {
        let script = event().into_command().to_script();
        assert!(script.starts_with("gtag('event', \"conversion\", {"));
        assert!(script.contains("\"send_to\":\"AW-17395932761/call-label\""));
        assert!(script.ends_with("});"));
    }

    #[test]
    fn test_config_and_js_scripts() {
        assert_eq!(GtagCommand::Js.to_script(), "gtag('js', new Date());");
        assert_eq!(
            GtagCommand::Config {
                target: "AW-1".to_string()
            }
            .to_script(),
            "gtag('config', \"AW-1\");"
        );
    }

    #[test]
    fn test_script_escapes_closing_tags() {
        let command = GtagCommand::set_user_data(json!({
            "address": { "first_name": "</script><script>alert(1)" }
        }));
        let script = command.to_script();
        assert!(!script.contains("</script>"));
        assert!(script.contains("\\u003c/script>"));
    }
}
