//! `gtag` reporting sink.
//!
//! The browser's tag function is the real sink. On the server a report is
//! collected per request and rendered into the hand-off page, where the
//! visitor's browser runs it before the contact action.

use std::sync::{Mutex, PoisonError};

use appliance_masters_core::{GtagCommand, ReportingSink, SinkError};

/// Commands every page runs once `gtag.js` is requested.
#[must_use]
pub fn bootstrap_commands(tag_id: &str) -> Vec<GtagCommand> {
    vec![
        GtagCommand::Js,
        GtagCommand::Config {
            target: tag_id.to_string(),
        },
    ]
}

/// Per-request sink collecting `gtag` commands.
///
/// Available only when a Google tag is configured; otherwise the page never
/// loads the tag and reports are skipped.
#[derive(Debug, Default)]
pub struct GtagScriptSink {
    tag_id: Option<String>,
    commands: Mutex<Vec<GtagCommand>>,
}

impl GtagScriptSink {
    #[must_use]
    pub fn new(tag_id: Option<String>) -> Self {
        Self {
            tag_id,
            commands: Mutex::new(Vec::new()),
        }
    }

    /// The configured tag ID, if any.
    #[must_use]
    pub fn tag_id(&self) -> Option<&str> {
        self.tag_id.as_deref()
    }

    /// Consume the sink, returning the collected commands in order.
    #[must_use]
    pub fn into_commands(self) -> Vec<GtagCommand> {
        self.commands
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Consume the sink, returning the collected commands as script statements.
    #[must_use]
    pub fn into_scripts(self) -> Vec<String> {
        self.into_commands()
            .iter()
            .map(GtagCommand::to_script)
            .collect()
    }
}

impl ReportingSink for GtagScriptSink {
    fn is_available(&self) -> bool {
        self.tag_id.is_some()
    }

    fn emit(&self, command: GtagCommand) -> Result<(), SinkError> {
        if self.tag_id.is_none() {
            return Err(SinkError::Rejected("no Google tag installed".to_string()));
        }
        self.commands
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(command);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unconfigured_sink_is_unavailable() {
        let sink = GtagScriptSink::new(None);
        assert!(!sink.is_available());
        assert!(sink.emit(GtagCommand::Js).is_err());
        assert!(sink.into_commands().is_empty());
    }

    #[test]
    fn test_collects_commands_in_order() {
        let sink = GtagScriptSink::new(Some("AW-1".to_string()));
        assert!(sink.is_available());

        sink.emit(GtagCommand::set_user_data(json!({ "email": "a@b.co" })))
            .unwrap();
        sink.emit(GtagCommand::Event {
            name: "conversion".to_string(),
            params: serde_json::Map::new(),
        })
        .unwrap();

        let scripts = sink.into_scripts();
        assert_eq!(
            scripts,
            vec![
                "gtag('set', \"user_data\", {\"email\":\"a@b.co\"});".to_string(),
                "gtag('event', \"conversion\", {});".to_string(),
            ]
        );
    }

    #[test]
    fn test_bootstrap_commands() {
        let scripts: Vec<String> = bootstrap_commands("AW-17395932761")
            .iter()
            .map(GtagCommand::to_script)
            .collect();
        assert_eq!(
            scripts,
            vec![
                "gtag('js', new Date());".to_string(),
                "gtag('config', \"AW-17395932761\");".to_string(),
            ]
        );
    }
}
