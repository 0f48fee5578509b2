//! The reporting sink seam.

use thiserror::Error;

use super::event::GtagCommand;

/// Errors a sink may raise while accepting a command.
///
/// The reporter absorbs all of them; they only ever reach the logs.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink refused the command.
    #[error("sink rejected command: {0}")]
    Rejected(String),

    /// The sink's internal buffer was poisoned by a panicking writer.
    #[error("sink buffer poisoned")]
    Poisoned,
}

/// Receiver of `gtag` commands.
///
/// In the browser this is the global tag function, which may not have loaded
/// yet. `is_available` reports that condition; it is expected, not an error.
pub trait ReportingSink: Send + Sync {
    /// Whether the tag function is present and can take commands.
    fn is_available(&self) -> bool;

    /// Hand one command to the tag function.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the command could not be accepted.
    fn emit(&self, command: GtagCommand) -> Result<(), SinkError>;
}

/// Sink substituted when no tag is installed. Never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSink;

impl ReportingSink for UnavailableSink {
    fn is_available(&self) -> bool {
        false
    }

    fn emit(&self, _command: GtagCommand) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{GtagCommand, ReportingSink, SinkError};

    /// Records every command; can be made unavailable or failing.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub unavailable: bool,
        pub failing: bool,
        commands: Mutex<Vec<GtagCommand>>,
    }

    impl RecordingSink {
        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        #[allow(clippy::unwrap_used)]
        pub fn commands(&self) -> Vec<GtagCommand> {
            self.commands.lock().unwrap().clone()
        }
    }

    impl ReportingSink for RecordingSink {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn emit(&self, command: GtagCommand) -> Result<(), SinkError> {
            if self.failing {
                return Err(SinkError::Rejected("gtag threw".to_string()));
            }
            self.commands
                .lock()
                .map_err(|_| SinkError::Poisoned)?
                .push(command);
            Ok(())
        }
    }
}
