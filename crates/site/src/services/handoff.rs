//! Navigation captured for the hand-off page.

use std::sync::{Mutex, PoisonError};

use appliance_masters_core::{ContactAction, Navigator};

/// Records the contact action so the response can perform it in the browser.
#[derive(Debug, Default)]
pub struct CapturedNavigation {
    action: Mutex<Option<ContactAction>>,
}

impl CapturedNavigation {
    /// The last action performed, if any.
    #[must_use]
    pub fn into_action(self) -> Option<ContactAction> {
        self.action
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for CapturedNavigation {
    fn perform(&self, action: ContactAction) {
        let mut slot = self.action.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_action() {
        let navigation = CapturedNavigation::default();
        navigation.perform(ContactAction::Navigate("tel:1".to_string()));
        navigation.perform(ContactAction::Navigate("tel:2".to_string()));
        assert_eq!(
            navigation.into_action(),
            Some(ContactAction::Navigate("tel:2".to_string()))
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(CapturedNavigation::default().into_action(), None);
    }
}
