//! Static service catalog.
//!
//! Drives the home page service grid, the per-service landing pages, and the
//! service picker in the contact form.

/// One repair service with its own landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// URL slug, e.g. `refrigerator-repair`
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub common_issues: &'static [&'static str],
}

impl Service {
    /// Prefilled chat message for this service's call-to-action.
    #[must_use]
    pub fn chat_message(&self) -> String {
        format!("Hello! I need {} service. Please help.", self.name)
    }

    /// Path of the chat dispatch endpoint with this service's message.
    #[must_use]
    pub fn chat_href(&self) -> String {
        chat_path(&self.chat_message())
    }

    /// Softer message for the home page service grid.
    #[must_use]
    pub fn inquiry_message(&self) -> String {
        format!(
            "Hello! I'm interested in {} service. Please contact me.",
            self.name
        )
    }

    /// Chat dispatch path with [`inquiry_message`](Self::inquiry_message).
    #[must_use]
    pub fn inquiry_href(&self) -> String {
        chat_path(&self.inquiry_message())
    }
}

fn chat_path(message: &str) -> String {
    format!("/contact/chat?message={}", urlencoding::encode(message))
}

const SERVICES: &[Service] = &[
    Service {
        id: "refrigerator-repair",
        name: "Refrigerator Repair",
        summary: "Cooling failures, leaks, and noisy compressors fixed on site.",
        common_issues: &[
            "Not cooling",
            "Water leaking",
            "Ice maker not working",
            "Strange noises",
        ],
    },
    Service {
        id: "washing-machine-repair",
        name: "Washing Machine Repair",
        summary: "Front and top loaders repaired with genuine parts.",
        common_issues: &[
            "Not draining",
            "Not spinning",
            "Door will not open",
            "Excessive vibration",
        ],
    },
    Service {
        id: "dryer-repair",
        name: "Dryer Repair",
        summary: "Heating, drum, and sensor faults diagnosed the same day.",
        common_issues: &["Not heating", "Drum not turning", "Takes too long to dry"],
    },
    Service {
        id: "dishwasher-repair",
        name: "Dishwasher Repair",
        summary: "Spotless dishes again, from pumps to control boards.",
        common_issues: &["Not cleaning", "Not draining", "Leaking", "Error codes"],
    },
    Service {
        id: "oven-repair",
        name: "Oven Repair",
        summary: "Gas and electric ovens, cooktops, and ranges.",
        common_issues: &[
            "Not heating",
            "Uneven cooking",
            "Igniter clicking",
            "Thermostat faults",
        ],
    },
    Service {
        id: "ac-repair",
        name: "AC Repair",
        summary: "Split and window units serviced, recharged, and repaired.",
        common_issues: &[
            "Blowing warm air",
            "Water dripping",
            "Bad smell",
            "Not turning on",
        ],
    },
];

/// The fixed list of services offered.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCatalog {
    services: &'static [Service],
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self { services: SERVICES }
    }
}

impl ServiceCatalog {
    /// All services in display order.
    #[must_use]
    pub const fn all(&self) -> &'static [Service] {
        self.services
    }

    /// Look up a service by slug.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static Service> {
        self.services.iter().find(|s| s.id == id)
    }
}
