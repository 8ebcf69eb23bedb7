//! In-memory snapshot of the management page.
//!
//! Everything a user action needs is read from here, at the moment the action
//! starts. Nothing on the page survives a navigation: [`Page::navigate`]
//! discards all transient state and bumps the generation so completions
//! issued against the previous document can be recognised and dropped.

pub mod alerts;
pub mod filter_panel;
pub mod forms;

pub use alerts::{AlertRow, AlertTable};
pub use filter_panel::{FilterPanel, FilterRow, RowId, ValueInput};
pub use forms::{Form, FormId, FormSubmission, Forms};

use crate::types::{AlertId, MANAGE_PATH};

/// Identifies one loaded document. Changes on every navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Clone)]
pub struct Page {
    generation: Generation,
    location: String,
    pub alerts: AlertTable,
    pub filter_panel: FilterPanel,
    pub forms: Forms,
    /// Free-text comment box
    pub comment: String,
    /// Checked disposition radio, if any
    pub disposition: Option<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::loaded(MANAGE_PATH)
    }
}

impl Page {
    /// Freshly loaded, empty document at `location`.
    pub fn loaded(location: impl Into<String>) -> Self {
        Self {
            generation: Generation(0),
            location: location.into(),
            alerts: AlertTable::new(),
            filter_panel: FilterPanel::new(),
            forms: Forms::default(),
            comment: String::new(),
            disposition: None,
        }
    }

    pub fn with_alerts<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AlertId>,
    {
        self.alerts = AlertTable::from_ids(ids);
        self
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Is `generation` still the loaded document?
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Full page navigation. The new document starts empty; the server
    /// renders it from its own state.
    pub fn navigate(&mut self, location: impl Into<String>) {
        let next = Generation(self.generation.0 + 1);
        *self = Self::loaded(location);
        self.generation = next;
        tracing::debug!(location = %self.location, "page navigated");
    }

    pub fn selected_alert_ids(&self) -> Vec<AlertId> {
        self.alerts.selected_alert_ids()
    }
}
