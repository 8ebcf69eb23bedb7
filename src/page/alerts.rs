//! Alert table: row registry, checkbox selection and observable panels.

use crate::error::{Result, TriageError};
use crate::types::AlertId;

/// One rendered alert row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRow {
    pub id: AlertId,
    pub checked: bool,
    /// Expanded observable fragment, present only while expanded
    pub panel: Option<String>,
}

impl AlertRow {
    pub fn new(id: impl Into<AlertId>) -> Self {
        Self {
            id: id.into(),
            checked: false,
            panel: None,
        }
    }
}

/// Ordered registry of the alert rows on the page.
#[derive(Debug, Clone, Default)]
pub struct AlertTable {
    rows: Vec<AlertRow>,
}

impl AlertTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AlertId>,
    {
        let mut table = Self::new();
        for id in ids {
            table.push_row(id);
        }
        table
    }

    pub fn push_row(&mut self, id: impl Into<AlertId>) {
        self.rows.push(AlertRow::new(id));
    }

    pub fn rows(&self) -> &[AlertRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &AlertId) -> bool {
        self.rows.iter().any(|r| &r.id == id)
    }

    fn row_mut(&mut self, id: &AlertId) -> Result<&mut AlertRow> {
        self.rows
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| TriageError::UnknownAlert(id.to_string()))
    }

    pub fn set_checked(&mut self, id: &AlertId, checked: bool) -> Result<()> {
        self.row_mut(id)?.checked = checked;
        Ok(())
    }

    pub fn toggle(&mut self, id: &AlertId) -> Result<bool> {
        let row = self.row_mut(id)?;
        row.checked = !row.checked;
        Ok(row.checked)
    }

    /// The "select all" control. Writes its value to every row; rows never
    /// write back.
    pub fn set_all_checked(&mut self, checked: bool) {
        for row in &mut self.rows {
            row.checked = checked;
        }
    }

    /// Identifiers of checked rows, in row order.
    pub fn selected_alert_ids(&self) -> Vec<AlertId> {
        self.rows
            .iter()
            .filter(|r| r.checked)
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn panel(&self, id: &AlertId) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| &r.id == id)
            .and_then(|r| r.panel.as_deref())
    }

    pub fn has_panel(&self, id: &AlertId) -> bool {
        self.panel(id).is_some()
    }

    /// Insert the fragment directly after the alert's row. Returns false
    /// when a panel is already present, which is left untouched.
    pub fn insert_panel(&mut self, id: &AlertId, fragment: String) -> Result<bool> {
        let row = self.row_mut(id)?;
        if row.panel.is_some() {
            return Ok(false);
        }
        row.panel = Some(fragment);
        Ok(true)
    }

    pub fn remove_panel(&mut self, id: &AlertId) -> Option<String> {
        self.rows
            .iter_mut()
            .find(|r| &r.id == id)
            .and_then(|r| r.panel.take())
    }
}
