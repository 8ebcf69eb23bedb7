//! Filter-composition panel: an explicit registry of filter rows.
//!
//! Each row owns a stable [`RowId`]. A row keeps one value container per
//! filter name it has shown; only the container of the chosen name is read
//! when the panel is submitted.

use std::fmt;

use crate::error::{Result, TriageError};
use crate::filters::{DEFAULT_FILTER_NAME, FilterKind, filter_kind};
use crate::types::{FilterMapping, FilterValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter_{}", self.0)
    }
}

/// A single value input inside a row's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueInput {
    Text(String),
    /// Multi-select; its value is every selected option
    MultiSelect(Vec<String>),
}

impl ValueInput {
    pub fn text(value: impl Into<String>) -> Self {
        ValueInput::Text(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueInput::MultiSelect(values.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    id: RowId,
    name: String,
    containers: Vec<(String, Vec<ValueInput>)>,
    /// Markup the server rendered for this row, if it came from a fragment
    fragment: Option<String>,
}

impl FilterRow {
    fn new(id: RowId, name: &str) -> Self {
        let mut row = Self {
            id,
            name: String::new(),
            containers: Vec::new(),
            fragment: None,
        };
        row.select(name);
        row
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Chosen filter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FilterKind {
        filter_kind(&self.name)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Switch the chosen filter name. Containers for other names stay as
    /// they are; a container for `name` is created from the catalog shape
    /// the first time it is shown.
    pub fn select(&mut self, name: &str) {
        self.name = name.to_string();
        if !self.containers.iter().any(|(n, _)| n == name) {
            self.containers
                .push((name.to_string(), filter_kind(name).default_inputs()));
        }
    }

    /// Value inputs scoped to this row and `name`.
    pub fn inputs(&self, name: &str) -> Option<&[ValueInput]> {
        self.containers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, inputs)| inputs.as_slice())
    }

    pub fn chosen_inputs(&self) -> &[ValueInput] {
        self.inputs(&self.name).unwrap_or(&[])
    }

    pub fn set_inputs(&mut self, name: &str, inputs: Vec<ValueInput>) {
        match self.containers.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = inputs,
            None => self.containers.push((name.to_string(), inputs)),
        }
    }

    pub fn set_chosen_inputs(&mut self, inputs: Vec<ValueInput>) {
        let name = self.name.clone();
        self.set_inputs(&name, inputs);
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    rows: Vec<FilterRow>,
    next_id: u64,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel as the server renders it from its filter state: multi-select
    /// filters collapse into one row, every other entry gets its own row.
    pub fn from_mapping(mapping: &FilterMapping) -> Self {
        let mut panel = Self::new();
        for (name, values) in mapping.iter() {
            if filter_kind(name) == FilterKind::MultiSelect {
                let selected = values.iter().flat_map(|v| match v {
                    FilterValue::Scalar(s) => vec![s.clone()],
                    FilterValue::List(items) => items.clone(),
                });
                panel.add_row_with_inputs(name, vec![ValueInput::multi(selected)]);
                continue;
            }
            for value in values {
                let inputs = match value {
                    FilterValue::Scalar(s) => vec![ValueInput::text(s.clone())],
                    FilterValue::List(items) => {
                        items.iter().cloned().map(ValueInput::Text).collect()
                    }
                };
                panel.add_row_with_inputs(name, inputs);
            }
        }
        panel
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_row(&mut self, name: &str) -> RowId {
        let id = self.allocate_id();
        self.rows.push(FilterRow::new(id, name));
        id
    }

    pub fn add_row_with_inputs(&mut self, name: &str, inputs: Vec<ValueInput>) -> RowId {
        let id = self.allocate_id();
        let mut row = FilterRow::new(id, name);
        row.set_chosen_inputs(inputs);
        self.rows.push(row);
        id
    }

    /// Register a row rendered by the `new_filter_option` endpoint.
    pub fn add_row_from_fragment(&mut self, fragment: String) -> RowId {
        let id = self.add_row(DEFAULT_FILTER_NAME);
        if let Some(row) = self.rows.last_mut() {
            row.fragment = Some(fragment);
        }
        id
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<FilterRow> {
        let pos = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(TriageError::UnknownFilterRow(id.0))?;
        Ok(self.rows.remove(pos))
    }

    pub fn row(&self, id: RowId) -> Result<&FilterRow> {
        self.rows
            .iter()
            .find(|r| r.id == id)
            .ok_or(TriageError::UnknownFilterRow(id.0))
    }

    pub fn row_mut(&mut self, id: RowId) -> Result<&mut FilterRow> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(TriageError::UnknownFilterRow(id.0))
    }

    /// Rows in rendering order.
    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
