//! Filter catalog and the filter value collector.
//!
//! The catalog mirrors the filters the console server understands. It only
//! decides the shape of a row's value inputs; the server owns the semantics.

pub mod collector;

use std::fmt;

use crate::page::ValueInput;

pub use collector::collect_filter_mapping;

/// Shape of a filter's value inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Single text input holding `"MM-DD-YYYY HH:mm - MM-DD-YYYY HH:mm"`
    DateRange,
    Select,
    Text,
    /// Text input with server-provided suggestions
    AutoText,
    /// One input carrying several selected options
    MultiSelect,
    /// Compound row: observable type and value inputs
    TypeValue,
}

impl FilterKind {
    /// Empty value inputs for a freshly shown row of this kind.
    pub fn default_inputs(self) -> Vec<ValueInput> {
        match self {
            FilterKind::MultiSelect => vec![ValueInput::MultiSelect(Vec::new())],
            FilterKind::TypeValue => vec![ValueInput::text(""), ValueInput::text("")],
            FilterKind::DateRange
            | FilterKind::Select
            | FilterKind::Text
            | FilterKind::AutoText => vec![ValueInput::text("")],
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterKind::DateRange => "date range",
            FilterKind::Select => "select",
            FilterKind::Text => "text",
            FilterKind::AutoText => "auto text",
            FilterKind::MultiSelect => "multi select",
            FilterKind::TypeValue => "type/value",
        };
        f.write_str(s)
    }
}

/// Name every new filter row starts with.
pub const DEFAULT_FILTER_NAME: &str = "Description";

const CATALOG: &[(&str, FilterKind)] = &[
    ("Alert Date", FilterKind::DateRange),
    ("Alert Type", FilterKind::Select),
    ("Description", FilterKind::Text),
    ("Disposition", FilterKind::MultiSelect),
    ("Disposition By", FilterKind::Select),
    ("Disposition Date", FilterKind::DateRange),
    ("Event Date", FilterKind::DateRange),
    ("Observable", FilterKind::TypeValue),
    ("Owner", FilterKind::Select),
    ("Queue", FilterKind::Select),
    ("Remediated By", FilterKind::Select),
    ("Remediated Date", FilterKind::DateRange),
    ("Tag", FilterKind::AutoText),
];

/// Known filter names with their kinds, in display order.
pub fn filter_catalog() -> &'static [(&'static str, FilterKind)] {
    CATALOG
}

/// Kind for `name`; names the catalog does not know are plain text.
pub fn filter_kind(name: &str) -> FilterKind {
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
        .unwrap_or(FilterKind::Text)
}
