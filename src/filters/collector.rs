//! Filter value collector.
//!
//! Walks the panel's rows in rendering order and aggregates their values
//! into a [`FilterMapping`]. Every row contributes exactly one entry:
//!
//! - one text input: its value, as a scalar
//! - one multi-select: each selected option spliced in as its own scalar
//! - several inputs (a compound row): a single list entry, in input order

use crate::page::{FilterPanel, FilterRow, ValueInput};
use crate::types::{FilterMapping, FilterValue};

pub fn collect_filter_mapping(panel: &FilterPanel) -> FilterMapping {
    let mut mapping = FilterMapping::new();
    for row in panel.rows() {
        collect_row(row, &mut mapping);
    }
    tracing::debug!(
        rows = panel.len(),
        names = mapping.len(),
        "collected filter mapping"
    );
    mapping
}

fn collect_row(row: &FilterRow, mapping: &mut FilterMapping) {
    let values = mapping.values_mut(row.name());
    match row.chosen_inputs() {
        [ValueInput::Text(value)] => values.push(FilterValue::Scalar(value.clone())),
        [ValueInput::MultiSelect(selected)] => {
            values.extend(selected.iter().cloned().map(FilterValue::Scalar));
        }
        inputs => {
            let compound = inputs
                .iter()
                .flat_map(|input| match input {
                    ValueInput::Text(value) => vec![value.clone()],
                    ValueInput::MultiSelect(selected) => selected.clone(),
                })
                .collect();
            values.push(FilterValue::List(compound));
        }
    }
}
