use crate::config::Config;
use crate::error::{Result, TriageError};
use crate::filters::{FilterKind, filter_kind};
use crate::page::{Page, ValueInput};
use crate::types::{FilterMapping, FilterValue};

use super::{finish, open_console};

pub async fn cmd_filters_reset() -> Result<()> {
    let console = open_console(Page::default())?;
    finish(console.reset_all_filters().await)
}

pub async fn cmd_filters_add(name: &str, values: Vec<String>, compound: bool) -> Result<()> {
    let values = if compound {
        vec![FilterValue::List(values)]
    } else {
        values.into_iter().map(FilterValue::Scalar).collect()
    };
    let console = open_console(Page::default())?;
    finish(console.add_filter(name, values).await)
}

/// Value inputs for a `NAME=VALUE` row, shaped by the filter's kind.
fn row_inputs(name: &str, value: &str) -> Vec<ValueInput> {
    match filter_kind(name) {
        FilterKind::TypeValue => value.split('|').map(ValueInput::text).collect(),
        FilterKind::MultiSelect => vec![ValueInput::multi(
            value.split(',').map(str::trim).filter(|v| !v.is_empty()),
        )],
        _ if value.contains('|') => value.split('|').map(ValueInput::text).collect(),
        _ => vec![ValueInput::text(value)],
    }
}

fn parse_row(row: &str) -> Result<(&str, &str)> {
    row.split_once('=')
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| (name.trim(), value))
        .ok_or_else(|| {
            TriageError::Config(format!("invalid filter row '{row}', expected NAME=VALUE"))
        })
}

pub async fn cmd_filters_set(rows: Vec<String>, json: Option<String>) -> Result<()> {
    if let Some(json) = json {
        let mapping: FilterMapping = serde_json::from_str(&json)?;
        let console = open_console(Page::default())?;
        return finish(console.apply_mapping(&mapping).await);
    }

    let mut page = Page::default();
    for row in &rows {
        let (name, value) = parse_row(row)?;
        page.filter_panel
            .add_row_with_inputs(name, row_inputs(name, value));
    }

    let console = open_console(page)?;
    let submit = console.apply_filter_mapping().await;
    finish(submit.outcome)
}

pub async fn cmd_filters_remove(name: &str, index: usize) -> Result<()> {
    let console = open_console(Page::default())?;
    finish(console.remove_filter(name, index).await)
}

pub async fn cmd_filters_remove_category(name: &str) -> Result<()> {
    let console = open_console(Page::default())?;
    finish(console.remove_filter_category(name).await)
}

pub async fn cmd_filters_sort(name: &str) -> Result<()> {
    let console = open_console(Page::default())?;
    finish(console.set_sort_order(name).await)
}

pub async fn cmd_filters_offset(offset: u64) -> Result<()> {
    let console = open_console(Page::default())?;
    finish(console.set_page_offset(offset).await)
}

pub async fn cmd_filters_page_size(size: Option<&str>) -> Result<()> {
    let size = match size {
        Some(size) => size.to_string(),
        None => Config::load()?
            .default_page_size
            .map(|size| size.to_string())
            .ok_or_else(|| {
                TriageError::Config(
                    "no page size given and default_page_size not configured".to_string(),
                )
            })?,
    };
    let console = open_console(Page::default())?;
    finish(console.set_page_size(&size).await)
}
