//! Command implementations behind the `triage` binary.
//!
//! Each command builds a page snapshot from its arguments, runs one console
//! operation over HTTP, and reports where the console ended up.

mod alerts;
mod config;
mod filters;

pub use alerts::{
    EventOptions, cmd_add_to_event, cmd_assign, cmd_comment, cmd_disposition, cmd_observables,
    cmd_tag, cmd_take_ownership,
};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use filters::{
    cmd_filters_add, cmd_filters_offset, cmd_filters_page_size, cmd_filters_remove,
    cmd_filters_remove_category, cmd_filters_reset, cmd_filters_set, cmd_filters_sort,
};

use std::sync::Arc;

use crate::config::Config;
use crate::console::{Console, Outcome};
use crate::error::{Result, TriageError};
use crate::notify::StderrNotifier;
use crate::page::Page;
use crate::remote::HttpTransport;

pub(crate) type CliConsole = Console<HttpTransport, StderrNotifier>;

pub(crate) fn open_console(page: Page) -> Result<CliConsole> {
    let config = Config::load()?;
    let transport = HttpTransport::from_config(&config)?;
    Ok(
        Console::new(page, Arc::new(transport), StderrNotifier)
            .with_manage_path(config.manage_path()),
    )
}

/// Page with every given alert checked.
pub(crate) fn page_with_selection(uuids: &[String]) -> Page {
    let mut page = Page::default().with_alerts(uuids.iter().cloned());
    page.alerts.set_all_checked(true);
    page
}

/// Report an outcome. Failures were already shown by the notifier.
pub(crate) fn finish(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Navigated(location) => {
            println!("{location}");
            Ok(())
        }
        Outcome::Updated | Outcome::Collapsed | Outcome::Stale => Ok(()),
        Outcome::Rejected(_) | Outcome::Failed(_) => Err(TriageError::Aborted),
    }
}
