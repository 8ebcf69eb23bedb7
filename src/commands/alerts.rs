use crate::actions::BatchAction;
use crate::error::Result;
use crate::page::{FormId, Page};
use crate::types::AlertId;

use super::{CliConsole, finish, open_console, page_with_selection};

async fn run(console: &CliConsole, action: BatchAction) -> Result<()> {
    let outcome = console.run_batch_action(action).await;
    // the comment save reports its own failure; only the primary decides
    finish(outcome.primary)
}

pub async fn cmd_disposition(
    disposition: &str,
    comment: Option<String>,
    uuids: &[String],
) -> Result<()> {
    let mut page = page_with_selection(uuids);
    let form = page.forms.get_mut(FormId::Disposition);
    form.set_field("disposition", disposition);
    if let Some(comment) = comment {
        form.set_field("comment", comment);
    }
    run(&open_console(page)?, BatchAction::Disposition).await
}

pub async fn cmd_comment(comment: &str, uuids: &[String]) -> Result<()> {
    let mut page = page_with_selection(uuids);
    page.comment = comment.to_string();
    run(&open_console(page)?, BatchAction::Comment).await
}

pub async fn cmd_tag(tags: &str, uuids: &[String]) -> Result<()> {
    let mut page = page_with_selection(uuids);
    page.forms.get_mut(FormId::Tag).set_field("tag", tags);
    run(&open_console(page)?, BatchAction::Tag).await
}

pub async fn cmd_take_ownership(uuids: &[String]) -> Result<()> {
    let page = page_with_selection(uuids);
    run(&open_console(page)?, BatchAction::TakeOwnership).await
}

pub async fn cmd_assign(user_id: &str, uuids: &[String]) -> Result<()> {
    let mut page = page_with_selection(uuids);
    page.forms
        .get_mut(FormId::AssignOwnership)
        .set_field("selected_user_id", user_id);
    run(&open_console(page)?, BatchAction::AssignOwnership).await
}

pub struct EventOptions {
    pub event: Option<String>,
    pub event_name: Option<String>,
    pub disposition: Option<String>,
    pub comment: Option<String>,
}

pub async fn cmd_add_to_event(options: EventOptions, uuids: &[String]) -> Result<()> {
    let mut page = page_with_selection(uuids);
    let form = page.forms.get_mut(FormId::Event);
    if let Some(event) = options.event {
        form.set_field("event", event);
    }
    if let Some(name) = options.event_name {
        form.set_field("event_name", name);
    }

    let action = if options.disposition.is_some() || options.comment.is_some() {
        page.disposition = options.disposition;
        page.comment = options.comment.unwrap_or_default();
        BatchAction::SaveToEvent
    } else {
        BatchAction::AddToEvent
    };
    run(&open_console(page)?, action).await
}

pub async fn cmd_observables(uuid: &str) -> Result<()> {
    let id = AlertId::from(uuid);
    let console = open_console(Page::default().with_alerts([id.clone()]))?;
    let outcome = console.toggle_observable_panel(&id).await;
    if let Some(fragment) = console.with_page(|page| page.alerts.panel(&id).map(str::to_string)) {
        println!("{fragment}");
    }
    finish(outcome)
}
