//! Batch actions over the selected alerts.
//!
//! Every action needs a non-empty selection. It is then dispatched one of two
//! ways: its identifiers are injected into a native form that the server
//! answers with a full page, or a standalone request is issued and the page
//! navigates once it succeeds.

use std::fmt;

use crate::error::{Result, TriageError};
use crate::page::{FormId, FormSubmission, Page};
use crate::remote::{Endpoint, Request};
use crate::types::{AlertId, join_ids};

/// `redirect` marker the server maps back to the management view.
pub const REDIRECT_MANAGEMENT: &str = "management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchAction {
    Disposition,
    AddToEvent,
    /// Add to event and, when the comment box is filled, save the comment
    SaveToEvent,
    Comment,
    Tag,
    TakeOwnership,
    AssignOwnership,
}

/// How an action reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// Submit an existing form with injected hidden fields
    InjectIntoForm(FormId),
    /// Issue a standalone request, then navigate
    DirectRequest(Endpoint),
}

impl BatchAction {
    pub const ALL: [BatchAction; 7] = [
        BatchAction::Disposition,
        BatchAction::AddToEvent,
        BatchAction::SaveToEvent,
        BatchAction::Comment,
        BatchAction::Tag,
        BatchAction::TakeOwnership,
        BatchAction::AssignOwnership,
    ];

    pub fn strategy(self) -> DispatchStrategy {
        match self {
            BatchAction::Disposition => DispatchStrategy::InjectIntoForm(FormId::Disposition),
            BatchAction::AddToEvent | BatchAction::SaveToEvent => {
                DispatchStrategy::InjectIntoForm(FormId::Event)
            }
            BatchAction::Comment => DispatchStrategy::InjectIntoForm(FormId::Comment),
            BatchAction::Tag => DispatchStrategy::InjectIntoForm(FormId::Tag),
            BatchAction::AssignOwnership => {
                DispatchStrategy::InjectIntoForm(FormId::AssignOwnership)
            }
            BatchAction::TakeOwnership => DispatchStrategy::DirectRequest(Endpoint::SetOwner),
        }
    }

    pub fn empty_selection_message(self) -> &'static str {
        match self {
            BatchAction::Tag => "You must select one or more alerts to add tags to.",
            BatchAction::AssignOwnership => {
                "You must select one or more alerts to assign to a user."
            }
            BatchAction::AddToEvent | BatchAction::SaveToEvent => {
                "You must select one or more alerts to add to an event."
            }
            BatchAction::Disposition | BatchAction::Comment | BatchAction::TakeOwnership => {
                "You must select one or more alerts to disposition."
            }
        }
    }
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatchAction::Disposition => "disposition",
            BatchAction::AddToEvent => "add-to-event",
            BatchAction::SaveToEvent => "save-to-event",
            BatchAction::Comment => "comment",
            BatchAction::Tag => "tag",
            BatchAction::TakeOwnership => "take-ownership",
            BatchAction::AssignOwnership => "assign-ownership",
        };
        f.write_str(s)
    }
}

/// The primary side effect of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStep {
    SubmitForm(FormSubmission),
    Request(Request),
}

/// A validated action, built from one selection snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub action: BatchAction,
    pub selection: Vec<AlertId>,
    pub step: DispatchStep,
    /// Background comment save that runs alongside the form submission.
    /// Its outcome is independent of the submission's.
    pub comment_save: Option<Request>,
}

/// Validate the selection and prepare `action` against the page.
///
/// Form-injection actions write their hidden fields into the page's form
/// here, so the returned submission is exactly what the form now holds. On
/// an empty selection nothing on the page is touched.
pub fn plan(action: BatchAction, page: &mut Page) -> Result<Dispatch> {
    let selection = page.selected_alert_ids();
    if selection.is_empty() {
        return Err(TriageError::EmptySelection(action.empty_selection_message()));
    }
    let joined = join_ids(&selection);

    let mut comment_save = None;
    let step = match action.strategy() {
        DispatchStrategy::DirectRequest(endpoint) => {
            DispatchStep::Request(Request::new(endpoint).param_list("alert_uuids", &selection))
        }
        DispatchStrategy::InjectIntoForm(form_id) => {
            let comment = page.comment.clone();
            let disposition = page.disposition.clone();
            let form = page.forms.get_mut(form_id);
            form.clear_hidden();

            match action {
                BatchAction::Comment => {
                    form.set_field("comment", comment);
                    form.inject_hidden("uuids", &joined);
                    form.inject_hidden("redirect", REDIRECT_MANAGEMENT);
                }
                BatchAction::Tag => {
                    form.inject_hidden("uuids", &joined);
                    form.inject_hidden("redirect", REDIRECT_MANAGEMENT);
                }
                BatchAction::SaveToEvent => {
                    form.inject_hidden("alert_uuids", &joined);
                    if let Some(disposition) = disposition {
                        form.inject_hidden("event_disposition", disposition);
                    }
                    if !comment.is_empty() {
                        comment_save = Some(
                            Request::new(Endpoint::AddComment)
                                .param("uuids", &joined)
                                .param("comment", &comment)
                                .param("redirect", ""),
                        );
                    }
                }
                _ => form.inject_hidden("alert_uuids", &joined),
            }

            DispatchStep::SubmitForm(form.submission())
        }
    };

    Ok(Dispatch {
        action,
        selection,
        step,
        comment_save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_checked(checked: &[&str]) -> Page {
        let mut page = Page::default().with_alerts(["uuid-1", "uuid-2", "uuid-3"]);
        for id in checked {
            page.alerts.set_checked(&AlertId::from(*id), true).unwrap();
        }
        page
    }

    #[test]
    fn test_every_action_rejects_empty_selection() {
        for action in BatchAction::ALL {
            let mut page = page_with_checked(&[]);
            let err = plan(action, &mut page).unwrap_err();
            assert!(err.is_local_validation(), "{action}");
            for form in crate::page::FormId::ALL {
                assert!(page.forms.get(form).hidden().is_empty(), "{action} touched {form}");
            }
        }
    }

    #[test]
    fn test_disposition_injects_joined_ids() {
        let mut page = page_with_checked(&["uuid-1", "uuid-3"]);
        let dispatch = plan(BatchAction::Disposition, &mut page).unwrap();

        let DispatchStep::SubmitForm(submission) = dispatch.step else {
            panic!("disposition submits its form");
        };
        assert_eq!(submission.action, "set_disposition");
        assert_eq!(submission.field("alert_uuids"), Some("uuid-1,uuid-3"));
        assert!(dispatch.comment_save.is_none());
    }

    #[test]
    fn test_take_ownership_is_direct_request() {
        let mut page = page_with_checked(&["uuid-2", "uuid-3"]);
        let dispatch = plan(BatchAction::TakeOwnership, &mut page).unwrap();

        let DispatchStep::Request(request) = dispatch.step else {
            panic!("take ownership is a direct call");
        };
        assert_eq!(request.endpoint, Endpoint::SetOwner);
        assert_eq!(request.get_all("alert_uuids"), vec!["uuid-2", "uuid-3"]);
    }

    #[test]
    fn test_tag_and_comment_carry_redirect_marker() {
        for action in [BatchAction::Tag, BatchAction::Comment] {
            let mut page = page_with_checked(&["uuid-2"]);
            page.comment = "benign".to_string();
            let dispatch = plan(action, &mut page).unwrap();
            let DispatchStep::SubmitForm(submission) = dispatch.step else {
                panic!("{action} submits a form");
            };
            assert_eq!(submission.field("uuids"), Some("uuid-2"));
            assert_eq!(submission.field("redirect"), Some(REDIRECT_MANAGEMENT));
        }
    }

    #[test]
    fn test_save_to_event_with_comment_plans_both() {
        let mut page = page_with_checked(&["uuid-1", "uuid-2"]);
        page.comment = "same campaign".to_string();
        page.disposition = Some("DELIVERY".to_string());

        let dispatch = plan(BatchAction::SaveToEvent, &mut page).unwrap();
        let DispatchStep::SubmitForm(submission) = &dispatch.step else {
            panic!("save to event submits the event form");
        };
        assert_eq!(submission.action, "add_to_event");
        assert_eq!(submission.field("alert_uuids"), Some("uuid-1,uuid-2"));
        assert_eq!(submission.field("event_disposition"), Some("DELIVERY"));

        let save = dispatch.comment_save.expect("comment save planned");
        assert_eq!(save.endpoint, Endpoint::AddComment);
        assert_eq!(save.get("uuids"), Some("uuid-1,uuid-2"));
        assert_eq!(save.get("comment"), Some("same campaign"));
        assert_eq!(save.get("redirect"), Some(""));
    }

    #[test]
    fn test_save_to_event_without_comment_skips_save() {
        let mut page = page_with_checked(&["uuid-1"]);
        let dispatch = plan(BatchAction::SaveToEvent, &mut page).unwrap();
        assert!(dispatch.comment_save.is_none());
    }

    #[test]
    fn test_replanning_drops_earlier_hidden_fields() {
        let mut page = page_with_checked(&["uuid-1"]);
        page.disposition = Some("DELIVERY".to_string());
        plan(BatchAction::SaveToEvent, &mut page).unwrap();

        page.alerts.set_checked(&AlertId::from("uuid-1"), false).unwrap();
        page.alerts.set_checked(&AlertId::from("uuid-3"), true).unwrap();
        page.disposition = None;
        let dispatch = plan(BatchAction::SaveToEvent, &mut page).unwrap();

        let DispatchStep::SubmitForm(submission) = dispatch.step else {
            panic!("save to event submits the event form");
        };
        assert_eq!(
            submission.fields,
            vec![("alert_uuids".to_string(), "uuid-3".to_string())]
        );
    }
}
