//! Event-loop side of the management page.
//!
//! Each user action re-derives its inputs from the page at the moment it
//! starts, issues at most a couple of requests, and reacts to completion:
//! navigate on success, alert on failure. No lock on the page is held across
//! an await, so other events (more checkbox clicks, another expand) may run
//! while a request is in flight. Completions that arrive after the page has
//! navigated away are dropped.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::actions::{self, BatchAction, DispatchStep};
use crate::error::{Result, TriageError};
use crate::filters::collect_filter_mapping;
use crate::notify::Notifier;
use crate::page::{Generation, Page};
use crate::remote::{Endpoint, FilterStore, PageSize, Request, Response, Transport};
use crate::types::{AlertId, FilterMapping, FilterValue, MANAGE_PATH};

/// How a user action ended, as far as the page is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Full navigation to the given location
    Navigated(String),
    /// The page was updated in place
    Updated,
    /// A panel was removed; no request was issued
    Collapsed,
    /// Local validation failed; message shown, nothing sent
    Rejected(String),
    /// The server or transport failed; message shown, page unchanged
    Failed(String),
    /// Completed after the page navigated away; ignored
    Stale,
}

impl Outcome {
    pub fn is_navigation(&self) -> bool {
        matches!(self, Outcome::Navigated(_))
    }
}

/// Result of the filter panel's submit handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSubmit {
    /// Always true: the mapping goes out of band, never via the native form
    pub submission_suppressed: bool,
    pub outcome: Outcome,
}

/// Result of a batch action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub primary: Outcome,
    /// Outcome of the background comment save, when one was issued
    pub comment_save: Option<Outcome>,
}

pub struct Console<T, N> {
    page: Arc<Mutex<Page>>,
    transport: Arc<T>,
    notifier: N,
    manage_path: String,
}

impl<T: Transport, N: Notifier> Console<T, N> {
    pub fn new(page: Page, transport: Arc<T>, notifier: N) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
            transport,
            notifier,
            manage_path: MANAGE_PATH.to_string(),
        }
    }

    /// Location to return to after a filter or ownership change.
    pub fn with_manage_path(mut self, path: impl Into<String>) -> Self {
        self.manage_path = path.into();
        self
    }

    /// Shared handle to the page, for event handlers.
    pub fn page(&self) -> Arc<Mutex<Page>> {
        Arc::clone(&self.page)
    }

    pub fn with_page<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        f(&mut self.page.lock())
    }

    pub fn location(&self) -> String {
        self.page.lock().location().to_string()
    }

    pub fn selected_alert_ids(&self) -> Vec<AlertId> {
        self.page.lock().selected_alert_ids()
    }

    fn generation(&self) -> Generation {
        self.page.lock().generation()
    }

    fn reject(&self, err: &TriageError) -> Outcome {
        let message = err.user_message();
        tracing::debug!(%message, "action rejected locally");
        self.notifier.alert(&message);
        Outcome::Rejected(message)
    }

    /// Alert about a remote failure, unless the page has moved on.
    fn fail(&self, issued: Generation, err: &TriageError) -> Outcome {
        if !self.page.lock().is_current(issued) {
            tracing::warn!("dropping failure for a page that navigated away: {err}");
            return Outcome::Stale;
        }
        let message = err.user_message();
        tracing::warn!(%message, "console request failed");
        self.notifier.alert(&message);
        Outcome::Failed(message)
    }

    fn navigate(&self, issued: Generation, location: &str) -> Outcome {
        let mut page = self.page.lock();
        if !page.is_current(issued) {
            tracing::warn!(location, "dropping navigation for a page that navigated away");
            return Outcome::Stale;
        }
        page.navigate(location);
        Outcome::Navigated(location.to_string())
    }

    /// Await one state-changing request, then navigate to the management
    /// view or alert.
    async fn reload_after<F>(&self, request: F) -> Outcome
    where
        F: Future<Output = Result<Response>>,
    {
        let issued = self.generation();
        match request.await {
            Ok(_) => self.navigate(issued, &self.manage_path),
            Err(err) => self.fail(issued, &err),
        }
    }

    fn store(&self) -> FilterStore<'_, T> {
        FilterStore::new(self.transport.as_ref())
    }

    pub async fn reset_all_filters(&self) -> Outcome {
        self.reload_after(self.store().reset_all_filters()).await
    }

    pub async fn add_filter(&self, name: &str, values: Vec<FilterValue>) -> Outcome {
        self.reload_after(self.store().add_filter(name, values)).await
    }

    /// Submit handler of the filter panel: collect every row and replace the
    /// server's filter set with the result.
    pub async fn apply_filter_mapping(&self) -> FilterSubmit {
        let mapping = collect_filter_mapping(&self.page.lock().filter_panel);
        FilterSubmit {
            submission_suppressed: true,
            outcome: self.apply_mapping(&mapping).await,
        }
    }

    /// Replace the server's filter set with an already built mapping.
    pub async fn apply_mapping(&self, mapping: &FilterMapping) -> Outcome {
        self.reload_after(self.store().apply_filter_mapping(mapping))
            .await
    }

    pub async fn remove_filter(&self, name: &str, index: usize) -> Outcome {
        self.reload_after(self.store().remove_filter(name, index))
            .await
    }

    pub async fn remove_filter_category(&self, name: &str) -> Outcome {
        self.reload_after(self.store().remove_filter_category(name))
            .await
    }

    pub async fn set_sort_order(&self, name: &str) -> Outcome {
        self.reload_after(self.store().set_sort_order(name)).await
    }

    pub async fn set_page_offset(&self, offset: u64) -> Outcome {
        self.reload_after(self.store().set_page_offset(offset))
            .await
    }

    /// `input` is whatever the user typed; it is validated before sending.
    pub async fn set_page_size(&self, input: &str) -> Outcome {
        let size: PageSize = match input.parse() {
            Ok(size) => size,
            Err(err) => return self.reject(&err),
        };
        self.reload_after(self.store().set_page_size(size)).await
    }

    /// Run a batch action over the current selection.
    ///
    /// The selection is captured once, before any request goes out. For
    /// save-to-event with a comment, the form submission and the comment save
    /// run concurrently; neither waits on or cancels the other, and each
    /// failure is reported on its own.
    pub async fn run_batch_action(&self, action: BatchAction) -> BatchOutcome {
        let (dispatch, issued) = {
            let mut page = self.page.lock();
            (actions::plan(action, &mut page), page.generation())
        };

        let dispatch = match dispatch {
            Ok(dispatch) => dispatch,
            Err(err) => {
                return BatchOutcome {
                    primary: self.reject(&err),
                    comment_save: None,
                };
            }
        };

        tracing::debug!(
            %action,
            selected = dispatch.selection.len(),
            "dispatching batch action"
        );

        match dispatch.step {
            DispatchStep::Request(request) => BatchOutcome {
                primary: self.reload_after(self.transport.send(request)).await,
                comment_save: None,
            },
            DispatchStep::SubmitForm(submission) => {
                let submit = self.transport.submit_form(submission);
                let (submitted, comment_save) = match dispatch.comment_save {
                    Some(save) => {
                        let (submitted, saved) = futures::join!(submit, self.transport.send(save));
                        // reported before the submission's navigation discards the page
                        let saved = match saved {
                            Ok(_) => Outcome::Updated,
                            Err(err) => self.fail(issued, &err),
                        };
                        (submitted, Some(saved))
                    }
                    None => (submit.await, None),
                };

                let primary = match submitted {
                    Ok(response) => {
                        let location = response
                            .location
                            .unwrap_or_else(|| self.manage_path.clone());
                        self.navigate(issued, &location)
                    }
                    Err(err) => self.fail(issued, &err),
                };
                BatchOutcome {
                    primary,
                    comment_save,
                }
            }
        }
    }

    /// Expand or collapse the observable panel under an alert's row.
    pub async fn toggle_observable_panel(&self, id: &AlertId) -> Outcome {
        let issued = {
            let mut page = self.page.lock();
            if !page.alerts.contains(id) {
                drop(page);
                return self.reject(&TriageError::UnknownAlert(id.to_string()));
            }
            if page.alerts.remove_panel(id).is_some() {
                return Outcome::Collapsed;
            }
            page.generation()
        };

        let request = Request::new(Endpoint::Observables).param("alert_uuid", id);
        let fragment = match self.transport.send(request).await {
            Ok(response) => response.body,
            Err(err) => return self.fail(issued, &err),
        };

        let mut page = self.page.lock();
        if !page.is_current(issued) {
            return Outcome::Stale;
        }
        // a concurrent expand may already have inserted it; keep that one
        match page.alerts.insert_panel(id, fragment) {
            Ok(true) => Outcome::Updated,
            Ok(false) | Err(_) => Outcome::Stale,
        }
    }

    /// Fetch a blank filter row and append it to the panel.
    pub async fn new_filter_option(&self) -> Outcome {
        let issued = self.generation();
        let request = Request::new(Endpoint::NewFilterOption);
        let fragment = match self.transport.send(request).await {
            Ok(response) => response.body,
            Err(err) => return self.fail(issued, &err),
        };

        let mut page = self.page.lock();
        if !page.is_current(issued) {
            return Outcome::Stale;
        }
        page.filter_panel.add_row_from_fragment(fragment);
        Outcome::Updated
    }
}
