#![allow(dead_code)]

use std::collections::HashMap;
use std::process::{Command, Output};
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::StatusCode;
use tempfile::TempDir;
use tokio::sync::Notify;

use triage::console::Console;
use triage::error::Result;
use triage::notify::NoticeLog;
use triage::page::{FormSubmission, Page};
use triage::remote::{ApiError, Endpoint, Request, Response, Transport};
use triage::types::AlertId;

pub const OBSERVABLES_FRAGMENT: &str = "<table class=\"observables\"></table>";
pub const FILTER_ROW_FRAGMENT: &str = "<div class=\"filter-row\"></div>";

#[derive(Clone)]
enum Reply {
    Ok(Response),
    Fail(StatusCode, String),
}

/// Records every request and answers from a script keyed by path.
///
/// Unscripted endpoints succeed: filter-state endpoints with an empty 204,
/// fragment endpoints with a fixed fragment, forms with a redirect to the
/// management view.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<Request>>,
    submissions: Mutex<Vec<FormSubmission>>,
    replies: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, response: Response) {
        self.replies
            .lock()
            .insert(path.to_string(), Reply::Ok(response));
    }

    pub fn fail(&self, path: &str, status: StatusCode, body: &str) {
        self.replies
            .lock()
            .insert(path.to_string(), Reply::Fail(status, body.to_string()));
    }

    /// Requests to `path` wait until the returned gate is notified.
    pub fn hold(&self, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(path.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, endpoint: Endpoint) -> Vec<Request> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn submissions(&self) -> Vec<FormSubmission> {
        self.submissions.lock().clone()
    }

    /// Requests plus form submissions.
    pub fn traffic(&self) -> usize {
        self.requests.lock().len() + self.submissions.lock().len()
    }

    fn default_reply(path: &str) -> Response {
        match path {
            "observables" => Response::ok(OBSERVABLES_FRAGMENT),
            "new_filter_option" => Response::ok(FILTER_ROW_FRAGMENT),
            "set_disposition" | "add_to_event" | "add_comment" | "add_tag"
            | "assign_ownership" => Response::redirected("/ace/manage"),
            _ => Response::no_content(),
        }
    }

    async fn reply(&self, path: &str) -> Result<Response> {
        let gate = self.gates.lock().get(path).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let scripted = self.replies.lock().get(path).cloned();
        match scripted {
            Some(Reply::Ok(response)) => Ok(response),
            Some(Reply::Fail(status, body)) => Err(ApiError::new(status, body).into()),
            None => Ok(Self::default_reply(path)),
        }
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let path = request.endpoint.path();
        self.requests.lock().push(request);
        self.reply(path).await
    }

    async fn submit_form(&self, submission: FormSubmission) -> Result<Response> {
        let path = submission.action.clone();
        self.submissions.lock().push(submission);
        self.reply(&path).await
    }
}

pub type TestConsole = Console<MockTransport, Arc<NoticeLog>>;

pub struct Harness {
    pub console: TestConsole,
    pub transport: Arc<MockTransport>,
    pub notices: Arc<NoticeLog>,
}

impl Harness {
    pub fn new(page: Page) -> Self {
        let transport = MockTransport::new();
        let notices = Arc::new(NoticeLog::new());
        let console = Console::new(page, Arc::clone(&transport), Arc::clone(&notices));
        Self {
            console,
            transport,
            notices,
        }
    }

    /// Management page with five alert rows, `uuid-1` through `uuid-5`.
    pub fn with_alerts() -> Self {
        Self::new(Page::default().with_alerts((1..=5).map(|i| format!("uuid-{i}"))))
    }

    pub fn check(&self, ids: &[&str]) {
        self.console.with_page(|page| {
            for id in ids {
                page.alerts
                    .set_checked(&AlertId::from(*id), true)
                    .expect("alert row exists");
            }
        });
    }
}

/// Runs the `triage` binary against a config file in a temp directory.
pub struct TriageTest {
    pub temp_dir: TempDir,
}

impl TriageTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TriageTest { temp_dir }
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_triage"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("TRIAGE_CONFIG", self.config_path())
            .env_remove("TRIAGE_BASE_URL")
            .env_remove("TRIAGE_SESSION")
            .env_remove("TRIAGE_LOG")
            .output()
            .expect("Failed to execute triage command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config file");
    }
}
