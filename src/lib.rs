pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod filters;
pub mod logging;
pub mod notify;
pub mod page;
pub mod remote;
pub mod types;

pub use actions::{BatchAction, Dispatch, DispatchStrategy};
pub use config::Config;
pub use console::{BatchOutcome, Console, FilterSubmit, Outcome};
pub use error::{Result, TriageError};
pub use filters::collect_filter_mapping;
pub use notify::{NoticeLog, Notifier, StderrNotifier};
pub use page::{AlertTable, FilterPanel, FormId, Page, ValueInput};
pub use remote::{Endpoint, HttpTransport, Request, Response, Transport};
pub use types::{AlertId, FilterMapping, FilterValue, join_ids};
