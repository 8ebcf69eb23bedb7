use thiserror::Error;

use crate::remote::error::ApiError;

#[derive(Error, Debug)]
pub enum TriageError {
    // Local validation, raised before any request is issued
    #[error("{0}")]
    EmptySelection(&'static str),

    #[error("error: enter an integer value between 1 and 1000 (got '{0}')")]
    InvalidPageSize(String),

    // Remote failures
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown alert '{0}'")]
    UnknownAlert(String),

    #[error("unknown filter row {0}")]
    UnknownFilterRow(u64),

    /// The user has already been alerted; nothing more to report
    #[error("action aborted")]
    Aborted,
}

impl TriageError {
    /// True for errors caught locally before any request went out.
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self,
            TriageError::EmptySelection(_) | TriageError::InvalidPageSize(_)
        )
    }

    /// Text shown to the user through the blocking alert.
    ///
    /// Server failures surface the raw response body; transport failures
    /// surface the transport status.
    pub fn user_message(&self) -> String {
        match self {
            TriageError::Api(api) => api.user_message(),
            TriageError::Http(e) => match e.status() {
                Some(status) => format!("DOH: {status}"),
                None => format!("DOH: {e}"),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
