//! Transport boundary to the console server.
//!
//! The server owns canonical filter, sort and pagination state. Every
//! endpoint here either answers with a rendered fragment or with an empty
//! success that tells the page to navigate back to the management view.

pub mod error;
pub mod filter_store;
pub mod http;

use std::fmt;
use std::future::Future;

use crate::error::Result;
use crate::page::FormSubmission;

pub use error::ApiError;
pub use filter_store::{FilterStore, PageSize};
pub use http::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Console endpoints consumed by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ResetFilters,
    AddFilter,
    SetFilters,
    RemoveFilter,
    RemoveFilterCategory,
    SetSortFilter,
    SetPageOffset,
    SetPageSize,
    SetOwner,
    Observables,
    NewFilterOption,
    AddComment,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ResetFilters => "reset_filters",
            Endpoint::AddFilter => "add_filter",
            Endpoint::SetFilters => "set_filters",
            Endpoint::RemoveFilter => "remove_filter",
            Endpoint::RemoveFilterCategory => "remove_filter_category",
            Endpoint::SetSortFilter => "set_sort_filter",
            Endpoint::SetPageOffset => "set_page_offset",
            Endpoint::SetPageSize => "set_page_size",
            Endpoint::SetOwner => "set_owner",
            Endpoint::Observables => "observables",
            Endpoint::NewFilterOption => "new_filter_option",
            Endpoint::AddComment => "add_comment",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::AddComment => Method::Post,
            _ => Method::Get,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A request to one endpoint. Params keep repeated keys, so a list is sent
/// as one `key=value` pair per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl Request {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn param_list<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        for value in values {
            self.params.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// First value sent under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value sent under `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Successful response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
    /// Where the server finally sent us, after redirects
    pub location: Option<String>,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            location: None,
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: String::new(),
            location: None,
        }
    }

    pub fn redirected(location: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: String::new(),
            location: Some(location.into()),
        }
    }
}

/// Issues requests to the console server.
///
/// Implementations report any non-success response as
/// [`TriageError::Api`](crate::error::TriageError::Api) carrying the raw body.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;

    /// Native form submission; the server answers with a full page.
    fn submit_form(
        &self,
        submission: FormSubmission,
    ) -> impl Future<Output = Result<Response>> + Send;
}
