//! Client for the server-held filter, sort and pagination state.
//!
//! Each call is one request. Reacting to the outcome (navigate or report) is
//! the console's job; nothing here touches the page.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TriageError};
use crate::types::{FilterAddition, FilterMapping, FilterValue, MAX_PAGE_SIZE, MIN_PAGE_SIZE};

use super::{Endpoint, Request, Response, Transport};

/// A page size the server accepts: an integer in `[1, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> Result<Self> {
        if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
            Ok(PageSize(size))
        } else {
            Err(TriageError::InvalidPageSize(size.to_string()))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for PageSize {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self> {
        let size: u32 = s
            .trim()
            .parse()
            .map_err(|_| TriageError::InvalidPageSize(s.to_string()))?;
        PageSize::new(size).map_err(|_| TriageError::InvalidPageSize(s.to_string()))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct FilterStore<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> FilterStore<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Clear every server-held filter.
    pub async fn reset_all_filters(&self) -> Result<Response> {
        self.transport.send(Request::new(Endpoint::ResetFilters)).await
    }

    /// Append `values` to the server's filters of `name`.
    pub async fn add_filter(&self, name: &str, values: Vec<FilterValue>) -> Result<Response> {
        let addition = FilterAddition {
            name: name.to_string(),
            values,
        };
        let request =
            Request::new(Endpoint::AddFilter).param("filter", serde_json::to_string(&addition)?);
        self.transport.send(request).await
    }

    /// Replace the server's filter set wholesale.
    pub async fn apply_filter_mapping(&self, mapping: &FilterMapping) -> Result<Response> {
        let request = Request::new(Endpoint::SetFilters).param("filters", mapping.to_json()?);
        self.transport.send(request).await
    }

    /// Remove the entry at `index` (0-based, row order) of filter `name`.
    pub async fn remove_filter(&self, name: &str, index: usize) -> Result<Response> {
        let request = Request::new(Endpoint::RemoveFilter)
            .param("name", name)
            .param("index", index);
        self.transport.send(request).await
    }

    pub async fn remove_filter_category(&self, name: &str) -> Result<Response> {
        let request = Request::new(Endpoint::RemoveFilterCategory).param("name", name);
        self.transport.send(request).await
    }

    /// The server flips direction when `name` is already the sort column.
    pub async fn set_sort_order(&self, name: &str) -> Result<Response> {
        let request = Request::new(Endpoint::SetSortFilter).param("name", name);
        self.transport.send(request).await
    }

    pub async fn set_page_offset(&self, offset: u64) -> Result<Response> {
        let request = Request::new(Endpoint::SetPageOffset).param("offset", offset);
        self.transport.send(request).await
    }

    pub async fn set_page_size(&self, size: PageSize) -> Result<Response> {
        let request = Request::new(Endpoint::SetPageSize).param("size", size);
        self.transport.send(request).await
    }
}
