//! Paginated list responses

use serde::{Deserialize, Serialize};

/// One page of a paginated list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

/// A list endpoint's body: either a paginated envelope or a bare array,
/// depending on whether pagination is enabled on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    /// The items, whichever shape the body had
    pub fn into_results(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Plain(items) => items,
        }
    }

    /// The items by reference
    pub fn results(&self) -> &[T] {
        match self {
            ListResponse::Paginated(page) => &page.results,
            ListResponse::Plain(items) => items,
        }
    }

    /// Total count reported by the backend, or the length of a bare array
    pub fn count(&self) -> u64 {
        match self {
            ListResponse::Paginated(page) => page.count.unwrap_or(page.results.len() as u64),
            ListResponse::Plain(items) => items.len() as u64,
        }
    }

    /// Whether another page follows
    pub fn has_next(&self) -> bool {
        matches!(self, ListResponse::Paginated(Page { next: Some(_), .. }))
    }
}
