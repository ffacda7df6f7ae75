//! Offset/limit pagination bookkeeping for "load more" lists.
//!
//! [`ListPage`] is the client-owned accumulation of fetched pages. Its
//! `offset` always equals the number of items fetched so far, and after a
//! successful fetch `items.len() <= total_count` holds.

use serde::{Deserialize, Serialize};

use crate::todo::Todo;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page size the client will request.
pub const MAX_PAGE_SIZE: usize = 200;

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Offset/limit window for a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    /// First page with the given size.
    pub fn first(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: clamp_limit(Some(limit)),
        }
    }
}

/// One page of todos as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub total_count: usize,
}

// ---------------------------------------------------------------------------
// ListPage
// ---------------------------------------------------------------------------

/// Accumulated list state for one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    items: Vec<Todo>,
    total_count: usize,
    offset: usize,
}

impl ListPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched first page.
    pub fn replace(&mut self, page: TodoPage) {
        self.items = page.items;
        self.offset = self.items.len();
        self.total_count = page.total_count.max(self.items.len());
    }

    /// Append a subsequent page. The backend's latest total wins, except
    /// that an empty page ends the list.
    pub fn append(&mut self, page: TodoPage) {
        let exhausted = page.items.is_empty();
        self.items.extend(page.items);
        self.offset = self.items.len();
        self.total_count = if exhausted {
            self.items.len()
        } else {
            page.total_count.max(self.items.len())
        };
    }

    /// Request for the page following what has been fetched so far.
    pub fn next_request(&self, limit: usize) -> PageRequest {
        PageRequest {
            offset: self.offset,
            limit: clamp_limit(Some(limit)),
        }
    }

    pub fn has_more(&self) -> bool {
        self.items.len() < self.total_count
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
