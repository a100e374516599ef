//! List screen state
//!
//! A screen fires a load whenever its filters change. Responses can arrive
//! out of order, so each load takes a [`Ticket`] from the screen's
//! [`Generation`] and only the newest ticket may touch visible state.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use shared::error::ErrorCategory;

use crate::table::{PageView, Searchable, TableState};
use crate::{ClientError, ClientResult};

/// Request generation counter, cheap to clone and share with tasks
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

/// Proof of which request generation a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every older ticket becomes stale
    pub fn issue(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }

    /// Make every outstanding ticket stale without starting a request
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// What happened to a load result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items replaced
    Loaded(usize),
    /// Previous items kept, error banner set
    Failed(ErrorCategory),
    /// A newer request superseded this one; nothing changed
    Stale,
}

/// Loaded items plus loading flag and error banner
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            loaded_at: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Apply a load result; a failure keeps the previous items
    pub fn finish(&mut self, result: ClientResult<Vec<T>>) -> LoadOutcome {
        self.loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                self.error = None;
                self.loaded_at = Some(Utc::now());
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "List load failed");
                let category = e.category();
                self.error = Some(e.user_message());
                LoadOutcome::Failed(category)
            }
        }
    }

    /// Show the banner for a failed action (create/update/delete)
    pub fn set_error(&mut self, err: &ClientError) {
        self.error = Some(err.user_message());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Data table of one list screen: items, search/paging and the request guard
#[derive(Debug, Clone)]
pub struct DataTable<T> {
    pub list: ListState<T>,
    pub table: TableState,
    generation: Generation,
}

impl<T> Default for DataTable<T> {
    fn default() -> Self {
        Self {
            list: ListState::new(),
            table: TableState::new(),
            generation: Generation::new(),
        }
    }
}

impl<T> DataTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Mark loading and take a ticket for the request about to start
    pub fn begin_load(&mut self) -> Ticket {
        self.list.begin();
        self.generation.issue()
    }

    /// Apply a response if `ticket` is still the newest one
    pub fn apply(&mut self, ticket: Ticket, result: ClientResult<Vec<T>>) -> LoadOutcome {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale list response");
            return LoadOutcome::Stale;
        }
        self.list.finish(result)
    }

    /// Run one load to completion
    pub async fn load<F>(&mut self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = ClientResult<Vec<T>>>,
    {
        let ticket = self.begin_load();
        let result = fetch.await;
        self.apply(ticket, result)
    }
}

impl<T: Searchable> DataTable<T> {
    /// Current page of the filtered items
    pub fn page(&mut self) -> PageView<'_, T> {
        self.table.view(&self.list.items)
    }
}
