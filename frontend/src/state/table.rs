//! Result table controller.
//!
//! Owns the last fragment the table reported, the query built from it and
//! the currently displayed page. Every fetch hands out a [`FetchTicket`];
//! only the response carrying the newest ticket is applied, so a slow
//! earlier request can never overwrite fresher rows.

use crate::state::query::{ExportQuery, QueryBuilder, QueryFragment, SearchQuery};
use crate::types::{AppResult, PageResult, Product};

/// Where the controller is in its fetch cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one issued fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A fetch the caller must now send to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub query: SearchQuery,
}

#[derive(Clone, Debug)]
pub struct TableController {
    builder: QueryBuilder,
    last_fragment: Option<QueryFragment>,
    state: LoadState,
    page: PageResult<Product>,
    issued: u64,
    /// Ticket of the response currently on screen
    shown: u64,
}

impl Default for TableController {
    fn default() -> Self {
        Self::new()
    }
}

impl TableController {
    pub fn new() -> Self {
        Self {
            builder: QueryBuilder::new(),
            last_fragment: None,
            state: LoadState::Idle,
            page: PageResult::default(),
            issued: 0,
            shown: 0,
        }
    }

    /// Starts a fetch for new table state.
    pub fn fetch(&mut self, fragment: QueryFragment) -> PendingFetch {
        let query = self.builder.build(&fragment);
        self.last_fragment = Some(fragment);
        self.issue(query)
    }

    /// Re-issues the last fragment unchanged.
    ///
    /// Before the first fetch this falls back to the default view.
    pub fn reload(&mut self) -> PendingFetch {
        let fragment = self.last_fragment.clone().unwrap_or_default();
        self.fetch(fragment)
    }

    /// Applies a backend response.
    ///
    /// Returns `false` when the ticket is stale and the response was
    /// dropped. On error the previous rows stay in place.
    pub fn resolve(&mut self, ticket: FetchTicket, result: AppResult<PageResult<Product>>) -> bool {
        if ticket.0 != self.issued {
            log::debug!("Dropping stale table response #{} (latest #{})", ticket.0, self.issued);
            return false;
        }
        match result {
            Ok(page) => {
                self.page = page;
                self.shown = ticket.0;
                self.state = LoadState::Success;
            }
            Err(e) => {
                log::warn!("Table fetch failed, keeping previous page: {}", e);
                self.state = LoadState::Error;
            }
        }
        true
    }

    fn issue(&mut self, query: SearchQuery) -> PendingFetch {
        self.issued += 1;
        self.state = LoadState::Loading;
        PendingFetch {
            ticket: FetchTicket(self.issued),
            query,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Rows currently on screen.
    pub fn rows(&self) -> &[Product] {
        &self.page.data
    }

    pub fn page(&self) -> &PageResult<Product> {
        &self.page
    }

    /// Changes every time a new page is applied, even if it carries the
    /// same rows, so views keyed on it are rebuilt.
    pub fn generation(&self) -> u64 {
        self.shown
    }

    /// Filters of the displayed page, for the export.
    pub fn export_query(&self) -> ExportQuery {
        self.builder.export_query()
    }
}
