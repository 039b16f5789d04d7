//! Primary listing controller.
//!
//! Turns query changes into fetches against the collection client and owns
//! the row set plus its load state. Title search is debounced; category and
//! sort changes fire immediately. Responses are matched against sequence
//! tokens so only the last-issued fetch can land.

use super::sequence::{SequenceGuard, SequenceToken};
use blogshelf_core::{BlogEntry, BlogQuery, Category, CollectionClient, QueryState, SortField, TransportError};
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "Idle",
            LoadState::Loading => "Loading",
            LoadState::Ready => "Ready",
            LoadState::Failed(_) => "Failed",
        }
    }
}

/// A fetch that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: SequenceToken,
    params: BlogQuery,
}

impl FetchTicket {
    pub fn token(&self) -> SequenceToken {
        self.token
    }

    pub fn params(&self) -> &BlogQuery {
        &self.params
    }
}

#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<Vec<BlogEntry>, TransportError>,
}

/// What applying a completion did to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionEffect {
    Applied { rows: usize },
    Failed { reason: String, retained: usize },
    Discarded,
}

pub struct ListController {
    client: Arc<dyn CollectionClient>,
    query: QueryState,
    state: LoadState,
    rows: Vec<BlogEntry>,
    guard: SequenceGuard,
    debounce: Duration,
    search_deadline: Option<Instant>,
}

impl ListController {
    pub fn new(client: Arc<dyn CollectionClient>, debounce: Duration) -> Self {
        Self {
            client,
            query: QueryState::new(),
            state: LoadState::Idle,
            rows: Vec::new(),
            guard: SequenceGuard::new(),
            debounce,
            search_deadline: None,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn rows(&self) -> &[BlogEntry] {
        &self.rows
    }

    pub fn is_mounted(&self) -> bool {
        self.guard.is_mounted()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_deadline
    }

    /// Start a fresh page instance: default query, loading, first fetch issued.
    pub fn mount(&mut self) -> FetchTicket {
        self.guard.mount();
        self.query = QueryState::new();
        self.search_deadline = None;
        let token = self.guard.issue();
        self.state = LoadState::Loading;
        FetchTicket {
            token,
            params: self.query.to_params(),
        }
    }

    /// Drop the page instance. In-flight responses can no longer land.
    pub fn teardown(&mut self) {
        self.guard.unmount();
        self.search_deadline = None;
        self.rows.clear();
        self.state = LoadState::Idle;
    }

    pub fn set_category(&mut self, category: &str) -> Option<FetchTicket> {
        self.query.set_category(category);
        self.fire_now()
    }

    pub fn set_category_filter(&mut self, category: Option<Category>) -> Option<FetchTicket> {
        self.query.set_category_filter(category);
        self.fire_now()
    }

    pub fn set_sort_field(&mut self, field: SortField) -> Option<FetchTicket> {
        self.query.set_sort_field(field);
        self.fire_now()
    }

    /// Update the title search and (re)arm the debounce window.
    pub fn set_title_search(&mut self, title: impl Into<String>, now: Instant) -> Instant {
        self.query.set_title_search(title);
        let deadline = now + self.debounce;
        if self.guard.is_mounted() {
            self.search_deadline = Some(deadline);
        }
        deadline
    }

    /// Issue the debounced search fetch once its window has elapsed.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchTicket> {
        match self.search_deadline {
            Some(deadline) if deadline <= now => self.fire_now(),
            _ => None,
        }
    }

    /// Re-issue the current query, e.g. after a failure.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.fire_now()
    }

    fn fire_now(&mut self) -> Option<FetchTicket> {
        self.search_deadline = None;
        if !self.guard.is_mounted() {
            return None;
        }
        let token = self.guard.issue();
        self.state = LoadState::Loading;
        tracing::debug!(
            token = token.value(),
            category = %self.query.to_params().category,
            title = %self.query.title_search(),
            sort_by = %self.query.sort_field(),
            sort_order = %self.query.sort_order(),
            "Issuing listing fetch"
        );
        Some(FetchTicket {
            token,
            params: self.query.to_params(),
        })
    }

    /// Future performing the fetch for `ticket`; safe to spawn.
    pub fn fetch(&self, ticket: FetchTicket) -> BoxFuture<'static, FetchCompletion> {
        let client = Arc::clone(&self.client);
        async move {
            let result = client.fetch_blogs(&ticket.params).await;
            FetchCompletion { ticket, result }
        }
        .boxed()
    }

    /// Apply a settled fetch if it is still the latest one issued.
    pub fn complete(&mut self, completion: FetchCompletion) -> CompletionEffect {
        let token = completion.ticket.token;
        if !self.guard.accepts(token) {
            tracing::debug!(token = token.value(), "Discarding stale listing response");
            return CompletionEffect::Discarded;
        }
        match completion.result {
            Ok(rows) => {
                self.rows = rows;
                self.state = LoadState::Ready;
                CompletionEffect::Applied {
                    rows: self.rows.len(),
                }
            }
            Err(err) => {
                tracing::error!(token = token.value(), error = %err, "Listing fetch failed");
                let reason = err.to_string();
                self.state = LoadState::Failed(reason.clone());
                CompletionEffect::Failed {
                    reason,
                    retained: self.rows.len(),
                }
            }
        }
    }

    /// Fetch and apply in one step.
    pub async fn load(&mut self, ticket: FetchTicket) -> CompletionEffect {
        let completion = self.fetch(ticket).await;
        self.complete(completion)
    }
}
