//! Wishlist controller: add from the listing, load/search/remove on the
//! wishlist page.
//!
//! Every flow is split into a synchronous begin step, a spawnable future,
//! and a synchronous finish step, so the event loop never holds the
//! controller across a network call and tests can settle calls in any order.

use super::listing::LoadState;
use super::sequence::{SequenceGuard, SequenceToken};
use crate::nav::{route_guard, RouteDecision};
use crate::notifications::{Notification, NotificationAction};
use blogshelf_core::{
    filter_by_title, BlogEntry, BlogId, CollectionClient, CreateOutcome, DeleteOutcome,
    IdentityProvider, TransportError, WishlistEntryId, WishlistItem,
};
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// ROW ACTION STATE
// ============================================================================

/// Rows with a mutation in flight. A marked row's control is disabled; the
/// rest of the table stays interactive.
#[derive(Debug, Clone, Default)]
pub struct RowActionState {
    adding: HashSet<BlogId>,
    deleting: HashSet<WishlistEntryId>,
}

impl RowActionState {
    pub fn is_adding(&self, blog_id: &BlogId) -> bool {
        self.adding.contains(blog_id)
    }

    pub fn is_deleting(&self, entry_id: &WishlistEntryId) -> bool {
        self.deleting.contains(entry_id)
    }

    pub fn is_empty(&self) -> bool {
        self.adding.is_empty() && self.deleting.is_empty()
    }

    fn mark_adding(&mut self, blog_id: BlogId) -> bool {
        self.adding.insert(blog_id)
    }

    fn clear_adding(&mut self, blog_id: &BlogId) {
        self.adding.remove(blog_id);
    }

    fn mark_deleting(&mut self, entry_id: WishlistEntryId) -> bool {
        self.deleting.insert(entry_id)
    }

    fn clear_deleting(&mut self, entry_id: &WishlistEntryId) {
        self.deleting.remove(entry_id);
    }
}

// ============================================================================
// FLOW TYPES
// ============================================================================

/// Page-level state of the wishlist view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistState {
    Idle,
    /// Identity provider has not settled yet.
    AwaitingIdentity,
    LoginRequired,
    Loading,
    Ready,
    Failed(String),
}

impl From<&WishlistState> for LoadState {
    fn from(state: &WishlistState) -> Self {
        match state {
            WishlistState::Idle | WishlistState::LoginRequired => LoadState::Idle,
            WishlistState::AwaitingIdentity | WishlistState::Loading => LoadState::Loading,
            WishlistState::Ready => LoadState::Ready,
            WishlistState::Failed(reason) => LoadState::Failed(reason.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    token: SequenceToken,
    user_email: String,
}

impl LoadTicket {
    pub fn user_email(&self) -> &str {
        &self.user_email
    }
}

#[derive(Debug, Clone)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<Vec<WishlistItem>, TransportError>,
}

/// Outcome of mounting the wishlist page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    AwaitingIdentity,
    LoginRequired,
    Load(LoadTicket),
}

impl MountOutcome {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            MountOutcome::LoginRequired => Some(
                Notification::warning("Please Login first").with_action(NotificationAction::Login),
            ),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTicket {
    blog_id: BlogId,
    user_email: String,
}

impl AddTicket {
    pub fn blog_id(&self) -> &BlogId {
        &self.blog_id
    }
}

#[derive(Debug, Clone)]
pub struct AddCompletion {
    pub ticket: AddTicket,
    pub result: Result<CreateOutcome, TransportError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The pair already exists server-side. Informational, not an error.
    AlreadyInWishlist,
    AuthRequired,
    /// An add for the same blog is still in flight.
    InFlight,
    Failed(String),
}

impl AddOutcome {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            AddOutcome::Added => Some(Notification::success("Added to Wishlist!")),
            AddOutcome::AlreadyInWishlist => Some(Notification::info("Already in your wishlist!")),
            AddOutcome::AuthRequired => Some(
                Notification::warning("Please login first").with_action(NotificationAction::Login),
            ),
            AddOutcome::InFlight => None,
            AddOutcome::Failed(reason) => Some(Notification::error("Error").with_message(reason.clone())),
        }
    }
}

/// Delete awaiting the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub entry_id: WishlistEntryId,
    pub title: String,
}

impl PendingConfirmation {
    pub fn heading(&self) -> &'static str {
        "Are you sure?"
    }

    pub fn body(&self) -> String {
        format!(
            "Remove \"{}\" from your wishlist? You won't be able to revert this!",
            self.title
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalTicket {
    entry_id: WishlistEntryId,
    epoch: u64,
}

impl RemovalTicket {
    pub fn entry_id(&self) -> &WishlistEntryId {
        &self.entry_id
    }
}

#[derive(Debug, Clone)]
pub struct RemovalCompletion {
    pub ticket: RemovalTicket,
    pub result: Result<DeleteOutcome, TransportError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(WishlistEntryId),
    /// The server answered but removed nothing.
    NotDeleted(WishlistEntryId),
    Failed { entry_id: WishlistEntryId, reason: String },
    /// The row was already gone locally; nothing to do.
    AlreadyRemoved(WishlistEntryId),
    /// The page was torn down while the call was in flight.
    Discarded,
}

impl RemoveOutcome {
    pub fn notification(&self) -> Option<Notification> {
        match self {
            RemoveOutcome::Removed(_) => {
                Some(Notification::success("Deleted!").with_message("Blog removed from wishlist."))
            }
            RemoveOutcome::NotDeleted(_) | RemoveOutcome::Failed { .. } => {
                Some(Notification::error("Error").with_message("Failed to delete item."))
            }
            RemoveOutcome::AlreadyRemoved(_) | RemoveOutcome::Discarded => None,
        }
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct WishlistController {
    client: Arc<dyn CollectionClient>,
    identity: Arc<dyn IdentityProvider>,
    state: WishlistState,
    entries: Vec<WishlistItem>,
    search: String,
    row_actions: RowActionState,
    pending: Option<PendingConfirmation>,
    guard: SequenceGuard,
    epoch: u64,
}

impl WishlistController {
    pub fn new(client: Arc<dyn CollectionClient>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            client,
            identity,
            state: WishlistState::Idle,
            entries: Vec::new(),
            search: String::new(),
            row_actions: RowActionState::default(),
            pending: None,
            guard: SequenceGuard::new(),
            epoch: 0,
        }
    }

    pub fn state(&self) -> &WishlistState {
        &self.state
    }

    pub fn entries(&self) -> &[WishlistItem] {
        &self.entries
    }

    pub fn row_actions(&self) -> &RowActionState {
        &self.row_actions
    }

    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.guard.is_mounted()
    }

    // ------------------------------------------------------------------------
    // Add (listing page)
    // ------------------------------------------------------------------------

    /// Check identity and mark the row. `Err` short-circuits with no network call.
    pub fn begin_add(&mut self, blog: &BlogEntry) -> Result<AddTicket, AddOutcome> {
        let identity = self.identity.current();
        let Some(email) = identity.email() else {
            tracing::info!(blog_id = %blog.id, "Add to wishlist needs a signed-in user");
            return Err(AddOutcome::AuthRequired);
        };
        if !self.row_actions.mark_adding(blog.id.clone()) {
            return Err(AddOutcome::InFlight);
        }
        Ok(AddTicket {
            blog_id: blog.id.clone(),
            user_email: email.to_string(),
        })
    }

    pub fn add_request(&self, ticket: AddTicket) -> BoxFuture<'static, AddCompletion> {
        let client = Arc::clone(&self.client);
        async move {
            let result = client
                .create_wishlist_entry(&ticket.blog_id, &ticket.user_email)
                .await;
            AddCompletion { ticket, result }
        }
        .boxed()
    }

    /// Settle an add. Local wishlist rows are never touched here.
    pub fn finish_add(&mut self, completion: AddCompletion) -> AddOutcome {
        self.row_actions.clear_adding(&completion.ticket.blog_id);
        match completion.result {
            Ok(CreateOutcome::Created { inserted_id }) => {
                tracing::info!(
                    blog_id = %completion.ticket.blog_id,
                    inserted_id = ?inserted_id,
                    "Added to wishlist"
                );
                AddOutcome::Added
            }
            Ok(CreateOutcome::Conflict) => {
                tracing::debug!(blog_id = %completion.ticket.blog_id, "Blog already in wishlist");
                AddOutcome::AlreadyInWishlist
            }
            Err(err) => {
                tracing::error!(blog_id = %completion.ticket.blog_id, error = %err, "Add to wishlist failed");
                AddOutcome::Failed(err.to_string())
            }
        }
    }

    pub async fn add(&mut self, blog: &BlogEntry) -> AddOutcome {
        match self.begin_add(blog) {
            Ok(ticket) => {
                let completion = self.add_request(ticket).await;
                self.finish_add(completion)
            }
            Err(outcome) => outcome,
        }
    }

    // ------------------------------------------------------------------------
    // Load (wishlist page)
    // ------------------------------------------------------------------------

    pub fn mount(&mut self) -> MountOutcome {
        self.guard.mount();
        match route_guard(&self.identity.current()) {
            RouteDecision::Pending => {
                self.state = WishlistState::AwaitingIdentity;
                MountOutcome::AwaitingIdentity
            }
            RouteDecision::RedirectToLogin => {
                self.state = WishlistState::LoginRequired;
                MountOutcome::LoginRequired
            }
            RouteDecision::Allow(email) => MountOutcome::Load(self.issue_load(email)),
        }
    }

    /// Re-fetch for the current user, if the page is mounted and allowed.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        if !self.guard.is_mounted() {
            return None;
        }
        match self.mount() {
            MountOutcome::Load(ticket) => Some(ticket),
            _ => None,
        }
    }

    fn issue_load(&mut self, user_email: String) -> LoadTicket {
        let token = self.guard.issue();
        self.state = WishlistState::Loading;
        LoadTicket { token, user_email }
    }

    pub fn load_request(&self, ticket: LoadTicket) -> BoxFuture<'static, LoadCompletion> {
        let client = Arc::clone(&self.client);
        async move {
            let result = client.fetch_wishlist(&ticket.user_email).await;
            LoadCompletion { ticket, result }
        }
        .boxed()
    }

    pub fn finish_load(&mut self, completion: LoadCompletion) -> LoadState {
        let token = completion.ticket.token;
        if !self.guard.accepts(token) {
            tracing::debug!(token = token.value(), "Discarding stale wishlist response");
            return LoadState::from(&self.state);
        }
        match completion.result {
            Ok(entries) => {
                self.entries = entries;
                self.state = WishlistState::Ready;
            }
            Err(err) => {
                tracing::error!(error = %err, "Wishlist fetch failed");
                self.state = WishlistState::Failed(err.to_string());
            }
        }
        LoadState::from(&self.state)
    }

    pub async fn load(&mut self, ticket: LoadTicket) -> LoadState {
        let completion = self.load_request(ticket).await;
        self.finish_load(completion)
    }

    /// Drop the page instance: rows, search, confirmation and delete marks go;
    /// in-flight loads and deletes can no longer land.
    pub fn teardown(&mut self) {
        self.guard.unmount();
        self.epoch += 1;
        self.entries.clear();
        self.search.clear();
        self.pending = None;
        self.row_actions.deleting.clear();
        self.state = WishlistState::Idle;
    }

    // ------------------------------------------------------------------------
    // Local search
    // ------------------------------------------------------------------------

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Fetched rows filtered by title, case-insensitively, without a re-query.
    pub fn visible_entries(&self) -> Vec<&WishlistItem> {
        filter_by_title(&self.entries, &self.search)
    }

    // ------------------------------------------------------------------------
    // Remove (wishlist page)
    // ------------------------------------------------------------------------

    /// Ask for confirmation before deleting. Unknown rows and rows already
    /// being deleted are ignored.
    pub fn request_remove(&mut self, entry_id: &WishlistEntryId) -> Option<&PendingConfirmation> {
        if !self.guard.is_mounted() || self.row_actions.is_deleting(entry_id) {
            return None;
        }
        let item = self.entries.iter().find(|item| item.id() == entry_id)?;
        self.pending = Some(PendingConfirmation {
            entry_id: item.id().clone(),
            title: item.title.clone(),
        });
        self.pending.as_ref()
    }

    /// Dismiss the pending confirmation. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Accept the pending confirmation and mark its row as deleting.
    pub fn confirm(&mut self) -> Option<RemovalTicket> {
        let pending = self.pending.take()?;
        if !self.entries.iter().any(|item| item.id() == &pending.entry_id) {
            return None;
        }
        if !self.row_actions.mark_deleting(pending.entry_id.clone()) {
            return None;
        }
        Some(RemovalTicket {
            entry_id: pending.entry_id,
            epoch: self.epoch,
        })
    }

    pub fn removal_request(&self, ticket: RemovalTicket) -> BoxFuture<'static, RemovalCompletion> {
        let client = Arc::clone(&self.client);
        async move {
            let result = client.delete_wishlist_entry(&ticket.entry_id).await;
            RemovalCompletion { ticket, result }
        }
        .boxed()
    }

    /// Settle a delete. The row's mark is cleared on every path.
    pub fn finish_remove(&mut self, completion: RemovalCompletion) -> RemoveOutcome {
        let RemovalCompletion { ticket, result } = completion;
        if ticket.epoch != self.epoch {
            tracing::debug!(entry_id = %ticket.entry_id, "Discarding delete result after teardown");
            return RemoveOutcome::Discarded;
        }
        self.row_actions.clear_deleting(&ticket.entry_id);

        match result {
            Ok(outcome) if outcome.deleted() => {
                let before = self.entries.len();
                self.entries.retain(|item| item.id() != &ticket.entry_id);
                if self.entries.len() == before {
                    return RemoveOutcome::AlreadyRemoved(ticket.entry_id);
                }
                tracing::info!(entry_id = %ticket.entry_id, "Removed from wishlist");
                RemoveOutcome::Removed(ticket.entry_id)
            }
            Ok(_) => {
                tracing::warn!(entry_id = %ticket.entry_id, "Delete matched no wishlist entry");
                RemoveOutcome::NotDeleted(ticket.entry_id)
            }
            Err(err) => {
                tracing::error!(entry_id = %ticket.entry_id, error = %err, "Delete failed");
                RemoveOutcome::Failed {
                    entry_id: ticket.entry_id,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Confirm the pending delete and settle it in one step.
    pub async fn remove_confirmed(&mut self) -> Option<RemoveOutcome> {
        let ticket = self.confirm()?;
        let completion = self.removal_request(ticket).await;
        Some(self.finish_remove(completion))
    }
}
