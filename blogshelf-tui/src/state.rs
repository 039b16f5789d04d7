//! Application state and event handling.
//!
//! `App` owns both page controllers and the UI selection. It never awaits:
//! every network call leaves as an [`Effect::Spawn`] future that resolves to
//! the [`TuiEvent`] carrying its completion, which is fed back through
//! [`App::handle_event`].

use crate::columns::{listing_columns, wishlist_columns, BlogColumn, WishlistColumn};
use crate::controllers::{
    AddOutcome, CompletionEffect, FetchTicket, ListController, LoadState, LoadTicket,
    MountOutcome, WishlistController, WishlistState,
};
use crate::events::TuiEvent;
use crate::keys::{map_key, map_search_key, Action, SearchInput};
use crate::nav::View;
use crate::notifications::{Notification, NotificationAction};
use crate::theme::SynthBruteTheme;
use crate::widgets::table::sort_target;
use blogshelf_core::{Category, CollectionClient, IdentityProvider};
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_NOTIFICATIONS: usize = 50;

/// Work the event loop must perform on behalf of the app.
pub enum Effect {
    Spawn(BoxFuture<'static, TuiEvent>),
    Quit,
}

impl Effect {
    pub fn is_quit(&self) -> bool {
        matches!(self, Effect::Quit)
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Spawn(_) => f.write_str("Spawn(..)"),
            Effect::Quit => f.write_str("Quit"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingViewState {
    pub selected: Option<usize>,
    pub header_focus: usize,
    pub search_editing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WishlistViewState {
    pub selected: Option<usize>,
    pub search_editing: bool,
}

pub struct App {
    pub theme: SynthBruteTheme,
    pub active_view: View,
    pub listing: ListController,
    pub wishlist: WishlistController,
    pub listing_view: ListingViewState,
    pub wishlist_view: WishlistViewState,
    pub listing_columns: Vec<BlogColumn>,
    pub wishlist_columns: Vec<WishlistColumn>,
    pub notifications: Vec<Notification>,
    pub help_visible: bool,
}

impl App {
    pub fn new(
        client: Arc<dyn CollectionClient>,
        identity: Arc<dyn IdentityProvider>,
        search_debounce: Duration,
    ) -> Self {
        Self {
            theme: SynthBruteTheme::synthbrute(),
            active_view: View::AllBlogs,
            listing: ListController::new(Arc::clone(&client), search_debounce),
            wishlist: WishlistController::new(client, identity),
            listing_view: ListingViewState::default(),
            wishlist_view: WishlistViewState::default(),
            listing_columns: listing_columns(),
            wishlist_columns: wishlist_columns(),
            notifications: Vec::new(),
            help_visible: false,
        }
    }

    /// Mount the initial view.
    pub fn start(&mut self) -> Vec<Effect> {
        self.mount_view(self.active_view)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn is_search_editing(&self) -> bool {
        match self.active_view {
            View::AllBlogs => self.listing_view.search_editing,
            View::Wishlist => self.wishlist_view.search_editing,
        }
    }

    pub fn handle_event(&mut self, event: TuiEvent, now: Instant) -> Vec<Effect> {
        match event {
            TuiEvent::Input(key) => {
                if self.is_search_editing() {
                    return match map_search_key(key) {
                        Some(input) => self.handle_search_input(input, now),
                        None => Vec::new(),
                    };
                }
                match map_key(key) {
                    Some(action) => self.handle_action(action),
                    None => Vec::new(),
                }
            }
            TuiEvent::Tick => self.on_tick(now),
            TuiEvent::Resize { .. } => Vec::new(),
            TuiEvent::BlogsLoaded(completion) => {
                match self.listing.complete(completion) {
                    CompletionEffect::Failed { reason, .. } => self.notify(
                        Notification::error("Failed to load blogs")
                            .with_message(reason)
                            .with_action(NotificationAction::Retry),
                    ),
                    CompletionEffect::Applied { .. } | CompletionEffect::Discarded => {}
                }
                self.listing_view.selected =
                    clamp_selection(self.listing_view.selected, self.listing.rows().len());
                Vec::new()
            }
            TuiEvent::WishlistLoaded(completion) => {
                if let LoadState::Failed(reason) = self.wishlist.finish_load(completion) {
                    self.notify(
                        Notification::error("Failed to load wishlist")
                            .with_message(reason)
                            .with_action(NotificationAction::Retry),
                    );
                }
                self.clamp_wishlist_selection();
                Vec::new()
            }
            TuiEvent::WishlistAdded(completion) => {
                let outcome = self.wishlist.finish_add(completion);
                if let Some(notification) = outcome.notification() {
                    self.notify(notification);
                }
                Vec::new()
            }
            TuiEvent::WishlistRemoved(completion) => {
                let outcome = self.wishlist.finish_remove(completion);
                if let Some(notification) = outcome.notification() {
                    self.notify(notification);
                }
                self.clamp_wishlist_selection();
                Vec::new()
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Vec<Effect> {
        if self.wishlist.pending_confirmation().is_some() {
            return self.handle_confirmation(action);
        }
        if self.help_visible {
            if matches!(action, Action::Cancel | Action::Confirm | Action::OpenHelp) {
                self.help_visible = false;
            }
            return Vec::new();
        }

        match action {
            Action::Quit => vec![Effect::Quit],
            Action::NextView => self.switch_view(self.active_view.next()),
            Action::PrevView => self.switch_view(self.active_view.previous()),
            Action::SwitchView(index) => match View::from_index(index) {
                Some(view) if view != self.active_view => self.switch_view(view),
                _ => Vec::new(),
            },
            Action::MoveDown => {
                self.move_selection(1);
                Vec::new()
            }
            Action::MoveUp => {
                self.move_selection(-1);
                Vec::new()
            }
            Action::MoveLeft => {
                self.move_header_focus(-1);
                Vec::new()
            }
            Action::MoveRight => {
                self.move_header_focus(1);
                Vec::new()
            }
            Action::SortByFocused => self.sort_by_focused(),
            Action::CycleCategory => self.cycle_category(),
            Action::ClearCategory => match self.active_view {
                View::AllBlogs => {
                    let ticket = self.listing.set_category_filter(None);
                    self.listing_fetch(ticket)
                }
                View::Wishlist => Vec::new(),
            },
            Action::AddToWishlist => self.add_selected(),
            Action::RemoveFromWishlist => {
                self.request_remove_selected();
                Vec::new()
            }
            Action::OpenHelp => {
                self.help_visible = true;
                Vec::new()
            }
            Action::OpenSearch => {
                match self.active_view {
                    View::AllBlogs => self.listing_view.search_editing = true,
                    View::Wishlist => self.wishlist_view.search_editing = true,
                }
                Vec::new()
            }
            Action::Refresh => self.refresh(),
            Action::Confirm | Action::Cancel => Vec::new(),
        }
    }

    fn handle_confirmation(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Confirm => match self.wishlist.confirm() {
                Some(ticket) => {
                    let request = self.wishlist.removal_request(ticket);
                    vec![Effect::Spawn(request.map(TuiEvent::WishlistRemoved).boxed())]
                }
                None => Vec::new(),
            },
            Action::Cancel => {
                self.wishlist.cancel();
                Vec::new()
            }
            Action::Quit => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn handle_search_input(&mut self, input: SearchInput, now: Instant) -> Vec<Effect> {
        let current = match self.active_view {
            View::AllBlogs => self.listing.query().title_search().to_string(),
            View::Wishlist => self.wishlist.search().to_string(),
        };
        let next = match input {
            SearchInput::Insert(c) => {
                let mut text = current;
                text.push(c);
                Some(text)
            }
            SearchInput::Backspace => {
                let mut text = current;
                text.pop();
                Some(text)
            }
            SearchInput::Clear => Some(String::new()),
            SearchInput::Submit | SearchInput::Close => {
                self.listing_view.search_editing = false;
                self.wishlist_view.search_editing = false;
                None
            }
        };

        if let Some(text) = next {
            match self.active_view {
                View::AllBlogs => {
                    self.listing.set_title_search(text, now);
                }
                View::Wishlist => {
                    self.wishlist.set_search(text);
                    self.clamp_wishlist_selection();
                }
            }
        }
        Vec::new()
    }

    fn on_tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.active_view == View::AllBlogs {
            let ticket = self.listing.poll_debounce(now);
            effects.extend(self.listing_fetch(ticket));
        }
        if self.active_view == View::Wishlist
            && *self.wishlist.state() == WishlistState::AwaitingIdentity
        {
            effects.extend(self.mount_wishlist());
        }
        effects
    }

    fn switch_view(&mut self, view: View) -> Vec<Effect> {
        match self.active_view {
            View::AllBlogs => {
                self.listing.teardown();
                self.listing_view = ListingViewState::default();
            }
            View::Wishlist => {
                self.wishlist.teardown();
                self.wishlist_view = WishlistViewState::default();
            }
        }
        tracing::debug!(from = ?self.active_view, to = ?view, "Switching view");
        self.active_view = view;
        self.mount_view(view)
    }

    fn mount_view(&mut self, view: View) -> Vec<Effect> {
        match view {
            View::AllBlogs => {
                let ticket = self.listing.mount();
                self.listing_fetch(Some(ticket))
            }
            View::Wishlist => self.mount_wishlist(),
        }
    }

    fn mount_wishlist(&mut self) -> Vec<Effect> {
        let outcome = self.wishlist.mount();
        if let Some(notification) = outcome.notification() {
            self.notify(notification);
        }
        match outcome {
            MountOutcome::Load(ticket) => self.wishlist_fetch(ticket),
            MountOutcome::AwaitingIdentity | MountOutcome::LoginRequired => Vec::new(),
        }
    }

    fn refresh(&mut self) -> Vec<Effect> {
        match self.active_view {
            View::AllBlogs => {
                let ticket = self.listing.refresh();
                self.listing_fetch(ticket)
            }
            View::Wishlist => match self.wishlist.refresh() {
                Some(ticket) => self.wishlist_fetch(ticket),
                None => {
                    if let Some(notification) = self.login_prompt() {
                        self.notify(notification);
                    }
                    Vec::new()
                }
            },
        }
    }

    fn login_prompt(&self) -> Option<Notification> {
        match self.wishlist.state() {
            WishlistState::LoginRequired => MountOutcome::LoginRequired.notification(),
            _ => None,
        }
    }

    fn listing_fetch(&self, ticket: Option<FetchTicket>) -> Vec<Effect> {
        match ticket {
            Some(ticket) => {
                let fetch = self.listing.fetch(ticket);
                vec![Effect::Spawn(fetch.map(TuiEvent::BlogsLoaded).boxed())]
            }
            None => Vec::new(),
        }
    }

    fn wishlist_fetch(&self, ticket: LoadTicket) -> Vec<Effect> {
        let fetch = self.wishlist.load_request(ticket);
        vec![Effect::Spawn(fetch.map(TuiEvent::WishlistLoaded).boxed())]
    }

    fn sort_by_focused(&mut self) -> Vec<Effect> {
        if self.active_view != View::AllBlogs {
            return Vec::new();
        }
        match sort_target(&self.listing_columns, self.listing_view.header_focus) {
            Some(field) => {
                let ticket = self.listing.set_sort_field(field);
                self.listing_fetch(ticket)
            }
            None => Vec::new(),
        }
    }

    fn cycle_category(&mut self) -> Vec<Effect> {
        if self.active_view != View::AllBlogs {
            return Vec::new();
        }
        let next = next_category(self.listing.query().category());
        let ticket = self.listing.set_category_filter(next);
        self.listing_fetch(ticket)
    }

    fn add_selected(&mut self) -> Vec<Effect> {
        if self.active_view != View::AllBlogs {
            return Vec::new();
        }
        let Some(blog) = self
            .listing_view
            .selected
            .and_then(|idx| self.listing.rows().get(idx))
            .cloned()
        else {
            return Vec::new();
        };
        match self.wishlist.begin_add(&blog) {
            Ok(ticket) => {
                let request = self.wishlist.add_request(ticket);
                vec![Effect::Spawn(request.map(TuiEvent::WishlistAdded).boxed())]
            }
            Err(outcome) => {
                if outcome == AddOutcome::InFlight {
                    tracing::debug!(blog_id = %blog.id, "Add already in flight");
                }
                if let Some(notification) = outcome.notification() {
                    self.notify(notification);
                }
                Vec::new()
            }
        }
    }

    fn request_remove_selected(&mut self) {
        if self.active_view != View::Wishlist {
            return;
        }
        let entry_id = {
            let visible = self.wishlist.visible_entries();
            match self.wishlist_view.selected.and_then(|idx| visible.get(idx)) {
                Some(item) => item.id().clone(),
                None => return,
            }
        };
        self.wishlist.request_remove(&entry_id);
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.active_view {
            View::AllBlogs => (&mut self.listing_view.selected, self.listing.rows().len()),
            View::Wishlist => (
                &mut self.wishlist_view.selected,
                self.wishlist.visible_entries().len(),
            ),
        };
        *selected = step_selection(*selected, len, delta);
    }

    fn move_header_focus(&mut self, delta: isize) {
        if self.active_view != View::AllBlogs {
            return;
        }
        let len = self.listing_columns.len();
        if len == 0 {
            return;
        }
        let current = self.listing_view.header_focus as isize;
        self.listing_view.header_focus = (current + delta).rem_euclid(len as isize) as usize;
    }

    fn clamp_wishlist_selection(&mut self) {
        let len = self.wishlist.visible_entries().len();
        self.wishlist_view.selected = clamp_selection(self.wishlist_view.selected, len);
    }
}

/// Next entry of the category cycle: All, then each known subject, then All.
pub fn next_category(current: Option<&Category>) -> Option<Category> {
    let known = Category::known();
    match current {
        None => known.first().cloned(),
        Some(category) => match known.iter().position(|k| k == category) {
            Some(idx) => known.get(idx + 1).cloned(),
            None => None,
        },
    }
}

fn step_selection(selected: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match selected {
        None => 0,
        Some(idx) => (idx as isize + delta).clamp(0, len as isize - 1) as usize,
    };
    Some(next)
}

fn clamp_selection(selected: Option<usize>, len: usize) -> Option<usize> {
    match (selected, len) {
        (_, 0) => None,
        (None, _) => Some(0),
        (Some(idx), len) => Some(idx.min(len - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_cycle_wraps_to_all() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..=Category::known().len() {
            current = next_category(current.as_ref());
            seen.push(current.clone());
        }
        assert_eq!(seen.first().cloned().flatten(), Some(Category::Mathematics));
        assert_eq!(seen.last().cloned().flatten(), None);
    }

    #[test]
    fn test_unknown_category_cycles_to_all() {
        assert_eq!(next_category(Some(&Category::from("Biology"))), None);
    }

    #[test]
    fn test_selection_is_clamped() {
        assert_eq!(step_selection(None, 3, 1), Some(0));
        assert_eq!(step_selection(Some(2), 3, 1), Some(2));
        assert_eq!(step_selection(Some(0), 3, -1), Some(0));
        assert_eq!(step_selection(Some(1), 0, 1), None);
        assert_eq!(clamp_selection(Some(5), 2), Some(1));
        assert_eq!(clamp_selection(Some(0), 0), None);
    }
}
