use blogshelf_core::{CollectionClient, CreateOutcome, IdentityProvider, SortField, SortOrder};
use blogshelf_test_utils::assertions::{assert_blog_titles, assert_entry_ids};
use blogshelf_test_utils::fixtures::{sample_catalog, sample_wishlist, signed_in, signed_out};
use blogshelf_test_utils::{MockCall, MockCollectionClient, SharedIdentity};
use blogshelf_tui::controllers::{LoadState, WishlistState};
use blogshelf_tui::events::TuiEvent;
use blogshelf_tui::keys::Action;
use blogshelf_tui::nav::View;
use blogshelf_tui::notifications::NotificationLevel;
use blogshelf_tui::state::{App, Effect};
use blogshelf_tui::widgets::{build_table, CellContent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn app(client: &Arc<MockCollectionClient>, identity: SharedIdentity) -> App {
    let client: Arc<dyn CollectionClient> = client.clone();
    let identity: Arc<dyn IdentityProvider> = Arc::new(identity);
    App::new(client, identity, Duration::from_millis(300))
}

/// Run spawned work to completion and feed the results back, in order.
async fn settle(app: &mut App, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        if let Effect::Spawn(task) = effect {
            let event = task.await;
            queue.extend(app.handle_event(event, Instant::now()));
        }
    }
}

fn key(code: KeyCode) -> TuiEvent {
    TuiEvent::Input(KeyEvent::new(code, KeyModifiers::NONE))
}

#[tokio::test]
async fn start_loads_listing() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_blogs(Ok(sample_catalog()));
    let mut app = app(&client, signed_in());

    let effects = app.start();
    assert_eq!(effects.len(), 1);
    settle(&mut app, effects).await;

    assert_eq!(app.active_view, View::AllBlogs);
    assert_eq!(app.listing.state(), &LoadState::Ready);
    assert_blog_titles(app.listing.rows(), &["Algebra Basics", "Quantum Fields", "Star Charts"]);
    assert_eq!(app.listing_view.selected, Some(0));
}

#[tokio::test]
async fn sort_key_uses_focused_header() {
    let client = Arc::new(MockCollectionClient::new());
    let mut app = app(&client, signed_in());
    let effects = app.start();
    settle(&mut app, effects).await;

    let effects = app.handle_action(Action::SortByFocused);
    settle(&mut app, effects).await;
    assert_eq!(app.listing.query().sort_field(), SortField::Image);

    app.handle_action(Action::MoveRight);
    let effects = app.handle_action(Action::SortByFocused);
    settle(&mut app, effects).await;
    assert_eq!(app.listing.query().sort_field(), SortField::Title);
    assert_eq!(app.listing.query().sort_order(), SortOrder::Asc);

    let effects = app.handle_action(Action::SortByFocused);
    settle(&mut app, effects).await;
    assert_eq!(app.listing.query().sort_order(), SortOrder::Desc);

    let queries = client.blog_queries();
    assert_eq!(queries.len(), 4);
    assert_eq!(queries[1].sort_by, "image");
    assert_eq!(queries[1].sort_order, "asc");
    assert_eq!(queries[3].sort_by, "title");
    assert_eq!(queries[3].sort_order, "desc");
}

#[tokio::test]
async fn typing_in_search_fetches_after_debounce_tick() {
    let client = Arc::new(MockCollectionClient::new());
    let mut app = app(&client, signed_in());
    let effects = app.start();
    settle(&mut app, effects).await;

    let now = Instant::now();
    app.handle_event(key(KeyCode::Char('/')), now);
    assert!(app.is_search_editing());
    for c in "star".chars() {
        assert!(app.handle_event(key(KeyCode::Char(c)), now).is_empty());
    }
    assert!(app.handle_event(TuiEvent::Tick, now).is_empty());

    let effects = app.handle_event(TuiEvent::Tick, now + Duration::from_millis(300));
    assert_eq!(effects.len(), 1);
    settle(&mut app, effects).await;

    let last = client.blog_queries().pop().unwrap();
    assert_eq!(last.title, "star");
    assert_eq!(last.sort_by, "createdAt");

    app.handle_event(key(KeyCode::Esc), now);
    assert!(!app.is_search_editing());
}

#[tokio::test]
async fn add_marks_row_then_notifies() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_blogs(Ok(sample_catalog()));
    client.push_create(Ok(CreateOutcome::Conflict));
    let mut app = app(&client, signed_in());
    let effects = app.start();
    settle(&mut app, effects).await;

    let effects = app.handle_action(Action::AddToWishlist);
    assert_eq!(effects.len(), 1);

    let rows: Vec<_> = app.listing.rows().iter().collect();
    let model = build_table(&app.listing_columns, &rows, app.wishlist.row_actions(), None);
    let CellContent::Actions(buttons) = &model.rows[0].cells[5] else {
        panic!("actions column");
    };
    assert_eq!(buttons[0].label, "Adding...");
    assert!(!buttons[0].enabled);
    assert!(app.handle_action(Action::AddToWishlist).is_empty());

    settle(&mut app, effects).await;
    let note = app.latest_notification().unwrap();
    assert_eq!(note.level, NotificationLevel::Info);
    assert_eq!(note.title, "Already in your wishlist!");
    assert!(app.wishlist.row_actions().is_empty());
}

#[tokio::test]
async fn add_while_signed_out_prompts_login() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_blogs(Ok(sample_catalog()));
    let mut app = app(&client, signed_out());
    let effects = app.start();
    settle(&mut app, effects).await;

    assert!(app.handle_action(Action::AddToWishlist).is_empty());
    assert_eq!(app.latest_notification().unwrap().title, "Please login first");
    assert!(client
        .calls()
        .iter()
        .all(|call| matches!(call, MockCall::FetchBlogs(_))));
}

#[tokio::test]
async fn switching_views_tears_down_and_mounts() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_blogs(Ok(sample_catalog()));
    client.push_wishlist(Ok(sample_wishlist()));
    let mut app = app(&client, signed_in());
    let effects = app.start();
    settle(&mut app, effects).await;
    app.handle_action(Action::CycleCategory);

    let effects = app.handle_action(Action::NextView);
    assert_eq!(app.active_view, View::Wishlist);
    assert!(!app.listing.is_mounted());
    assert!(app.listing.rows().is_empty());
    settle(&mut app, effects).await;
    assert_eq!(app.wishlist.state(), &WishlistState::Ready);
    assert_entry_ids(app.wishlist.entries(), &["w1", "w2", "w3"]);

    let effects = app.handle_action(Action::NextView);
    assert_eq!(app.active_view, View::AllBlogs);
    assert!(app.wishlist.entries().is_empty());
    assert!(app.listing.query().category().is_none());
    settle(&mut app, effects).await;
}

#[tokio::test]
async fn wishlist_delete_goes_through_confirmation() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_wishlist(Ok(sample_wishlist()));
    let mut app = app(&client, signed_in());
    let effects = app.start();
    settle(&mut app, effects).await;
    let effects = app.handle_action(Action::SwitchView(1));
    settle(&mut app, effects).await;

    app.handle_action(Action::MoveDown);
    assert!(app.handle_action(Action::RemoveFromWishlist).is_empty());
    let pending = app.wishlist.pending_confirmation().unwrap();
    assert_eq!(pending.title, "Geometry Proofs");

    assert!(app.handle_action(Action::MoveDown).is_empty());
    assert!(app.handle_action(Action::Cancel).is_empty());
    assert!(app.wishlist.pending_confirmation().is_none());
    assert_eq!(client.delete_calls(), 0);

    app.handle_action(Action::RemoveFromWishlist);
    let effects = app.handle_action(Action::Confirm);
    assert_eq!(effects.len(), 1);
    settle(&mut app, effects).await;

    assert_eq!(client.delete_calls(), 1);
    assert_entry_ids(app.wishlist.entries(), &["w1", "w3"]);
    assert_eq!(app.latest_notification().unwrap().level, NotificationLevel::Success);
}

#[tokio::test]
async fn signed_out_wishlist_shows_login_prompt() {
    let client = Arc::new(MockCollectionClient::new());
    let mut app = app(&client, signed_out());
    let effects = app.start();
    settle(&mut app, effects).await;

    let effects = app.handle_action(Action::NextView);
    assert!(effects.is_empty());
    assert_eq!(app.wishlist.state(), &WishlistState::LoginRequired);
    assert_eq!(app.latest_notification().unwrap().title, "Please Login first");
}

#[tokio::test]
async fn quit_is_reported_as_effect() {
    let client = Arc::new(MockCollectionClient::new());
    let mut app = app(&client, signed_in());
    let effects = app.handle_event(key(KeyCode::Char('q')), Instant::now());
    assert!(effects.iter().any(Effect::is_quit));
}
