use blogshelf_core::{Category, CollectionClient, SortField};
use blogshelf_test_utils::assertions::assert_blog_titles;
use blogshelf_test_utils::fixtures::{blog, sample_catalog, server_error};
use blogshelf_test_utils::generators::arb_sort_field;
use blogshelf_test_utils::MockCollectionClient;
use blogshelf_tui::controllers::{
    CompletionEffect, FetchCompletion, ListController, LoadState, DEFAULT_SEARCH_DEBOUNCE,
};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn controller(client: &Arc<MockCollectionClient>) -> ListController {
    let client: Arc<dyn CollectionClient> = client.clone();
    ListController::new(client, DEFAULT_SEARCH_DEBOUNCE)
}

#[tokio::test]
async fn mount_loads_newest_first() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_blogs(Ok(sample_catalog()));
    let mut list = controller(&client);

    let ticket = list.mount();
    assert_eq!(list.state(), &LoadState::Loading);
    assert_eq!(ticket.params().sort_by, "createdAt");
    assert_eq!(ticket.params().sort_order, "desc");

    let effect = list.load(ticket).await;
    assert_eq!(effect, CompletionEffect::Applied { rows: 3 });
    assert_eq!(list.state(), &LoadState::Ready);
    assert_blog_titles(list.rows(), &["Algebra Basics", "Quantum Fields", "Star Charts"]);
}

#[tokio::test(start_paused = true)]
async fn last_issued_query_wins_when_responses_arrive_out_of_order() {
    let client = Arc::new(MockCollectionClient::new());
    client
        .push_blogs_delayed(
            Duration::from_millis(500),
            Ok(vec![blog("old", "Slow Physics", Category::Physics)]),
        )
        .push_blogs_delayed(
            Duration::from_millis(10),
            Ok(vec![blog("new", "Fast Maths", Category::Mathematics)]),
        );
    let mut list = controller(&client);
    list.mount();

    let first = list.set_category("Physics").unwrap();
    let second = list.set_category("Mathematics").unwrap();
    let slow = tokio::spawn(list.fetch(first));
    let fast = tokio::spawn(list.fetch(second));

    let fast = fast.await.unwrap();
    assert_eq!(list.complete(fast), CompletionEffect::Applied { rows: 1 });
    let slow = slow.await.unwrap();
    assert_eq!(list.complete(slow), CompletionEffect::Discarded);

    assert_blog_titles(list.rows(), &["Fast Maths"]);
    assert_eq!(list.query().category(), Some(&Category::Mathematics));
}

#[tokio::test]
async fn failure_retains_previous_rows() {
    let client = Arc::new(MockCollectionClient::new());
    client
        .push_blogs(Ok(sample_catalog()))
        .push_blogs(Err(server_error()));
    let mut list = controller(&client);
    let ticket = list.mount();
    list.load(ticket).await;

    let ticket = list.set_sort_field(SortField::Title).unwrap();
    let effect = list.load(ticket).await;

    assert!(matches!(effect, CompletionEffect::Failed { retained: 3, .. }));
    assert!(matches!(list.state(), LoadState::Failed(_)));
    assert_eq!(list.rows().len(), 3);
}

#[tokio::test]
async fn failure_without_rows_is_empty_state() {
    let client = Arc::new(MockCollectionClient::new());
    client.push_blogs(Err(server_error()));
    let mut list = controller(&client);
    let ticket = list.mount();

    let effect = list.load(ticket).await;
    assert!(matches!(effect, CompletionEffect::Failed { retained: 0, .. }));
    assert!(list.rows().is_empty());
}

#[tokio::test]
async fn title_search_is_debounced_and_keeps_sort() {
    let client = Arc::new(MockCollectionClient::new());
    let mut list = controller(&client);
    list.mount();
    list.set_sort_field(SortField::Title);

    let start = Instant::now();
    list.set_title_search("al", start);
    list.set_title_search("alg", start + Duration::from_millis(200));

    assert!(list.poll_debounce(start + Duration::from_millis(350)).is_none());
    let ticket = list
        .poll_debounce(start + Duration::from_millis(500))
        .expect("debounce window elapsed");
    assert_eq!(ticket.params().title, "alg");
    assert_eq!(ticket.params().sort_by, "title");
    assert_eq!(ticket.params().sort_order, "asc");
    assert!(list.search_deadline().is_none());
    assert!(list.poll_debounce(start + Duration::from_secs(5)).is_none());
}

#[tokio::test]
async fn discrete_change_flushes_pending_search() {
    let client = Arc::new(MockCollectionClient::new());
    let mut list = controller(&client);
    list.mount();

    let now = Instant::now();
    list.set_title_search("quant", now);
    let ticket = list.set_category("Physics").unwrap();

    assert_eq!(ticket.params().title, "quant");
    assert_eq!(ticket.params().category, "Physics");
    assert!(list.search_deadline().is_none());
    assert!(list.poll_debounce(now + Duration::from_secs(1)).is_none());
}

#[tokio::test]
async fn teardown_discards_in_flight_results_even_after_remount() {
    let client = Arc::new(MockCollectionClient::new());
    client
        .push_blogs(Ok(vec![blog("b9", "Stale", Category::Chemistry)]))
        .push_blogs(Ok(sample_catalog()));
    let mut list = controller(&client);

    let stale = list.mount();
    let stale = list.fetch(stale).await;
    list.teardown();
    assert_eq!(list.state(), &LoadState::Idle);
    assert!(list.set_category("Physics").is_none());

    let fresh = list.mount();
    assert_eq!(list.complete(stale), CompletionEffect::Discarded);
    assert!(list.rows().is_empty());

    list.load(fresh).await;
    assert_eq!(list.rows().len(), 3);
}

#[tokio::test]
async fn empty_category_clears_filter() {
    let client = Arc::new(MockCollectionClient::new());
    let mut list = controller(&client);
    list.mount();
    list.set_category("Astronomy");
    let ticket = list.set_category("").unwrap();
    assert_eq!(ticket.params().category, "");
    assert!(list.query().category().is_none());
}

proptest! {
    #[test]
    fn sort_toggle_twice_restores_order(field in arb_sort_field()) {
        let client = Arc::new(MockCollectionClient::new());
        let mut list = controller(&client);
        list.mount();
        list.set_sort_field(field);
        let before = (list.query().sort_field(), list.query().sort_order());
        list.set_sort_field(field);
        list.set_sort_field(field);
        prop_assert_eq!((list.query().sort_field(), list.query().sort_order()), before);
    }

    #[test]
    fn only_last_ticket_applies(count in 2usize..8) {
        let client = Arc::new(MockCollectionClient::new());
        let mut list = controller(&client);
        list.mount();
        let tickets: Vec<_> = (0..count)
            .filter_map(|i| {
                let field = if i % 2 == 0 { SortField::Title } else { SortField::Category };
                list.set_sort_field(field)
            })
            .collect();
        let last = tickets.last().cloned().unwrap();
        for ticket in tickets.iter().rev() {
            let accepted = *ticket == last;
            let completion = FetchCompletion {
                ticket: ticket.clone(),
                result: Ok(Vec::new()),
            };
            let effect = list.complete(completion);
            prop_assert_eq!(effect == CompletionEffect::Discarded, !accepted);
        }
        prop_assert_eq!(list.state(), &LoadState::Ready);
    }
}
