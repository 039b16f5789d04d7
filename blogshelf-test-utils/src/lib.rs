//! Blogshelf Test Utilities
//!
//! Centralized test infrastructure for the Blogshelf workspace:
//! - A scriptable mock collection client with a call log
//! - Proptest generators for catalog and wishlist records
//! - Test fixtures for common scenarios
//! - Assertions for listing and wishlist state

// Re-export core types for convenience
pub use blogshelf_core::{
    BlogEntry, BlogId, BlogQuery, Category, CollectionClient, CreateOutcome, DeleteOutcome,
    IdentityProvider, IdentityState, QueryState, SharedIdentity, SortField, SortOrder, Timestamp,
    TransportError, WishlistEntry, WishlistEntryId, WishlistItem,
};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

// ============================================================================
// MOCK COLLECTION CLIENT
// ============================================================================

/// One call observed by [`MockCollectionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    FetchBlogs(BlogQuery),
    FetchWishlist(String),
    CreateWishlistEntry { blog_id: BlogId, user_email: String },
    DeleteWishlistEntry(WishlistEntryId),
}

#[derive(Debug)]
struct Scripted<T> {
    delay: Duration,
    result: Result<T, TransportError>,
}

/// In-memory collection client for testing (async).
///
/// Each operation pops the next scripted response; an empty script falls back
/// to a benign default (empty lists, a fresh insert, one deleted row). A
/// scripted delay is awaited with `tokio::time::sleep`, so tests running on a
/// paused clock control arrival order exactly.
#[derive(Debug, Default)]
pub struct MockCollectionClient {
    blogs: Mutex<VecDeque<Scripted<Vec<BlogEntry>>>>,
    wishlist: Mutex<VecDeque<Scripted<Vec<WishlistItem>>>>,
    creates: Mutex<VecDeque<Scripted<CreateOutcome>>>,
    deletes: Mutex<VecDeque<Scripted<DeleteOutcome>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockCollectionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_blogs(&self, result: Result<Vec<BlogEntry>, TransportError>) -> &Self {
        self.push_blogs_delayed(Duration::ZERO, result)
    }

    pub fn push_blogs_delayed(
        &self,
        delay: Duration,
        result: Result<Vec<BlogEntry>, TransportError>,
    ) -> &Self {
        lock(&self.blogs).push_back(Scripted { delay, result });
        self
    }

    pub fn push_wishlist(&self, result: Result<Vec<WishlistItem>, TransportError>) -> &Self {
        self.push_wishlist_delayed(Duration::ZERO, result)
    }

    pub fn push_wishlist_delayed(
        &self,
        delay: Duration,
        result: Result<Vec<WishlistItem>, TransportError>,
    ) -> &Self {
        lock(&self.wishlist).push_back(Scripted { delay, result });
        self
    }

    pub fn push_create(&self, result: Result<CreateOutcome, TransportError>) -> &Self {
        lock(&self.creates).push_back(Scripted {
            delay: Duration::ZERO,
            result,
        });
        self
    }

    pub fn push_delete(&self, result: Result<DeleteOutcome, TransportError>) -> &Self {
        self.push_delete_delayed(Duration::ZERO, result)
    }

    pub fn push_delete_delayed(
        &self,
        delay: Duration,
        result: Result<DeleteOutcome, TransportError>,
    ) -> &Self {
        lock(&self.deletes).push_back(Scripted { delay, result });
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn blog_queries(&self) -> Vec<BlogQuery> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                MockCall::FetchBlogs(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn delete_calls(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, MockCall::DeleteWishlistEntry(_)))
            .count()
    }

    fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

async fn play<T>(scripted: Option<Scripted<T>>, fallback: impl FnOnce() -> T) -> Result<T, TransportError> {
    match scripted {
        Some(Scripted { delay, result }) => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
        None => Ok(fallback()),
    }
}

#[async_trait]
impl CollectionClient for MockCollectionClient {
    async fn fetch_blogs(&self, query: &BlogQuery) -> Result<Vec<BlogEntry>, TransportError> {
        self.record(MockCall::FetchBlogs(query.clone()));
        let next = lock(&self.blogs).pop_front();
        play(next, Vec::new).await
    }

    async fn fetch_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, TransportError> {
        self.record(MockCall::FetchWishlist(user_email.to_string()));
        let next = lock(&self.wishlist).pop_front();
        play(next, Vec::new).await
    }

    async fn create_wishlist_entry(
        &self,
        blog_id: &BlogId,
        user_email: &str,
    ) -> Result<CreateOutcome, TransportError> {
        self.record(MockCall::CreateWishlistEntry {
            blog_id: blog_id.clone(),
            user_email: user_email.to_string(),
        });
        let next = lock(&self.creates).pop_front();
        play(next, || CreateOutcome::Created {
            inserted_id: Some(WishlistEntryId::new(uuid::Uuid::now_v7().to_string())),
        })
        .await
    }

    async fn delete_wishlist_entry(
        &self,
        id: &WishlistEntryId,
    ) -> Result<DeleteOutcome, TransportError> {
        self.record(MockCall::DeleteWishlistEntry(id.clone()));
        let next = lock(&self.deletes).pop_front();
        play(next, || DeleteOutcome { deleted_count: 1 }).await
    }
}

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating Blogshelf records.

    use super::*;
    use proptest::prelude::*;

    /// Generate an opaque 24-hex-digit id, the shape the store hands out.
    pub fn arb_object_id() -> impl Strategy<Value = String> {
        "[0-9a-f]{24}"
    }

    pub fn arb_blog_id() -> impl Strategy<Value = BlogId> {
        arb_object_id().prop_map(BlogId::new)
    }

    pub fn arb_wishlist_entry_id() -> impl Strategy<Value = WishlistEntryId> {
        arb_object_id().prop_map(WishlistEntryId::new)
    }

    /// Generate one of the enumerated categories.
    pub fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::known().to_vec())
    }

    pub fn arb_sort_field() -> impl Strategy<Value = SortField> {
        prop_oneof![
            Just(SortField::Title),
            Just(SortField::CreatedAt),
            Just(SortField::Category),
            Just(SortField::ShortDescription),
            Just(SortField::AuthorEmail),
            Just(SortField::Image),
        ]
    }

    pub fn arb_sort_order() -> impl Strategy<Value = SortOrder> {
        prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
    }

    /// Generate a human-looking title.
    pub fn arb_title() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{2,9}( [A-Za-z]{2,9}){0,3}"
    }

    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        // 2020-2030
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(chrono::Utc::now)
        })
    }

    pub fn arb_blog_entry() -> impl Strategy<Value = BlogEntry> {
        (
            arb_blog_id(),
            arb_title(),
            arb_category(),
            "[a-z ]{0,40}",
            prop::option::of(arb_timestamp()),
        )
            .prop_map(|(id, title, category, short_description, created_at)| BlogEntry {
                image: format!("https://img.example/{}.png", id),
                id,
                title,
                category,
                short_description,
                author_email: "author@example.com".to_string(),
                created_at,
            })
    }

    /// Generate a wishlist with unique entry ids.
    pub fn arb_wishlist(max_len: usize) -> impl Strategy<Value = Vec<WishlistItem>> {
        prop::collection::vec((arb_blog_id(), arb_title(), arb_category()), 0..=max_len).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(index, (blog_id, title, category))| WishlistItem {
                        entry: WishlistEntry {
                            id: WishlistEntryId::new(format!("w{}", index)),
                            blog_id,
                            user_email: "reader@example.com".to_string(),
                        },
                        title,
                        image: String::new(),
                        category,
                        short_description: String::new(),
                    })
                    .collect()
            },
        )
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    pub const READER_EMAIL: &str = "reader@example.com";

    /// A catalog entry with predictable display fields.
    pub fn blog(id: &str, title: &str, category: Category) -> BlogEntry {
        BlogEntry {
            id: BlogId::new(id),
            title: title.to_string(),
            category,
            short_description: format!("About {}", title),
            image: format!("https://img.example/{}.png", id),
            author_email: "author@example.com".to_string(),
            created_at: None,
        }
    }

    /// A wishlist row owned by [`READER_EMAIL`].
    pub fn wishlist_item(id: &str, blog_id: &str, title: &str) -> WishlistItem {
        WishlistItem {
            entry: WishlistEntry {
                id: WishlistEntryId::new(id),
                blog_id: BlogId::new(blog_id),
                user_email: READER_EMAIL.to_string(),
            },
            title: title.to_string(),
            image: format!("https://img.example/{}.png", blog_id),
            category: Category::Mathematics,
            short_description: format!("About {}", title),
        }
    }

    pub fn sample_catalog() -> Vec<BlogEntry> {
        vec![
            blog("b1", "Algebra Basics", Category::Mathematics),
            blog("b2", "Quantum Fields", Category::Physics),
            blog("b3", "Star Charts", Category::Astronomy),
        ]
    }

    pub fn sample_wishlist() -> Vec<WishlistItem> {
        vec![
            wishlist_item("w1", "b1", "Algebra Basics"),
            wishlist_item("w2", "b4", "Geometry Proofs"),
            wishlist_item("w3", "b5", "Linear Algebra"),
        ]
    }

    pub fn signed_in() -> SharedIdentity {
        SharedIdentity::new(IdentityState::signed_in(READER_EMAIL))
    }

    pub fn signed_out() -> SharedIdentity {
        SharedIdentity::new(IdentityState::signed_out())
    }

    pub fn server_error() -> TransportError {
        TransportError::Status {
            status: 500,
            message: "internal error".to_string(),
        }
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for listing and wishlist state.

    use super::*;

    /// Assert that rows carry exactly these titles, in order.
    #[track_caller]
    pub fn assert_blog_titles(rows: &[BlogEntry], expected: &[&str]) {
        let titles: Vec<&str> = rows.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, expected, "Unexpected blog rows");
    }

    /// Assert that wishlist rows carry exactly these entry ids, in order.
    #[track_caller]
    pub fn assert_entry_ids<'a, I>(rows: I, expected: &[&str])
    where
        I: IntoIterator<Item = &'a WishlistItem>,
    {
        let ids: Vec<&str> = rows.into_iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, expected, "Unexpected wishlist rows");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_plays_script_then_defaults() {
        let client = MockCollectionClient::new();
        client.push_blogs(Err(fixtures::server_error()));

        let query = QueryState::new().to_params();
        assert!(client.fetch_blogs(&query).await.is_err());
        assert_eq!(client.fetch_blogs(&query).await, Ok(Vec::new()));
        assert_eq!(client.blog_queries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_default_create_and_delete() {
        let client = MockCollectionClient::new();
        let created = client
            .create_wishlist_entry(&BlogId::new("b1"), fixtures::READER_EMAIL)
            .await;
        assert!(matches!(created, Ok(CreateOutcome::Created { inserted_id: Some(_) })));

        let deleted = client
            .delete_wishlist_entry(&WishlistEntryId::new("w1"))
            .await;
        assert_eq!(deleted.map(|d| d.deleted()), Ok(true));
        assert_eq!(client.delete_calls(), 1);
        assert_eq!(client.call_count(), 2);
    }
}
