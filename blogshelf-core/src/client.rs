//! Contract for talking to the remote collection store.

use crate::{
    BlogEntry, BlogId, BlogQuery, CreateOutcome, DeleteOutcome, TransportError, WishlistEntryId,
    WishlistItem,
};

/// Reads the primary collection and reads/mutates the per-user wishlist.
///
/// Every call is a suspension point; nothing else in the listing or wishlist
/// flow awaits. Implementations must be cheap to share behind an `Arc` so
/// fetches can be spawned onto the event loop.
#[async_trait::async_trait]
pub trait CollectionClient: Send + Sync {
    /// `GET /blogs` with the query passed through verbatim.
    async fn fetch_blogs(&self, query: &BlogQuery) -> Result<Vec<BlogEntry>, TransportError>;

    /// `GET /wishlist/{user_email}`, joined with blog display fields.
    async fn fetch_wishlist(&self, user_email: &str) -> Result<Vec<WishlistItem>, TransportError>;

    /// `POST /wishlist/{blog_id}`. A duplicate is `Ok(CreateOutcome::Conflict)`.
    async fn create_wishlist_entry(
        &self,
        blog_id: &BlogId,
        user_email: &str,
    ) -> Result<CreateOutcome, TransportError>;

    /// `DELETE /wishlist/{id}`.
    async fn delete_wishlist_entry(
        &self,
        id: &WishlistEntryId,
    ) -> Result<DeleteOutcome, TransportError>;
}
