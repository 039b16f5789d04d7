//! Blogshelf Core - Entity Types
//!
//! Data structures shared by every Blogshelf crate: catalog and wishlist
//! records, the listing query, identity state, and the collection client
//! contract. No I/O lives here.

pub mod client;
pub mod entities;
pub mod enums;
pub mod error;
pub mod filter;
pub mod identity;
pub mod query;

pub use client::CollectionClient;
pub use entities::{
    BlogEntry, CreateOutcome, CreateWishlistRequest, DeleteOutcome, InsertResponse, WishlistEntry,
    WishlistItem,
};
pub use enums::{Category, SortField, SortOrder};
pub use error::TransportError;
pub use filter::{filter_by_title, title_matches};
pub use identity::{
    BlogId, IdentityProvider, IdentityState, SharedIdentity, Timestamp, User, WishlistEntryId,
};
pub use query::{BlogQuery, QueryState};
