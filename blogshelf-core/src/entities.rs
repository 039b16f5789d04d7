//! Catalog and wishlist records as the remote store serves them.

use crate::{BlogId, Category, Timestamp, WishlistEntryId};
use serde::{Deserialize, Serialize};

/// BlogEntry - one article of the primary collection.
/// Owned by the remote store; the client only holds read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogEntry {
    #[serde(rename = "_id")]
    pub id: BlogId,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "email", default)]
    pub author_email: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// WishlistEntry - join record between a user and a catalog entry.
///
/// At most one exists per `(blog_id, user_email)`; the server enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    #[serde(rename = "_id")]
    pub id: WishlistEntryId,
    #[serde(rename = "blogId")]
    pub blog_id: BlogId,
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
}

/// Wishlist entry joined with the display fields of the blog it points to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(flatten)]
    pub entry: WishlistEntry,
    pub title: String,
    #[serde(default)]
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub short_description: String,
}

impl WishlistItem {
    pub fn id(&self) -> &WishlistEntryId {
        &self.entry.id
    }
}

/// Body of `POST /wishlist/{blogId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWishlistRequest {
    #[serde(rename = "blogId")]
    pub blog_id: BlogId,
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

/// Response of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResponse {
    #[serde(rename = "insertedId", default)]
    pub inserted_id: Option<WishlistEntryId>,
}

/// Result of a wishlist create that reached the server.
///
/// A duplicate `(blogId, userEmail)` pair is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { inserted_id: Option<WishlistEntryId> },
    Conflict,
}

/// Response of `DELETE /wishlist/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteOutcome {
    #[serde(rename = "deletedCount", default)]
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn deleted(&self) -> bool {
        self.deleted_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_entry_decodes_server_shape() {
        let raw = r#"{
            "_id": "b1",
            "title": "Algebra Basics",
            "category": "Mathematics",
            "short_description": "Groups and rings",
            "image": "https://img.example/a.png",
            "email": "author@example.com"
        }"#;
        let blog: BlogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(blog.id.as_str(), "b1");
        assert_eq!(blog.category, Category::Mathematics);
        assert_eq!(blog.author_email, "author@example.com");
        assert!(blog.created_at.is_none());
    }

    #[test]
    fn test_wishlist_item_decodes_joined_shape() {
        let raw = r#"{
            "_id": "w1",
            "blogId": "b1",
            "userEmail": "reader@example.com",
            "title": "Star Charts",
            "image": "",
            "category": "Astronomy",
            "short_description": "Night sky"
        }"#;
        let item: WishlistItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id().as_str(), "w1");
        assert_eq!(item.entry.blog_id.as_str(), "b1");
        assert_eq!(item.entry.user_email, "reader@example.com");
        assert_eq!(item.category, Category::Astronomy);
    }

    #[test]
    fn test_create_request_wire_names() {
        let body = CreateWishlistRequest {
            blog_id: BlogId::new("b1"),
            user_email: "reader@example.com".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["blogId"], "b1");
        assert_eq!(json["userEmail"], "reader@example.com");
    }

    #[test]
    fn test_delete_outcome_requires_positive_count() {
        let none: DeleteOutcome = serde_json::from_str(r#"{"deletedCount":0}"#).unwrap();
        assert!(!none.deleted());
        let one: DeleteOutcome = serde_json::from_str(r#"{"deletedCount":1}"#).unwrap();
        assert!(one.deleted());
    }
}
