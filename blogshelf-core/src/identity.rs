//! Identity types for Blogshelf records and the signed-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Server-assigned identifier of a catalog entry.
    BlogId
);

opaque_id!(
    /// Server-assigned identifier of a wishlist join record.
    WishlistEntryId
);

/// The authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// Snapshot of the identity provider: `{ user, loading }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityState {
    pub user: Option<User>,
    pub loading: bool,
}

impl IdentityState {
    pub fn signed_in(email: impl Into<String>) -> Self {
        Self {
            user: Some(User {
                email: email.into(),
            }),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Email of the signed-in user. Blank emails count as signed out.
    pub fn email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.email.as_str())
            .filter(|email| !email.trim().is_empty())
    }
}

/// Read-only source of identity, injected into the controllers.
pub trait IdentityProvider: Send + Sync {
    fn current(&self) -> IdentityState;
}

/// Identity provider backed by shared, swappable state.
#[derive(Debug, Clone, Default)]
pub struct SharedIdentity {
    inner: Arc<RwLock<IdentityState>>,
}

impl SharedIdentity {
    pub fn new(state: IdentityState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn set(&self, state: IdentityState) {
        match self.inner.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }
}

impl IdentityProvider for SharedIdentity {
    fn current(&self) -> IdentityState {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_email_is_signed_out() {
        let state = IdentityState::signed_in("   ");
        assert_eq!(state.email(), None);
    }

    #[test]
    fn test_shared_identity_swaps_state() {
        let identity = SharedIdentity::new(IdentityState::loading());
        assert!(identity.current().loading);
        identity.set(IdentityState::signed_in("reader@example.com"));
        assert_eq!(identity.current().email(), Some("reader@example.com"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = BlogId::new("65f1c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65f1c0ffee\"");
        let back: WishlistEntryId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back.as_str(), "abc");
    }
}
