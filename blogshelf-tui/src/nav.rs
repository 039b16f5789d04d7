//! Navigation and view switching utilities.

use blogshelf_core::IdentityState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    AllBlogs,
    Wishlist,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::AllBlogs => "All Blogs",
            View::Wishlist => "Wishlist",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::AllBlogs, View::Wishlist]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

/// Result of checking identity before showing a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Identity has not settled; show a loading state.
    Pending,
    Allow(String),
    RedirectToLogin,
}

pub fn route_guard(identity: &IdentityState) -> RouteDecision {
    if identity.loading {
        return RouteDecision::Pending;
    }
    match identity.email() {
        Some(email) => RouteDecision::Allow(email.to_string()),
        None => RouteDecision::RedirectToLogin,
    }
}
