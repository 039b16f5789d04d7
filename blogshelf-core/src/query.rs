//! Listing query state: category filter, title search and server-side sort.

use crate::{Category, SortField, SortOrder};
use serde::{Deserialize, Serialize};

/// Search, filter and sort parameters of the primary listing.
///
/// Created with defaults when the listing mounts and never persisted. Values
/// are not validated beyond category parsing; the server decides what they
/// mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    category: Option<Category>,
    title_search: String,
    sort_field: SortField,
    sort_order: SortOrder,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            category: None,
            title_search: String::new(),
            sort_field: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn title_search(&self) -> &str {
        &self.title_search
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Set the category filter. An empty string clears it; anything else is
    /// kept as given.
    pub fn set_category(&mut self, category: &str) {
        self.category = if category.is_empty() {
            None
        } else {
            Some(Category::from(category))
        };
    }

    pub fn set_category_filter(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_title_search(&mut self, title: impl Into<String>) {
        self.title_search = title.into();
    }

    /// Select the sort field. Re-selecting the active field flips the order;
    /// a new field starts ascending.
    pub fn set_sort_field(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Wire parameters for `GET /blogs`.
    pub fn to_params(&self) -> BlogQuery {
        BlogQuery {
            category: self
                .category
                .as_ref()
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            title: self.title_search.clone(),
            sort_by: self.sort_field.as_param().to_string(),
            sort_order: self.sort_order.as_param().to_string(),
        }
    }
}

/// Query string of `GET /blogs?category=&title=&sortBy=&sortOrder=`.
///
/// Empty `category` and `title` mean "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlogQuery {
    pub category: String,
    pub title: String,
    #[serde(rename = "sortBy")]
    pub sort_by: String,
    #[serde(rename = "sortOrder")]
    pub sort_order: String,
}
