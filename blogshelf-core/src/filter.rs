//! Local title filtering for already-fetched lists.
//!
//! The wishlist page searches what it has in memory instead of re-querying
//! the server.

use crate::WishlistItem;

/// Case-insensitive substring match. An empty or blank term matches everything.
pub fn title_matches(title: &str, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Items whose title matches `term`, in their original order.
pub fn filter_by_title<'a>(items: &'a [WishlistItem], term: &str) -> Vec<&'a WishlistItem> {
    items
        .iter()
        .filter(|item| title_matches(&item.title, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        assert!(title_matches("Algebra Basics", "algebra"));
        assert!(title_matches("Algebra Basics", "BASICS"));
        assert!(!title_matches("Algebra Basics", "Geometry"));
    }

    #[test]
    fn test_blank_term_matches_all() {
        assert!(title_matches("Anything", ""));
        assert!(title_matches("Anything", "   "));
    }

    #[test]
    fn test_non_ascii_titles() {
        assert!(title_matches("Über Physik", "über"));
    }
}
