//! Category filter bar and title search box.

use blogshelf_core::Category;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub active: bool,
}

/// "All" followed by the known categories, with the active one flagged.
pub fn category_options(active: Option<&Category>) -> Vec<FilterOption> {
    let mut options = vec![FilterOption {
        label: "All".to_string(),
        active: active.is_none(),
    }];
    options.extend(Category::known().iter().map(|category| FilterOption {
        label: category.to_string(),
        active: active == Some(category),
    }));
    if let Some(other @ Category::Other(_)) = active {
        options.push(FilterOption {
            label: other.to_string(),
            active: true,
        });
    }
    options
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub active_style: Style,
    pub inactive_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let spans: Vec<Span> = self
            .filters
            .iter()
            .map(|filter| {
                let style = if filter.active {
                    self.active_style
                } else {
                    self.inactive_style
                };
                Span::styled(format!(" {} ", filter.label), style)
            })
            .collect();

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

pub struct SearchBox<'a> {
    pub placeholder: &'a str,
    pub value: &'a str,
    pub editing: bool,
    pub style: Style,
    pub placeholder_style: Style,
}

impl<'a> SearchBox<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let line = if self.value.is_empty() && !self.editing {
            Line::from(Span::styled(self.placeholder, self.placeholder_style))
        } else {
            let cursor = if self.editing { "_" } else { "" };
            Line::from(Span::styled(format!("{}{}", self.value, cursor), self.style))
        };
        let title = if self.editing { "Search [editing]" } else { "Search [/]" };
        let paragraph =
            Paragraph::new(line).block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_active_without_filter() {
        let options = category_options(None);
        assert_eq!(options.len(), Category::known().len() + 1);
        assert!(options[0].active);
        assert!(options[1..].iter().all(|o| !o.active));
    }

    #[test]
    fn test_unknown_category_is_listed_when_active() {
        let other = Category::from("Biology");
        let options = category_options(Some(&other));
        let last = options.last().unwrap();
        assert_eq!(last.label, "Biology");
        assert!(last.active);
        assert!(!options[0].active);
    }
}
