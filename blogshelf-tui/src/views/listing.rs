//! All Blogs view: filter bar, search box and the catalog table.

use super::{load_state_line, table_style};
use crate::controllers::LoadState;
use crate::state::App;
use crate::theme::category_color;
use crate::widgets::{build_table, category_options, FilterBar, SearchBox, TableView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let query = app.listing.query();
    let active_color = query
        .category()
        .map(|c| category_color(c, &app.theme))
        .unwrap_or(app.theme.primary);
    let options = category_options(query.category());
    FilterBar {
        title: "Category [c]",
        filters: &options,
        active_style: Style::default()
            .fg(app.theme.bg)
            .bg(active_color)
            .add_modifier(Modifier::BOLD),
        inactive_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, chunks[0]);

    SearchBox {
        placeholder: "Search blogs by title...",
        value: query.title_search(),
        editing: app.listing_view.search_editing,
        style: Style::default().fg(app.theme.text),
        placeholder_style: Style::default().fg(app.theme.text_muted),
    }
    .render(f, chunks[1]);

    let state = app.listing.state();
    if *state == LoadState::Loading && app.listing.rows().is_empty() {
        let loading = Paragraph::new(Line::from(load_state_line(state, app)))
            .block(Block::default().title("All Blogs").borders(Borders::ALL));
        f.render_widget(loading, chunks[2]);
        return;
    }

    let rows: Vec<_> = app.listing.rows().iter().collect();
    let model = build_table(
        &app.listing_columns,
        &rows,
        app.wishlist.row_actions(),
        Some((query.sort_field(), query.sort_order())),
    );

    if model.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw("No blogs found"),
            Line::from(load_state_line(state, app)),
        ])
        .block(Block::default().title("All Blogs").borders(Borders::ALL));
        f.render_widget(empty, chunks[2]);
        return;
    }

    let title = format!("All Blogs ({}) | {}", model.rows.len(), state.label());
    TableView {
        title: &title,
        model: &model,
        selected: app.listing_view.selected,
        focused_header: Some(app.listing_view.header_focus),
        style: table_style(app),
    }
    .render(f, chunks[2]);
}
