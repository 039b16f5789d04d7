//! Wishlist view: local title search and the wishlist table.

use super::{load_state_line, table_style};
use crate::controllers::{LoadState, WishlistState};
use crate::state::App;
use crate::widgets::{build_table, SearchBox, TableView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    match app.wishlist.state() {
        WishlistState::LoginRequired => {
            let prompt = Paragraph::new(vec![
                Line::raw("Please Login first"),
                Line::raw("Set identity.email in the config file to sign in."),
            ])
            .style(Style::default().fg(app.theme.warning))
            .block(Block::default().title("Wishlist").borders(Borders::ALL));
            f.render_widget(prompt, area);
            return;
        }
        WishlistState::AwaitingIdentity | WishlistState::Loading => {
            let state = LoadState::from(app.wishlist.state());
            let loading = Paragraph::new(Line::from(load_state_line(&state, app)))
                .block(Block::default().title("Wishlist").borders(Borders::ALL));
            f.render_widget(loading, area);
            return;
        }
        WishlistState::Idle | WishlistState::Ready | WishlistState::Failed(_) => {}
    }

    SearchBox {
        placeholder: "Search wishlist by title...",
        value: app.wishlist.search(),
        editing: app.wishlist_view.search_editing,
        style: Style::default().fg(app.theme.text),
        placeholder_style: Style::default().fg(app.theme.text_muted),
    }
    .render(f, chunks[0]);

    let visible = app.wishlist.visible_entries();
    if visible.is_empty() {
        let state = LoadState::from(app.wishlist.state());
        let empty = Paragraph::new(vec![
            Line::raw("No items"),
            Line::from(load_state_line(&state, app)),
        ])
        .block(Block::default().title("Wishlist").borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let model = build_table(&app.wishlist_columns, &visible, app.wishlist.row_actions(), None);
    let title = format!(
        "Wishlist ({} of {})",
        visible.len(),
        app.wishlist.entries().len()
    );
    TableView {
        title: &title,
        model: &model,
        selected: app.wishlist_view.selected,
        focused_header: None,
        style: table_style(app),
    }
    .render(f, chunks[1]);
}
