//! View rendering dispatch.

pub mod listing;
pub mod wishlist;

use crate::controllers::LoadState;
use crate::nav::View;
use crate::state::App;
use crate::theme::{load_state_color, notification_color, notification_label};
use crate::widgets::{ConfirmDialog, TableStyle};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

const HELP_TEXT: &[&str] = &[
    "j/k      move between rows",
    "h/l      move the header focus",
    "s        sort by the focused column",
    "/        edit the title search",
    "c / C    cycle / clear the category filter",
    "w        add the selected blog to the wishlist",
    "d        remove the selected wishlist item",
    "Enter    confirm    Esc cancel",
    "r        refresh    Tab switch view    q quit",
];

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::AllBlogs => listing::render(f, app, layout[1]),
        View::Wishlist => wishlist::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if let Some(pending) = app.wishlist.pending_confirmation() {
        let dialog = ConfirmDialog {
            heading: pending.heading(),
            body: pending.body(),
            confirm_label: "Yes, delete it!",
            cancel_label: "Cancel",
            border_style: Style::default().fg(app.theme.warning),
            confirm_style: Style::default().fg(app.theme.error),
            cancel_style: Style::default().fg(app.theme.text_dim),
        };
        dialog.render(f, layout[1]);
    } else if app.help_visible {
        render_help(f, app, layout[1]);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(idx, view)| Line::from(format!("{} {}", idx + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(Span::styled(
            "BLOGSHELF",
            Style::default().fg(app.theme.secondary),
        )));
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.latest_notification() {
        Some(note) => (
            format!("{}: {}", notification_label(note.level), note.summary()),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (
            "j/k move • h/l column • s sort • / search • Tab switch view • ? help • q quit"
                .to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame<'_>, app: &App, area: Rect) {
    let height = (HELP_TEXT.len() as u16 + 2).min(area.height);
    let width = 56.min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, popup);
    let lines: Vec<Line> = HELP_TEXT.iter().map(|l| Line::raw(*l)).collect();
    let help = Paragraph::new(lines).block(
        Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border_focus)),
    );
    f.render_widget(help, popup);
}

pub(crate) fn table_style(app: &App) -> TableStyle {
    TableStyle {
        header: Style::default()
            .fg(app.theme.secondary)
            .add_modifier(Modifier::BOLD),
        header_focus: Style::default()
            .fg(app.theme.bg)
            .bg(app.theme.secondary)
            .add_modifier(Modifier::BOLD),
        emphasis: Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
        badge: Style::default().fg(app.theme.bg).bg(app.theme.primary_dim),
        action: Style::default().fg(app.theme.success),
        action_disabled: Style::default().fg(app.theme.text_muted),
        highlight: Style::default().bg(app.theme.bg_highlight),
    }
}

pub(crate) fn load_state_line(state: &LoadState, app: &App) -> Span<'static> {
    let text = match state {
        LoadState::Failed(reason) => format!("{}: {}", state.label(), reason),
        other => other.label().to_string(),
    };
    Span::styled(text, Style::default().fg(load_state_color(state, &app.theme)))
}
