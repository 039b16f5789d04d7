//! Modal confirmation dialog.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct ConfirmDialog<'a> {
    pub heading: &'a str,
    pub body: String,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
    pub border_style: Style,
    pub confirm_style: Style,
    pub cancel_style: Style,
}

impl<'a> ConfirmDialog<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup = centered(area, 60, 7);
        f.render_widget(Clear, popup);

        let lines = vec![
            Line::raw(self.body.clone()),
            Line::raw(""),
            Line::from(vec![
                Span::styled(format!("[Enter] {}", self.confirm_label), self.confirm_style),
                Span::raw("   "),
                Span::styled(format!("[Esc] {}", self.cancel_label), self.cancel_style),
            ]),
        ];
        let dialog = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.heading)
                    .borders(Borders::ALL)
                    .border_style(self.border_style),
            );
        f.render_widget(dialog, popup);
    }
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
