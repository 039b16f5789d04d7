//! Declarative table: column descriptors in, header and row model out.
//!
//! The model is pure data so views can render it and tests can inspect it
//! without a terminal. Sorting is never done here; a sortable header only
//! resolves to the field the server should sort by.

use blogshelf_core::{SortField, SortOrder};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// One column of a table over rows of `T`, rendered with context `Ctx`.
pub struct ColumnDescriptor<T, Ctx> {
    pub id: &'static str,
    pub header: &'static str,
    /// Server-side sort key; `None` for columns that cannot be sorted.
    pub sort_key: Option<SortField>,
    /// Plain-text value of the cell.
    pub accessor: fn(&T) -> String,
    /// Custom cell renderer; plain text of `accessor` when absent.
    pub cell: Option<fn(&T, &Ctx) -> CellContent>,
    /// Relative width.
    pub weight: u16,
}

impl<T, Ctx> ColumnDescriptor<T, Ctx> {
    pub fn content(&self, row: &T, ctx: &Ctx) -> CellContent {
        match self.cell {
            Some(render) => render(row, ctx),
            None => CellContent::Text((self.accessor)(row)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub enabled: bool,
    pub key_hint: char,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, key_hint: char, enabled: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
            key_hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Emphasis(String),
    /// Text word-wrapped to the column and cut to at most `max_lines` lines.
    Clamped { text: String, max_lines: u16 },
    /// Image reference with an overlaid badge, e.g. the category.
    Image { uri: String, badge: String },
    Actions(Vec<ActionButton>),
}

impl CellContent {
    /// Visual height of the cell in terminal lines at column `width`.
    pub fn height(&self, width: u16) -> u16 {
        match self {
            CellContent::Clamped { text, max_lines } => {
                clamp_lines(text, width, *max_lines).len() as u16
            }
            CellContent::Image { .. } => 2,
            _ => 1,
        }
    }

    /// Plain text used by filtering and tests.
    pub fn plain(&self) -> String {
        match self {
            CellContent::Text(text) | CellContent::Emphasis(text) => text.clone(),
            CellContent::Clamped { text, .. } => text.clone(),
            CellContent::Image { uri, badge } => format!("[{}] {}", badge, uri),
            CellContent::Actions(buttons) => buttons
                .iter()
                .map(|b| b.label.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub id: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    /// Present when this column is the active sort.
    pub indicator: Option<SortOrder>,
}

impl HeaderCell {
    pub fn display(&self) -> String {
        match self.indicator {
            Some(order) => format!("{} {}", self.label, order.arrow()),
            None => self.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<CellContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    pub widths: Vec<u16>,
}

impl TableModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the header and rows for `rows` under `columns`.
///
/// `active_sort` marks the header of the column whose sort key matches.
pub fn build_table<T, Ctx>(
    columns: &[ColumnDescriptor<T, Ctx>],
    rows: &[&T],
    ctx: &Ctx,
    active_sort: Option<(SortField, SortOrder)>,
) -> TableModel {
    let headers = columns
        .iter()
        .map(|column| HeaderCell {
            id: column.id,
            label: column.header,
            sortable: column.sort_key.is_some(),
            indicator: match (column.sort_key, active_sort) {
                (Some(key), Some((field, order))) if key == field => Some(order),
                _ => None,
            },
        })
        .collect();

    let rows = rows
        .iter()
        .map(|row| TableRow {
            cells: columns.iter().map(|c| c.content(row, ctx)).collect(),
        })
        .collect();

    TableModel {
        headers,
        rows,
        widths: columns.iter().map(|c| c.weight).collect(),
    }
}

/// Word-wrap `text` to `width` columns and keep the first `max_lines` lines.
///
/// Words longer than the width are split. A cut clamp ends with `…`.
pub fn clamp_lines(text: &str, width: u16, max_lines: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let max_lines = usize::from(max_lines.max(1));

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            loop {
                let gap = usize::from(current_len > 0);
                if current_len + gap + word.len() <= width {
                    if gap == 1 {
                        current.push(' ');
                    }
                    current.extend(word.iter());
                    current_len += gap + word.len();
                    break;
                }
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    continue;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            if last.chars().count() >= width {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

/// Sort field for a header activation at `index`, if that column sorts.
pub fn sort_target<T, Ctx>(columns: &[ColumnDescriptor<T, Ctx>], index: usize) -> Option<SortField> {
    columns.get(index).and_then(|c| c.sort_key)
}

/// Styles used when rendering a [`TableModel`].
#[derive(Debug, Clone, Copy)]
pub struct TableStyle {
    pub header: Style,
    pub header_focus: Style,
    pub emphasis: Style,
    pub badge: Style,
    pub action: Style,
    pub action_disabled: Style,
    pub highlight: Style,
}

pub struct TableView<'a> {
    pub title: &'a str,
    pub model: &'a TableModel,
    pub selected: Option<usize>,
    pub focused_header: Option<usize>,
    pub style: TableStyle,
}

impl<'a> TableView<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let header = Row::new(self.model.headers.iter().enumerate().map(|(idx, h)| {
            let style = if self.focused_header == Some(idx) {
                self.style.header_focus
            } else {
                self.style.header
            };
            let label = if h.sortable { h.display() } else { h.label.to_string() };
            Cell::from(Span::styled(label, style))
        }));

        let total: u16 = self.model.widths.iter().sum::<u16>().max(1);
        let columns = column_widths(&self.model.widths, total, area.width);

        let rows = self.model.rows.iter().map(|row| {
            let height = row
                .cells
                .iter()
                .zip(&columns)
                .map(|(cell, width)| cell.height(*width))
                .max()
                .unwrap_or(1);
            Row::new(
                row.cells
                    .iter()
                    .zip(&columns)
                    .map(|(cell, width)| Cell::from(self.cell_text(cell, *width))),
            )
            .height(height)
        });

        let widths: Vec<Constraint> = self
            .model
            .widths
            .iter()
            .map(|w| Constraint::Ratio(u32::from(*w), u32::from(total)))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .highlight_style(self.style.highlight);

        let mut state = TableState::default();
        state.select(self.selected);
        f.render_stateful_widget(table, area, &mut state);
    }

    fn cell_text(&self, cell: &CellContent, width: u16) -> Text<'static> {
        match cell {
            CellContent::Text(text) => Text::raw(text.clone()),
            CellContent::Emphasis(text) => {
                Text::from(Span::styled(text.clone(), self.style.emphasis))
            }
            CellContent::Clamped { text, max_lines } => {
                let lines: Vec<Line> = clamp_lines(text, width, *max_lines)
                    .into_iter()
                    .map(Line::raw)
                    .collect();
                Text::from(lines)
            }
            CellContent::Image { uri, badge } => Text::from(vec![
                Line::from(Span::styled(format!(" {} ", badge), self.style.badge)),
                Line::raw(uri.clone()),
            ]),
            CellContent::Actions(buttons) => {
                let spans: Vec<Span> = buttons
                    .iter()
                    .map(|b| {
                        let style = if b.enabled {
                            self.style.action
                        } else {
                            self.style.action_disabled.add_modifier(Modifier::DIM)
                        };
                        Span::styled(format!("[{}] {} ", b.key_hint, b.label), style)
                    })
                    .collect();
                Text::from(Line::from(spans))
            }
        }
    }
}

/// Approximate rendered width of each column inside a bordered table.
fn column_widths(weights: &[u16], total: u16, area_width: u16) -> Vec<u16> {
    let spacing = u16::try_from(weights.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let available = u32::from(area_width.saturating_sub(2).saturating_sub(spacing));
    weights
        .iter()
        .map(|w| {
            let width = available * u32::from(*w) / u32::from(total);
            u16::try_from(width).unwrap_or(u16::MAX).max(1)
        })
        .collect()
}
