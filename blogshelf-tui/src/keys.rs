//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    /// Move the header focus left.
    MoveLeft,
    /// Move the header focus right.
    MoveRight,
    SortByFocused,
    CycleCategory,
    ClearCategory,
    AddToWishlist,
    RemoveFromWishlist,
    OpenHelp,
    OpenSearch,
    Refresh,
    Confirm,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('s') => Some(Action::SortByFocused),
        KeyCode::Char('c') => Some(Action::CycleCategory),
        KeyCode::Char('C') => Some(Action::ClearCategory),
        KeyCode::Char('w') => Some(Action::AddToWishlist),
        KeyCode::Char('d') => Some(Action::RemoveFromWishlist),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Char('1') => Some(Action::SwitchView(0)),
        KeyCode::Char('2') => Some(Action::SwitchView(1)),
        _ => None,
    }
}

/// Edits to the search box while it has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    Insert(char),
    Backspace,
    Clear,
    /// Leave the box, keeping the text.
    Submit,
    /// Leave the box.
    Close,
}

pub fn map_search_key(event: KeyEvent) -> Option<SearchInput> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('u') => Some(SearchInput::Clear),
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c) => Some(SearchInput::Insert(c)),
        KeyCode::Backspace => Some(SearchInput::Backspace),
        KeyCode::Enter => Some(SearchInput::Submit),
        KeyCode::Esc => Some(SearchInput::Close),
        _ => None,
    }
}
