//! Event types for the TUI event loop.

use crate::controllers::{AddCompletion, FetchCompletion, LoadCompletion, RemovalCompletion};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    BlogsLoaded(FetchCompletion),
    WishlistLoaded(LoadCompletion),
    WishlistAdded(AddCompletion),
    WishlistRemoved(RemovalCompletion),
}
