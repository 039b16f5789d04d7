//! Page controllers: the listing and the wishlist.

pub mod listing;
pub mod sequence;
pub mod wishlist;

pub use listing::{
    CompletionEffect, FetchCompletion, FetchTicket, ListController, LoadState,
    DEFAULT_SEARCH_DEBOUNCE,
};
pub use sequence::{SequenceGuard, SequenceToken};
pub use wishlist::{
    AddCompletion, AddOutcome, AddTicket, LoadCompletion, LoadTicket, MountOutcome,
    PendingConfirmation, RemovalCompletion, RemovalTicket, RemoveOutcome, RowActionState,
    WishlistController, WishlistState,
};
