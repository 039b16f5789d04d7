//! Reusable widget components.

pub mod confirm;
pub mod filter;
pub mod table;

pub use confirm::ConfirmDialog;
pub use filter::{category_options, FilterBar, FilterOption, SearchBox};
pub use table::{
    build_table, clamp_lines, sort_target, ActionButton, CellContent, ColumnDescriptor, HeaderCell,
    TableModel, TableRow, TableStyle, TableView,
};
