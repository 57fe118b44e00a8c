//! Case-insensitive name filtering over an index-stable listing.
pub mod matcher;
pub mod list;

pub use matcher::{apply_filter, name_matches};
pub use list::{index_width, render_row, FilteredList, Selection, VisibleRow};
