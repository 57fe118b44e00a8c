//! Library root for dlidx
pub mod error;
pub mod models;
pub mod util;

pub mod config;
pub mod http;
pub mod listing;
pub mod download;
pub mod filter;
pub mod logging;
pub mod tui;
pub mod commands;

// Convenience re-exports
pub use download::download;
pub use error::{DlidxError, Result};
pub use filter::{FilteredList, VisibleRow};
pub use listing::{parse_html, parse_listing};
pub use models::{FileDescriptor, Progress};
