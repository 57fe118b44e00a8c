//! Command-line subcommands.
pub mod dispatch;
pub mod list;
pub mod get;

pub use dispatch::{run, startup_listing, USAGE};
