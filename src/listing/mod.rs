//! Turn an HTML directory index into an ordered list of descriptors.
pub mod parser;

pub use parser::{parse_html, parse_listing};
