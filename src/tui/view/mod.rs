//! Widgets for the browser screen.
pub mod listitems;
pub mod helpbox;
pub mod progressbox;
