//! Interactive browser: state machine, runner and widgets.
pub mod app;
pub mod controller;
pub mod functions;
pub mod theme;
pub mod view;

pub use app::run_tui;
pub use controller::{Action, Controller, Mode};
