//! Configuration layer: file location + TOML loading.
pub mod path;
pub mod io;

pub use path::{config_path, log_dir};
pub use io::{load_settings, parse_settings, Settings, ThemeSettings};
