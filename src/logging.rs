use std::fs::{self, File};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::log_dir;

/// Send tracing output to `<cache_dir>/dlidx/dlidx.log`; the terminal belongs
/// to the UI. `RUST_LOG` wins over `level`. Returns `None` (no logging) if
/// the file cannot be created. Keep the guard alive until exit.
pub fn init(level: &str) -> Option<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir).ok()?;
    let file = File::create(dir.join("dlidx.log")).ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .try_init()
        .ok()?;
    Some(guard)
}
