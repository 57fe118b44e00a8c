use std::env;
use std::process::ExitCode;

use tracing::{error, warn};

use dlidx::commands::{run, USAGE};
use dlidx::config::load_settings;
use dlidx::error::DlidxError;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let (settings, config_warning) = load_settings();
    // dropped at the end of main, which flushes the log file
    let _log_guard = dlidx::logging::init(&settings.log_level);
    if let Some(w) = config_warning {
        warn!("{w}");
    }

    match run(&args, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("dlidx: {e}");
            if matches!(e, DlidxError::Usage { .. }) {
                eprintln!("\n{USAGE}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}
