use std::env;
use std::path::PathBuf;

/// `$DLIDX_CONFIG`, else `<config_dir>/dlidx/config.toml`.
pub fn config_path() -> PathBuf {
    if let Some(custom) = env::var_os("DLIDX_CONFIG") {
        return PathBuf::from(custom);
    }
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("dlidx/config.toml")
}

/// `$DLIDX_LOG_DIR`, else `<cache_dir>/dlidx`.
pub fn log_dir() -> PathBuf {
    if let Some(custom) = env::var_os("DLIDX_LOG_DIR") {
        return PathBuf::from(custom);
    }
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("dlidx")
}
