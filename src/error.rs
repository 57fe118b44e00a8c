use thiserror::Error;

pub type Result<T> = std::result::Result<T, DlidxError>;

#[derive(Error, Debug)]
pub enum DlidxError {
    #[error("{message}")]
    Usage { message: String },

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Cannot parse listing: {message}")]
    Parse { message: String },

    #[error("Download of {url} failed after {bytes_written} bytes: {reason}")]
    Download {
        url: String,
        bytes_written: u64,
        reason: String,
    },

    #[error("Row does not map to a listing entry: '{row}'")]
    Resolution { row: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DlidxError {
    pub fn usage(message: impl Into<String>) -> Self {
        DlidxError::Usage {
            message: message.into(),
        }
    }

    pub fn fetch(url: &str, err: impl std::fmt::Display) -> Self {
        DlidxError::Fetch {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        DlidxError::Parse {
            message: message.into(),
        }
    }

    /// Bytes already persisted when a transfer broke off. Zero for other errors.
    pub fn bytes_written(&self) -> u64 {
        match self {
            DlidxError::Download { bytes_written, .. } => *bytes_written,
            _ => 0,
        }
    }

    /// Errors raised before the UI starts that leave nothing to browse.
    pub fn is_fatal_at_startup(&self) -> bool {
        !matches!(self, DlidxError::Parse { .. })
    }

    /// Process exit code for this error when it ends the program.
    pub fn exit_code(&self) -> u8 {
        match self {
            DlidxError::Usage { .. } => 2,
            _ => 1,
        }
    }
}
