use serde::Serialize;

/// One entry of a remote directory listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Link text as shown by the server (also used as local file name)
    pub name: String,
    /// Absolute URL, already resolved against the listing URL
    pub url: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Byte-level progress of one download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub bytes_written: u64,
    /// `None` when the server sent no usable `Content-Length`
    pub total: Option<u64>,
}

impl Progress {
    pub fn new(bytes_written: u64, total: Option<u64>) -> Self {
        Self { bytes_written, total }
    }

    /// Completion ratio in `0.0..=1.0`, or `None` when the total is undetermined.
    pub fn ratio(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.bytes_written.min(total) as f64) / (total as f64))
            }
            _ => None,
        }
    }

    pub fn percent(&self) -> Option<u16> {
        self.ratio().map(|r| (r * 100.0).floor() as u16)
    }

    /// "1.2 MiB / 3.4 MiB (35%)", or "1.2 MiB (size unknown)" without a total.
    pub fn label(&self) -> String {
        let current = crate::util::human_bytes(self.bytes_written);
        match (self.total, self.percent()) {
            (Some(total), Some(pct)) => {
                format!("{} / {} ({}%)", current, crate::util::human_bytes(total), pct)
            }
            (Some(total), None) => format!("{} / {}", current, crate::util::human_bytes(total)),
            (None, _) => format!("{} (size unknown)", current),
        }
    }
}
