use std::io::Write;
use std::path::PathBuf;

use crate::download::download;
use crate::error::{DlidxError, Result};
use crate::http::HttpClient;
use crate::models::FileDescriptor;
use crate::util::human_bytes;

/// Download the entry with original index `index`, reporting progress on stderr.
pub fn get_entry(
    client: &HttpClient,
    files: &[FileDescriptor],
    index: usize,
    download_dir: &std::path::Path,
) -> Result<(PathBuf, u64)> {
    let file = files.get(index).ok_or_else(|| {
        DlidxError::usage(format!("No entry with index {index} (listing has {})", files.len()))
    })?;
    let dest = download_dir.join(&file.name);

    let mut stderr = std::io::stderr();
    let written = download(client, &file.url, &dest, |p| {
        let _ = write!(stderr, "\r{}: {}   ", file.name, p.label());
    })?;
    let _ = writeln!(stderr, "\r{}: done, {}      ", file.name, human_bytes(written));
    Ok((dest, written))
}
