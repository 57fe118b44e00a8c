use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{DlidxError, Result};
use crate::http::client::content_length;
use crate::http::HttpClient;
use crate::models::Progress;

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream `url` into `dest` (created or truncated) and report progress after
/// every chunk has been written. Returns the number of bytes written.
///
/// A failure mid-transfer leaves the partial file on disk.
pub fn download<F>(client: &HttpClient, url: &str, dest: &Path, on_progress: F) -> Result<u64>
where
    F: FnMut(Progress),
{
    download_with_start(client, url, dest, |_| {}, on_progress)
}

/// Like [`download`], with `on_start` called once the response headers are
/// in (with the announced length) and before the destination is touched.
pub fn download_with_start<S, F>(
    client: &HttpClient,
    url: &str,
    dest: &Path,
    on_start: S,
    on_progress: F,
) -> Result<u64>
where
    S: FnOnce(Option<u64>),
    F: FnMut(Progress),
{
    let response = client.get_stream(url)?;
    let total = content_length(&response);
    debug!("Downloading {url} -> {} (length {:?})", dest.display(), total);
    on_start(total);

    let mut file = File::create(dest).map_err(|e| DlidxError::Download {
        url: url.to_string(),
        bytes_written: 0,
        reason: format!("cannot create {}: {e}", dest.display()),
    })?;

    let written = download_to_writer(response, &mut file, total, url, on_progress)?;
    file.sync_all().map_err(|e| DlidxError::Download {
        url: url.to_string(),
        bytes_written: written,
        reason: e.to_string(),
    })?;
    info!("Downloaded {url}: {written} bytes");
    Ok(written)
}

/// Copy `body` into `out`, one progress report per persisted chunk.
pub fn download_to_writer<R, W, F>(
    mut body: R,
    out: &mut W,
    total: Option<u64>,
    url: &str,
    mut on_progress: F,
) -> Result<u64>
where
    R: Read,
    W: Write,
    F: FnMut(Progress),
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut bytes_written: u64 = 0;
    let fail = |bytes_written: u64, reason: String| {
        warn!("Download of {url} broke off after {bytes_written} bytes: {reason}");
        DlidxError::Download {
            url: url.to_string(),
            bytes_written,
            reason,
        }
    };

    loop {
        let read = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(fail(bytes_written, e.to_string())),
        };
        out.write_all(&buffer[..read])
            .map_err(|e| fail(bytes_written, e.to_string()))?;
        bytes_written += read as u64;
        on_progress(Progress::new(bytes_written, total));
    }

    out.flush().map_err(|e| fail(bytes_written, e.to_string()))?;
    Ok(bytes_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Yields `fail_after` bytes in small pieces, then errors.
    struct FlakyReader {
        sent: usize,
        fail_after: usize,
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent >= self.fail_after {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"));
            }
            let n = buf.len().min(7).min(self.fail_after - self.sent);
            buf[..n].fill(b'x');
            self.sent += n;
            Ok(n)
        }
    }

    #[test]
    fn test_progress_is_monotonic_and_matches_output() {
        let data = vec![1u8; CHUNK_SIZE * 2 + 17];
        let mut out = Vec::new();
        let mut seen = Vec::new();
        let n = download_to_writer(Cursor::new(data.clone()), &mut out, Some(data.len() as u64), "u", |p| {
            seen.push(p)
        })
        .unwrap();

        assert_eq!(n, data.len() as u64);
        assert_eq!(out, data);
        assert!(seen.windows(2).all(|w| w[0].bytes_written < w[1].bytes_written));
        assert_eq!(seen.last().unwrap().bytes_written, data.len() as u64);
        assert!(seen.iter().all(|p| p.total == Some(data.len() as u64)));
    }

    #[test]
    fn test_unknown_total() {
        let mut out = Vec::new();
        let mut last = None;
        download_to_writer(Cursor::new(b"hello".to_vec()), &mut out, None, "u", |p| last = Some(p)).unwrap();
        assert_eq!(last, Some(Progress::new(5, None)));
        assert_eq!(last.unwrap().percent(), None);
    }

    #[test]
    fn test_empty_body_reports_nothing() {
        let mut out = Vec::new();
        let mut calls = 0;
        let n = download_to_writer(Cursor::new(Vec::new()), &mut out, Some(0), "u", |_| calls += 1).unwrap();
        assert_eq!(n, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_failure_carries_bytes_written() {
        let mut out = Vec::new();
        let mut last = 0;
        let err = download_to_writer(
            FlakyReader { sent: 0, fail_after: 30 },
            &mut out,
            Some(100),
            "http://h/f",
            |p| last = p.bytes_written,
        )
        .unwrap_err();

        assert_eq!(err.bytes_written(), 30);
        assert_eq!(last, 30);
        assert_eq!(out.len(), 30);
    }
}
