use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::error;

use crate::error::DlidxError;
use crate::http::HttpClient;
use crate::models::{FileDescriptor, Progress};

use super::streamer::download_with_start;

pub type DownloadId = u64;

/// Messages from a download thread to the UI loop, in transfer order.
/// Every session ends with exactly one `Finished`.
#[derive(Debug)]
pub enum DownloadEvent {
    /// Response headers received; `total` is the announced length, if any.
    Started {
        id: DownloadId,
        total: Option<u64>,
    },
    Progress {
        id: DownloadId,
        progress: Progress,
    },
    Finished {
        id: DownloadId,
        file: FileDescriptor,
        local_path: PathBuf,
        result: Result<u64, DlidxError>,
    },
}

impl DownloadEvent {
    pub fn id(&self) -> DownloadId {
        match self {
            DownloadEvent::Started { id, .. }
            | DownloadEvent::Progress { id, .. }
            | DownloadEvent::Finished { id, .. } => *id,
        }
    }
}

/// Run one download on its own thread. The thread owns the destination file;
/// the UI only ever sees events. A closed receiver is not an error: the
/// transfer keeps going and the events are dropped.
pub fn spawn_download(
    id: DownloadId,
    client: HttpClient,
    file: FileDescriptor,
    local_path: PathBuf,
    tx: Sender<DownloadEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("dlidx-download-{id}"))
        .spawn(move || {
            run_job(id, file, local_path, &tx, |file, path, emit| {
                download_with_start(
                    &client,
                    &file.url,
                    path,
                    |total| emit(DownloadEvent::Started { id, total }),
                    |progress| emit(DownloadEvent::Progress { id, progress }),
                )
            })
        })
}

/// Run `job` and send its `Finished` event. A panic inside `job` is turned
/// into a failed result so the UI never waits on a dead thread.
fn run_job<F>(
    id: DownloadId,
    file: FileDescriptor,
    local_path: PathBuf,
    tx: &Sender<DownloadEvent>,
    job: F,
) where
    F: FnOnce(&FileDescriptor, &std::path::Path, &dyn Fn(DownloadEvent)) -> Result<u64, DlidxError>,
{
    let written = Cell::new(0u64);
    let emit = |ev: DownloadEvent| {
        if let DownloadEvent::Progress { progress, .. } = &ev {
            written.set(progress.bytes_written);
        }
        let _ = tx.send(ev);
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| job(&file, &local_path, &emit)))
        .unwrap_or_else(|_| {
            Err(DlidxError::Download {
                url: file.url.clone(),
                bytes_written: written.get(),
                reason: "download thread panicked".to_string(),
            })
        });
    if let Err(e) = &result {
        error!("Download {id} ({}) failed: {e}", file.name);
    }
    let _ = tx.send(DownloadEvent::Finished {
        id,
        file,
        local_path,
        result,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn finished(events: &[DownloadEvent]) -> &Result<u64, DlidxError> {
        match events.last() {
            Some(DownloadEvent::Finished { result, .. }) => result,
            other => panic!("expected Finished last, got {other:?}"),
        }
    }

    #[test]
    fn test_panicking_job_still_finishes() {
        let (tx, rx) = mpsc::channel();
        let file = FileDescriptor::new("a.bin", "http://h/a.bin");
        run_job(3, file, PathBuf::from("a.bin"), &tx, |_, _, emit| {
            emit(DownloadEvent::Progress { id: 3, progress: Progress::new(12, None) });
            panic!("boom");
        });
        drop(tx);

        let events: Vec<DownloadEvent> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        match finished(&events) {
            Err(e @ DlidxError::Download { .. }) => {
                assert_eq!(e.bytes_written(), 12);
                assert!(e.to_string().contains("panicked"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_job_result_is_forwarded() {
        let (tx, rx) = mpsc::channel();
        let file = FileDescriptor::new("a.bin", "http://h/a.bin");
        run_job(4, file, PathBuf::from("a.bin"), &tx, |_, _, emit| {
            emit(DownloadEvent::Started { id: 4, total: Some(9) });
            Ok(9)
        });
        drop(tx);

        let events: Vec<DownloadEvent> = rx.iter().collect();
        assert!(matches!(events[0], DownloadEvent::Started { id: 4, total: Some(9) }));
        assert_eq!(*finished(&events).as_ref().unwrap(), 9);
    }
}
