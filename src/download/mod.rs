//! Streaming downloads with byte-level progress.
pub mod streamer;
pub mod worker;

pub use streamer::{download, download_to_writer, download_with_start};
pub use worker::{spawn_download, DownloadEvent, DownloadId};
