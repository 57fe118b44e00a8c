//! Blocking HTTP plumbing shared by the listing and download paths.
pub mod client;

pub use client::{build_client, get_checked, HttpClient};
