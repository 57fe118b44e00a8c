use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::config::Settings;
use crate::error::{DlidxError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Listing requests honour the configured timeout; downloads do not, so a
/// slow multi-gigabyte transfer is never cut off mid-stream.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// GET for small documents (the listing page).
    pub fn get_page(&self, url: &str) -> Result<Response> {
        let mut req = self.inner.get(url);
        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }
        get_checked(req, url)
    }

    /// GET whose body is consumed incrementally.
    pub fn get_stream(&self, url: &str) -> Result<Response> {
        get_checked(self.inner.get(url), url)
    }
}

pub fn build_client(settings: &Settings) -> Result<HttpClient> {
    let inner = Client::builder()
        .user_agent(settings.user_agent.clone())
        .connect_timeout(CONNECT_TIMEOUT)
        // per-request timeouts only
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| DlidxError::Config {
            message: format!("cannot build HTTP client: {e}"),
        })?;
    Ok(HttpClient {
        inner,
        timeout: settings.timeout,
    })
}

/// Send a request and map transport failures and non-2xx codes to fetch errors.
pub fn get_checked(req: reqwest::blocking::RequestBuilder, url: &str) -> Result<Response> {
    let response = req.send().map_err(|e| DlidxError::fetch(url, e))?;
    let status = response.status();
    debug!("GET {url} -> {status}");
    if !status.is_success() {
        return Err(DlidxError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// `Content-Length` as a number; absent or garbage means undetermined.
pub fn content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
