use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::error::{DlidxError, Result};
use crate::http::HttpClient;
use crate::models::FileDescriptor;

/// Fetch `base_url` and parse every linked entry from the page.
pub fn parse_listing(client: &HttpClient, base_url: &str) -> Result<Vec<FileDescriptor>> {
    let response = client.get_page(base_url)?;
    // redirects (e.g. `/pub` -> `/pub/`) change the base for relative links
    let final_url = response.url().to_string();
    let bytes = response.bytes().map_err(|e| DlidxError::fetch(base_url, e))?;
    let body = String::from_utf8(bytes.to_vec())
        .map_err(|e| DlidxError::parse(format!("body of {final_url} is not UTF-8: {e}")))?;

    let files = parse_html(&body, &final_url)?;
    info!("Listing {final_url}: {} entries", files.len());
    Ok(files)
}

/// Every `<a href>` with non-blank text, in document order, hrefs resolved
/// against `base_url`. No dedup and no filtering of parent links.
pub fn parse_html(body: &str, base_url: &str) -> Result<Vec<FileDescriptor>> {
    let base = Url::parse(base_url)
        .map_err(|e| DlidxError::parse(format!("invalid base URL '{base_url}': {e}")))?;
    let selector = Selector::parse("a[href]")
        .map_err(|e| DlidxError::parse(format!("anchor selector: {e}")))?;

    let document = Html::parse_document(body);
    let mut files = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let text: String = anchor.text().collect();
        let name = text.trim();
        if name.is_empty() {
            continue;
        }
        match base.join(href.trim()) {
            Ok(url) => files.push(FileDescriptor::new(name, url.as_str())),
            Err(e) => debug!("Skipping '{name}': cannot resolve href '{href}': {e}"),
        }
    }
    Ok(files)
}
