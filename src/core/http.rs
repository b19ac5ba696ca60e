use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};
use tracing::{
    info,
    warn,
};

use crate::core::{
    BookDraft,
    CreatedBook,
    LibrisError,
    ReadingProgressEntry,
};

const BOOKS_PATH: &str = "/api/books";
const PROGRESS_PATH: &str = "/api/reading-progress";
const AGENT: &str = concat!("libris/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

pub fn http_client(timeout: Duration) -> Result<Client, LibrisError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LibrisError::Custom(format!("HTTP client build failed: {e}")))
}

/// Joins a base URL and an absolute path with exactly one slash between them.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub async fn create_book(
    client: &Client,
    base_url: &str,
    draft: &BookDraft,
) -> Result<CreatedBook, LibrisError> {
    let url = endpoint(base_url, BOOKS_PATH);

    let resp = client.post(&url).header(USER_AGENT, AGENT).json(draft).send().await?;
    let resp = ensure_success(resp)?;

    let book = resp.json::<CreatedBook>().await?;
    info!("Backend created book {} (\"{}\")", book.id, book.title);
    Ok(book)
}

pub async fn fetch_progress(
    client: &Client,
    base_url: &str,
) -> Result<Vec<ReadingProgressEntry>, LibrisError> {
    let url = endpoint(base_url, PROGRESS_PATH);

    let resp = client.get(&url).header(USER_AGENT, AGENT).send().await?;
    let resp = ensure_success(resp)?;

    let values = resp.json::<Vec<serde_json::Value>>().await?;
    Ok(parse_entries(values))
}

/// Entries that do not parse or fail validation are dropped one by one; the
/// rest of the list still loads.
fn parse_entries(values: Vec<serde_json::Value>) -> Vec<ReadingProgressEntry> {
    values
        .into_iter()
        .filter_map(|value| {
            let entry = match serde_json::from_value::<ReadingProgressEntry>(value) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Dropping unreadable reading progress entry: {}", e);
                    return None;
                }
            };
            match entry.validate() {
                Ok(()) => Some(entry),
                Err(e) => {
                    warn!("Dropping reading progress entry: {}", e);
                    None
                }
            }
        })
        .collect()
}

fn ensure_success(resp: Response) -> Result<Response, LibrisError> {
    if !resp.status().is_success() {
        return Err(LibrisError::Backend {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}
