//! Common utilities

use std::time::Duration;

use reqwest::blocking::Client;

/// Build the blocking HTTP client shared by the sources.
pub fn http_client(timeout_ms: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms.max(1)))
        .build()
}

/// GET a url and return the body, failing on non-success status codes.
pub fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let res = client.get(url).send()?.error_for_status()?;
    Ok(res.bytes()?.to_vec())
}

/// Append a `cb=<epoch ms>` cache buster to a url.
///
/// ```
/// use swinetracklib::module::util::common::cache_busted;
/// assert_eq!(cache_busted("http://x/a.jpg", 42), "http://x/a.jpg?cb=42");
/// assert_eq!(cache_busted("http://x/a.jpg?t=1", 42), "http://x/a.jpg?t=1&cb=42");
/// ```
pub fn cache_busted(url: &str, epoch_ms: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}cb={epoch_ms}")
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
