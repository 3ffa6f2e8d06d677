// Common test utilities for end-to-end tests.

use std::time::{Duration, Instant};

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// Builds a client without connection reuse between calls.
pub fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
        .expect("build reqwest client")
}

/// Makes an HTTP request.
pub async fn do_request(method: &str, url: &str) -> Result<reqwest::Response, reqwest::Error> {
    let client = client(Duration::from_secs(10));
    let request = match method {
        "GET" => client.get(url),
        "POST" => client.post(url),
        "PUT" => client.put(url),
        "DELETE" => client.delete(url),
        _ => panic!("unsupported method: {}", method),
    };
    request.send().await
}

/// Makes an HTTP request and reads the whole response.
pub async fn fetch(method: &str, url: &str) -> Result<Reply, reqwest::Error> {
    let resp = do_request(method, url).await?;
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = resp.text().await?;
    Ok(Reply {
        status,
        content_type,
        body,
    })
}

/// Like [`fetch`], also measuring how long the call took.
pub async fn timed_fetch(method: &str, url: &str) -> (Reply, Duration) {
    let started = Instant::now();
    let reply = assert_ok(fetch(method, url).await);
    (reply, started.elapsed())
}

/// Asserts that an error is None.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {}", e))
}

/// Asserts that two values are equal.
pub fn assert_equal<T: PartialEq + std::fmt::Debug>(want: T, got: T) {
    if want != got {
        panic!("want={:?} got={:?}", want, got);
    }
}
