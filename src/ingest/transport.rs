/// Raw HTTP transport.
///
/// The providers only need "GET this URL, give me the body". Tests feed
/// canned payloads through the same trait; TLS and pooling stay inside
/// reqwest.

use std::time::Duration;

/// Blocking GET returning the response body, or a transport-level message.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String, String>;
}

/// `Transport` backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds the client. `timeout` of `None` disables the request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sillaro_sentinel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    format!("request timed out: {}", e)
                } else {
                    format!("request failed: {}", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP error: {}", status.as_u16()));
        }

        response
            .text()
            .map_err(|e| format!("failed to read body: {}", e))
    }
}
