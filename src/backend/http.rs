/// Blocking HTTP client for the recommendation backend.
///
/// Uses `ureq` the same way for all three endpoints: build the URL from the
/// configured base, optionally apply the request timeout, read the body as
/// text and decode it with `serde_json`. Transport errors and non-2xx
/// statuses map to [`ViewError::NetworkFailure`]; undecodable bodies map to
/// [`ViewError::ParseFailure`].
use std::borrow::Cow;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::models::{AnalyticsQuery, AnalyticsResponse, ChatRequest, ChatResponse, FilterOptions};
use super::{Backend, CHAT_PATH, FILTERS_PATH, RECOMMENDATIONS_PATH};
use crate::config::schema::BackendConfig;
use crate::error::ViewError;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    /// `None` means wait indefinitely.
    timeout: Option<Duration>,
}

impl HttpBackend {
    /// Build a client from the resolved `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> Self {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let request = ureq::request(method, &self.url(path));
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ViewError> {
        let response = self
            .request("GET", path)
            .call()
            .map_err(|e| ViewError::network(path, e))?;
        decode(path, response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ViewError> {
        let response = self
            .request("POST", path)
            .send_json(body)
            .map_err(|e| ViewError::network(path, e))?;
        decode(path, response)
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: ureq::Response) -> Result<T, ViewError> {
    let body = response
        .into_string()
        .map_err(|e| ViewError::network(path, e))?;
    tracing::debug!(endpoint = path, bytes = body.len(), "response received");
    serde_json::from_str(&null_non_finite(&body)).map_err(|e| ViewError::parse(path, e))
}

/// Replace the bare `NaN`, `Infinity` and `-Infinity` tokens some JSON
/// encoders emit for non-finite floats with `null`. String contents are left
/// untouched.
fn null_non_finite(body: &str) -> Cow<'_, str> {
    if !body.contains("NaN") && !body.contains("Infinity") {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = ["NaN", "-Infinity", "Infinity"]
            .into_iter()
            .find(|t| rest.starts_with(t))
        {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

impl Backend for HttpBackend {
    fn filters(&self) -> Result<FilterOptions, ViewError> {
        self.get_json(FILTERS_PATH)
    }

    fn recommendations(&self, query: &AnalyticsQuery) -> Result<AnalyticsResponse, ViewError> {
        self.post_json(RECOMMENDATIONS_PATH, query)
    }

    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ViewError> {
        self.post_json(CHAT_PATH, request)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let client = HttpBackend::from_config(&BackendConfig::default());
        assert_eq!(client.base_url(), "http://127.0.0.1:5001");
        assert_eq!(client.timeout, None);
    }

    #[test]
    fn client_strips_trailing_slash_and_applies_timeout() {
        let config = BackendConfig {
            base_url: "http://backend:5001/".to_string(),
            timeout_ms: 2500,
        };
        let client = HttpBackend::from_config(&config);
        assert_eq!(client.url(CHAT_PATH), "http://backend:5001/api/chat");
        assert_eq!(client.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn non_finite_tokens_become_null_outside_strings() {
        let body = r#"{"a": NaN, "b": [Infinity, -Infinity], "c": "NaN \"Infinity\"", "d": 1.5}"#;
        assert_eq!(
            null_non_finite(body),
            r#"{"a": null, "b": [null, null], "c": "NaN \"Infinity\"", "d": 1.5}"#
        );
        assert!(matches!(null_non_finite(r#"{"a": 1}"#), Cow::Borrowed(_)));
    }

    #[test]
    fn unreachable_backend_is_network_failure() {
        let config = BackendConfig {
            // Port 9 (discard) on loopback is closed on any sane test host.
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 2000,
        };
        let err = HttpBackend::from_config(&config).filters().unwrap_err();
        assert!(matches!(err, ViewError::NetworkFailure { .. }), "{err:?}");
    }
}
