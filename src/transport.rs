use once_cell::sync::Lazy;
use reqwest::{header, Client, StatusCode, Url};
use serde::de::DeserializeOwned;

static CLIENT: Lazy<Client> = Lazy::new(|| {
    let user_agent = std::env::var("SHOWFINDER_USER_AGENT")
        .unwrap_or_else(|_| "showfinder/0.1 (https://github.com/mike/showfinder)".to_string());
    Client::builder()
        .user_agent(user_agent)
        .build()
        .expect("failed to build http client")
});

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("unexpected content type {0:?}")]
    ContentType(Option<String>),
    #[error("invalid json body: {0}")]
    Decode(String),
    #[error("invalid url: {0}")]
    Url(String),
}

/// One GET, no retry, no cache. The body is decoded only when the status is
/// exactly 200 and the response declares a JSON content type; everything else,
/// including network-level failures, comes back as an explicit error.
pub async fn fetch_json<T: DeserializeOwned>(url: Url) -> Result<T, TransportError> {
    let response = CLIENT
        .get(url)
        .send()
        .await
        .map_err(|err| TransportError::Network(err.to_string()))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if status != StatusCode::OK {
        return Err(TransportError::Status(status.as_u16()));
    }
    let is_json = content_type
        .as_deref()
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Err(TransportError::ContentType(content_type));
    }

    let text = response
        .text()
        .await
        .map_err(|err| TransportError::Network(err.to_string()))?;
    serde_json::from_str(&text).map_err(|err| TransportError::Decode(err.to_string()))
}
