//! Generic HTTP/JSON request execution shared by every remote call.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Performs one request against a remote service.
///
/// Implementations never touch session state or notify anyone; a failure is
/// returned to the caller untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, method: Method, url: Url, body: Option<Value>) -> ClientResult<Value>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, method: Method, url: Url, body: Option<Value>) -> ClientResult<Value> {
        debug!(%method, %url, has_body = body.is_some(), "sending service request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|error| {
            warn!(%method, %url, %error, "service request did not complete");
            ClientError::from(error)
        })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "service rejected request");
            return Err(ClientError::Response {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_body(&text)
    }
}

/// Parses a success body. Services answer some writes with an empty body,
/// which is reported as `null`.
pub fn decode_body(text: &str) -> ClientResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    Ok(serde_json::from_value(value)?)
}

/// Appends percent-encoded path segments to a service base URL.
pub fn endpoint(base: &Url, segments: &[&str]) -> ClientResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::Request(format!("service url '{base}' cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
