//! HTTP transport seam
//!
//! Endpoint code builds `ApiRequest`s and hands them to a `Transport`. The
//! production transport is reqwest; tests plug in a scripted one.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::core::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: None }
    }

    /// POST without a body still sends a JSON content type, like the web client
    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::Post, path: path.into(), body: None }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, path: path.into(), body: Some(body) }
    }
}

/// Status code and raw body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry an `ApiRequest` to the server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request; only failures to get any response are errors here
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, SyncError>;
}

/// reqwest-backed transport bound to a base URL
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, SyncError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, SyncError> {
        let url = self.url(&request.path);
        debug!(method = request.method.as_str(), %url, "sending request");

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => {
                let body = request.body.unwrap_or_else(|| Value::Object(Default::default()));
                self.client.post(&url).json(&body)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(%url, status, "received response");

        Ok(RawResponse { status, body })
    }
}
