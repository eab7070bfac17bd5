//! Blocking HTTP transport shared by every service query.
//!
//! Sends JSON requests through the reverse proxy and decodes responses
//! tolerantly: a body that is not JSON is captured verbatim so it can be
//! reported, and a non-success status is turned into a readable message
//! taken from the service's own error description where one exists.

use crate::error::{Result, StorefrontError};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Well-formed JSON.
    Json(Value),
    /// Something other than JSON (an HTML error page from the proxy, say).
    Raw(String),
    /// No content at all.
    Empty,
}

impl Body {
    /// Decode a response body.
    ///
    /// JSON is attempted regardless of the declared content type, since some
    /// services answer with `text/plain` JSON. Anything that fails to parse is
    /// kept as raw text.
    pub fn decode(content_type: Option<&str>, text: &str) -> Body {
        if text.trim().is_empty() {
            return Body::Empty;
        }
        let declared_json = content_type
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Body::Json(value),
            Err(e) => {
                if declared_json {
                    tracing::warn!(error = %e, "response declared JSON but did not parse");
                }
                Body::Raw(text.to_string())
            }
        }
    }
}

/// Build the user-facing message for a non-success response.
///
/// Prefers the service's `detail` (or `error`) field, then the raw body text,
/// then a generic `"<METHOD> <path> failed (<status>)"`.
pub fn error_message(body: &Body, method: &Method, path: &str, status: StatusCode) -> String {
    let described = match body {
        Body::Json(value) => ["detail", "error"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        Body::Raw(raw) => Some(raw.trim().to_string()),
        Body::Empty => None,
    };
    described
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("{} {} failed ({})", method, path, status.as_u16()))
}

/// Blocking JSON transport bound to one reverse-proxy origin.
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl Transport {
    /// Create a transport for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| {
            StorefrontError::InvalidArgument(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: trimmed.to_string(),
            timeout,
            client,
        })
    }

    /// The origin every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET` a single JSON record.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.client.get(self.url(path));
        self.expect_json(Method::GET, path, req)
    }

    /// `GET` a collection. A JSON value that is not an array yields an empty list.
    pub fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let req = self.client.get(self.url(path));
        match self.dispatch(&Method::GET, path, req)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(StorefrontError::from))
                .collect(),
            Some(other) => {
                tracing::warn!(path, kind = json_kind(&other), "expected a JSON array; treating as empty");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// `POST` a JSON body and decode the created record.
    pub fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.expect_json(Method::POST, path, req)
    }

    /// `PATCH` a JSON body and decode the updated record.
    pub fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.client.patch(self.url(path)).json(body);
        self.expect_json(Method::PATCH, path, req)
    }

    /// `POST` a multipart form and decode the updated record.
    pub fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T> {
        let req = self.client.post(self.url(path)).multipart(form);
        self.expect_json(Method::POST, path, req)
    }

    /// `DELETE` a record. Any success status counts, with or without a body.
    pub fn delete(&self, path: &str) -> Result<()> {
        let req = self.client.delete(self.url(path));
        match self.dispatch(&Method::DELETE, path, req) {
            Ok(_) | Err(StorefrontError::MalformedBody { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn expect_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<T> {
        match self.dispatch(&method, path, req)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(StorefrontError::MalformedBody { raw: String::new() }),
        }
    }

    /// Send a request and classify the response.
    ///
    /// Returns `Ok(None)` for a successful empty body.
    fn dispatch(&self, method: &Method, path: &str, req: RequestBuilder) -> Result<Option<Value>> {
        tracing::debug!(%method, path, "sending request");

        let resp = req
            .header(ACCEPT, "application/json")
            .send()
            .inspect_err(|e| tracing::warn!(%method, path, error = %e, "request failed"))?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = resp.text()?;
        let body = Body::decode(content_type.as_deref(), &text);

        if !status.is_success() {
            let message = error_message(&body, method, path, status);
            tracing::warn!(%method, path, status = status.as_u16(), %message, "service rejected request");
            return Err(StorefrontError::Status { status, message });
        }

        match body {
            Body::Json(value) => Ok(Some(value)),
            Body::Empty => Ok(None),
            Body::Raw(raw) => {
                tracing::warn!(%method, path, "expected JSON, got raw text");
                Err(StorefrontError::MalformedBody { raw })
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
