use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, Method};
use serde_json::Value;
use url::{Url, form_urlencoded};

use crate::TransportError;

const REDACTED: &str = "[REDACTED]";
const SENSITIVE_PARAMS: &[&str] = &["client_secret", "access_token", "appsecret_proof"];

/// A fully-built request handed to an [`HttpClient`].
///
/// `Debug` and `Display` mask credential-bearing query values, so the request
/// can be logged as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }

    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return url.to_string();
        }

        url.query_pairs_mut().clear().extend_pairs(pairs.iter().map(|(key, value)| {
            if SENSITIVE_PARAMS.contains(&key.as_str()) {
                (key.as_str(), REDACTED)
            } else {
                (key.as_str(), value.as_str())
            }
        }));
        url.to_string()
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.redacted_url())
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.redacted_url())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Copy with credential values in a JSON object or url-encoded body
    /// masked. Other bodies are returned unchanged.
    pub fn redacted(&self) -> Self {
        Self {
            status: self.status,
            body: redact_body(&self.body),
        }
    }
}

fn redact_body(body: &str) -> String {
    if let Ok(Value::Object(mut fields)) = serde_json::from_str::<Value>(body) {
        let mut masked = false;
        for key in SENSITIVE_PARAMS {
            if let Some(value) = fields.get_mut(*key) {
                *value = Value::String(REDACTED.to_string());
                masked = true;
            }
        }
        return if masked {
            Value::Object(fields).to_string()
        } else {
            body.to_string()
        };
    }

    let pairs: Vec<(String, String)> = form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect();
    if !pairs
        .iter()
        .any(|(key, _)| SENSITIVE_PARAMS.contains(&key.as_str()))
    {
        return body.to_string();
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(key, value)| {
            if SENSITIVE_PARAMS.contains(&key.as_str()) {
                (key.as_str(), REDACTED)
            } else {
                (key.as_str(), value.as_str())
            }
        }))
        .finish()
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.body)
    }
}

/// Sends a single request and returns the raw response.
///
/// Non-2xx statuses are returned as responses, not errors; the adapter decides
/// how to treat them. Implementations must be safe to share between callers.
pub trait HttpClient: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

impl HttpClient for Client {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest { method, url } = request;
        let response = self.request(method, url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

impl<T: HttpClient> HttpClient for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.as_ref().send(request).await
    }
}
