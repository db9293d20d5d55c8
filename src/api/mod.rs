//! Shared HTTP client for the SecureView REST backend
//!
//! Every service goes through [`ApiClient`], which owns URL construction,
//! bearer-token injection, and mapping of error responses to [`Error::Http`].

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::auth::TokenStore;
use crate::config::Config;
use crate::error::{Error, Result};

/// Query parameters; `None` values are left out of the URL.
pub type QueryParams = Vec<(&'static str, Option<String>)>;

pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn url(&self, endpoint: &str, params: &[(&str, Option<String>)]) -> String {
        build_url(&self.base_url, endpoint, params)
    }

    /// GET returning the raw JSON body (`Null` for non-JSON responses).
    pub async fn get_json(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        let url = self.url(endpoint, params);
        let response = self.send(self.client.get(&url), "GET", &url).await?;
        read_json(response).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<T> {
        Ok(serde_json::from_value(self.get_json(endpoint, params).await?)?)
    }

    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        params: &QueryParams,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint, params);
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request, "POST", &url).await?;
        Ok(serde_json::from_value(read_json(response).await?)?)
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint, &[]);
        let mut request = self.client.put(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request, "PUT", &url).await?;
        Ok(serde_json::from_value(read_json(response).await?)?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint, &[]);
        let response = self.send(self.client.delete(&url), "DELETE", &url).await?;
        Ok(serde_json::from_value(read_json(response).await?)?)
    }

    /// POST without the stored bearer token, returning the raw response so
    /// callers can inspect headers. Used by login and token refresh.
    pub(crate) async fn post_unauthenticated<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response> {
        let url = self.url(endpoint, &[]);
        debug!(method = "POST", url = %url, "API request (unauthenticated)");
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Attach the bearer token, send, and turn non-success statuses into errors.
    async fn send(
        &self,
        mut request: RequestBuilder,
        method: &str,
        url: &str,
    ) -> Result<Response> {
        let token = self.tokens.token().await;
        debug!(method, url, authorized = token.is_some(), "API request");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        debug!(method, url, status = response.status().as_u16(), "API response");

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Join base URL and endpoint with exactly one `/` and append the query.
pub fn build_url(base_url: &str, endpoint: &str, params: &[(&str, Option<String>)]) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let mut url = if endpoint.starts_with('/') {
        format!("{}{}", base, endpoint)
    } else {
        format!("{}/{}", base, endpoint)
    };

    let query = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{}={}", urlencoding::encode(key), urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join("&");
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Prefer the body's `message`; otherwise report status plus body text.
pub(crate) async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %body, "API error response");

    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let detail = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                body.clone()
            };
            format!("HTTP Error: {} - {}", status.as_u16(), detail)
        });

    Error::Http {
        status: status.as_u16(),
        message,
    }
}

/// Empty or non-JSON bodies (DELETE, fire-and-forget POSTs) read as `Null`.
async fn read_json(response: Response) -> Result<Value> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Ok(Value::Null);
    }
    Ok(response.json().await?)
}
