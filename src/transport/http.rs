use super::TransportError;
use crate::config::ClientConfig;
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::Proxy;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Header carrying the provider credential.
pub const API_KEY_HEADER: &str = "xi-api-key";

/// Thin wrapper over a pooled `reqwest::Client` bound to one base URL.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_source("http_transport"),
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::configuration_with_context(
                format!("Base URL cannot carry a path: {}", base_url),
                ErrorContext::new().with_field_path("base_url"),
            ));
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(config.pool_idle_timeout_secs)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("proxy_url"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        api_key: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments);
        debug!(url = %url, params = query.len(), "GET");
        let resp = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let resp = Self::check_status(resp).await?;
        let bytes = resp.bytes().await.map_err(TransportError::Http)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Transport(TransportError::Body(e.to_string())))
    }

    /// POST a JSON body and return the response body as a chunk stream.
    pub async fn post_stream(
        &self,
        segments: &[&str],
        api_key: &str,
        query: &[(&'static str, String)],
        body: &serde_json::Value,
    ) -> Result<BoxStream<'static, Bytes>> {
        let url = self.endpoint(segments);
        debug!(url = %url, "POST (streaming)");
        let resp = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .header("accept", "audio/mpeg")
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let resp = Self::check_status(resp).await?;
        let stream = resp
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(Box::pin(stream))
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Transport(TransportError::Status {
            status: status.as_u16(),
            body,
        }))
    }
}
