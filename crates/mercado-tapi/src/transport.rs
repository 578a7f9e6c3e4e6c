//! HTTP transport seam
//!
//! The client signs a request and hands it to a [`Transport`] for delivery.
//! [`HttpTransport`] is the production implementation on top of `reqwest`;
//! tests and callers with their own HTTP stack can supply another one.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

use crate::error::TapiResult;

/// Header carrying the TAPI identifier
pub const TAPI_ID_HEADER: &str = "TAPI-ID";
/// Header carrying the request MAC
pub const TAPI_MAC_HEADER: &str = "TAPI-MAC";
/// Content type of every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully signed request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Request path, e.g. `/tapi/v3/`
    pub path: String,
    /// Value of the `TAPI-ID` header
    pub tapi_id: String,
    /// Value of the `TAPI-MAC` header
    pub signature: String,
    /// Form-encoded body; the exact bytes the signature covers
    pub body: String,
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Full response body
    pub body: String,
}

/// Delivers signed requests
///
/// Implementations perform exactly one attempt per call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SignedRequest) -> TapiResult<TransportResponse>;
}

/// `reqwest`-backed HTTPS transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for `base_url` (scheme and host, no trailing path)
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> TapiResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SignedRequest) -> TapiResult<TransportResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(TAPI_ID_HEADER, &request.tapi_id)
            .header(TAPI_MAC_HEADER, &request.signature)
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Received HTTP {} ({} bytes)", status, body.len());

        Ok(TransportResponse { status, body })
    }
}
