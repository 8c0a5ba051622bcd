//! Authenticated HTTP exchange for one batch.

use crate::endpoint::{self, Capability};
use crate::input::AnalysisInput;
use crate::types::ResponseRecord;
use crate::{Error, Result};
use bytes::Bytes;
use serde_json::{json, Value};
use std::time::Duration;

/// Header carrying the caller's subscription key on every request.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Body of one batch submission.
#[derive(Debug, Clone)]
pub enum Payload {
    /// JSON path: the input is converted and wrapped as `{"documents": [..]}`.
    Documents(AnalysisInput),
    /// Binary path (vision): bytes go on the wire verbatim.
    Binary(Bytes),
}

/// Performs the POST exchange for a single batch and parses the response
/// envelope. One exchange per batch, no pagination, no internal retry.
#[derive(Debug)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
    subscription_key: String,
}

impl TransportClient {
    pub fn builder() -> TransportClientBuilder {
        TransportClientBuilder::new()
    }

    /// Send one batch and return the service's ordered document records.
    pub async fn send(
        &self,
        capability: Capability,
        payload: Payload,
        params: &[(String, String)],
    ) -> Result<Vec<ResponseRecord>> {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            endpoint::resolve(capability)?
        );

        let mut request = self
            .http
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key);
        if !params.is_empty() {
            request = request.query(params);
        }

        request = match payload {
            Payload::Documents(input) => {
                let documents = input.convert();
                tracing::debug!(
                    capability = capability.as_str(),
                    batch_size = documents.len(),
                    "posting document batch"
                );
                request
                    .header("Content-Type", "application/json")
                    .json(&json!({ "documents": documents }))
            }
            Payload::Binary(bytes) => {
                tracing::debug!(
                    capability = capability.as_str(),
                    bytes = bytes.len(),
                    "posting binary payload"
                );
                request
                    .header("Content-Type", "application/octet-stream")
                    .body(bytes)
            }
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(capability = capability.as_str(), status = status.as_u16(), "exchange complete");
        if !status.is_success() {
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }
        parse_envelope(&body)
    }
}

/// Extract the ordered `documents` sequence from a response body.
fn parse_envelope(body: &str) -> Result<Vec<ResponseRecord>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("response is not JSON: {e}")))?;
    let documents = value
        .get("documents")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::malformed("response has no 'documents' array"))?;
    documents
        .iter()
        .map(|doc| {
            doc.as_object()
                .cloned()
                .ok_or_else(|| Error::malformed("'documents' element is not an object"))
        })
        .collect()
}

pub struct TransportClientBuilder {
    base_url: Option<String>,
    subscription_key: Option<String>,
    timeout_secs: u64,
}

impl TransportClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            subscription_key: None,
            timeout_secs: 30,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn subscription_key(mut self, key: impl Into<String>) -> Self {
        self.subscription_key = Some(key.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<TransportClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base URL required".to_string()))?;
        url::Url::parse(&base_url)
            .map_err(|e| Error::Configuration(format!("invalid base URL '{base_url}': {e}")))?;
        let subscription_key = self
            .subscription_key
            .or_else(|| std::env::var("ANNOBATCH_SUBSCRIPTION_KEY").ok())
            .ok_or_else(|| {
                Error::Configuration(
                    "subscription key required (ANNOBATCH_SUBSCRIPTION_KEY)".to_string(),
                )
            })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(TransportClient {
            http,
            base_url,
            subscription_key,
        })
    }
}

impl Default for TransportClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
