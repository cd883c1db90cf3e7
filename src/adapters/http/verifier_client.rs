//! HTTP verifier transport.
//!
//! One JSON POST per turn against the verifier endpoint. Failures are
//! mapped to [`TransportError`] and never retried here; the session fails
//! and the caller decides whether to start over.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::VerifierConfig;
use crate::domain::TurnMessage;
use crate::ports::{TransportError, VerifierTransport};

/// Reqwest-backed verifier transport.
pub struct HttpVerifierClient {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpVerifierClient {
    /// Creates a transport for the given endpoint with a per-exchange
    /// timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        }
    }

    /// Builds a transport from the loaded verifier config.
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(config.endpoint.clone(), config.timeout())
    }
}

#[async_trait]
impl VerifierTransport for HttpVerifierClient {
    async fn exchange(&self, message: TurnMessage) -> Result<TurnMessage, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout_secs: self.timeout.as_secs() as u32,
                    }
                } else {
                    TransportError::connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::status(status.as_u16(), body));
        }

        response
            .json::<TurnMessage>()
            .await
            .map_err(|e| TransportError::malformed(e.to_string()))
    }
}
