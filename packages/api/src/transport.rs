//! # Transport: how a GraphQL request reaches a server
//!
//! [`Transport`] is the seam between [`crate::PersonneService`] and the network. It has
//! a single method that sends a [`GraphQlRequest`] and yields the response's `data`
//! object. Implementations:
//!
//! - [`HttpTransport`]: GraphQL over HTTP `POST` with reqwest. Works natively and in
//!   the browser (reqwest uses `fetch` on wasm32).
//! - [`crate::MemoryBackend`]: in-process backend used by tests.
//!
//! Futures are not required to be `Send`, so the browser's `!Send` fetch futures fit.

use std::future::Future;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::graphql::{GraphQlRequest, GraphQlResponse};

/// Async interface for executing GraphQL operations.
pub trait Transport {
    fn execute(
        &self,
        request: &GraphQlRequest,
    ) -> impl Future<Output = Result<Value, ApiError>>;
}

/// GraphQL-over-HTTP transport backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, ApiError> {
        tracing::debug!("POST {} ({})", self.endpoint, request.operation_name);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} failed with HTTP {}", request.operation_name, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        payload.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_comes_from_config() {
        let config = ClientConfig::default().with_endpoint("http://api.test/graphql");
        let transport = HttpTransport::new(&config);
        assert_eq!(transport.endpoint(), "http://api.test/graphql");
    }
}
