//! # Client configuration
//!
//! The only setting is the GraphQL endpoint. Resolution order:
//!
//! 1. `PERSONNES_GRAPHQL_URL`: read at runtime on native targets (after loading a
//!    `.env` file with `dotenvy`), and at compile time on wasm32 where the browser has
//!    no process environment.
//! 2. [`DEFAULT_ENDPOINT`].

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/graphql";

/// Environment variable holding the endpoint URL.
pub const ENDPOINT_VAR: &str = "PERSONNES_GRAPHQL_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build the config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        match endpoint_from_env() {
            Some(endpoint) => Self::default().with_endpoint(endpoint),
            None => Self::default(),
        }
    }

    /// Builder method to set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn endpoint_from_env() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(ENDPOINT_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_env() -> Option<String> {
    option_env!("PERSONNES_GRAPHQL_URL")
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(ClientConfig::default().endpoint, "http://localhost:8080/graphql");
    }

    #[test]
    fn test_with_endpoint() {
        let config = ClientConfig::default().with_endpoint("https://example.org/graphql");
        assert_eq!(config.endpoint, "https://example.org/graphql");
    }
}
