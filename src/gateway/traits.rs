use async_trait::async_trait;

use crate::utils::GatewayError;

/// Request/response boundary to the query service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// Send `text` and return the service's answer. One attempt, no retry.
    async fn query(&self, text: &str) -> Result<String, GatewayError>;

    /// Check that the service is reachable
    async fn health(&self) -> Result<bool, GatewayError> {
        Ok(true)
    }
}
