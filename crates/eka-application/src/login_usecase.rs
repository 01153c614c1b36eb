//! Login use case: exchanges a username for a token and stores it.

use eka_core::auth::{AuthToken, TokenStore};
use eka_core::error::EkaError;
use eka_core::gateway::{GatewayError, KnowledgeGateway};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Failed to store token: {0}")]
    Storage(#[from] EkaError),
}

pub struct LoginUseCase {
    gateway: Arc<dyn KnowledgeGateway>,
    token_store: Arc<dyn TokenStore>,
}

impl LoginUseCase {
    pub fn new(gateway: Arc<dyn KnowledgeGateway>, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            gateway,
            token_store,
        }
    }

    /// Logs in as `username`.
    ///
    /// The token store is written only on success; any failure leaves it
    /// as it was.
    pub async fn login(&self, username: &str) -> Result<AuthToken, LoginError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginError::EmptyUsername);
        }

        let token = self.gateway.login(username).await.inspect_err(|e| {
            tracing::warn!(username, "Login failed: {}", e);
        })?;
        self.token_store.set_token(token.clone()).await?;

        tracing::info!(username, "Logged in");
        Ok(token)
    }
}
