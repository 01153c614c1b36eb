//! Bearer credential and its store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Opaque bearer token obtained at login.
///
/// The client never inspects its structure or expiry. `Debug` is redacted so
/// the value cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Persistence of the bearer credential.
///
/// The presence of a token is the only authentication signal on the client.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persists the token, overwriting any prior value.
    async fn set_token(&self, token: AuthToken) -> Result<()>;

    /// Returns the current token, if any.
    async fn get_token(&self) -> Option<AuthToken>;

    /// Removes the persisted token.
    async fn clear_token(&self) -> Result<()>;

    /// True iff a token is present.
    async fn is_authenticated(&self) -> bool {
        self.get_token().await.is_some()
    }
}
