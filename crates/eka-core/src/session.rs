//! Anonymous session identity.
//!
//! A session id correlates one client's conversation with server-side state.
//! It is independent of authentication: it exists before login and survives
//! token expiry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::Result;

/// Opaque session identifier, stable for the lifetime of a storage scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an existing identifier (e.g. one loaded from storage).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns generation and persistence of the session id for one storage scope.
///
/// Implementations must guarantee that, within a scope, the first call
/// generates and persists an id and every later call returns that same id.
#[async_trait]
pub trait SessionIdStore: Send + Sync {
    /// Returns the persisted session id, generating and persisting one on
    /// first use.
    async fn get_or_create_session_id(&self) -> Result<SessionId>;
}
