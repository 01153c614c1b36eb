//! Persisted client state and its repository trait.
//!
//! One `ClientState` is one storage scope: the equivalent of a browser
//! origin's durable storage. It holds the session id and the access token
//! and nothing else.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Client state that persists across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    /// Anonymous session id, created lazily and never cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Bearer token from the last successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Repository for one storage scope.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn get_session_id(&self) -> Option<String>;

    /// Stores `candidate` unless the scope already has a session id, and
    /// returns whichever id the scope holds afterwards. The check and the
    /// write are one atomic step.
    async fn get_or_insert_session_id(&self, candidate: String) -> Result<String>;

    async fn get_access_token(&self) -> Option<String>;

    async fn set_access_token(&self, token: String) -> Result<()>;

    async fn clear_access_token(&self) -> Result<()>;
}
