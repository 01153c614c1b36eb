//! Session id store backed by a storage scope.

use async_trait::async_trait;
use eka_core::error::Result;
use eka_core::session::{SessionId, SessionIdStore};
use eka_core::state::StateRepository;
use std::sync::Arc;

/// Lazily generates the scope's session id and persists it once.
///
/// The repository decides which candidate wins, so two stores (or two
/// processes) on one scope always agree on the id.
pub struct ScopedSessionIdStore {
    repository: Arc<dyn StateRepository>,
}

impl ScopedSessionIdStore {
    pub fn new(repository: Arc<dyn StateRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl SessionIdStore for ScopedSessionIdStore {
    async fn get_or_create_session_id(&self) -> Result<SessionId> {
        if let Some(existing) = self.repository.get_session_id().await {
            return Ok(SessionId::new(existing));
        }

        let candidate = SessionId::generate();
        let stored = self
            .repository
            .get_or_insert_session_id(candidate.as_str().to_string())
            .await?;

        if stored == candidate.as_str() {
            tracing::info!(session_id = %candidate, "Created new session id");
        }
        Ok(SessionId::new(stored))
    }
}
