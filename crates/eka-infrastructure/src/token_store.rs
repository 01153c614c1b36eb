//! Auth token store backed by a storage scope.

use async_trait::async_trait;
use eka_core::auth::{AuthToken, TokenStore};
use eka_core::error::Result;
use eka_core::state::StateRepository;
use std::sync::Arc;

pub struct ScopedTokenStore {
    repository: Arc<dyn StateRepository>,
}

impl ScopedTokenStore {
    pub fn new(repository: Arc<dyn StateRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TokenStore for ScopedTokenStore {
    async fn set_token(&self, token: AuthToken) -> Result<()> {
        self.repository
            .set_access_token(token.as_str().to_string())
            .await
    }

    async fn get_token(&self) -> Option<AuthToken> {
        self.repository.get_access_token().await.map(AuthToken::new)
    }

    async fn clear_token(&self) -> Result<()> {
        tracing::info!("Clearing stored access token");
        self.repository.clear_access_token().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::EkaPaths;
    use crate::state_repository::{FileStateRepository, InMemoryStateRepository};
    use tempfile::TempDir;

    fn store() -> ScopedTokenStore {
        ScopedTokenStore::new(Arc::new(InMemoryStateRepository::new()))
    }

    #[tokio::test]
    async fn test_not_authenticated_initially() {
        let store = store();
        assert!(!store.is_authenticated().await);
        assert!(store.get_token().await.is_none());
    }

    #[tokio::test]
    async fn test_set_get_clear() {
        let store = store();

        store.set_token(AuthToken::new("T")).await.unwrap();
        assert!(store.is_authenticated().await);
        assert_eq!(store.get_token().await, Some(AuthToken::new("T")));

        store.clear_token().await.unwrap();
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = store();

        store.set_token(AuthToken::new("old")).await.unwrap();
        store.set_token(AuthToken::new("new")).await.unwrap();

        assert_eq!(store.get_token().await, Some(AuthToken::new("new")));
    }

    #[tokio::test]
    async fn test_login_and_expiry_reach_other_clients() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EkaPaths::new(Some(temp_dir.path()));
        let a = ScopedTokenStore::new(Arc::new(FileStateRepository::new(&paths).await.unwrap()));
        let b = ScopedTokenStore::new(Arc::new(FileStateRepository::new(&paths).await.unwrap()));
        assert!(!b.is_authenticated().await);

        a.set_token(AuthToken::new("T")).await.unwrap();
        assert!(b.is_authenticated().await);
        assert_eq!(b.get_token().await, Some(AuthToken::new("T")));

        a.clear_token().await.unwrap();
        assert!(!b.is_authenticated().await);
    }
}
