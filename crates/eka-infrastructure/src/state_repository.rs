//! Storage-scope repositories.
//!
//! [`FileStateRepository`] persists the scope to `client_state.toml` and is
//! what the terminal client uses; [`InMemoryStateRepository`] is an
//! ephemeral scope that vanishes with the process.

use crate::paths::EkaPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use eka_core::error::{EkaError, Result};
use eka_core::state::{ClientState, StateRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// File-backed storage scope.
///
/// The file is the source of truth, so several handles (or processes) on
/// one path see the same scope. Reads reload it; renames keep every read
/// whole. Writes are locked read-modify-write cycles. The cached copy only
/// answers reads when the file cannot be loaded.
#[derive(Clone)]
pub struct FileStateRepository {
    /// Last state seen on disk.
    state: Arc<Mutex<ClientState>>,
    file: Arc<AtomicTomlFile<ClientState>>,
}

impl FileStateRepository {
    /// Opens the scope at the default location (or under `paths`' base).
    pub async fn new(paths: &EkaPaths) -> Result<Self> {
        Self::with_path(paths.state_file()?).await
    }

    /// Opens the scope stored at `path`.
    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let file = Arc::new(AtomicTomlFile::<ClientState>::new(path).private());

        let initial_state = Self::load(file.clone()).await?.unwrap_or_default();

        tracing::debug!(
            path = %file.path().display(),
            has_session = initial_state.session_id.is_some(),
            "Opened client state"
        );

        Ok(Self {
            state: Arc::new(Mutex::new(initial_state)),
            file,
        })
    }

    async fn load(file: Arc<AtomicTomlFile<ClientState>>) -> Result<Option<ClientState>> {
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| EkaError::internal(format!("Failed to join task: {}", e)))??;
        Ok(loaded)
    }

    /// Reloads the scope from disk.
    async fn refresh(&self) -> ClientState {
        let mut cached = self.state.lock().await;
        match Self::load(self.file.clone()).await {
            Ok(loaded) => *cached = loaded.unwrap_or_default(),
            Err(e) => tracing::warn!(
                path = %self.file.path().display(),
                "Failed to reload client state, using last known: {}",
                e
            ),
        }
        cached.clone()
    }

    /// Applies `f` to the on-disk state under the file lock and returns its
    /// result.
    async fn modify<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut ClientState) -> R + Send + 'static,
        R: Send + 'static,
    {
        let mut cached = self.state.lock().await;
        let file = self.file.clone();
        let (result, next) = tokio::task::spawn_blocking(move || {
            file.update(ClientState::default(), |state| {
                let result = f(state);
                (result, state.clone())
            })
        })
        .await
        .map_err(|e| EkaError::internal(format!("Failed to join task: {}", e)))??;
        *cached = next;
        Ok(result)
    }
}

#[async_trait]
impl StateRepository for FileStateRepository {
    async fn get_session_id(&self) -> Option<String> {
        self.refresh().await.session_id
    }

    async fn get_or_insert_session_id(&self, candidate: String) -> Result<String> {
        self.modify(move |state| state.session_id.get_or_insert(candidate).clone())
            .await
    }

    async fn get_access_token(&self) -> Option<String> {
        self.refresh().await.access_token
    }

    async fn set_access_token(&self, token: String) -> Result<()> {
        self.modify(move |state| state.access_token = Some(token)).await
    }

    async fn clear_access_token(&self) -> Result<()> {
        self.modify(|state| state.access_token = None).await
    }
}

/// Ephemeral storage scope.
#[derive(Clone, Default)]
pub struct InMemoryStateRepository {
    state: Arc<Mutex<ClientState>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn get_session_id(&self) -> Option<String> {
        self.state.lock().await.session_id.clone()
    }

    async fn get_or_insert_session_id(&self, candidate: String) -> Result<String> {
        Ok(self
            .state
            .lock()
            .await
            .session_id
            .get_or_insert(candidate)
            .clone())
    }

    async fn get_access_token(&self) -> Option<String> {
        self.state.lock().await.access_token.clone()
    }

    async fn set_access_token(&self, token: String) -> Result<()> {
        self.state.lock().await.access_token = Some(token);
        Ok(())
    }

    async fn clear_access_token(&self) -> Result<()> {
        self.state.lock().await.access_token = None;
        Ok(())
    }
}
