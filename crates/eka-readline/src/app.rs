//! Composition root: wires configuration, storage scope, stores and gateway.

use anyhow::Result;
use std::sync::Arc;

use eka_application::{ChatTranscript, LoginUseCase};
use eka_core::auth::TokenStore;
use eka_core::config::ClientConfig;
use eka_core::gateway::KnowledgeGateway;
use eka_core::session::SessionIdStore;
use eka_core::state::StateRepository;
use eka_infrastructure::{
    ConfigService, EkaPaths, FileStateRepository, ScopedSessionIdStore, ScopedTokenStore,
};
use eka_interaction::HttpKnowledgeGateway;

pub struct App {
    pub config: ClientConfig,
    pub gateway: Arc<dyn KnowledgeGateway>,
    pub sessions: Arc<dyn SessionIdStore>,
    pub tokens: Arc<dyn TokenStore>,
}

impl App {
    pub async fn bootstrap(paths: &EkaPaths) -> Result<Self> {
        let config = ConfigService::new(paths.clone()).get_config()?;
        tracing::info!(
            "[Bootstrap] Config loaded: base_url={}, timeout={}s",
            config.base_url,
            config.request_timeout_secs
        );

        let repository: Arc<dyn StateRepository> =
            Arc::new(FileStateRepository::new(paths).await?);
        tracing::info!("[Bootstrap] Storage scope opened");

        let gateway = Arc::new(HttpKnowledgeGateway::from_config(&config));

        Ok(Self {
            config,
            gateway,
            sessions: Arc::new(ScopedSessionIdStore::new(repository.clone())),
            tokens: Arc::new(ScopedTokenStore::new(repository)),
        })
    }

    /// Returns false when the backend is unreachable or unhealthy.
    pub async fn check_backend(&self) -> bool {
        match self.gateway.health().await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("[Bootstrap] Backend reported unhealthy");
                false
            }
            Err(e) => {
                tracing::warn!("[Bootstrap] Backend unreachable: {}", e);
                false
            }
        }
    }

    /// Fresh transcript for a newly mounted chat view.
    pub fn transcript(&self) -> ChatTranscript {
        ChatTranscript::new(
            self.gateway.clone(),
            self.sessions.clone(),
            self.tokens.clone(),
        )
    }

    pub fn login(&self) -> LoginUseCase {
        LoginUseCase::new(self.gateway.clone(), self.tokens.clone())
    }
}
