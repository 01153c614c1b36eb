//! Infrastructure layer for EKA: file locations, atomic persistence of the
//! storage scope, the session/token stores built on it, and configuration
//! loading.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod state_repository;
pub mod storage;
pub mod token_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::EkaPaths;
pub use crate::session_store::ScopedSessionIdStore;
pub use crate::state_repository::{FileStateRepository, InMemoryStateRepository};
pub use crate::token_store::ScopedTokenStore;
