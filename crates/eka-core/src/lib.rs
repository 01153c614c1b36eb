//! Domain layer for the EKA knowledge-assistant client.
//!
//! This crate holds the types and traits every other layer agrees on:
//! identifiers and credentials, the chat transcript model, the storage and
//! gateway seams, the route guard, and the client configuration model.
//! It performs no I/O of its own.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod route;
pub mod session;
pub mod state;
pub mod upload;

// Re-export common error type
pub use error::EkaError;

pub use auth::{AuthToken, TokenStore};
pub use chat::{Message, MessageRole, TranscriptState};
pub use config::ClientConfig;
pub use gateway::{Answer, GatewayError, KnowledgeGateway};
pub use route::{RouteDecision, RouteGuard, View};
pub use session::{SessionId, SessionIdStore};
pub use state::{ClientState, StateRepository};
pub use upload::{UploadAck, UploadFile};
