//! Seam to the remote knowledge-assistant service.
//!
//! Every operation is a single request/response exchange. Implementations do
//! not retry; each failure is reported once and the caller decides what the
//! user sees.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::AuthToken;
use crate::session::SessionId;
use crate::upload::{UploadAck, UploadFile};

/// Failure taxonomy of the remote operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network unreachable, connection reset, or request timed out.
    #[error("Transport error: {0}")]
    Transport(String),

    /// 401-class response: the credential is missing, invalid or expired.
    #[error("Unauthorized: the server rejected the credential")]
    Unauthorized,

    /// Response body did not have the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Any other non-success status.
    #[error("Request failed with status {code}: {body}")]
    Status { code: u16, body: String },

    /// Login exchange completed but yielded no token.
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Reply to a question.
///
/// `text` is `None` when the server answered without an `answer` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub text: Option<String>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// The backend operations the client consumes.
#[async_trait]
pub trait KnowledgeGateway: Send + Sync {
    /// Exchanges a username for a bearer token.
    async fn login(&self, username: &str) -> Result<AuthToken, GatewayError>;

    /// Asks a question within a session. The token, when present, is sent
    /// as a bearer credential; anonymous questions are allowed.
    async fn ask(
        &self,
        question: &str,
        session_id: &SessionId,
        token: Option<&AuthToken>,
    ) -> Result<Answer, GatewayError>;

    /// Uploads a document for ingestion.
    async fn upload(
        &self,
        file: &UploadFile,
        token: Option<&AuthToken>,
    ) -> Result<UploadAck, GatewayError>;

    /// Checks service liveness.
    async fn health(&self) -> Result<bool, GatewayError>;
}
