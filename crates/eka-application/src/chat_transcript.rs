//! Chat transcript use case.
//!
//! Owns the [`TranscriptState`] of a mounted chat view and drives the
//! two-phase append: the user's message lands immediately, the assistant's
//! reply (or a fixed error string) lands when the request settles.

use eka_core::auth::TokenStore;
use eka_core::chat::{Message, TranscriptState};
use eka_core::gateway::{Answer, GatewayError, KnowledgeGateway};
use eka_core::session::SessionIdStore;
use eka_core::upload::UploadFile;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

pub const NO_RESPONSE_PLACEHOLDER: &str = "No response";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed.";

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// How a question submission settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    /// Blank input, or another question was still in flight.
    Ignored,
    Answered,
    Failed,
    /// The server rejected the credential; the token has been cleared.
    SessionExpired,
}

/// How a file submission settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Another upload was still in flight.
    Ignored,
    Uploaded,
    Failed,
}

pub fn upload_success_message(filename: &str) -> String {
    format!("\"{}\" uploaded successfully.", filename)
}

/// Transcript of one chat view.
///
/// Cloning yields another handle onto the same transcript, so submissions can
/// be spawned while the view keeps reading input.
#[derive(Clone)]
pub struct ChatTranscript {
    state: Arc<Mutex<TranscriptState>>,
    gateway: Arc<dyn KnowledgeGateway>,
    session_store: Arc<dyn SessionIdStore>,
    token_store: Arc<dyn TokenStore>,
    updates: broadcast::Sender<Message>,
}

impl ChatTranscript {
    pub fn new(
        gateway: Arc<dyn KnowledgeGateway>,
        session_store: Arc<dyn SessionIdStore>,
        token_store: Arc<dyn TokenStore>,
    ) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(TranscriptState::new())),
            gateway,
            session_store,
            token_store,
            updates,
        }
    }

    /// Subscribes to messages as they are appended.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> TranscriptState {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_pending()
    }

    pub fn is_uploading(&self) -> bool {
        self.lock().is_uploading()
    }

    /// Keeps text the user typed but could not send yet.
    pub fn set_draft(&self, draft: impl Into<String>) {
        self.lock().set_draft(draft);
    }

    /// Returns the kept draft and empties it.
    pub fn take_draft(&self) -> String {
        self.lock().take_draft()
    }

    /// Sends a question and appends the reply.
    ///
    /// Blank text and submissions while a question is pending are ignored
    /// without touching the transcript or the network.
    pub async fn submit_question(&self, text: &str) -> QuestionOutcome {
        if text.trim().is_empty() {
            return QuestionOutcome::Ignored;
        }

        {
            let mut state = self.lock();
            if state.is_pending() {
                tracing::debug!("Question ignored: another question is pending");
                return QuestionOutcome::Ignored;
            }
            let message = Message::user(text);
            state.append(message.clone());
            state.set_pending(true);
            state.clear_draft();
            self.publish(message);
        }

        let (reply, outcome) = match self.ask(text).await {
            Ok(answer) => (
                answer
                    .text
                    .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string()),
                QuestionOutcome::Answered,
            ),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Query rejected as unauthorized; clearing token");
                if let Err(e) = self.token_store.clear_token().await {
                    tracing::error!("Failed to clear token: {}", e);
                }
                (
                    SESSION_EXPIRED_MESSAGE.to_string(),
                    QuestionOutcome::SessionExpired,
                )
            }
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                (SERVER_ERROR_MESSAGE.to_string(), QuestionOutcome::Failed)
            }
        };

        let mut state = self.lock();
        let message = Message::assistant(reply);
        state.append(message.clone());
        state.set_pending(false);
        self.publish(message);

        outcome
    }

    /// Uploads a document and appends an acknowledgement.
    pub async fn submit_file(&self, file: UploadFile) -> UploadOutcome {
        {
            let mut state = self.lock();
            if state.is_uploading() {
                tracing::debug!(filename = %file.name, "Upload ignored: another upload is in flight");
                return UploadOutcome::Ignored;
            }
            state.set_uploading(true);
        }

        let token = self.token_store.get_token().await;
        let (reply, outcome) = match self.gateway.upload(&file, token.as_ref()).await {
            Ok(ack) => {
                tracing::info!(
                    filename = %file.name,
                    total_chunks = ?ack.total_chunks,
                    "Upload acknowledged"
                );
                (upload_success_message(&file.name), UploadOutcome::Uploaded)
            }
            Err(e) => {
                tracing::warn!(filename = %file.name, "Upload failed: {}", e);
                (UPLOAD_FAILED_MESSAGE.to_string(), UploadOutcome::Failed)
            }
        };

        let mut state = self.lock();
        let message = Message::assistant(reply);
        state.append(message.clone());
        state.set_uploading(false);
        self.publish(message);

        outcome
    }

    async fn ask(&self, text: &str) -> Result<Answer, GatewayError> {
        let session_id = self
            .session_store
            .get_or_create_session_id()
            .await
            .map_err(|e| GatewayError::Transport(format!("session id unavailable: {}", e)))?;
        let token = self.token_store.get_token().await;

        self.gateway.ask(text, &session_id, token.as_ref()).await
    }

    fn publish(&self, message: Message) {
        // No subscriber is not an error
        let _ = self.updates.send(message);
    }

    fn lock(&self) -> MutexGuard<'_, TranscriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
