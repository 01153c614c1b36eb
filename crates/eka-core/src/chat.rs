//! Chat transcript domain model.
//!
//! The transcript is an append-only log: messages can be added but never
//! edited or removed. Ordering is insertion order.

use serde::{Deserialize, Serialize};

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// State owned by one mounted chat view.
///
/// - `messages`: append-only log
/// - `pending`: a question is in flight
/// - `uploading`: an upload is in flight
/// - `draft`: the text currently in the input box
///
/// Created fresh when the view mounts; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptState {
    messages: Vec<Message>,
    pending: bool,
    uploading: bool,
    draft: String,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Appends a message to the end of the log.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }
}
