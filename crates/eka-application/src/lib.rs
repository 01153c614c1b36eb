//! Use cases of the EKA client: the chat transcript of a mounted chat view
//! and the login flow.

pub mod chat_transcript;
pub mod login_usecase;

pub use chat_transcript::{
    ChatTranscript, NO_RESPONSE_PLACEHOLDER, QuestionOutcome, SERVER_ERROR_MESSAGE,
    SESSION_EXPIRED_MESSAGE, UPLOAD_FAILED_MESSAGE, UploadOutcome, upload_success_message,
};
pub use login_usecase::{LoginError, LoginUseCase};
