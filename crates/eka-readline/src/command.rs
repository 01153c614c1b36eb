//! Parsing of login and chat input lines.

use std::path::PathBuf;

pub const UPLOAD_COMMAND: &str = "/upload";
pub const HELP_COMMAND: &str = "/help";
pub const QUIT_COMMAND: &str = "/quit";
const EXIT_COMMAND: &str = "/exit";

/// A line typed at the login prompt. Only the slash forms quit, so any
/// other text (`quit` included) is a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginInput {
    Quit,
    Username(String),
}

impl LoginInput {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            QUIT_COMMAND | EXIT_COMMAND => Self::Quit,
            username => Self::Username(username.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Empty,
    Quit,
    Help,
    Upload(PathBuf),
    /// `/upload` without a path.
    UploadUsage,
    Question(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        match trimmed {
            "" => return Self::Empty,
            "quit" | "exit" | QUIT_COMMAND | EXIT_COMMAND => return Self::Quit,
            HELP_COMMAND => return Self::Help,
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix(UPLOAD_COMMAND) {
            if rest.is_empty() {
                return Self::UploadUsage;
            }
            // `/uploads` is a question, not the command
            if rest.starts_with(char::is_whitespace) {
                let path = unquote(rest.trim());
                return if path.is_empty() {
                    Self::UploadUsage
                } else {
                    Self::Upload(PathBuf::from(path))
                };
            }
        }

        Self::Question(trimmed.to_string())
    }

    /// Whether the line would reach the backend.
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Question(_) | Self::Upload(_))
    }
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Content type sent with an uploaded file.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_and_empty() {
        assert_eq!(ChatCommand::parse("  "), ChatCommand::Empty);
        assert_eq!(ChatCommand::parse("quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse(" exit "), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/quit"), ChatCommand::Quit);
    }

    #[test]
    fn test_login_quits_only_on_slash_commands() {
        assert_eq!(LoginInput::parse(" /quit "), LoginInput::Quit);
        assert_eq!(LoginInput::parse("/exit"), LoginInput::Quit);
        assert_eq!(
            LoginInput::parse("quit"),
            LoginInput::Username("quit".to_string())
        );
        assert_eq!(
            LoginInput::parse(" exit "),
            LoginInput::Username("exit".to_string())
        );
        assert_eq!(LoginInput::parse("  "), LoginInput::Username(String::new()));
    }

    #[test]
    fn test_submissions() {
        assert!(ChatCommand::parse("What changed?").is_submission());
        assert!(ChatCommand::parse("/upload a.pdf").is_submission());
        assert!(!ChatCommand::parse("/upload").is_submission());
        assert!(!ChatCommand::parse("/help").is_submission());
        assert!(!ChatCommand::parse("quit").is_submission());
        assert!(!ChatCommand::parse("").is_submission());
    }

    #[test]
    fn test_upload_path() {
        assert_eq!(
            ChatCommand::parse("/upload docs/handbook.pdf"),
            ChatCommand::Upload(PathBuf::from("docs/handbook.pdf"))
        );
        assert_eq!(
            ChatCommand::parse("/upload \"My Notes.txt\""),
            ChatCommand::Upload(PathBuf::from("My Notes.txt"))
        );
    }

    #[test]
    fn test_upload_without_path() {
        assert_eq!(ChatCommand::parse("/upload"), ChatCommand::UploadUsage);
        assert_eq!(ChatCommand::parse("/upload   \"\""), ChatCommand::UploadUsage);
    }

    #[test]
    fn test_everything_else_is_a_question() {
        assert_eq!(
            ChatCommand::parse("  What is the leave policy? "),
            ChatCommand::Question("What is the leave policy?".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/uploads are broken"),
            ChatCommand::Question("/uploads are broken".to_string())
        );
    }

    #[test]
    fn test_mime() {
        assert_eq!(mime_for_extension("pdf"), Some("application/pdf"));
        assert_eq!(mime_for_extension("txt"), Some("text/plain"));
        assert_eq!(mime_for_extension("docx"), None);
    }
}
