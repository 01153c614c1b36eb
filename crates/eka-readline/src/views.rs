//! Login and chat views.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use std::path::Path;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use eka_application::{LoginError, QuestionOutcome, UploadOutcome};
use eka_core::chat::{Message, MessageRole};
use eka_core::route::{RouteDecision, RouteGuard, View};
use eka_core::upload::UploadFile;

use crate::app::App;
use crate::command::{ChatCommand, LoginInput, mime_for_extension};
use crate::Repl;

/// What the navigation loop does after a view returns.
pub enum Next {
    Navigate(&'static str),
    Quit,
}

pub async fn login_view(rl: &mut Repl, app: &App) -> Result<Next> {
    println!("{}", "=== Login ===".bright_magenta().bold());
    println!("{}", "Enter a username, or '/quit' to exit.".bright_black());

    loop {
        let line = match rl.readline("username> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(Next::Quit),
            Err(err) => return Err(err.into()),
        };

        let username = match LoginInput::parse(&line) {
            LoginInput::Quit => return Ok(Next::Quit),
            LoginInput::Username(username) => username,
        };

        match app.login().login(&username).await {
            Ok(_) => {
                println!("{}", format!("Logged in as {}", username).bright_green());
                return Ok(Next::Navigate(View::Chat.path()));
            }
            Err(LoginError::EmptyUsername) => {
                println!("{}", "Please enter a username.".yellow());
            }
            Err(e) => {
                eprintln!("{}", format!("Login failed: {}", e).red());
            }
        }
    }
}

pub async fn chat_view(rl: &mut Repl, app: &App) -> Result<Next> {
    let transcript = app.transcript();
    let printer = spawn_printer(transcript.subscribe());

    println!("{}", "=== Knowledge Assistant ===".bright_magenta().bold());
    print_help();
    println!();

    let next = loop {
        let draft = transcript.take_draft();
        let line = match rl.readline_with_initial(">> ", (draft.as_str(), "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break Next::Quit;
            }
            Err(err) => {
                printer.abort();
                return Err(err.into());
            }
        };

        let command = ChatCommand::parse(&line);

        // The token may have been cleared by an expired session.
        if RouteGuard::navigate(View::Chat.path(), app.tokens.as_ref()).await
            != RouteDecision::Render(View::Chat)
        {
            if command.is_submission() {
                println!("{}", "Not sent: your session has expired.".yellow());
            }
            break Next::Navigate(View::Chat.path());
        }

        match command {
            ChatCommand::Empty => continue,
            ChatCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break Next::Quit;
            }
            ChatCommand::Help => print_help(),
            ChatCommand::UploadUsage => {
                println!("{}", "Usage: /upload <path to .pdf or .txt>".yellow());
            }
            ChatCommand::Upload(path) => {
                let _ = rl.add_history_entry(line.as_str());
                let file = match read_upload(app, &path).await {
                    Ok(file) => file,
                    Err(message) => {
                        eprintln!("{}", message.red());
                        continue;
                    }
                };

                println!("{}", format!("Uploading {}...", file.name).bright_black());
                let transcript = transcript.clone();
                tokio::spawn(async move {
                    if transcript.submit_file(file).await == UploadOutcome::Ignored {
                        println!("{}", "An upload is already in progress.".yellow());
                    }
                });
            }
            ChatCommand::Question(question) => {
                let _ = rl.add_history_entry(line.as_str());
                if transcript.is_pending() {
                    println!(
                        "{}",
                        "Still waiting for the previous answer. Your question is kept below."
                            .yellow()
                    );
                    transcript.set_draft(question);
                    continue;
                }

                println!("{}", format!("> {}", question).green());
                let transcript = transcript.clone();
                tokio::spawn(async move {
                    if transcript.submit_question(&question).await
                        == QuestionOutcome::SessionExpired
                    {
                        println!("{}", "Press Enter to login again.".yellow());
                    }
                });
            }
        }
    };

    printer.abort();
    Ok(next)
}

fn print_help() {
    println!(
        "{}",
        "Type a question, '/upload <file>' to add a .pdf or .txt document, or '/quit' to exit."
            .bright_black()
    );
}

async fn read_upload(app: &App, path: &Path) -> Result<UploadFile, String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| format!("Not a file: {}", path.display()))?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    if !app.config.accepts_upload(extension.as_deref()) {
        return Err(format!(
            "Unsupported file type. Accepted: {}",
            app.config.upload_extensions.join(", ")
        ));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let file = UploadFile::new(name, bytes);
    Ok(match extension.as_deref().and_then(mime_for_extension) {
        Some(mime) => file.with_mime(mime),
        None => file,
    })
}

/// Prints assistant messages as the transcript appends them. User messages
/// are echoed at submission.
fn spawn_printer(mut updates: broadcast::Receiver<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(message) if message.role == MessageRole::Assistant => {
                    for line in message.content.lines() {
                        println!("{}", line.bright_blue());
                    }
                    println!();
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Transcript printer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
