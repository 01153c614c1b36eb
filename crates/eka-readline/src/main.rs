mod app;
mod command;
mod logging;
mod views;

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use eka_core::route::{RouteDecision, RouteGuard, View};
use eka_infrastructure::EkaPaths;

use crate::app::App;
use crate::command::{HELP_COMMAND, QUIT_COMMAND, UPLOAD_COMMAND};
use crate::views::Next;

pub(crate) type Repl = Editor<CliHelper, DefaultHistory>;

/// Completion and highlighting for the chat prompt. Paths after `/upload`
/// complete against the filesystem.
pub(crate) struct CliHelper {
    commands: Vec<String>,
    files: FilenameCompleter,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                UPLOAD_COMMAND.to_string(),
                HELP_COMMAND.to_string(),
                QUIT_COMMAND.to_string(),
            ],
            files: FilenameCompleter::new(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];

        if head.starts_with(UPLOAD_COMMAND) && head.contains(' ') {
            return self.files.complete(line, pos, ctx);
        }

        if head.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(head))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Entry point of the `eka` terminal client.
///
/// Starts logging, wires the application, warns when the backend is down,
/// then runs the navigation loop: every navigation goes through the route
/// guard, which sends unauthenticated users to the login view.
#[tokio::main]
async fn main() -> Result<()> {
    let paths = EkaPaths::default();

    let _log_guard = match paths.logs_dir() {
        Ok(dir) => Some(logging::init(&dir)?),
        Err(e) => {
            eprintln!("{}", format!("File logging disabled: {}", e).yellow());
            None
        }
    };

    let app = App::bootstrap(&paths).await?;
    tracing::info!("[Bootstrap] Application ready");

    if !app.check_backend().await {
        println!(
            "{}",
            format!(
                "Warning: the knowledge service at {} is not reachable.",
                app.config.base_url
            )
            .yellow()
        );
    }

    let mut rl: Repl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    let mut path = View::Chat.path();
    loop {
        let decision = RouteGuard::navigate(path, app.tokens.as_ref()).await;
        if decision == RouteDecision::RedirectToLogin {
            tracing::info!(path, "Redirecting to login");
        }

        let next = match decision.view() {
            View::Login => views::login_view(&mut rl, &app).await?,
            View::Chat => views::chat_view(&mut rl, &app).await?,
        };

        match next {
            Next::Navigate(target) => path = target,
            Next::Quit => break,
        }
    }

    Ok(())
}
