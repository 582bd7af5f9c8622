//! Terminal front-end
//!
//! The rendering collaborator: renders broadcast events on stdout, reads
//! utterances and slash commands from stdin, and handles the login flow and
//! export-file writing. I/O failures here are logged and never touch the
//! conversation log or the coordinator state.

use crate::runtime::{ChatHandle, UiEvent};
use crate::session::{validate_credentials, SessionStore};
use crate::store::{export_filename, Message, TIMESTAMP_FORMAT};
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast;

/// How a console session ended.
pub enum Outcome {
    Quit,
    Logout,
}

/// Parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Submit(String),
    Export(Option<PathBuf>),
    Clear,
    Delete(usize),
    Logout,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.trim().strip_prefix('/') else {
        // Raw utterance; the runtime trims and rejects empties itself
        return Command::Submit(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("export") => Command::Export(parts.next().map(PathBuf::from)),
        Some("clear") => Command::Clear,
        Some("delete") => match parts.next().map(str::parse) {
            Some(Ok(index)) => Command::Delete(index),
            _ => Command::Invalid("usage: /delete <exchange number>".to_string()),
        },
        Some("logout") => Command::Logout,
        Some("help") => Command::Help,
        Some("quit" | "exit") => Command::Quit,
        other => Command::Invalid(format!("unknown command /{}", other.unwrap_or_default())),
    }
}

/// Prompt for credentials until a valid pair is entered, then persist the
/// username. Returns `None` on end of input.
pub async fn login(session: &dyn SessionStore) -> std::io::Result<Option<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Welcome to the BRD Assistant. Sign in to continue.");

    loop {
        let Some(username) = prompt(&mut lines, "Username: ").await? else {
            return Ok(None);
        };
        let Some(password) = prompt(&mut lines, "Password: ").await? else {
            return Ok(None);
        };

        match validate_credentials(&username, &password) {
            Ok(()) => {
                let username = username.trim().to_string();
                if let Err(e) = session.set(&username) {
                    tracing::warn!(error = %e, "Failed to persist session");
                }
                return Ok(Some(username));
            }
            Err(e) => println!("{e}"),
        }
    }
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> std::io::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    lines.next_line().await
}

/// Interactive loop for one signed-in session.
pub async fn run(
    handle: &ChatHandle,
    session: &dyn SessionStore,
    username: &str,
) -> std::io::Result<Outcome> {
    let mut rx = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("\nSigned in as {username}. Type /help for commands.");
    for message in handle.snapshot().messages() {
        render_message(message);
    }

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => render_event(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped UI events, re-rendering");
                    for message in handle.snapshot().messages() {
                        render_message(message);
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return Ok(Outcome::Quit),
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // End of input
                    return Ok(Outcome::Quit);
                };
                match parse_command(&line) {
                    Command::Submit(text) => {
                        if let Err(e) = handle.submit(text).await {
                            tracing::error!(error = %e, "Submit failed");
                        }
                    }
                    Command::Export(path) => export(handle, path),
                    Command::Clear => {
                        if let Err(e) = handle.clear().await {
                            tracing::error!(error = %e, "Clear failed");
                        }
                    }
                    Command::Delete(index) => {
                        if index >= handle.snapshot().user_message_count() {
                            println!("No exchange #{index} to delete.");
                        } else if let Err(e) = handle.delete_pair(index).await {
                            tracing::error!(error = %e, "Delete failed");
                        }
                    }
                    Command::Logout => {
                        if let Err(e) = session.clear() {
                            tracing::warn!(error = %e, "Failed to clear session");
                        }
                        return Ok(Outcome::Logout);
                    }
                    Command::Help => print_help(),
                    Command::Quit => return Ok(Outcome::Quit),
                    Command::Invalid(msg) => println!("{msg}"),
                }
            }
        }
    }
}

fn render_event(event: &UiEvent) {
    match event {
        UiEvent::Message { message } => render_message(message),
        UiEvent::Pending { pending: true } => println!("BRD Assistant is thinking..."),
        UiEvent::Pending { pending: false } => {}
        UiEvent::Reset { messages } => {
            println!("--- conversation updated ---");
            for message in messages {
                render_message(message);
            }
        }
    }
}

fn render_message(message: &Message) {
    let timestamp = message
        .timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT);
    println!("\n[{timestamp}] {}:", message.role.label());
    if message.is_code {
        // Monospace terminal already; indent marks the block and keeps
        // copy-paste of the surrounding prose clean
        for line in message.content.lines() {
            println!("    {line}");
        }
    } else {
        println!("{}", message.content);
    }
}

fn export(handle: &ChatHandle, path: Option<PathBuf>) {
    let path = path.unwrap_or_else(|| PathBuf::from(export_filename(Local::now().date_naive())));
    match std::fs::write(&path, handle.export_text()) {
        Ok(()) => println!("Conversation exported to {}", path.display()),
        // Collaborator I/O failure: logged, core state untouched
        Err(e) => tracing::warn!(error = %e, path = %path.display(), "Export failed"),
    }
}

fn print_help() {
    println!(
        "Commands:\n  /export [path]   write the conversation to a text file\n  /clear           reset the conversation\n  /delete <n>      remove the n-th exchange (0-based)\n  /logout          sign out and forget the saved username\n  /help            show this help\n  /quit            exit\nAnything else is sent to the assistant."
    );
}
