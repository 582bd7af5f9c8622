//! BRD Assistant - conversational advisor for business-requirements documents
//!
//! A terminal assistant implementing a conversation state machine over a
//! rule-based response engine.

mod console;
mod engine;
mod runtime;
mod session;
mod state_machine;
mod store;

use console::Outcome;
use runtime::TokioScheduler;
use session::{FileSessionStore, SessionStore};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so the conversation rendering on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brd_assistant=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    // Configuration
    let data_dir = std::env::var("BRD_DATA_DIR").map_or_else(
        |_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".brd-assistant")
        },
        PathBuf::from,
    );
    std::fs::create_dir_all(&data_dir)?;

    let session_store = FileSessionStore::new(&data_dir);

    loop {
        // Restore a saved login, otherwise prompt
        let restored = session_store.get().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable session file");
            None
        });
        let username = match restored {
            Some(username) => username,
            None => match console::login(&session_store).await? {
                Some(username) => username,
                None => break,
            },
        };

        tracing::info!(user = %username, "Session started");
        let handle = runtime::spawn_session(&username, TokioScheduler)?;

        match console::run(&handle, &session_store, &username).await? {
            Outcome::Quit => break,
            Outcome::Logout => {
                tracing::info!(user = %username, "Signed out");
            }
        }
    }

    Ok(())
}
