// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pipa shell` command implementation.
//!
//! Feeds terminal lines to the dispatcher as one phone and prints the bot's
//! replies through a [`ConsoleChannel`]. Orders are stored in the configured
//! database like any other conversation.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use pipa_bot::{BotSettings, StateDispatcher};
use pipa_config::PipaConfig;
use pipa_core::{PipaError, StorageAdapter};
use pipa_storage::SqliteStorage;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use crate::console::ConsoleChannel;

/// Runs the `pipa shell` interactive REPL.
pub async fn run_shell(config: PipaConfig, phone: String) -> Result<(), PipaError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let channel = Arc::new(ConsoleChannel::new());
    let bot = StateDispatcher::new(
        storage.clone(),
        channel,
        BotSettings::from_config(&config),
    )?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| PipaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "pipa shell".bold().green());
    println!("Chatting as {}. Type {} to exit.\n", phone.cyan(), "/quit".yellow());
    info!(phone = %phone, "shell session started");

    let prompt = format!("{}> ", phone.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if let Err(e) = bot.handle(&phone, trimmed).await {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    // Pending pickup notices are dropped with the session.
    let dropped = bot.scheduler().pending();
    if dropped > 0 {
        println!("{}", format!("{dropped} scheduled notice(s) dropped").dimmed());
    }
    bot.scheduler().shutdown(Duration::from_secs(1)).await;
    storage.close().await?;
    Ok(())
}
