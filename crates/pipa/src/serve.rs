// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pipa serve` command implementation.
//!
//! Opens the database, builds the configured WhatsApp channel and serves the
//! webhook until SIGINT/SIGTERM. On shutdown in-flight message tasks get a
//! grace period, pending pickup notices are cancelled and the database is
//! closed.

use std::sync::Arc;
use std::time::Duration;

use pipa_bot::{BotSettings, StateDispatcher};
use pipa_config::PipaConfig;
use pipa_core::{PipaError, StorageAdapter};
use pipa_gateway::{GatewayState, start_server};
use pipa_storage::SqliteStorage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the `pipa serve` command.
pub async fn run_serve(config: PipaConfig) -> Result<(), PipaError> {
    info!(
        provider = ?config.whatsapp.provider,
        database = %config.storage.database_path,
        "starting pipa"
    );

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let channel = pipa_whatsapp::build_channel(&config.whatsapp)?;
    let bot = Arc::new(StateDispatcher::new(
        storage.clone(),
        channel,
        BotSettings::from_config(&config),
    )?);

    let cancel = pipa_bot::shutdown::install_signal_handler();

    if config.bot.session_idle_prune_secs > 0 {
        spawn_session_pruner(
            bot.clone(),
            Duration::from_secs(config.bot.session_idle_prune_secs),
            cancel.clone(),
        );
    }

    let state = GatewayState::new(bot.clone(), &config.whatsapp);
    let served = start_server(&config.gateway, state.clone(), cancel.clone()).await;
    // A bind failure returns without a signal; stop the background tasks too.
    cancel.cancel();

    state.tasks.close();
    if tokio::time::timeout(DRAIN_TIMEOUT, state.tasks.wait())
        .await
        .is_err()
    {
        warn!(remaining = state.tasks.len(), "message tasks still running at shutdown");
    }
    bot.scheduler().shutdown(Duration::from_secs(1)).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "failed to close storage cleanly");
    }
    info!("pipa stopped");
    served
}

fn spawn_session_pruner(bot: Arc<StateDispatcher>, every: Duration, cancel: CancellationToken) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // Skip the first immediate tick.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let pruned = bot.prune_idle_sessions();
                    if pruned > 0 {
                        debug!(pruned, "idle sessions pruned");
                    }
                }
                _ = cancel.cancelled() => {
                    debug!("session pruner shutting down");
                    break;
                }
            }
        }
    });
}
