// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator subcommands: strikes, promotions, delivery confirmation,
//! recharge notices and the daily route.
//!
//! Each command opens the database, runs one dispatcher action and closes
//! it again. Customer notices go out through the configured provider.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use pipa_bot::{BotSettings, StateDispatcher};
use pipa_config::PipaConfig;
use pipa_core::{Order, PipaError, StorageAdapter};
use pipa_storage::SqliteStorage;

struct Operator {
    storage: Arc<SqliteStorage>,
    bot: StateDispatcher,
}

impl Operator {
    async fn open(config: &PipaConfig) -> Result<Self, PipaError> {
        let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
        storage.initialize().await?;
        let channel = pipa_whatsapp::build_channel(&config.whatsapp)?;
        let bot = StateDispatcher::new(
            storage.clone(),
            channel,
            BotSettings::from_config(config),
        )?;
        Ok(Self { storage, bot })
    }

    /// Closes the database, passing `result` through.
    async fn finish<T>(self, result: Result<T, PipaError>) -> Result<T, PipaError> {
        self.bot.scheduler().shutdown(Duration::from_secs(1)).await;
        self.storage.close().await?;
        result
    }
}

pub async fn strike(config: PipaConfig, phone: &str) -> Result<(), PipaError> {
    let op = Operator::open(&config).await?;
    let result = op.bot.assign_strike(phone).await;
    let outcome = op.finish(result).await?;
    if outcome.blocked {
        println!("{phone}: {} strikes, {}", outcome.strikes, "blocked".red().bold());
    } else {
        println!("{phone}: {} strike(s)", outcome.strikes);
    }
    Ok(())
}

pub async fn promote(config: PipaConfig, phone: &str) -> Result<(), PipaError> {
    let op = Operator::open(&config).await?;
    let result = op.bot.promote_to_premium(phone).await;
    if op.finish(result).await? {
        println!("{phone}: {}", "promoted to premium".green());
    } else {
        println!("{phone}: already premium");
    }
    Ok(())
}

pub async fn confirm_delivery(
    config: PipaConfig,
    phone: &str,
    order: Option<i64>,
) -> Result<(), PipaError> {
    let op = Operator::open(&config).await?;
    let result = op.bot.request_delivery_confirmation(phone, order).await;
    let order_id = op.finish(result).await?;
    println!("{phone}: asked to confirm order #{order_id}");
    Ok(())
}

pub async fn notify_plant(config: PipaConfig, phone: &str) -> Result<(), PipaError> {
    let op = Operator::open(&config).await?;
    let result = op.bot.notify_arrived_at_plant(phone).await;
    op.finish(result).await?;
    println!("{phone}: notified cylinder at plant");
    Ok(())
}

pub async fn notify_refill(config: PipaConfig, phone: &str) -> Result<(), PipaError> {
    let op = Operator::open(&config).await?;
    let result = op.bot.notify_refill_started(phone).await;
    op.finish(result).await?;
    println!("{phone}: notified refill started");
    Ok(())
}

pub async fn route(config: PipaConfig) -> Result<(), PipaError> {
    let op = Operator::open(&config).await?;
    let result = op.bot.daily_route().await;
    let orders = op.finish(result).await?;
    if orders.is_empty() {
        println!("No pending stops.");
        return Ok(());
    }
    println!("{}", format!("{} stop(s)", orders.len()).bold());
    for order in &orders {
        println!("{}", route_row(order));
    }
    Ok(())
}

fn route_row(order: &Order) -> String {
    let quantity = if order.variant.is_tank() {
        format!("{:.0} L", order.liters)
    } else {
        format!("{} cil.", order.cylinder_count)
    };
    let mut row = format!(
        "#{:<5} {:<38} {:>8} ${:>9.2}  {:<9} {}",
        order.id,
        order.variant.label(),
        quantity,
        order.amount,
        order.status.to_string(),
        order.address,
    );
    if !order.tracking_codes.is_empty() {
        row.push_str(&format!("  [{}]", order.tracking_codes.join(", ")));
    }
    row
}
