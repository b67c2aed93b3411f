// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delayed customer notices.
//!
//! Every notice runs on a [`TaskTracker`] under a per-phone child of one root
//! [`CancellationToken`]. Cancelling a phone drops its pending notices;
//! shutting down cancels the root and waits for the tracker to drain.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use pipa_core::{ChannelAdapter, OutboundMessage};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Token shared by one phone's pending notices. `generation` tells a
/// finished task whether the entry it joined is still the current one.
struct PhoneNotices {
    generation: u64,
    token: CancellationToken,
    live: usize,
}

pub struct NotificationScheduler {
    channel: Arc<dyn ChannelAdapter>,
    root: CancellationToken,
    per_phone: Arc<DashMap<String, PhoneNotices>>,
    generations: AtomicU64,
    tracker: TaskTracker,
}

impl NotificationScheduler {
    pub fn new(channel: Arc<dyn ChannelAdapter>) -> Self {
        Self {
            channel,
            root: CancellationToken::new(),
            per_phone: Arc::new(DashMap::new()),
            generations: AtomicU64::new(0),
            tracker: TaskTracker::new(),
        }
    }

    /// Send `text` to `phone` after `delay` unless cancelled first.
    pub fn schedule(&self, phone: &str, delay: Duration, text: impl Into<String>) {
        if self.root.is_cancelled() {
            warn!(phone, "scheduler is shut down, notice dropped");
            return;
        }
        let (generation, token) = {
            let mut entry = self
                .per_phone
                .entry(phone.to_string())
                .or_insert_with(|| PhoneNotices {
                    generation: self.generations.fetch_add(1, Ordering::Relaxed),
                    token: self.root.child_token(),
                    live: 0,
                });
            entry.live += 1;
            (entry.generation, entry.token.clone())
        };
        let channel = Arc::clone(&self.channel);
        let per_phone = Arc::clone(&self.per_phone);
        let message = OutboundMessage::text(phone, text);

        debug!(phone, delay_secs = delay.as_secs(), "notice scheduled");
        self.tracker.spawn(async move {
            let to = message.to.clone();
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(phone = %to, "scheduled notice cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = channel.send(message).await {
                        warn!(phone = %to, error = %e, "scheduled notice failed");
                    }
                }
            }
            release(&per_phone, &to, generation);
        });
    }

    /// Cancel pending notices for `phone`. Returns whether any token existed.
    pub fn cancel(&self, phone: &str) -> bool {
        match self.per_phone.remove(phone) {
            Some((_, notices)) => {
                notices.token.cancel();
                debug!(phone, "pending notices cancelled");
                true
            }
            None => false,
        }
    }

    /// Number of notice tasks still running.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Number of phones with at least one notice still pending.
    pub fn tracked_phones(&self) -> usize {
        self.per_phone.len()
    }

    /// Cancel everything and wait up to `timeout` for tasks to finish.
    pub async fn shutdown(&self, timeout: Duration) {
        self.root.cancel();
        self.per_phone.clear();
        self.tracker.close();
        if tokio::time::timeout(timeout, self.tracker.wait()).await.is_err() {
            warn!(remaining = self.tracker.len(), "scheduler drain timed out");
        } else {
            info!("scheduler drained");
        }
    }
}

/// Drops one task's hold on the phone entry, removing it with the last one.
/// Entries replaced after a cancel carry a newer generation and are left alone.
fn release(per_phone: &DashMap<String, PhoneNotices>, phone: &str, generation: u64) {
    if let Entry::Occupied(mut entry) = per_phone.entry(phone.to_string()) {
        if entry.get().generation != generation {
            return;
        }
        entry.get_mut().live -= 1;
        if entry.get().live == 0 {
            entry.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use pipa_test_utils::MockChannel;
    use tracing_test::traced_test;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notice_is_sent_after_delay() {
        let channel = Arc::new(MockChannel::new());
        let scheduler = NotificationScheduler::new(channel.clone());
        scheduler.schedule("521", Duration::from_secs(10), "listo");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(channel.sent_count().await, 0);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(channel.sent_to("521").await, vec!["listo".to_string()]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_notice_is_not_sent() {
        let channel = Arc::new(MockChannel::new());
        let scheduler = NotificationScheduler::new(channel.clone());
        scheduler.schedule("521", Duration::from_secs(10), "listo");
        scheduler.schedule("522", Duration::from_secs(10), "otro");

        assert!(scheduler.cancel("521"));
        assert!(!scheduler.cancel("999"));
        tokio::time::sleep(Duration::from_secs(11)).await;

        assert!(channel.sent_to("521").await.is_empty());
        assert_eq!(channel.sent_to("522").await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn phone_entry_is_dropped_after_its_last_notice() {
        let channel = Arc::new(MockChannel::new());
        let scheduler = NotificationScheduler::new(channel.clone());
        scheduler.schedule("521", Duration::from_secs(5), "uno");
        scheduler.schedule("521", Duration::from_secs(10), "dos");
        assert_eq!(scheduler.tracked_phones(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(scheduler.tracked_phones(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(channel.sent_to("521").await.len(), 2);
        assert_eq!(scheduler.tracked_phones(), 0);
        assert!(!scheduler.cancel("521"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_leaves_newer_entry_alone() {
        let channel = Arc::new(MockChannel::new());
        let scheduler = NotificationScheduler::new(channel.clone());
        scheduler.schedule("521", Duration::from_secs(10), "viejo");
        assert!(scheduler.cancel("521"));
        scheduler.schedule("521", Duration::from_secs(10), "nuevo");

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(scheduler.tracked_phones(), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(channel.sent_to("521").await, vec!["nuevo".to_string()]);
        assert_eq!(scheduler.tracked_phones(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_notices() {
        let channel = Arc::new(MockChannel::new());
        let scheduler = NotificationScheduler::new(channel.clone());
        scheduler.schedule("521", Duration::from_secs(60), "tarde");

        scheduler.shutdown(Duration::from_secs(1)).await;
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(channel.sent_count().await, 0);

        scheduler.schedule("521", Duration::from_secs(1), "ignorado");
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn failed_notice_is_logged_not_retried() {
        let channel = Arc::new(MockChannel::new());
        channel.set_failing(true);
        let scheduler = NotificationScheduler::new(channel.clone());
        scheduler.schedule("521", Duration::from_secs(10), "listo");

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(scheduler.pending(), 0);
        assert!(logs_contain("scheduled notice failed"));
    }
}
