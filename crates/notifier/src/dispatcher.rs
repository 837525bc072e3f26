// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sends an alert and, only on confirmed delivery, records it in the
//! cooldown store.

use crate::{Alert, Message, NotificationTransport, TransportError};
use cooldown::{CooldownStore, StoreError};
use decision::Timestamp;

/// Result of a delivery that the transport accepted.
#[derive(Debug)]
pub enum Delivery {
    /// Delivered and the cooldown store updated.
    Recorded,
    /// Delivered, but the cooldown store could not be updated. The next
    /// run may notify again inside the cooldown window.
    Unrecorded(StoreError),
}

impl Delivery {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }
}

/// Renders, sends, and records one notification.
#[derive(Debug)]
pub struct Dispatcher<'a, T, S> {
    transport: &'a T,
    store: &'a S,
    store_key: &'a str,
    sender: &'a str,
}

impl<'a, T, S> Dispatcher<'a, T, S>
where
    T: NotificationTransport,
    S: CooldownStore,
{
    pub fn new(transport: &'a T, store: &'a S, store_key: &'a str, sender: &'a str) -> Self {
        Self {
            transport,
            store,
            store_key,
            sender,
        }
    }

    /// Sends the alert. `mark_notified(now)` is called exactly once, after
    /// the transport reports success, and never on failure.
    pub async fn dispatch(
        &self,
        alert: &Alert<'_>,
        now: Timestamp,
    ) -> Result<Delivery, TransportError> {
        let message = Message::render(alert, self.sender);
        tracing::info!(
            transport = self.transport.name(),
            recipients = ?alert.recipients,
            "sending notification"
        );

        self.transport.send(&message).await?;
        tracing::info!("notification delivered");

        match self.store.mark_notified(self.store_key, now) {
            Ok(()) => Ok(Delivery::Recorded),
            Err(e) => {
                tracing::error!(
                    key = self.store_key,
                    error = %e,
                    "notification sent but cooldown store not updated; duplicates may follow"
                );
                Ok(Delivery::Unrecorded(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingTransport;
    use cooldown::MemoryCooldownStore;

    const KEY: &str = "notify";

    fn alert<'a>(recipients: &'a [String]) -> Alert<'a> {
        Alert {
            reading: 30,
            threshold: 25,
            hostname: "host",
            recent_log_lines: &[],
            recipients,
        }
    }

    #[tokio::test]
    async fn test_success_marks_store() {
        let transport = RecordingTransport::new();
        let store = MemoryCooldownStore::new();
        let to = vec!["a@b.com".to_string()];
        let now = Timestamp::from_secs(1_000);

        let d = Dispatcher::new(&transport, &store, KEY, "probe@host")
            .dispatch(&alert(&to), now)
            .await
            .unwrap();

        assert!(d.is_recorded());
        assert_eq!(store.peek(KEY), Some(now));
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(transport.sent()[0].from, "probe@host");
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_store() {
        let transport = RecordingTransport::failing();
        let before = Timestamp::from_secs(500);
        let store = MemoryCooldownStore::with_entry(KEY, before);
        let to = vec!["a@b.com".to_string()];

        let result = Dispatcher::new(&transport, &store, KEY, "probe@host")
            .dispatch(&alert(&to), Timestamp::from_secs(1_000))
            .await;

        assert!(result.is_err());
        assert_eq!(store.peek(KEY), Some(before));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_undo_delivery() {
        let transport = RecordingTransport::new();
        let store = MemoryCooldownStore::new();
        store.fail_writes(true);
        let to = vec!["a@b.com".to_string()];

        let d = Dispatcher::new(&transport, &store, KEY, "probe@host")
            .dispatch(&alert(&to), Timestamp::from_secs(1_000))
            .await
            .unwrap();

        assert!(matches!(d, Delivery::Unrecorded(StoreError::Write { .. })));
        assert_eq!(transport.sent().len(), 1);
    }
}
