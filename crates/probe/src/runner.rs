// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The single-pass probe run.
//!
//! ```text
//! SensorReader::read ──► CooldownStore::last_notified ──► decide
//!                                                           │
//!                        Dispatcher::dispatch ◄── Notify ───┤
//!                                 │                         │
//!                                 ▼                         ▼
//!                         RunRecorder::record(RunRecord)
//! ```
//!
//! Only a sensor failure aborts the run. Store, transport, and run-log
//! failures are logged and returned in the [`RunOutcome`].

use crate::{Clock, ProbeConfig, ProbeError, RecorderError, RunRecorder};
use cooldown::{CooldownStore, StoreError};
use decision::{decide, Decision, DecisionInput, RunRecord, Timestamp};
use notifier::{Alert, Delivery, Dispatcher, NotificationTransport, TransportError};
use sensor::{Reading, SensorReader};

/// What happened to a notification the engine asked for.
#[derive(Debug)]
pub enum DeliveryStatus {
    /// Sent and recorded in the cooldown store.
    Delivered,
    /// Sent, but the cooldown store was not updated.
    DeliveredUnrecorded(StoreError),
    /// Not sent. The store is untouched, so the next run will retry.
    Failed(TransportError),
}

impl DeliveryStatus {
    /// Short label for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::DeliveredUnrecorded(_) => "delivered-unrecorded",
            Self::Failed(_) => "failed",
        }
    }
}

/// The result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub reading: Reading,
    pub last_notified: Timestamp,
    pub decision: Decision,
    /// The record written (or attempted) to the run log.
    pub record: RunRecord,
    /// `Some` only when the decision was to notify.
    pub delivery: Option<DeliveryStatus>,
    /// Set if the run log could not be appended to.
    pub record_error: Option<RecorderError>,
}

/// One configured probe.
///
/// Every collaborator is injected, so tests can replace the sensor, store,
/// transport, run log, and clock independently.
///
/// # Example
/// ```no_run
/// use cooldown::FileCooldownStore;
/// use probe::{Probe, ProbeConfig, RunLog, SystemClock};
///
/// # async fn example() -> Result<(), probe::ProbeError> {
/// let config = ProbeConfig::default();
/// let probe = Probe::new(
///     config.clone(),
///     config.create_sensor(),
///     FileCooldownStore::new(),
///     config.create_transport(),
///     RunLog::new(&config.log_file),
///     SystemClock,
/// );
/// let outcome = probe.run().await?;
/// println!("{}", outcome.record);
/// # Ok(())
/// # }
/// ```
pub struct Probe<R, S, T, L, C> {
    config: ProbeConfig,
    sensor: R,
    store: S,
    transport: T,
    log: L,
    clock: C,
    hostname: String,
    username: String,
}

impl<R, S, T, L, C> Probe<R, S, T, L, C>
where
    R: SensorReader,
    S: CooldownStore,
    T: NotificationTransport,
    L: RunRecorder,
    C: Clock,
{
    pub fn new(config: ProbeConfig, sensor: R, store: S, transport: T, log: L, clock: C) -> Self {
        Self {
            config,
            sensor,
            store,
            transport,
            log,
            clock,
            hostname: crate::host::hostname(),
            username: crate::host::username(),
        }
    }

    /// Overrides the host name used in messages.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Runs one check: read, decide, maybe notify, record.
    pub async fn run(&self) -> Result<RunOutcome, ProbeError> {
        let reading = self.sensor.read().await.map_err(|e| {
            tracing::error!(sensor = self.sensor.name(), timeout = e.is_timeout(), "{e}");
            e
        })?;

        let threshold = self.config.max_temp;
        tracing::info!(
            "Current temp is {} (max {})   [{}]",
            reading.celsius,
            threshold,
            if reading.celsius > threshold { "WARNING" } else { "OKAY" },
        );

        let key = self.config.notify_key();
        let last_notified = self.store.last_notified(&key);
        let now = self.clock.now();
        if last_notified > now {
            tracing::warn!(
                last_notified = %last_notified,
                now = %now,
                "last notification is in the future, ignoring it; wall clock may have stepped back"
            );
        }

        let decision = decide(&DecisionInput {
            reading: reading.celsius,
            threshold,
            now,
            last_notified,
            cooldown: self.config.cooldown(),
            has_recipients: !self.config.recipients.is_empty(),
        });
        if decision.in_warning {
            tracing::info!(action = %decision.action, "Warning state: {}", decision.reason());
        }

        let delivery = if decision.action.is_notify() {
            Some(self.notify(reading.celsius, threshold, &key, now).await)
        } else {
            None
        };

        let record = RunRecord::new(now, reading.celsius, threshold, &decision);
        let record_error = match self.log.record(&record) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(error = %e, "run record not written");
                Some(e)
            }
        };

        Ok(RunOutcome {
            reading,
            last_notified,
            decision,
            record,
            delivery,
            record_error,
        })
    }

    async fn notify(
        &self,
        reading: i64,
        threshold: i64,
        key: &str,
        now: Timestamp,
    ) -> DeliveryStatus {
        // Read before this run's line is appended.
        let recent = self.log.tail(self.config.tail_lines).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "sending notification without log excerpt");
            Vec::new()
        });

        let alert = Alert {
            reading,
            threshold,
            hostname: &self.hostname,
            recent_log_lines: &recent,
            recipients: &self.config.recipients,
        };
        let sender = self.config.sender(&self.username, &self.hostname);

        match Dispatcher::new(&self.transport, &self.store, key, &sender)
            .dispatch(&alert, now)
            .await
        {
            Ok(Delivery::Recorded) => DeliveryStatus::Delivered,
            Ok(Delivery::Unrecorded(e)) => DeliveryStatus::DeliveredUnrecorded(e),
            Err(e) => {
                tracing::error!(
                    transport = self.transport.name(),
                    timeout = e.is_timeout(),
                    error = %e,
                    "notification delivery failed"
                );
                DeliveryStatus::Failed(e)
            }
        }
    }
}
