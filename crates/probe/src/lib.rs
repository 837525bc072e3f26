// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # probe
//!
//! One temperature check, start to finish.
//!
//! A run reads the sensor once, asks the [`decision`] engine what to do,
//! sends at most one notification through [`notifier`], and appends one
//! line to the run log. There is no loop and no background work: a
//! scheduler (cron, a systemd timer) provides the repetition, and the
//! [`cooldown`] store carries the only state between runs.
//!
//! # Failure policy
//! | Failure | Effect |
//! |---|---|
//! | sensor | run aborts with [`ProbeError::Sensor`], nothing recorded |
//! | cooldown store read | warning, treated as never notified |
//! | transport | error logged, store untouched, record still written |
//! | cooldown store write | error logged, delivery stands |
//! | run log | error logged, run still completes |
//!
//! # Overlapping runs
//! Runs do not lock the store. Two runs that overlap may both notify;
//! that costs one duplicate alert and nothing more.

mod clock;
mod config;
mod error;
pub mod host;
mod recorder;
mod runner;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{NotifierConfig, ProbeConfig, SensorConfig, SensorSource};
pub use error::{ProbeError, RecorderError};
pub use recorder::{MemoryRunLog, RunLog, RunRecorder};
pub use runner::{DeliveryStatus, Probe, RunOutcome};
