// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # decision
//!
//! The notification decision engine. Given one temperature reading and the
//! time of the last successful notification, [`decide`] picks exactly one
//! [`Action`]; [`RunRecord`] captures the run for the append-only log.
//!
//! Everything here is pure: no I/O, no clock reads, no logging. Callers
//! supply `now` and `last_notified` explicitly, which makes every branch
//! testable with fixed timestamps.
//!
//! # Example
//! ```
//! use decision::{decide, Action, DecisionInput, Timestamp};
//! use std::time::Duration;
//!
//! let now = Timestamp::from_secs(1_700_000_000);
//! let d = decide(&DecisionInput {
//!     reading: 30,
//!     threshold: 25,
//!     now,
//!     last_notified: Timestamp::from_secs(now.as_secs() - 100),
//!     cooldown: Duration::from_secs(600),
//!     has_recipients: true,
//! });
//! assert_eq!(d.action, Action::SuppressedCooldown { remaining_secs: 500 });
//! ```

mod action;
mod engine;
mod record;
mod timestamp;

pub use action::{Action, Decision};
pub use engine::{decide, remaining_cooldown, DecisionInput};
pub use record::RunRecord;
pub use timestamp::Timestamp;
