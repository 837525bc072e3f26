// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The decision function.
//!
//! ```text
//!  reading > threshold? ──no──► None
//!          │ yes
//!  recipients?          ──no──► SuppressedNoRecipients
//!          │ yes
//!  remaining > 0?       ──yes─► SuppressedCooldown { remaining }
//!          │ no
//!          ▼
//!        Notify
//! ```
//!
//! `remaining = cooldown - (now - last_notified)`. A cooldown that has
//! exactly run out (`remaining == 0`) allows a notification.
//!
//! A `last_notified` later than `now` cannot be trusted (the wall clock
//! stepped back, or the store was tampered with). It is treated like a
//! missing timestamp, so the run notifies and the store is rewritten with
//! the current time.

use crate::{Action, Decision, Timestamp};
use std::time::Duration;

/// Inputs to [`decide`] for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionInput {
    /// Current temperature in degrees Celsius.
    pub reading: i64,
    /// Readings strictly above this are a warning.
    pub threshold: i64,
    pub now: Timestamp,
    /// [`Timestamp::EPOCH`] when never notified.
    pub last_notified: Timestamp,
    /// Zero disables cooldown suppression entirely.
    pub cooldown: Duration,
    pub has_recipients: bool,
}

/// Decides what to do about a single reading.
///
/// Pure and deterministic: identical inputs always produce the same
/// [`Decision`].
///
/// A `last_notified` in the future is ignored, so suppression never
/// outlasts one cooldown of real time.
pub fn decide(input: &DecisionInput) -> Decision {
    let in_warning = input.reading > input.threshold;
    if !in_warning {
        return Decision {
            in_warning,
            action: Action::None,
        };
    }

    if !input.has_recipients {
        return Decision {
            in_warning,
            action: Action::SuppressedNoRecipients,
        };
    }

    let action = match remaining_cooldown(input.now, input.last_notified, input.cooldown) {
        Some(remaining_secs) => Action::SuppressedCooldown { remaining_secs },
        None => Action::Notify,
    };
    Decision { in_warning, action }
}

/// Seconds of cooldown left, or `None` once it has fully elapsed.
///
/// Also `None` when `last_notified` is after `now`.
pub fn remaining_cooldown(
    now: Timestamp,
    last_notified: Timestamp,
    cooldown: Duration,
) -> Option<u64> {
    let cooldown = i64::try_from(cooldown.as_secs()).unwrap_or(i64::MAX);
    if cooldown == 0 || last_notified > now {
        return None;
    }
    let elapsed = now.seconds_since(last_notified);
    let remaining = cooldown.saturating_sub(elapsed);
    (remaining > 0).then_some(remaining as u64)
}
