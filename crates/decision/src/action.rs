// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The outcome of a single decision.

use std::fmt;

/// What a probe run should do about its reading.
///
/// Exactly one is produced per run and it fully determines what happens
/// downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Reading is at or below the threshold.
    None,
    /// In warning, but no recipients are configured.
    SuppressedNoRecipients,
    /// In warning, but the previous notification is too recent.
    SuppressedCooldown {
        /// Seconds until a notification would be allowed. Always `> 0`.
        remaining_secs: u64,
    },
    /// Send a notification.
    Notify,
}

impl Action {
    /// Column value used in the run log. `None` renders as `-`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "-",
            Self::SuppressedNoRecipients => "SUPPRESSED_NO_RECIPIENTS",
            Self::SuppressedCooldown { .. } => "SUPPRESSED_COOLDOWN",
            Self::Notify => "NOTIFY",
        }
    }

    /// Remaining cooldown, only for [`Action::SuppressedCooldown`].
    pub fn remaining_secs(&self) -> Option<u64> {
        match self {
            Self::SuppressedCooldown { remaining_secs } => Some(*remaining_secs),
            _ => None,
        }
    }

    pub fn is_notify(&self) -> bool {
        matches!(self, Self::Notify)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision: the warning state plus the chosen [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Decision {
    /// `reading > threshold`.
    pub in_warning: bool,
    #[serde(flatten)]
    pub action: Action,
}

impl Decision {
    /// Short operator-facing explanation, used in diagnostics.
    pub fn reason(&self) -> String {
        match self.action {
            Action::None => "below threshold".to_string(),
            Action::SuppressedNoRecipients => {
                "not sending notification (no recipients configured)".to_string()
            }
            Action::SuppressedCooldown { remaining_secs } => {
                format!("not sending notification (waiting {remaining_secs}s for cooldown)")
            }
            Action::Notify => "sending notification".to_string(),
        }
    }
}
