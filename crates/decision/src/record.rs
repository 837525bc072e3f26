// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The per-run log record.
//!
//! One tab-separated line per run:
//! ```text
//! timestamp  reading  threshold  WARNING|-  action  remaining|-
//! ```

use crate::{Action, Decision, Timestamp};
use std::fmt;

/// Immutable snapshot of one probe run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RunRecord {
    pub timestamp: Timestamp,
    pub reading: i64,
    pub threshold: i64,
    pub in_warning: bool,
    #[serde(flatten)]
    pub action: Action,
}

impl RunRecord {
    /// Builds the record from the run inputs and the decision made.
    pub fn new(timestamp: Timestamp, reading: i64, threshold: i64, decision: &Decision) -> Self {
        Self {
            timestamp,
            reading,
            threshold,
            in_warning: decision.in_warning,
            action: decision.action,
        }
    }

    /// The log line, without a trailing newline.
    pub fn to_line(&self) -> String {
        let remaining = self
            .action
            .remaining_secs()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        [
            self.timestamp.to_rfc3339(),
            self.reading.to_string(),
            self.threshold.to_string(),
            if self.in_warning { "WARNING" } else { "-" }.to_string(),
            self.action.as_str().to_string(),
            remaining,
        ]
        .join("\t")
    }
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Timestamp = Timestamp::from_secs(1_700_000_000);

    #[test]
    fn test_line_no_warning() {
        let d = Decision {
            in_warning: false,
            action: Action::None,
        };
        let r = RunRecord::new(T, 20, 25, &d);
        assert_eq!(r.to_line(), "2023-11-14T22:13:20Z\t20\t25\t-\t-\t-");
    }

    #[test]
    fn test_line_cooldown_has_remaining() {
        let d = Decision {
            in_warning: true,
            action: Action::SuppressedCooldown { remaining_secs: 500 },
        };
        let r = RunRecord::new(T, 30, 25, &d);
        assert_eq!(
            r.to_line(),
            "2023-11-14T22:13:20Z\t30\t25\tWARNING\tSUPPRESSED_COOLDOWN\t500"
        );
    }

    #[test]
    fn test_line_notify() {
        let d = Decision {
            in_warning: true,
            action: Action::Notify,
        };
        let line = RunRecord::new(T, 30, 25, &d).to_line();
        let cols: Vec<&str> = line.split('\t').collect();
        assert_eq!(cols.len(), 6);
        assert_eq!(cols[4], "NOTIFY");
        assert_eq!(cols[5], "-");
    }
}
