// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for notification delivery.

use std::time::Duration;

/// Errors that can occur while handing a message to the mail transport.
///
/// None of these abort a probe run. The cooldown store is left untouched,
/// so the next scheduled run retries naturally.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the message or collecting the exit status failed.
    #[error("I/O error talking to '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The transport ran but refused the message.
    #[error("'{program}' rejected the message ({status}): {stderr}")]
    Rejected {
        program: String,
        status: String,
        stderr: String,
    },

    /// The transport did not finish within its time limit.
    #[error("'{program}' timed out after {}s", timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
