// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for temperature sensors.

use std::time::Duration;

/// Errors that can occur when obtaining a temperature reading.
///
/// Every variant is fatal to a probe run: without a reading no decision
/// can be made.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The device or tool could not be queried, or reported no usable row.
    #[error("sensor '{sensor}' unavailable: {detail}")]
    Unavailable { sensor: String, detail: String },

    /// The sensor answered, but the value could not be parsed.
    #[error("failed to parse reading from '{sensor}': {detail}")]
    Parse { sensor: String, detail: String },

    /// The sensor did not answer within its time limit.
    #[error("sensor '{sensor}' timed out after {}s", timeout.as_secs())]
    Timeout { sensor: String, timeout: Duration },
}

impl SensorError {
    /// Returns `true` if the failure was a timeout rather than a hard error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
