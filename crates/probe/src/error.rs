// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for a probe run.

use std::path::PathBuf;

/// Errors that abort a probe run.
///
/// Store, transport, and run-log failures are not here: they are reported
/// inside [`RunOutcome`](crate::RunOutcome) and the run still completes.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// No temperature could be obtained, so no decision can be made.
    #[error("cannot determine temperature: {0}")]
    Sensor(#[from] sensor::SensorError),

    /// The configuration is unreadable or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the run log.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("failed to append run record to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read run log {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
