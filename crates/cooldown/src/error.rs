// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the cooldown store.

/// Errors raised by a [`CooldownStore`](crate::CooldownStore) backend.
///
/// Neither is fatal to a probe run. A read failure is treated as "never
/// notified"; a write failure happens after delivery and only risks a
/// duplicate notification on the next run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The persisted timestamp exists but could not be read.
    #[error("failed to read last-notification time from {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The new timestamp could not be persisted.
    #[error("failed to record notification time in {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
