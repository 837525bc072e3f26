// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`CooldownStore`] trait.

use crate::StoreError;
use decision::Timestamp;

/// Persists the time of the last successful notification.
///
/// Each key addresses one timestamp. Individual reads and writes must be
/// atomic at the storage layer; the read-decide-write sequence of a run is
/// not, so two overlapping runs may both notify.
pub trait CooldownStore {
    /// Reads the stored timestamp. `Ok(None)` means nothing is stored yet.
    fn try_last_notified(&self, key: &str) -> Result<Option<Timestamp>, StoreError>;

    /// Records `now` as the last notification time for `key`.
    ///
    /// Idempotent: repeating the call with the same `now` leaves the same
    /// persisted state.
    fn mark_notified(&self, key: &str, now: Timestamp) -> Result<(), StoreError>;

    /// Reads the stored timestamp, failing open.
    ///
    /// Absent state yields [`Timestamp::EPOCH`]. Any read error is logged
    /// and also yields [`Timestamp::EPOCH`], so a broken store can cause
    /// an extra notification but never blocks one.
    fn last_notified(&self, key: &str) -> Timestamp {
        match self.try_last_notified(key) {
            Ok(Some(t)) => t,
            Ok(None) => Timestamp::EPOCH,
            Err(e) => {
                tracing::warn!(
                    key,
                    error = %e,
                    "cooldown store unreadable, treating as never notified"
                );
                Timestamp::EPOCH
            }
        }
    }
}

impl<T: CooldownStore + ?Sized> CooldownStore for &T {
    fn try_last_notified(&self, key: &str) -> Result<Option<Timestamp>, StoreError> {
        (**self).try_last_notified(key)
    }

    fn mark_notified(&self, key: &str, now: Timestamp) -> Result<(), StoreError> {
        (**self).mark_notified(key, now)
    }
}
