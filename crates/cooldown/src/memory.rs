// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory store for tests and embedding.

use crate::{CooldownStore, StoreError};
use decision::Timestamp;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A [`CooldownStore`] held in process memory.
///
/// Reads and writes can be made to fail on demand, which lets callers
/// exercise the fail-open and duplicate-on-write-failure paths.
#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    entries: Mutex<HashMap<String, Timestamp>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `key` already set to `at`.
    pub fn with_entry(key: &str, at: Timestamp) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), at);
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `mark_notified` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stored value, bypassing injected read failures.
    pub fn peek(&self, key: &str) -> Option<Timestamp> {
        self.lock().get(key).copied()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Timestamp>> {
        // A poisoned map still holds valid timestamps.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CooldownStore for MemoryCooldownStore {
    fn try_last_notified(&self, key: &str) -> Result<Option<Timestamp>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected read failure"),
            });
        }
        Ok(self.peek(key))
    }

    fn mark_notified(&self, key: &str, now: Timestamp) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected write failure"),
            });
        }
        self.lock().insert(key.to_string(), now);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
