// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cooldown
//!
//! Persists the one piece of state a probe needs between runs: when the
//! last notification was successfully sent.
//!
//! - [`FileCooldownStore`] — the key is a file path; the timestamp is the
//!   file's mtime, replaced atomically on write.
//! - [`MemoryCooldownStore`] — in-process map with injectable failures.
//!
//! Reads fail open ([`CooldownStore::last_notified`] returns
//! [`Timestamp::EPOCH`](decision::Timestamp::EPOCH) on any error) so a
//! broken store can cause an extra alert but never hides one.
//!
//! # Concurrency
//! Overlapping runs each read, decide, and write without a lock. Two runs
//! that both see an expired cooldown will both notify; the window is one
//! run's duration and the cost is a single duplicate alert.

mod error;
mod file;
mod memory;
mod store;

pub use error::StoreError;
pub use file::FileCooldownStore;
pub use memory::MemoryCooldownStore;
pub use store::CooldownStore;
