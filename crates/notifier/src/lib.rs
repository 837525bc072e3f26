// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # notifier
//!
//! Turns an over-temperature reading into a mail message and delivers it.
//!
//! ```text
//! Alert ──render──► Message ──NotificationTransport::send──► MTA
//!                                   │ Ok
//!                                   ▼
//!                    CooldownStore::mark_notified(now)
//! ```
//!
//! The store is only touched after a confirmed delivery. A failed send
//! leaves it as it was, so the next scheduled run tries again.

mod dispatcher;
mod error;
mod message;
pub mod transport;

pub use dispatcher::{Delivery, Dispatcher};
pub use error::TransportError;
pub use message::{Alert, Message};
pub use transport::{NotificationTransport, RecordingTransport, SendmailTransport};
