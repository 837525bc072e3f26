// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property tests for the decision engine.

use decision::{decide, Action, DecisionInput, Timestamp};
use proptest::prelude::*;
use std::time::Duration;

const NOW: i64 = 1_700_000_000;

fn input(
    reading: i64,
    threshold: i64,
    elapsed: i64,
    cooldown: u64,
    has_recipients: bool,
) -> DecisionInput {
    DecisionInput {
        reading,
        threshold,
        now: Timestamp::from_secs(NOW),
        last_notified: Timestamp::from_secs(NOW - elapsed),
        cooldown: Duration::from_secs(cooldown),
        has_recipients,
    }
}

proptest! {
    #[test]
    fn at_or_below_threshold_is_none(
        threshold in -50i64..150,
        below in 0i64..200,
        elapsed in 0i64..100_000,
        cooldown in 0u64..100_000,
        has_recipients: bool,
    ) {
        let d = decide(&input(threshold - below, threshold, elapsed, cooldown, has_recipients));
        prop_assert!(!d.in_warning);
        prop_assert_eq!(d.action, Action::None);
    }

    #[test]
    fn warning_without_recipients_is_suppressed(
        threshold in -50i64..150,
        above in 1i64..200,
        elapsed in -100_000i64..100_000,
        cooldown in 0u64..100_000,
    ) {
        let d = decide(&input(threshold + above, threshold, elapsed, cooldown, false));
        prop_assert_eq!(d.action, Action::SuppressedNoRecipients);
    }

    #[test]
    fn warning_within_cooldown_is_suppressed_with_remaining(
        above in 1i64..200,
        cooldown in 1u64..100_000,
        frac in 0.0f64..1.0,
    ) {
        let elapsed = ((cooldown as f64) * frac) as i64;
        prop_assume!(elapsed < cooldown as i64);
        let d = decide(&input(25 + above, 25, elapsed, cooldown, true));
        let expected = cooldown as i64 - elapsed;
        prop_assert!(expected > 0);
        prop_assert_eq!(d.action, Action::SuppressedCooldown { remaining_secs: expected as u64 });
    }

    #[test]
    fn warning_after_cooldown_notifies(
        above in 1i64..200,
        cooldown in 0u64..100_000,
        extra in 0i64..100_000,
    ) {
        let d = decide(&input(25 + above, 25, cooldown as i64 + extra, cooldown, true));
        prop_assert_eq!(d.action, Action::Notify);
    }

    #[test]
    fn decide_is_deterministic(
        reading in -100i64..200,
        threshold in -100i64..200,
        elapsed in -100_000i64..100_000,
        cooldown in 0u64..100_000,
        has_recipients: bool,
    ) {
        let i = input(reading, threshold, elapsed, cooldown, has_recipients);
        prop_assert_eq!(decide(&i), decide(&i));
    }

    #[test]
    fn suppression_never_exceeds_cooldown(
        elapsed in -1_000_000i64..1_000_000,
        cooldown in 0u64..100_000,
    ) {
        let d = decide(&input(30, 25, elapsed, cooldown, true));
        if let Some(r) = d.action.remaining_secs() {
            prop_assert!(r <= cooldown);
        }
    }

    #[test]
    fn future_last_notified_notifies(
        above in 1i64..200,
        ahead in 1i64..10_000_000,
        cooldown in 0u64..100_000,
    ) {
        let d = decide(&input(25 + above, 25, -ahead, cooldown, true));
        prop_assert_eq!(d.action, Action::Notify);
    }
}
