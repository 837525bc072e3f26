// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tempwatch status` command: show threshold, cooldown state, and the
//! tail of the run log. Never reads the sensor and never writes.

use cooldown::{CooldownStore, FileCooldownStore};
use decision::{remaining_cooldown, Timestamp};
use probe::{ProbeConfig, RunLog, RunRecorder};

pub async fn execute(config: ProbeConfig, lines: Option<usize>) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             tempwatch · Probe Status                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Threshold ──────────────────────────────────────────────
    println!("  Probe");
    println!("   Sensor:       {}", config.sensor.source);
    println!("   Max temp:     {} C", config.max_temp);
    if config.recipients.is_empty() {
        println!("   Recipients:   (none, notifications disabled)");
    } else {
        println!("   Recipients:   {}", config.recipients.join(", "));
    }
    println!();

    // ── Cooldown ───────────────────────────────────────────────
    println!("  Cooldown");
    println!("   Window:       {}s", config.cooldown_secs);
    println!("   State file:   {}", config.notify_file.display());
    let now = Timestamp::now();
    match FileCooldownStore::new().try_last_notified(&config.notify_key()) {
        Ok(Some(last)) => {
            println!("   Last sent:    {last}");
            println!("   Remaining:    {}", describe_remaining(now, last, &config));
        }
        Ok(None) => println!("   Last sent:    never"),
        Err(e) => println!("   Last sent:    unreadable ({e})"),
    }
    println!();

    // ── Run log ────────────────────────────────────────────────
    let n = lines.unwrap_or(config.tail_lines);
    let log = RunLog::new(&config.log_file);
    println!("  Recent runs ({})", log.path().display());
    match log.tail(n) {
        Ok(tail) if tail.is_empty() => println!("   (empty)"),
        Ok(tail) => {
            for line in tail {
                println!("   {line}");
            }
        }
        Err(e) => println!("   unreadable ({e})"),
    }

    Ok(())
}

fn describe_remaining(now: Timestamp, last: Timestamp, config: &ProbeConfig) -> String {
    match remaining_cooldown(now, last, config.cooldown()) {
        Some(secs) => format!("{secs}s"),
        None => "none (next warning will notify)".to_string(),
    }
}
