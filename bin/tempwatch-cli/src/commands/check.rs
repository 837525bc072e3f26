// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tempwatch check` command: one probe run.
//!
//! Exits non-zero only when the sensor or configuration fails. Store,
//! transport, and run-log failures are reported but the run still counts
//! as completed.

use cooldown::FileCooldownStore;
use probe::{Probe, ProbeConfig, RunLog, RunOutcome, SystemClock};
use serde_json::json;

pub async fn execute(config: ProbeConfig, json: bool) -> anyhow::Result<()> {
    let probe = Probe::new(
        config.clone(),
        config.create_sensor(),
        FileCooldownStore::new(),
        config.create_transport(),
        RunLog::new(&config.log_file),
        SystemClock,
    );

    let outcome = probe.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&outcome)?)?);
    } else {
        println!("{}", outcome.record);
    }
    Ok(())
}

fn to_json(outcome: &RunOutcome) -> serde_json::Result<serde_json::Value> {
    let mut value = serde_json::to_value(&outcome.record)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("sensor".into(), json!(outcome.reading.label));
        map.insert("reason".into(), json!(outcome.decision.reason()));
        map.insert("last_notified".into(), json!(outcome.last_notified.to_rfc3339()));
        map.insert(
            "delivery".into(),
            json!(outcome.delivery.as_ref().map(|d| d.as_str())),
        );
        map.insert(
            "record_written".into(),
            json!(outcome.record_error.is_none()),
        );
    }
    Ok(value)
}
