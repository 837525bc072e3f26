// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ambient/inlet temperature from the BMC via `ipmitool sdr`.
//!
//! `ipmitool sdr` prints one sensor per line:
//!
//! ```text
//! Fan1 RPM         | 3600 RPM          | ok
//! Inlet Temp       | 21 degrees C      | ok
//! Exhaust Temp     | 38 degrees C      | ok
//! ```
//!
//! The first row whose name starts with one of the configured prefixes and
//! whose value is not `disabled` supplies the reading.

use crate::{Reading, SensorError, SensorReader};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Row prefixes tried, in order, when none are configured.
pub const DEFAULT_SDR_PREFIXES: [&str; 2] = ["Inlet Temp", "Ambient Temp"];

/// Upper bound on a single `ipmitool` invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sensor backed by the `ipmitool sdr` command.
#[derive(Debug, Clone)]
pub struct IpmiSensor {
    program: PathBuf,
    args: Vec<String>,
    prefixes: Vec<String>,
    timeout: Duration,
}

impl IpmiSensor {
    /// Creates a sensor that runs `<program> sdr`.
    pub fn new(program: impl Into<PathBuf>, prefixes: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: vec!["sdr".to_string()],
            prefixes,
            timeout,
        }
    }

    /// Replaces the argument list passed to the program.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    async fn run_sdr(&self) -> Result<String, SensorError> {
        let sensor = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(result) => result.map_err(|e| SensorError::Unavailable {
                sensor: sensor.clone(),
                detail: format!("failed to run: {e}"),
            })?,
            Err(_) => {
                return Err(SensorError::Timeout {
                    sensor,
                    timeout: self.timeout,
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SensorError::Unavailable {
                sensor,
                detail: format!(
                    "exited with {}: OUT: {} ERR: {}",
                    output.status,
                    stdout.trim(),
                    stderr.trim()
                ),
            });
        }
        Ok(stdout)
    }
}

impl Default for IpmiSensor {
    fn default() -> Self {
        Self::new(
            "ipmitool",
            DEFAULT_SDR_PREFIXES.iter().map(|p| p.to_string()).collect(),
            DEFAULT_TIMEOUT,
        )
    }
}

impl SensorReader for IpmiSensor {
    fn name(&self) -> &str {
        "ipmi"
    }

    async fn read(&self) -> Result<Reading, SensorError> {
        let stdout = self.run_sdr().await?;
        let reading = parse_sdr(&stdout, &self.prefixes)?;
        tracing::debug!(label = %reading.label, celsius = reading.celsius, "ipmi sdr read");
        Ok(reading)
    }
}

/// Extracts the first usable temperature row from `ipmitool sdr` output.
pub fn parse_sdr(output: &str, prefixes: &[String]) -> Result<Reading, SensorError> {
    for line in output.lines() {
        if !prefixes.iter().any(|p| line.starts_with(p.as_str())) {
            continue;
        }

        let line = line.trim();
        let mut fields = line.split('|');
        let name = fields.next().unwrap_or_default().trim();
        let Some(value) = fields.next().map(str::trim) else {
            return Err(SensorError::Parse {
                sensor: "ipmitool sdr".to_string(),
                detail: format!("missing value column (line: {line})"),
            });
        };

        if value == "disabled" {
            continue;
        }

        let celsius = parse_degrees(value).ok_or_else(|| SensorError::Parse {
            sensor: "ipmitool sdr".to_string(),
            detail: format!("failed to parse temperature from '{value}' (line: {line})"),
        })?;
        return Ok(Reading::new(celsius, name));
    }

    Err(SensorError::Unavailable {
        sensor: "ipmitool sdr".to_string(),
        detail: format!("no row matching {prefixes:?}"),
    })
}

/// Parses `"<int> degrees C"`.
fn parse_degrees(value: &str) -> Option<i64> {
    let mut parts = value.split_whitespace();
    let number = parts.next()?.parse::<i64>().ok()?;
    match (parts.next(), parts.next()) {
        (Some("degrees"), Some("C")) => Some(number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Fan1 RPM         | 3600 RPM          | ok
Inlet Temp       | 21 degrees C      | ok
Exhaust Temp     | 38 degrees C      | ok
";

    fn prefixes() -> Vec<String> {
        DEFAULT_SDR_PREFIXES.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_parse_inlet_row() {
        let r = parse_sdr(SAMPLE, &prefixes()).unwrap();
        assert_eq!(r.celsius, 21);
        assert_eq!(r.label, "Inlet Temp");
    }

    #[test]
    fn test_disabled_row_falls_through() {
        let out = "Inlet Temp | disabled | ns\nAmbient Temp | 27 degrees C | ok\n";
        let r = parse_sdr(out, &prefixes()).unwrap();
        assert_eq!(r.celsius, 27);
        assert_eq!(r.label, "Ambient Temp");
    }

    #[test]
    fn test_unparseable_value() {
        let out = "Inlet Temp | no reading | ns\n";
        let result = parse_sdr(out, &prefixes());
        assert!(matches!(result, Err(SensorError::Parse { .. })));
    }

    #[test]
    fn test_no_matching_row() {
        let out = "Fan1 RPM | 3600 RPM | ok\n";
        let result = parse_sdr(out, &prefixes());
        assert!(matches!(result, Err(SensorError::Unavailable { .. })));
    }

    #[test]
    fn test_parse_degrees() {
        assert_eq!(parse_degrees("21 degrees C"), Some(21));
        assert_eq!(parse_degrees("-4 degrees C"), Some(-4));
        assert_eq!(parse_degrees("21 RPM"), None);
        assert_eq!(parse_degrees("degrees C"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_from_command_output() {
        let sensor = IpmiSensor::new("sh", prefixes(), Duration::from_secs(5))
            .with_args(vec!["-c".into(), "printf 'Inlet Temp | 31 degrees C | ok\\n'".into()]);
        let r = sensor.read().await.unwrap();
        assert_eq!(r.celsius, 31);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_unavailable() {
        let sensor = IpmiSensor::new("sh", prefixes(), Duration::from_secs(5))
            .with_args(vec!["-c".into(), "echo 'no BMC' >&2; exit 1".into()]);
        let err = sensor.read().await.unwrap_err();
        assert!(matches!(err, SensorError::Unavailable { .. }));
        assert!(err.to_string().contains("no BMC"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_command_times_out() {
        let sensor = IpmiSensor::new("sh", prefixes(), Duration::from_millis(100))
            .with_args(vec!["-c".into(), "sleep 5".into()]);
        let err = sensor.read().await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let sensor = IpmiSensor::new("/nonexistent/ipmitool", prefixes(), DEFAULT_TIMEOUT);
        let err = sensor.read().await.unwrap_err();
        assert!(matches!(err, SensorError::Unavailable { .. }));
    }
}
