// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Temperature from a Linux thermal zone under `/sys/class/thermal/`.
//!
//! The kernel reports the zone temperature in millidegrees Celsius. This is
//! the fallback source on hosts without a BMC (no `ipmitool`).

use crate::{Reading, SensorError, SensorReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default sysfs path for the first thermal zone.
pub const DEFAULT_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// A healthy sysfs read returns immediately; anything slower is a stuck driver.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Reads a thermal-zone file and converts it to whole degrees.
#[derive(Debug, Clone)]
pub struct SysfsThermalSensor {
    path: PathBuf,
    timeout: Duration,
}

impl SysfsThermalSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bounds the time spent waiting on the file.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a millidegree value (e.g. `54321`) into whole degrees,
    /// truncating toward zero.
    fn parse(path: &Path, content: &str) -> Result<Reading, SensorError> {
        let millidegrees: i64 = content.parse::<i64>().map_err(|_| SensorError::Parse {
            sensor: path.display().to_string(),
            detail: format!("expected integer millidegrees, got '{content}'"),
        })?;

        Ok(Reading::new(millidegrees / 1000, path.display().to_string()))
    }
}

impl Default for SysfsThermalSensor {
    fn default() -> Self {
        Self::new(DEFAULT_THERMAL_ZONE)
    }
}

impl SensorReader for SysfsThermalSensor {
    fn name(&self) -> &str {
        "sysfs"
    }

    async fn read(&self) -> Result<Reading, SensorError> {
        let sensor = self.path.display().to_string();
        let content = match tokio::time::timeout(self.timeout, read_sysfs_file(&self.path)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SensorError::Timeout {
                    sensor,
                    timeout: self.timeout,
                })
            }
        };

        let reading = Self::parse(&self.path, &content)?;
        tracing::debug!(path = %sensor, celsius = reading.celsius, "thermal zone read");
        Ok(reading)
    }
}

/// Reads a sysfs file and returns its trimmed content.
pub(crate) async fn read_sysfs_file(path: &Path) -> Result<String, SensorError> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => Ok(s.trim().to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SensorError::Unavailable {
            sensor: path.display().to_string(),
            detail: "path does not exist".to_string(),
        }),
        Err(e) => Err(SensorError::Unavailable {
            sensor: path.display().to_string(),
            detail: e.to_string(),
        }),
    }
}
