// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Probe configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! max_temp = 25
//! log_file = "/var/log/ipmi-check-temperature.log"
//! notify_file = "/tmp/ipmi-check-temperature.last-notification.txt"
//! cooldown_secs = 600
//! recipients = ["ops@example.com"]
//! tail_lines = 5
//!
//! [sensor]
//! source = "ipmi"
//! ipmitool = "ipmitool"
//! sdr_prefixes = ["Inlet Temp", "Ambient Temp"]
//! thermal_zone = "/sys/class/thermal/thermal_zone0/temp"
//! timeout_secs = 10
//!
//! [notifier]
//! sendmail = "/usr/sbin/sendmail"
//! sender = "probe@rack-07"
//! timeout_secs = 30
//! ```
//!
//! Every key is optional; missing keys take the defaults shown.

use crate::ProbeError;
use notifier::SendmailTransport;
use sensor::{AnySensor, IpmiSensor, SysfsThermalSensor};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MAX_TEMP: i64 = 25;
pub const DEFAULT_LOG_FILE: &str = "/var/log/ipmi-check-temperature.log";
pub const DEFAULT_NOTIFY_FILE: &str = "/tmp/ipmi-check-temperature.last-notification.txt";
/// At most one notification every ten minutes.
pub const DEFAULT_COOLDOWN_SECS: u64 = 600;
pub const DEFAULT_TAIL_LINES: usize = 5;

/// Configuration for one probe run. Built once, then read-only.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Readings strictly above this (degrees Celsius) are a warning.
    pub max_temp: i64,
    /// Append-only run log.
    pub log_file: PathBuf,
    /// Cooldown store location.
    pub notify_file: PathBuf,
    /// Minimum seconds between notifications; `0` disables the cooldown.
    pub cooldown_secs: u64,
    /// Notification recipients. Empty means no notification is ever sent.
    pub recipients: Vec<String>,
    /// How many run-log lines to include in a notification.
    pub tail_lines: usize,
    pub sensor: SensorConfig,
    pub notifier: NotifierConfig,
}

/// Where the temperature comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorSource {
    Ipmi,
    Sysfs,
}

impl FromStr for SensorSource {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ipmi" | "ipmitool" => Ok(Self::Ipmi),
            "sysfs" | "thermal" => Ok(Self::Sysfs),
            other => Err(ProbeError::Config(format!(
                "unknown sensor source '{other}'; expected 'ipmi' or 'sysfs'"
            ))),
        }
    }
}

impl fmt::Display for SensorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ipmi => "ipmi",
            Self::Sysfs => "sysfs",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub source: SensorSource,
    /// `ipmitool` executable.
    pub ipmitool: PathBuf,
    /// SDR row-name prefixes, tried in order.
    pub sdr_prefixes: Vec<String>,
    /// Thermal-zone file for the `sysfs` source.
    pub thermal_zone: PathBuf,
    pub timeout_secs: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            source: SensorSource::Ipmi,
            ipmitool: PathBuf::from("ipmitool"),
            sdr_prefixes: sensor::ipmi::DEFAULT_SDR_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            thermal_zone: PathBuf::from(sensor::thermal::DEFAULT_THERMAL_ZONE),
            timeout_secs: sensor::ipmi::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// sendmail-compatible executable.
    pub sendmail: PathBuf,
    /// `From:` address; defaults to `<user>@<hostname>`.
    pub sender: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            sendmail: PathBuf::from(notifier::transport::DEFAULT_SENDMAIL),
            sender: None,
            timeout_secs: notifier::transport::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ProbeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ProbeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ProbeError> {
        toml::from_str(toml_str).map_err(|e| ProbeError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ProbeError> {
        toml::to_string_pretty(self)
            .map_err(|e| ProbeError::Config(format!("TOML serialise error: {e}")))
    }

    /// Rejects values the probe cannot run with.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if i64::try_from(self.cooldown_secs).is_err() {
            return Err(ProbeError::Config(format!(
                "cooldown of {}s is out of range",
                self.cooldown_secs
            )));
        }
        if self.sensor.source == SensorSource::Ipmi && self.sensor.sdr_prefixes.is_empty() {
            return Err(ProbeError::Config(
                "sensor.sdr_prefixes must name at least one SDR row".to_string(),
            ));
        }
        if self.sensor.timeout_secs == 0 {
            return Err(ProbeError::Config("sensor.timeout_secs must be > 0".to_string()));
        }
        if self.notifier.timeout_secs == 0 {
            return Err(ProbeError::Config("notifier.timeout_secs must be > 0".to_string()));
        }
        if self.notify_file.file_name().is_none() {
            return Err(ProbeError::Config(format!(
                "notify_file '{}' does not name a file",
                self.notify_file.display()
            )));
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Key under which the last-notification time is stored.
    pub fn notify_key(&self) -> String {
        self.notify_file.to_string_lossy().into_owned()
    }

    /// `From:` address for notifications.
    pub fn sender(&self, username: &str, hostname: &str) -> String {
        self.notifier
            .sender
            .clone()
            .unwrap_or_else(|| format!("{username}@{hostname}"))
    }

    /// Creates the sensor specified by this config.
    pub fn create_sensor(&self) -> AnySensor {
        let timeout = Duration::from_secs(self.sensor.timeout_secs);
        match self.sensor.source {
            SensorSource::Ipmi => AnySensor::Ipmi(IpmiSensor::new(
                &self.sensor.ipmitool,
                self.sensor.sdr_prefixes.clone(),
                timeout,
            )),
            SensorSource::Sysfs => AnySensor::Sysfs(
                SysfsThermalSensor::new(&self.sensor.thermal_zone).with_timeout(timeout),
            ),
        }
    }

    /// Creates the mail transport specified by this config.
    pub fn create_transport(&self) -> SendmailTransport {
        SendmailTransport::new(
            &self.notifier.sendmail,
            Duration::from_secs(self.notifier.timeout_secs),
        )
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_temp: DEFAULT_MAX_TEMP,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            notify_file: PathBuf::from(DEFAULT_NOTIFY_FILE),
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            recipients: Vec::new(),
            tail_lines: DEFAULT_TAIL_LINES,
            sensor: SensorConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}
