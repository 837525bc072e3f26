// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

pub mod check;
pub mod status;

use probe::{ProbeConfig, SensorSource};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Flags that override the configuration file.
#[derive(clap::Args, Debug, Default)]
pub struct Overrides {
    /// Alert threshold in degrees Celsius.
    #[arg(long, global = true)]
    pub maxtemp: Option<i64>,

    /// Run log file.
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Notification recipient (repeatable).
    #[arg(long = "email", global = true)]
    pub emails: Vec<String>,

    /// Minimum seconds between notifications.
    #[arg(long, global = true)]
    pub cooldown: Option<u64>,

    /// File whose modification time records the last notification.
    #[arg(long, global = true)]
    pub notifyfile: Option<PathBuf>,

    /// Sensor source: ipmi or sysfs.
    #[arg(long, global = true)]
    pub sensor: Option<SensorSource>,

    /// Path to the sendmail program.
    #[arg(long, global = true)]
    pub sendmail: Option<PathBuf>,
}

impl Overrides {
    fn apply(&self, config: &mut ProbeConfig) {
        if let Some(t) = self.maxtemp {
            config.max_temp = t;
        }
        if let Some(p) = &self.log {
            config.log_file = p.clone();
        }
        if !self.emails.is_empty() {
            config.recipients = self.emails.clone();
        }
        if let Some(c) = self.cooldown {
            config.cooldown_secs = c;
        }
        if let Some(p) = &self.notifyfile {
            config.notify_file = p.clone();
        }
        if let Some(s) = self.sensor {
            config.sensor.source = s;
        }
        if let Some(p) = &self.sendmail {
            config.notifier.sendmail = p.clone();
        }
    }
}

/// Initialise the tracing subscriber based on verbosity level.
///
/// `RUST_LOG` wins when set. Output goes to stderr.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

/// Loads the base configuration, applies flag overrides, and validates.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<ProbeConfig> {
    let mut config = match path {
        Some(p) => ProbeConfig::from_file(p)?,
        None => ProbeConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = load_config(None, &Overrides::default()).unwrap();
        assert_eq!(config.max_temp, probe::ProbeConfig::default().max_temp);
        assert!(config.recipients.is_empty());
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            maxtemp: Some(30),
            emails: vec!["a@example.com".into(), "b@example.com".into()],
            cooldown: Some(0),
            sensor: Some(SensorSource::Sysfs),
            ..Default::default()
        };
        let config = load_config(None, &overrides).unwrap();
        assert_eq!(config.max_temp, 30);
        assert_eq!(config.recipients.len(), 2);
        assert_eq!(config.cooldown_secs, 0);
        assert_eq!(config.sensor.source, SensorSource::Sysfs);
    }

    #[test]
    fn test_out_of_range_cooldown_rejected() {
        let overrides = Overrides {
            cooldown: Some(u64::MAX),
            ..Default::default()
        };
        assert!(load_config(None, &overrides).is_err());
    }
}
