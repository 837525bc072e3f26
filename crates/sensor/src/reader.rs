// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`SensorReader`] trait and the [`Reading`] it produces.

use crate::SensorError;
use std::future::Future;

/// A single temperature reading in whole degrees Celsius.
///
/// The value is not clamped; a sensor reporting an odd value is passed
/// through as-is.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub celsius: i64,
    /// Which sensor row or file produced the value.
    pub label: String,
}

impl Reading {
    pub fn new(celsius: i64, label: impl Into<String>) -> Self {
        Self {
            celsius,
            label: label.into(),
        }
    }
}

/// Source of the current temperature.
///
/// Implementations must bound the time they spend waiting on hardware or
/// external tools and report an overrun as [`SensorError::Timeout`].
pub trait SensorReader {
    /// Human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Obtains the current temperature.
    fn read(&self) -> impl Future<Output = Result<Reading, SensorError>> + Send;
}

/// A sensor that always reports the same value.
#[derive(Debug, Clone)]
pub struct FixedSensor {
    celsius: i64,
}

impl FixedSensor {
    pub fn new(celsius: i64) -> Self {
        Self { celsius }
    }
}

impl SensorReader for FixedSensor {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn read(&self) -> Result<Reading, SensorError> {
        Ok(Reading::new(self.celsius, "fixed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_sensor_passes_value_through() {
        let r = FixedSensor::new(-3).read().await.unwrap();
        assert_eq!(r.celsius, -3);
        assert_eq!(r.label, "fixed");
    }
}
