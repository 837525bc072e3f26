// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # sensor
//!
//! Obtains the current host temperature as a whole number of degrees
//! Celsius.
//!
//! # Sources
//! - **`ipmitool sdr`** ([`IpmiSensor`]) — inlet/ambient temperature from
//!   the BMC. The default on server hardware.
//! - **sysfs thermal zone** ([`SysfsThermalSensor`]) — for hosts without
//!   a BMC.
//! - **fixed** ([`FixedSensor`]) — a constant, for tests and dry runs.
//!
//! Every source implements [`SensorReader`]. [`AnySensor`] selects one at
//! runtime from configuration.
//!
//! # Example
//! ```no_run
//! use sensor::{IpmiSensor, SensorReader};
//!
//! # async fn example() -> Result<(), sensor::SensorError> {
//! let reading = IpmiSensor::default().read().await?;
//! println!("{} C from {}", reading.celsius, reading.label);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod ipmi;
mod reader;
pub mod thermal;

pub use error::SensorError;
pub use ipmi::IpmiSensor;
pub use reader::{FixedSensor, Reading, SensorReader};
pub use thermal::SysfsThermalSensor;

/// A sensor chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnySensor {
    Ipmi(IpmiSensor),
    Sysfs(SysfsThermalSensor),
    Fixed(FixedSensor),
}

impl SensorReader for AnySensor {
    fn name(&self) -> &str {
        match self {
            Self::Ipmi(s) => s.name(),
            Self::Sysfs(s) => s.name(),
            Self::Fixed(s) => s.name(),
        }
    }

    async fn read(&self) -> Result<Reading, SensorError> {
        match self {
            Self::Ipmi(s) => s.read().await,
            Self::Sysfs(s) => s.read().await,
            Self::Fixed(s) => s.read().await,
        }
    }
}
