//! Environment configuration resolved once at cold start.
//!
//! # Environment Variables
//!
//! - `REFERENCE_TABLE_NAME`: device to vehicle mapping table
//! - `VEHICLE_TABLE_NAME`: vehicle state table
//! - `DEVICE_TABLE_NAME`: device table feeding the change stream
//! - `SNS_ARN`: notification topic for proximity alerts
//!
//! All four are required. The device table is not read by the pipeline, but a
//! deployment without it is misconfigured and refuses to start.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MAPPING_TABLE_VAR: &str = "REFERENCE_TABLE_NAME";
pub const VEHICLE_TABLE_VAR: &str = "VEHICLE_TABLE_NAME";
pub const DEVICE_TABLE_VAR: &str = "DEVICE_TABLE_NAME";
pub const TOPIC_ARN_VAR: &str = "SNS_ARN";

/// Names of the collaborators the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Table keyed by `device_mac_address` holding `vehicle_mac_address`.
    pub mapping_table: String,
    /// Table keyed by `vehicle_mac_address` holding vehicle coordinates.
    pub vehicle_table: String,
    /// Source table of the change stream.
    pub device_table: String,
    /// Notification topic address.
    pub topic_arn: String,
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated the same as absent ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::MissingConfig {
                    name: name.to_string(),
                })
        };

        Ok(Self {
            mapping_table: require(MAPPING_TABLE_VAR)?,
            vehicle_table: require(VEHICLE_TABLE_VAR)?,
            device_table: require(DEVICE_TABLE_VAR)?,
            topic_arn: require(TOPIC_ARN_VAR)?,
        })
    }
}
