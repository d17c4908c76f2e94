//! Fleet proximity library entry points.
//!
//! This crate turns a device-table change notification into zero or more
//! proximity alerts: it decodes the new image, resolves the paired vehicle
//! through the mapping table, fetches the vehicle's position, measures the
//! geodesic distance and publishes an alert when the pair is too far apart.
//!
//! The tables and the notification channel are reached through the
//! [`MappingStore`], [`VehicleStore`] and [`AlertPublisher`] traits; the AWS
//! implementations live in the Lambda infrastructure crate.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory collaborators and stream
//! fixtures. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod alert;
pub mod attribute;
pub mod config;
pub mod error;
pub mod geodesic;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod stream;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alert::{
    notify_if_far, AlertMessage, AlertPublisher, Notification, ALERT_DISTANCE_METERS, ALERT_TYPE,
};
pub use attribute::{Attribute, Attributes, Number};
pub use config::Config;
pub use error::{Error, Result};
pub use geodesic::distance_meters;
pub use model::{Coordinate, DeviceReading, VehicleRecord};
pub use pipeline::{Outcome, Pipeline};
pub use store::{Lookup, MappingStore, VehicleStore};
pub use stream::{decode, qualifying_images, ChangeKind};
