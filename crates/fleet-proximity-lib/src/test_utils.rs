//! In-memory collaborators and stream fixtures for pipeline testing.
//!
//! Available in this crate's tests and, with the `test-utils` feature, to
//! dependent crates:
//!
//! ```ignore
//! use fleet_proximity_lib::test_utils::{
//!     device_image, modify_record, stream_event, InMemoryMappingStore,
//!     InMemoryVehicleStore, RecordingPublisher,
//! };
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_lambda_events::event::dynamodb::{Event, EventRecord, StreamRecord};
use serde_dynamo::{AttributeValue, Item};

use crate::alert::AlertPublisher;
use crate::attribute::{Attribute, Attributes};
use crate::error::{Error, Result};
use crate::model::{DEVICE_KEY, LATITUDE, LONGITUDE, VEHICLE_KEY};
use crate::store::{Lookup, MappingStore, VehicleStore};

/// Identifiers and coordinates shared by the reference scenario.
pub mod fixtures {
    pub const DEVICE_ID: &str = "AA:BB:CC:DD";
    pub const DEVICE_LATITUDE: &str = "22.561378";
    pub const DEVICE_LONGITUDE: &str = "88.36707583333333";

    pub const VEHICLE_ID: &str = "BB:CC:DD:EE";
    pub const VEHICLE_LATITUDE: &str = "88.44";
    pub const VEHICLE_LONGITUDE: &str = "10.12";

    /// Distance between the two positions above, in metres.
    pub const REFERENCE_DISTANCE_M: f64 = 7_471_469.868782937;

    pub const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:000000000000:proximity-alerts";
}

/// Typed stream image for a device position.
pub fn device_image(device_id: &str, latitude: &str, longitude: &str) -> Item {
    let mut image = HashMap::new();
    image.insert(DEVICE_KEY.to_string(), AttributeValue::S(device_id.into()));
    image.insert(LATITUDE.to_string(), AttributeValue::S(latitude.into()));
    image.insert(LONGITUDE.to_string(), AttributeValue::S(longitude.into()));
    Item::from(image)
}

fn record(event_name: &str, image: Item) -> EventRecord {
    EventRecord {
        event_name: event_name.to_string(),
        change: StreamRecord {
            new_image: image,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn insert_record(image: Item) -> EventRecord {
    record("INSERT", image)
}

pub fn modify_record(image: Item) -> EventRecord {
    record("MODIFY", image)
}

pub fn remove_record(image: Item) -> EventRecord {
    record("REMOVE", image)
}

pub fn stream_event(records: Vec<EventRecord>) -> Event {
    Event { records }
}

/// Plain attribute set for a vehicle row.
pub fn vehicle_attributes(vehicle_id: &str, latitude: &str, longitude: &str) -> Attributes {
    [
        (VEHICLE_KEY, vehicle_id),
        (LATITUDE, latitude),
        (LONGITUDE, longitude),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), Attribute::from(v)))
    .collect()
}

/// Mapping table backed by a `HashMap`, counting lookups.
#[derive(Default)]
pub struct InMemoryMappingStore {
    entries: HashMap<String, Attributes>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `device_id` with `vehicle_id`.
    pub fn with_pair(mut self, device_id: &str, vehicle_id: &str) -> Self {
        let entry = [(DEVICE_KEY, device_id), (VEHICLE_KEY, vehicle_id)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Attribute::from(v)))
            .collect();
        self.entries.insert(device_id.to_string(), entry);
        self
    }

    /// Store an arbitrary entry under `device_id`.
    pub fn with_entry(mut self, device_id: &str, entry: Attributes) -> Self {
        self.entries.insert(device_id.to_string(), entry);
        self
    }

    /// Device ids looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn mapping_entry(&self, device_id: &str) -> Result<Lookup<Attributes>> {
        self.calls.lock().unwrap().push(device_id.to_string());
        Ok(self.entries.get(device_id).cloned().into())
    }
}

/// Vehicle table backed by a `HashMap`, counting lookups.
#[derive(Default)]
pub struct InMemoryVehicleStore {
    vehicles: HashMap<String, Attributes>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle(mut self, vehicle_id: &str, latitude: &str, longitude: &str) -> Self {
        self.vehicles.insert(
            vehicle_id.to_string(),
            vehicle_attributes(vehicle_id, latitude, longitude),
        );
        self
    }

    pub fn with_record(mut self, vehicle_id: &str, record: Attributes) -> Self {
        self.vehicles.insert(vehicle_id.to_string(), record);
        self
    }

    /// Vehicle ids looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn vehicle(&self, vehicle_id: &str) -> Result<Lookup<Attributes>> {
        self.calls.lock().unwrap().push(vehicle_id.to_string());
        Ok(self.vehicles.get(vehicle_id).cloned().into())
    }
}

/// Table whose every lookup fails with a service error.
pub struct FailingStore {
    pub table: String,
    pub message: String,
}

impl FailingStore {
    pub fn new(table: &str, message: &str) -> Self {
        Self {
            table: table.to_string(),
            message: message.to_string(),
        }
    }

    fn fault(&self) -> Error {
        Error::Lookup {
            table: self.table.clone(),
            message: self.message.clone(),
        }
    }
}

#[async_trait]
impl MappingStore for FailingStore {
    async fn mapping_entry(&self, _device_id: &str) -> Result<Lookup<Attributes>> {
        Err(self.fault())
    }
}

#[async_trait]
impl VehicleStore for FailingStore {
    async fn vehicle(&self, _vehicle_id: &str) -> Result<Lookup<Attributes>> {
        Err(self.fault())
    }
}

/// A message captured by [`RecordingPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub subject: String,
    pub body: String,
}

/// Notification channel that records every publish.
pub struct RecordingPublisher {
    topic: String,
    published: Mutex<Vec<PublishedMessage>>,
}

impl RecordingPublisher {
    pub fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self::new(fixtures::TOPIC_ARN)
    }
}

#[async_trait]
impl AlertPublisher for RecordingPublisher {
    async fn publish(&self, subject: &str, body: &str) -> Result<Option<String>> {
        let mut published = self.published.lock().unwrap();
        published.push(PublishedMessage {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(Some(format!("test-message-{}", published.len())))
    }

    fn destination(&self) -> &str {
        &self.topic
    }
}

/// Notification channel whose every publish fails.
pub struct FailingPublisher {
    topic: String,
    message: String,
}

impl FailingPublisher {
    pub fn new(topic: &str, message: &str) -> Self {
        Self {
            topic: topic.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl AlertPublisher for FailingPublisher {
    async fn publish(&self, _subject: &str, _body: &str) -> Result<Option<String>> {
        Err(Error::Publish {
            topic: self.topic.clone(),
            message: self.message.clone(),
        })
    }

    fn destination(&self) -> &str {
        &self.topic
    }
}
