//! Enrichment pipeline: decode, resolve mapping, fetch vehicle, measure, notify.
//!
//! ```text
//! Start -> Decoded -> MappingResolved{Found|NotFound}
//!       -> VehicleFetched{Found|NotFound} -> DistanceComputed -> Notified -> End
//! ```
//!
//! `NotFound` at either lookup ends the run with a log entry and no further
//! calls. Any error ends the whole invocation.

use aws_lambda_events::event::dynamodb::Event;
use tracing::{debug, error, info, warn};

use crate::alert::{notify_if_far, AlertPublisher, Notification};
use crate::attribute::Attributes;
use crate::error::Result;
use crate::geodesic::distance_meters;
use crate::model::{identifier, DeviceReading, VehicleRecord, DEVICE_KEY, VEHICLE_KEY};
use crate::store::{Lookup, MappingStore, VehicleStore};
use crate::stream::qualifying_images;

/// How a single pipeline run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No mapping entry for the device (or the reading carried no device id).
    MappingNotFound { device_id: Option<String> },
    /// Mapping resolved but the vehicle table has no such vehicle.
    VehicleNotFound {
        device_id: String,
        vehicle_id: String,
    },
    /// Device is within [`crate::ALERT_DISTANCE_METERS`] of its vehicle.
    WithinRange {
        device_id: String,
        vehicle_id: String,
        distance: f64,
    },
    /// Alert published.
    Alerted {
        device_id: String,
        vehicle_id: String,
        distance: f64,
        message_id: Option<String>,
    },
}

impl Outcome {
    pub fn is_alert(&self) -> bool {
        matches!(self, Outcome::Alerted { .. })
    }
}

/// Orchestrates one enrichment run per qualifying stream record.
///
/// Holds only the long-lived collaborator clients; no state survives between
/// runs.
pub struct Pipeline<M, V, P> {
    mapping: M,
    vehicles: V,
    publisher: P,
}

impl<M, V, P> Pipeline<M, V, P>
where
    M: MappingStore,
    V: VehicleStore,
    P: AlertPublisher,
{
    pub fn new(mapping: M, vehicles: V, publisher: P) -> Self {
        Self {
            mapping,
            vehicles,
            publisher,
        }
    }

    pub fn mapping_store(&self) -> &M {
        &self.mapping
    }

    pub fn vehicle_store(&self) -> &V {
        &self.vehicles
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Look up the vehicle paired with `device_id`.
    ///
    /// An absent or blank id is a miss and does not touch the mapping table.
    pub async fn resolve_vehicle_for_device(
        &self,
        device_id: Option<&str>,
    ) -> Result<Lookup<String>> {
        let Some(device_id) = device_id.filter(|id| !id.trim().is_empty()) else {
            warn!("reading has no device id; treating as unmapped");
            return Ok(Lookup::NotFound);
        };

        let entry = self
            .mapping
            .mapping_entry(device_id)
            .await
            .inspect_err(|e| error!(device = %device_id, error = %e, "mapping lookup failed"))?;

        match entry {
            Lookup::Found(attrs) => {
                let vehicle_id = identifier("mapping", &attrs, VEHICLE_KEY)?;
                info!(device = %device_id, vehicle = %vehicle_id, "device mapped to vehicle");
                Ok(Lookup::Found(vehicle_id))
            }
            Lookup::NotFound => {
                info!(device = %device_id, "no mapping entry for device");
                Ok(Lookup::NotFound)
            }
        }
    }

    /// Fetch the current attribute set of `vehicle_id`.
    pub async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<Lookup<Attributes>> {
        let vehicle = self
            .vehicles
            .vehicle(vehicle_id)
            .await
            .inspect_err(|e| error!(vehicle = %vehicle_id, error = %e, "vehicle lookup failed"))?;

        match &vehicle {
            Lookup::Found(attrs) => debug!(vehicle = %vehicle_id, record = ?attrs, "vehicle found"),
            Lookup::NotFound => info!(vehicle = %vehicle_id, "vehicle not found"),
        }
        Ok(vehicle)
    }

    /// Run the pipeline for one decoded reading.
    pub async fn process_reading(&self, reading: &Attributes) -> Result<Outcome> {
        let device_id = reading.get(DEVICE_KEY).and_then(|a| a.as_str());

        let Some(vehicle_id) = self.resolve_vehicle_for_device(device_id).await?.found() else {
            return Ok(Outcome::MappingNotFound {
                device_id: device_id.map(str::to_string),
            });
        };

        let Some(vehicle_attrs) = self.fetch_vehicle(&vehicle_id).await?.found() else {
            return Ok(Outcome::VehicleNotFound {
                device_id: device_id.unwrap_or_default().to_string(),
                vehicle_id,
            });
        };

        let device = DeviceReading::from_attributes(reading)?;
        let vehicle = VehicleRecord::from_attributes(&vehicle_attrs)?;

        let distance = distance_meters(&device.position, &vehicle.position);
        info!(
            device = %device.device_id,
            vehicle = %vehicle.vehicle_id,
            distance_m = distance,
            "distance between device and vehicle"
        );

        let outcome = match notify_if_far(&self.publisher, distance, &device, &vehicle).await? {
            Notification::Suppressed => Outcome::WithinRange {
                device_id: device.device_id,
                vehicle_id: vehicle.vehicle_id,
                distance,
            },
            Notification::Sent { message_id } => Outcome::Alerted {
                device_id: device.device_id,
                vehicle_id: vehicle.vehicle_id,
                distance,
                message_id,
            },
        };
        Ok(outcome)
    }

    /// Process every qualifying record of a change notification, in order.
    ///
    /// Each record is an independent run. The first error aborts the rest.
    pub async fn process(&self, event: &Event) -> Result<Vec<Outcome>> {
        let readings = qualifying_images(event);
        info!(
            records = event.records.len(),
            qualifying = readings.len(),
            "processing change notification"
        );

        let mut outcomes = Vec::with_capacity(readings.len());
        for reading in &readings {
            debug!(reading = ?reading, "decoded device reading");
            outcomes.push(self.process_reading(reading).await?);
        }

        info!(
            runs = outcomes.len(),
            alerts = outcomes.iter().filter(|o| o.is_alert()).count(),
            "change notification processed"
        );
        Ok(outcomes)
    }
}
