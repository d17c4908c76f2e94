//! Proximity alerts published when a device strays from its vehicle.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::Result;
use crate::model::{DeviceReading, VehicleRecord};

/// Separation in metres at or beyond which an alert is raised.
pub const ALERT_DISTANCE_METERS: f64 = 50.0;

/// Literal `alertType` carried by every proximity alert.
pub const ALERT_TYPE: &str = "50mApartDelivery";

/// Notification channel accepting subject + body publishes.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    /// Publish one message. Returns the channel's message id when it reports one.
    async fn publish(&self, subject: &str, body: &str) -> Result<Option<String>>;

    /// Channel address, used in diagnostics.
    fn destination(&self) -> &str;
}

/// Alert body, serialized as JSON.
///
/// Coordinates are the vehicle's, carried as the exact text stored in the
/// vehicle table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMessage {
    pub alert_type: String,
    pub handheld_id: String,
    pub vehicle_id: String,
    pub latitude: String,
    pub longitude: String,
}

impl AlertMessage {
    pub fn new(device: &DeviceReading, vehicle: &VehicleRecord) -> Self {
        Self {
            alert_type: ALERT_TYPE.to_string(),
            handheld_id: device.device_id.clone(),
            vehicle_id: vehicle.vehicle_id.clone(),
            latitude: vehicle.position.latitude.text.clone(),
            longitude: vehicle.position.longitude.text.clone(),
        }
    }

    pub fn subject(&self) -> String {
        format!("{} {}", self.alert_type, self.vehicle_id)
    }
}

/// What the notifier did for one distance.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Below threshold; nothing published.
    Suppressed,
    /// Published once.
    Sent { message_id: Option<String> },
}

/// Publish an alert if `distance` meets or exceeds [`ALERT_DISTANCE_METERS`].
///
/// A NaN distance never publishes.
pub async fn notify_if_far<P>(
    publisher: &P,
    distance: f64,
    device: &DeviceReading,
    vehicle: &VehicleRecord,
) -> Result<Notification>
where
    P: AlertPublisher + ?Sized,
{
    if distance.is_nan() || distance < ALERT_DISTANCE_METERS {
        return Ok(Notification::Suppressed);
    }

    let message = AlertMessage::new(device, vehicle);
    let body = serde_json::to_string(&message)?;
    let subject = message.subject();

    let message_id = publisher.publish(&subject, &body).await.inspect_err(|e| {
        error!(
            topic = %publisher.destination(),
            vehicle = %vehicle.vehicle_id,
            error = %e,
            "failed to publish proximity alert"
        );
    })?;

    info!(
        topic = %publisher.destination(),
        device = %device.device_id,
        vehicle = %vehicle.vehicle_id,
        distance_m = distance,
        message_id = ?message_id,
        "proximity alert published"
    );

    Ok(Notification::Sent { message_id })
}
