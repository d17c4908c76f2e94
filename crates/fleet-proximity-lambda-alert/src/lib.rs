//! AWS Lambda function raising proximity alerts.
//!
//! Subscribed to the device table's change stream. Every INSERT or MODIFY
//! record runs through the enrichment pipeline; an alert is published when a
//! device is 50 m or more from its paired vehicle.
//!
//! Any collaborator fault fails the invocation so the stream redrives the
//! batch. Unmapped devices and unknown vehicles are logged and skipped.

#![deny(warnings)]

use aws_lambda_events::event::dynamodb::Event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{error, info};

use fleet_proximity_lambda_shared::{init_runtime, init_tracing};
use fleet_proximity_lib::{AlertPublisher, MappingStore, Outcome, Pipeline, VehicleStore};

/// Entry point used by the `bootstrap` binary.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // Fail the cold start rather than every invocation.
    init_runtime().await?;

    lambda_runtime::run(service_fn(handler)).await
}

/// Lambda handler bound to the process-wide runtime.
pub async fn handler(event: LambdaEvent<Event>) -> Result<(), Error> {
    let runtime = init_runtime().await?;
    handle_event(runtime.pipeline(), &event.payload, &event.context.request_id).await?;
    Ok(())
}

/// Process one change notification against `pipeline`.
pub async fn handle_event<M, V, P>(
    pipeline: &Pipeline<M, V, P>,
    event: &Event,
    request_id: &str,
) -> fleet_proximity_lib::Result<Vec<Outcome>>
where
    M: MappingStore,
    V: VehicleStore,
    P: AlertPublisher,
{
    info!(
        request_id = %request_id,
        records = event.records.len(),
        "event processing started"
    );

    let outcomes = pipeline.process(event).await.inspect_err(|e| {
        error!(request_id = %request_id, error = %e, "event processing failed");
    })?;

    for outcome in &outcomes {
        match outcome {
            Outcome::MappingNotFound { device_id } => {
                info!(request_id = %request_id, device = ?device_id, "no matching vehicle for device")
            }
            Outcome::VehicleNotFound {
                device_id,
                vehicle_id,
            } => info!(
                request_id = %request_id,
                device = %device_id,
                vehicle = %vehicle_id,
                "mapped vehicle not present in vehicle table"
            ),
            Outcome::WithinRange { .. } | Outcome::Alerted { .. } => {}
        }
    }

    info!(
        request_id = %request_id,
        runs = outcomes.len(),
        alerts = outcomes.iter().filter(|o| o.is_alert()).count(),
        "event processing completed"
    );

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_proximity_lib::test_utils::{
        device_image, fixtures, modify_record, stream_event, InMemoryMappingStore,
        InMemoryVehicleStore, RecordingPublisher,
    };

    #[tokio::test]
    async fn test_handle_event_without_records() {
        let pipeline = Pipeline::new(
            InMemoryMappingStore::new(),
            InMemoryVehicleStore::new(),
            RecordingPublisher::default(),
        );

        let outcomes = handle_event(&pipeline, &stream_event(vec![]), "req-1")
            .await
            .unwrap();

        assert!(outcomes.is_empty());
        assert!(pipeline.mapping_store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_handle_event_unmapped_device() {
        let pipeline = Pipeline::new(
            InMemoryMappingStore::new(),
            InMemoryVehicleStore::new(),
            RecordingPublisher::default(),
        );
        let event = stream_event(vec![modify_record(device_image(
            fixtures::DEVICE_ID,
            fixtures::DEVICE_LATITUDE,
            fixtures::DEVICE_LONGITUDE,
        ))]);

        let outcomes = handle_event(&pipeline, &event, "req-2").await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_alert());
        assert!(pipeline.publisher().published().is_empty());
    }
}
