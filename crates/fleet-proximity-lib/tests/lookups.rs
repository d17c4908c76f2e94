use fleet_proximity_lib::test_utils::{
    fixtures, FailingStore, InMemoryMappingStore, InMemoryVehicleStore, RecordingPublisher,
};
use fleet_proximity_lib::{Attribute, Attributes, Error, Lookup, Pipeline};

fn pipeline_with<M, V>(mapping: M, vehicles: V) -> Pipeline<M, V, RecordingPublisher>
where
    M: fleet_proximity_lib::MappingStore,
    V: fleet_proximity_lib::VehicleStore,
{
    Pipeline::new(mapping, vehicles, RecordingPublisher::default())
}

fn seeded() -> Pipeline<InMemoryMappingStore, InMemoryVehicleStore, RecordingPublisher> {
    pipeline_with(
        InMemoryMappingStore::new().with_pair(fixtures::DEVICE_ID, fixtures::VEHICLE_ID),
        InMemoryVehicleStore::new().with_vehicle(
            fixtures::VEHICLE_ID,
            fixtures::VEHICLE_LATITUDE,
            fixtures::VEHICLE_LONGITUDE,
        ),
    )
}

#[tokio::test]
async fn resolves_mapped_device() {
    let pipeline = seeded();
    let vehicle = pipeline
        .resolve_vehicle_for_device(Some(fixtures::DEVICE_ID))
        .await
        .unwrap();
    assert_eq!(vehicle, Lookup::Found("BB:CC:DD:EE".to_string()));
}

#[tokio::test]
async fn unmapped_device_is_a_miss_not_an_error() {
    let pipeline = seeded();
    let vehicle = pipeline
        .resolve_vehicle_for_device(Some("FF:FF:FF:FF"))
        .await
        .unwrap();
    assert_eq!(vehicle, Lookup::NotFound);
}

#[tokio::test]
async fn absent_or_blank_device_id_misses_without_a_lookup() {
    let pipeline = seeded();
    assert_eq!(
        pipeline.resolve_vehicle_for_device(None).await.unwrap(),
        Lookup::NotFound
    );
    assert_eq!(
        pipeline.resolve_vehicle_for_device(Some("  ")).await.unwrap(),
        Lookup::NotFound
    );
    assert!(pipeline.mapping_store().calls().is_empty());
}

#[tokio::test]
async fn mapping_entry_without_vehicle_id_is_a_fault() {
    let entry: Attributes = [(
        "device_mac_address".to_string(),
        Attribute::from(fixtures::DEVICE_ID),
    )]
    .into_iter()
    .collect();
    let pipeline = pipeline_with(
        InMemoryMappingStore::new().with_entry(fixtures::DEVICE_ID, entry),
        InMemoryVehicleStore::new(),
    );

    let err = pipeline
        .resolve_vehicle_for_device(Some(fixtures::DEVICE_ID))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingAttribute {
            entity: "mapping",
            attribute: "vehicle_mac_address"
        }
    ));
}

#[tokio::test]
async fn mapping_service_fault_is_distinct_from_miss() {
    let pipeline = pipeline_with(
        FailingStore::new("vehicle_device_mapping_table", "ResourceNotFoundException"),
        InMemoryVehicleStore::new(),
    );
    let err = pipeline
        .resolve_vehicle_for_device(Some(fixtures::DEVICE_ID))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Lookup { ref table, .. } if table == "vehicle_device_mapping_table"));
    assert!(err.to_string().contains("ResourceNotFoundException"));
}

#[tokio::test]
async fn fetches_vehicle_with_exact_fields() {
    let pipeline = seeded();
    let Lookup::Found(record) = pipeline.fetch_vehicle(fixtures::VEHICLE_ID).await.unwrap() else {
        panic!("vehicle should be found");
    };

    assert_eq!(record["vehicle_mac_address"].as_str(), Some("BB:CC:DD:EE"));
    assert_eq!(record["latitude"].as_str(), Some("88.44"));
    assert_eq!(record["longitude"].as_str(), Some("10.12"));
}

#[tokio::test]
async fn absent_vehicle_is_a_miss() {
    let pipeline = seeded();
    assert_eq!(
        pipeline.fetch_vehicle("00:00:00:00").await.unwrap(),
        Lookup::NotFound
    );
}

#[tokio::test]
async fn vehicle_service_fault_propagates() {
    let pipeline = pipeline_with(
        InMemoryMappingStore::new(),
        FailingStore::new("vehicle_table", "ThrottlingException"),
    );
    let err = pipeline.fetch_vehicle(fixtures::VEHICLE_ID).await.unwrap_err();
    assert!(err.to_string().contains("vehicle_table"));
    assert!(err.to_string().contains("ThrottlingException"));
}
