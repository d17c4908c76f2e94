//! DynamoDB point-get adapters for the mapping and vehicle tables.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use fleet_proximity_lib::model::{DEVICE_KEY, VEHICLE_KEY};
use fleet_proximity_lib::{
    Attribute, Attributes, Error, Lookup, MappingStore, Number, Result, VehicleStore,
};

/// Issue a `GetItem` for `key_name = key` against `table`.
async fn get_by_string_key(
    client: &Client,
    table: &str,
    key_name: &str,
    key: &str,
) -> Result<Lookup<Attributes>> {
    debug!(table = %table, key_name = %key_name, key = %key, "GetItem");

    let output = client
        .get_item()
        .table_name(table)
        .key(key_name, AttributeValue::S(key.to_string()))
        .send()
        .await
        .map_err(|e| Error::Lookup {
            table: table.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

    Ok(output.item.map(attributes_from_sdk).into())
}

/// Convert an SDK item into plain attributes.
pub fn attributes_from_sdk(item: HashMap<String, AttributeValue>) -> Attributes {
    item.into_iter()
        .filter_map(|(name, value)| attribute_from_sdk(value).map(|attr| (name, attr)))
        .collect()
}

/// Convert one SDK value. Variants unknown to this SDK version are dropped.
fn attribute_from_sdk(value: AttributeValue) -> Option<Attribute> {
    let attr = match value {
        AttributeValue::S(s) => Attribute::String(s),
        AttributeValue::N(n) => Attribute::Number(Number::new(n)),
        AttributeValue::Bool(b) => Attribute::Bool(b),
        AttributeValue::Null(_) => Attribute::Null,
        AttributeValue::B(blob) => Attribute::Binary(blob.into_inner()),
        AttributeValue::L(items) => {
            Attribute::List(items.into_iter().filter_map(attribute_from_sdk).collect())
        }
        AttributeValue::M(map) => Attribute::Map(attributes_from_sdk(map)),
        AttributeValue::Ss(set) => Attribute::StringSet(set),
        AttributeValue::Ns(set) => Attribute::NumberSet(set.into_iter().map(Number::new).collect()),
        AttributeValue::Bs(set) => {
            Attribute::BinarySet(set.into_iter().map(|b| b.into_inner()).collect())
        }
        _ => return None,
    };
    Some(attr)
}

/// Mapping table keyed by `device_mac_address`.
#[derive(Clone)]
pub struct DynamoMappingStore {
    client: Client,
    table: String,
}

impl DynamoMappingStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl MappingStore for DynamoMappingStore {
    async fn mapping_entry(&self, device_id: &str) -> Result<Lookup<Attributes>> {
        get_by_string_key(&self.client, &self.table, DEVICE_KEY, device_id).await
    }
}

/// Vehicle table keyed by `vehicle_mac_address`.
#[derive(Clone)]
pub struct DynamoVehicleStore {
    client: Client,
    table: String,
}

impl DynamoVehicleStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl VehicleStore for DynamoVehicleStore {
    async fn vehicle(&self, vehicle_id: &str) -> Result<Lookup<Attributes>> {
        get_by_string_key(&self.client, &self.table, VEHICLE_KEY, vehicle_id).await
    }
}
