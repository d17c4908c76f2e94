//! Keyed lookups against the mapping and vehicle tables.
//!
//! Each lookup has three outcomes: `Ok(Lookup::Found(_))`,
//! `Ok(Lookup::NotFound)` and `Err(_)`. A miss is ordinary data and
//! short-circuits the pipeline; an error is a collaborator fault and aborts
//! the invocation.

use async_trait::async_trait;

use crate::attribute::Attributes;
use crate::error::Result;

/// Result of a keyed point lookup that completed.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Device to vehicle indirection table.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Fetch the mapping entry keyed by `device_mac_address = device_id`.
    async fn mapping_entry(&self, device_id: &str) -> Result<Lookup<Attributes>>;
}

/// Vehicle state table.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Fetch the vehicle keyed by `vehicle_mac_address = vehicle_id`.
    async fn vehicle(&self, vehicle_id: &str) -> Result<Lookup<Attributes>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn found_unwraps_hits_only() {
        assert_eq!(Lookup::Found("x").found(), Some("x"));
        assert_eq!(Lookup::<&str>::NotFound.found(), None);
    }
}
