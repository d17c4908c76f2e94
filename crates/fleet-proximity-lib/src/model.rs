//! Validated views over decoded device readings and vehicle records.

use crate::attribute::Attributes;
use crate::error::{Error, Result};

pub const DEVICE_KEY: &str = "device_mac_address";
pub const VEHICLE_KEY: &str = "vehicle_mac_address";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// One decimal coordinate component, keeping the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Degrees {
    pub value: f64,
    pub text: String,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Ranges are not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Degrees {
                value: latitude,
                text: latitude.to_string(),
            },
            longitude: Degrees {
                value: longitude,
                text: longitude.to_string(),
            },
        }
    }

    fn from_attributes(entity: &'static str, attrs: &Attributes) -> Result<Self> {
        Ok(Self {
            latitude: degrees(entity, attrs, LATITUDE)?,
            longitude: degrees(entity, attrs, LONGITUDE)?,
        })
    }
}

fn degrees(entity: &'static str, attrs: &Attributes, name: &'static str) -> Result<Degrees> {
    let attr = attrs.get(name).ok_or_else(|| Error::missing(entity, name))?;
    let text = attr.decimal_text().ok_or_else(|| {
        Error::invalid(
            entity,
            name,
            format!("expected a decimal, found {} value", attr.kind()),
        )
    })?;
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|e| Error::invalid(entity, name, format!("'{}': {}", text, e)))?;
    if !value.is_finite() {
        return Err(Error::invalid(
            entity,
            name,
            format!("'{}' is not a finite number", text),
        ));
    }
    Ok(Degrees {
        value,
        text: text.to_string(),
    })
}

pub(crate) fn identifier(entity: &'static str, attrs: &Attributes, name: &'static str) -> Result<String> {
    let attr = attrs.get(name).ok_or_else(|| Error::missing(entity, name))?;
    attr.as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid(entity, name, format!("expected S, found {}", attr.kind())))
}

/// A device position taken from the change stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReading {
    pub device_id: String,
    pub position: Coordinate,
}

impl DeviceReading {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self> {
        Ok(Self {
            device_id: identifier("device", attrs, DEVICE_KEY)?,
            position: Coordinate::from_attributes("device", attrs)?,
        })
    }
}

/// Current vehicle state as stored in the vehicle table.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub vehicle_id: String,
    pub position: Coordinate,
}

impl VehicleRecord {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self> {
        Ok(Self {
            vehicle_id: identifier("vehicle", attrs, VEHICLE_KEY)?,
            position: Coordinate::from_attributes("vehicle", attrs)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, Number};

    fn attrs(pairs: &[(&str, Attribute)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn parses_device_reading_from_string_decimals() {
        let reading = DeviceReading::from_attributes(&attrs(&[
            (DEVICE_KEY, "AA:BB:CC:DD".into()),
            (LATITUDE, "22.561378".into()),
            (LONGITUDE, "88.36707583333333".into()),
        ]))
        .unwrap();

        assert_eq!(reading.device_id, "AA:BB:CC:DD");
        assert_eq!(reading.position.latitude.value, 22.561378);
        assert_eq!(reading.position.longitude.text, "88.36707583333333");
    }

    #[test]
    fn accepts_numeric_coordinates() {
        let vehicle = VehicleRecord::from_attributes(&attrs(&[
            (VEHICLE_KEY, "BB:CC:DD:EE".into()),
            (LATITUDE, Attribute::Number(Number::new("88.44"))),
            (LONGITUDE, Attribute::Number(Number::new("10.12"))),
        ]))
        .unwrap();

        assert_eq!(vehicle.position.latitude.text, "88.44");
        assert_eq!(vehicle.position.longitude.value, 10.12);
    }

    #[test]
    fn missing_coordinate_is_a_fault() {
        let err = VehicleRecord::from_attributes(&attrs(&[
            (VEHICLE_KEY, "BB:CC:DD:EE".into()),
            (LATITUDE, "88.44".into()),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute {
                entity: "vehicle",
                attribute: LONGITUDE
            }
        ));
    }

    #[test]
    fn unparseable_coordinate_is_a_fault() {
        let err = DeviceReading::from_attributes(&attrs(&[
            (DEVICE_KEY, "AA:BB:CC:DD".into()),
            (LATITUDE, "north-ish".into()),
            (LONGITUDE, "88.3".into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { attribute: LATITUDE, .. }));
        assert!(err.to_string().contains("north-ish"));
    }

    #[test]
    fn non_finite_coordinate_is_a_fault() {
        for text in ["NaN", "inf", "-infinity"] {
            let err = VehicleRecord::from_attributes(&attrs(&[
                (VEHICLE_KEY, "BB:CC:DD:EE".into()),
                (LATITUDE, "88.44".into()),
                (LONGITUDE, Attribute::Number(Number::new(text))),
            ]))
            .unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::InvalidAttribute {
                        entity: "vehicle",
                        attribute: LONGITUDE,
                        ..
                    }
                ),
                "{text}: {err}"
            );
            assert!(err.to_string().contains("not a finite number"));
        }
    }

    #[test]
    fn identifier_must_be_a_string() {
        let err = DeviceReading::from_attributes(&attrs(&[
            (DEVICE_KEY, Attribute::Bool(true)),
            (LATITUDE, "1".into()),
            (LONGITUDE, "2".into()),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("found BOOL"));
    }
}
