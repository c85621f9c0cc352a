//! Defibrillator availability records.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::records::{raw, Record};

const DS: &str = "defibrillators";

/// Map geometry of a defibrillator (GeoJSON-style).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefibrillatorGeometry {
    pub map_type: String,
    pub coordinates: Vec<f64>,
}

impl DefibrillatorGeometry {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Ok(Self {
            map_type: raw::str_field(raw, DS, "type")?,
            coordinates: raw::array_field(raw, DS, "coordinates")?
                .iter()
                .map(raw::f64_value)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

/// Device and location details of a defibrillator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefibrillatorProperties {
    pub device_manufacturer: String,
    pub device_public_access: String,
    pub location_building: String,
    pub location_city: String,
    pub location_description: String,
    pub location_object_name: String,
    pub location_postcode: String,
    pub location_street: String,
    /// Base64-encoded photo; the upstream includes it only when a single
    /// defibrillator was queried by id.
    pub attachment: Option<String>,
}

impl DefibrillatorProperties {
    pub fn from_raw(raw: &Value, with_attachment: bool) -> Result<Self> {
        Ok(Self {
            device_manufacturer: raw::str_field(raw, DS, "device_manufacturer")?,
            device_public_access: raw::str_field(raw, DS, "device_public_access")?,
            location_building: raw::str_field(raw, DS, "location_building")?,
            location_city: raw::str_field(raw, DS, "location_city")?,
            location_description: raw::str_field(raw, DS, "location_description")?,
            location_object_name: raw::str_field(raw, DS, "location_object_name")?,
            location_postcode: raw::str_field(raw, DS, "location_postcode")?,
            location_street: raw::str_field(raw, DS, "location_street")?,
            attachment: if with_attachment {
                raw::nullable_str_field(raw, DS, "attachment")?
            } else {
                None
            },
        })
    }
}

/// One publicly registered defibrillator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Defibrillator {
    pub geometry: DefibrillatorGeometry,
    pub properties: DefibrillatorProperties,
}

impl Defibrillator {
    /// `with_attachment` tracks whether the query named a single device;
    /// only then is the `attachment` key part of the schema.
    pub fn from_raw(raw: &Value, with_attachment: bool) -> Result<Self> {
        Ok(Self {
            geometry: DefibrillatorGeometry::from_raw(raw::object_field(raw, DS, "geometry")?)?,
            properties: DefibrillatorProperties::from_raw(
                raw::object_field(raw, DS, "properties")?,
                with_attachment,
            )?,
        })
    }
}

impl Record for DefibrillatorGeometry {}
impl Record for DefibrillatorProperties {}
impl Record for Defibrillator {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device_raw() -> Value {
        json!({
            "geometry": {"type": "Point", "coordinates": [21.0122, 52.2297]},
            "properties": {
                "device_manufacturer": "Philips", "device_public_access": "tak",
                "location_building": "1", "location_city": "Warszawa",
                "location_description": "hol główny", "location_object_name": "Urząd Dzielnicy",
                "location_postcode": "00-001", "location_street": "Marszałkowska",
                "attachment": "aGVsbG8="
            }
        })
    }

    #[test]
    fn attachment_is_skipped_for_list_queries() {
        let device = Defibrillator::from_raw(&device_raw(), false).unwrap();
        assert_eq!(device.properties.attachment, None);
        assert_eq!(device.geometry.map_type, "Point");
        assert_eq!(device.geometry.coordinates, vec![21.0122, 52.2297]);
    }

    #[test]
    fn attachment_is_required_for_single_device_queries() {
        let device = Defibrillator::from_raw(&device_raw(), true).unwrap();
        assert_eq!(device.properties.attachment.as_deref(), Some("aGVsbG8="));

        let mut raw = device_raw();
        raw["properties"].as_object_mut().unwrap().remove("attachment");
        assert!(Defibrillator::from_raw(&raw, true).is_err());
    }

    #[test]
    fn flat_mapping_indexes_coordinates_under_parent_key() {
        let device = Defibrillator::from_raw(&device_raw(), false).unwrap();
        let flat = device.to_flat_mapping().unwrap();
        assert_eq!(flat["geometry_map_type"], "Point");
        assert_eq!(flat["properties_location_city"], "Warszawa");
    }
}
