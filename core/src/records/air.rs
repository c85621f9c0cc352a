//! Air-quality station records.
//!
//! One station payload nests the overall quality index, the station
//! address, and a list of per-pollutant measurements; each nested object
//! maps through its own constructor.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::convert::to_datetime;
use crate::error::Result;
use crate::records::{raw, Record};

const DS: &str = "air_quality";

/// Polish Air Quality Index summary.
///
/// The station-level index carries a recommendation text; per-measurement
/// indexes carry only the verbal name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirIndex {
    pub name: Option<String>,
    pub recommendations: Option<String>,
}

impl AirIndex {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Ok(Self {
            name: raw::nullable_str_field(raw, DS, "name")?,
            recommendations: raw::opt_str_field(raw, DS, "recommendations")?,
        })
    }
}

/// Postal address of a measuring station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirStationAddress {
    pub city: String,
    pub street: String,
    pub zip_code: String,
    pub district: String,
    pub commune: String,
}

impl AirStationAddress {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Ok(Self {
            city: raw::str_field(raw, DS, "city")?,
            street: raw::str_field(raw, DS, "street")?,
            zip_code: raw::str_field(raw, DS, "zip_code")?,
            district: raw::str_field(raw, DS, "district")?,
            commune: raw::str_field(raw, DS, "commune")?,
        })
    }
}

/// One pollutant measurement at a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirMeasurement {
    pub index: AirIndex,
    pub param_name: String,
    pub param_code: String,
    pub value: f64,
    pub time: Option<NaiveDateTime>,
    pub unit: String,
}

impl AirMeasurement {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Ok(Self {
            index: AirIndex::from_raw(raw::object_field(raw, DS, "ijp")?)?,
            param_name: raw::str_field(raw, DS, "param_name")?,
            param_code: raw::str_field(raw, DS, "param_code")?,
            value: raw::f64_field(raw, DS, "value")?,
            time: to_datetime(raw::nullable_str_field(raw, DS, "time")?.as_deref())?,
            unit: raw::str_field(raw, DS, "unit")?,
        })
    }
}

/// One air-quality station with its current measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQuality {
    pub index: AirIndex,
    pub data_source: String,
    pub name: String,
    pub station_type: String,
    pub lon: f64,
    pub lat: f64,
    pub owner: String,
    pub station: String,
    pub address: AirStationAddress,
    pub data: Vec<AirMeasurement>,
}

impl AirQuality {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Ok(Self {
            index: AirIndex::from_raw(raw::object_field(raw, DS, "ijp")?)?,
            data_source: raw::str_field(raw, DS, "data_source")?,
            name: raw::str_field(raw, DS, "name")?,
            station_type: raw::str_field(raw, DS, "station_type")?,
            lon: raw::f64_field(raw, DS, "lon")?,
            lat: raw::f64_field(raw, DS, "lat")?,
            owner: raw::str_field(raw, DS, "owner")?,
            station: raw::str_field(raw, DS, "station")?,
            address: AirStationAddress::from_raw(raw::object_field(raw, DS, "address")?)?,
            data: raw::array_field(raw, DS, "data")?
                .iter()
                .map(AirMeasurement::from_raw)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl Record for AirIndex {}
impl Record for AirStationAddress {}
impl Record for AirMeasurement {}
impl Record for AirQuality {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn station_raw() -> Value {
        json!({
            "ijp": {"name": "Dobry", "recommendations": "Warunki dobre na aktywności na zewnątrz."},
            "data_source": "WIOŚ", "name": "MzWarKondrat", "station_type": "automatyczna",
            "lon": 21.041588, "lat": 52.290864, "owner": "GIOŚ",
            "station": "Warszawa-Targówek",
            "address": {
                "city": "Warszawa", "street": "Kondratowicza", "zip_code": "03-285",
                "district": "Targówek", "commune": "Targówek"
            },
            "data": [
                {
                    "ijp": {"name": "Umiarkowany"},
                    "param_name": "pył zawieszony PM10", "param_code": "PM10",
                    "value": 61.2, "time": "2023-02-01 14:00:00", "unit": "µg/m³"
                },
                {
                    "ijp": {"name": null},
                    "param_name": "dwutlenek azotu", "param_code": "NO2",
                    "value": 23.9, "time": null, "unit": "µg/m³"
                }
            ]
        })
    }

    #[test]
    fn station_maps_nested_objects() {
        let station = AirQuality::from_raw(&station_raw()).unwrap();
        assert_eq!(station.index.name.as_deref(), Some("Dobry"));
        assert_eq!(station.address.district, "Targówek");
        assert_eq!(station.data.len(), 2);
        assert_eq!(station.data[0].index.name.as_deref(), Some("Umiarkowany"));
        // Per-measurement indexes have no recommendation text.
        assert_eq!(station.data[0].index.recommendations, None);
    }

    #[test]
    fn measurement_time_is_null_tolerant() {
        let station = AirQuality::from_raw(&station_raw()).unwrap();
        assert!(station.data[0].time.is_some());
        assert_eq!(station.data[1].time, None);
    }

    #[test]
    fn missing_address_key_fails_with_dataset_name() {
        let mut raw = station_raw();
        raw["address"].as_object_mut().unwrap().remove("commune");
        let err = AirQuality::from_raw(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dataset air_quality: missing field \"commune\""
        );
    }

    #[test]
    fn station_flattens_with_indexed_measurements() {
        let station = AirQuality::from_raw(&station_raw()).unwrap();
        let flat = station.to_flat_mapping().unwrap();
        assert_eq!(flat["address_city"], "Warszawa");
        assert_eq!(flat["data_param_code_0"], "PM10");
        assert_eq!(flat["data_param_code_1"], "NO2");
    }
}
