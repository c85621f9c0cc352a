//! Public transport, cycling and parking records.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::Value;

use crate::convert::{to_datetime, to_datetime_12h, to_time};
use crate::error::Result;
use crate::records::{raw, Record};

/// Live position of a bus or tram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleLocation {
    pub lat: f64,
    pub lon: f64,
    /// GPS signal transmission time.
    pub time: Option<NaiveDateTime>,
    pub lines: String,
    pub brigade: String,
    pub vehicle_number: String,
}

impl VehicleLocation {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "vehicle_locations";
        Ok(Self {
            lat: raw::f64_field(raw, DS, "Lat")?,
            lon: raw::f64_field(raw, DS, "Lon")?,
            time: to_datetime(raw::nullable_str_field(raw, DS, "Time")?.as_deref())?,
            lines: raw::str_field(raw, DS, "Lines")?,
            brigade: raw::str_field(raw, DS, "Brigade")?,
            vehicle_number: raw::str_field(raw, DS, "VehicleNumber")?,
        })
    }
}

/// A stop set (group of stop bars sharing one name).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopSet {
    pub stop_name: String,
    pub set_number: String,
}

/// One line serving a stop bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopLine {
    pub line_number: String,
}

/// One departure of a line from a stop bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTimetable {
    pub brigade: String,
    pub direction: String,
    pub route: String,
    pub time: Option<NaiveTime>,
    pub symbol_1: Option<String>,
    pub symbol_2: Option<String>,
}

impl LineTimetable {
    /// Maps the flattened key/value form of a timetable row.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "line_timetable";
        Ok(Self {
            brigade: raw::str_field(raw, DS, "brygada")?,
            direction: raw::str_field(raw, DS, "kierunek")?,
            route: raw::str_field(raw, DS, "trasa")?,
            time: to_time(raw::nullable_str_field(raw, DS, "czas")?.as_deref())?,
            symbol_1: raw::nullable_str_field(raw, DS, "symbol_1")?,
            symbol_2: raw::nullable_str_field(raw, DS, "symbol_2")?,
        })
    }
}

/// A cycle track segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleTrack {
    pub location: String,
    pub route_type: String,
    pub district: String,
    pub object_id: String,
    pub surface_type: String,
}

impl CycleTrack {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "cycle_tracks";
        Ok(Self {
            location: raw::str_field(raw, DS, "LOKALIZ")?,
            route_type: raw::str_field(raw, DS, "TYP_TRASY")?,
            district: raw::str_field(raw, DS, "DZIELNICA")?,
            object_id: raw::str_field(raw, DS, "OBJECTID")?,
            surface_type: raw::str_field(raw, DS, "TYP_NAW")?,
        })
    }
}

/// A public bike-share station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleStation {
    pub racks: i64,
    pub update_date: Option<NaiveDateTime>,
    pub object_id: String,
    pub location: String,
    pub bikes: i64,
    pub station_number: String,
}

impl CycleStation {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "cycle_stations";
        Ok(Self {
            racks: raw::int_field(raw, DS, "STOJAKI")?,
            update_date: to_datetime_12h(
                raw::nullable_str_field(raw, DS, "AKTU_DAN")?.as_deref(),
            )?,
            object_id: raw::str_field(raw, DS, "OBJECTID")?,
            location: raw::str_field(raw, DS, "LOKALIZACJA")?,
            bikes: raw::int_field(raw, DS, "ROWERY")?,
            station_number: raw::str_field(raw, DS, "NR_STACJI")?,
        })
    }
}

/// A car parking lot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingLot {
    pub disabled_parking_places: i64,
    pub motorcycle_places: i64,
    pub car_places: i64,
    pub description: String,
    pub object_id: String,
    pub name: String,
    pub update_date: String,
}

impl ParkingLot {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "parking_lots";
        Ok(Self {
            disabled_parking_places: raw::int_field(raw, DS, "NIEPELNO")?,
            motorcycle_places: raw::int_field(raw, DS, "MOTORY")?,
            car_places: raw::int_field(raw, DS, "AUTA")?,
            description: raw::str_field(raw, DS, "OPIS")?,
            object_id: raw::str_field(raw, DS, "OBJECTID")?,
            name: raw::str_field(raw, DS, "NAZWA")?,
            update_date: raw::str_field(raw, DS, "AKTU_DAN")?,
        })
    }
}

/// A subway station entrance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubwayEntrance {
    pub object_id: String,
}

impl SubwayEntrance {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        Ok(Self {
            object_id: raw::str_field(raw, "subway_entrances", "OBJECTID")?,
        })
    }
}

/// Static stop information from the timetable database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopInfo {
    pub set_number: String,
    pub bar: String,
    pub set_name: String,
    pub street_id: String,
    pub lat: f64,
    pub lon: f64,
    pub direction: String,
    pub valid_from: Option<NaiveDateTime>,
}

impl StopInfo {
    /// Maps the flattened key/value form of a stop row.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "stop_info";
        Ok(Self {
            set_number: raw::str_field(raw, DS, "zespol")?,
            bar: raw::str_field(raw, DS, "slupek")?,
            set_name: raw::str_field(raw, DS, "nazwa_zespolu")?,
            street_id: raw::str_field(raw, DS, "id_ulicy")?,
            lat: raw::f64_field(raw, DS, "szer_geo")?,
            lon: raw::f64_field(raw, DS, "dlug_geo")?,
            direction: raw::str_field(raw, DS, "kierunek")?,
            valid_from: to_datetime(
                raw::nullable_str_field(raw, DS, "obowiazuje_od")?.as_deref(),
            )?,
        })
    }
}

impl Record for VehicleLocation {}
impl Record for StopSet {}
impl Record for StopLine {}
impl Record for LineTimetable {}
impl Record for CycleTrack {}
impl Record for CycleStation {}
impl Record for ParkingLot {}
impl Record for SubwayEntrance {}
impl Record for StopInfo {}
