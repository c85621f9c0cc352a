//! Typed records for every dataset, grouped by domain.
//!
//! # Design
//! Each dataset maps into one immutable struct with stable English field
//! names; the upstream's native key names (often Polish, often non-ASCII)
//! appear only inside the `from_raw` constructors. Mapping is total over
//! the documented schema — a missing key is `Error::MissingField` naming
//! the dataset and key, extra keys are ignored, and nested objects map
//! through their own `from_raw` first. No runtime reflection anywhere:
//! the field set of every record is fixed at compile time.

pub mod air;
pub mod culture;
pub mod ecology;
pub mod education;
mod raw;
pub mod roadworks;
pub mod safety;
pub mod transit;

pub use air::{AirIndex, AirMeasurement, AirQuality, AirStationAddress};
pub use culture::Theater;
pub use ecology::{Forest, MunicipalWaste, Shrub, ShrubsGroup, Tree, TreesGroup};
pub use education::{ComputerPurpose, InternetAccess};
pub use roadworks::{
    RoadWorksCategory, RoadWorksCompany, RoadWorksDistrict, RoadWorksInvestment,
};
pub use safety::{Defibrillator, DefibrillatorGeometry, DefibrillatorProperties};
pub use transit::{
    CycleStation, CycleTrack, LineTimetable, ParkingLot, StopInfo, StopLine, StopSet,
    SubwayEntrance, VehicleLocation,
};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::convert::flatten;
use crate::error::{Error, Result};

/// Shared serialization surface of every dataset record.
///
/// Dates and times render as ISO-8601 text through chrono's serde impls.
pub trait Record: Serialize {
    /// The record as a JSON object keyed by its stable field names.
    fn to_mapping(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// The record as a single-level JSON object; nested record keys are
    /// joined with `_`, list items get their index appended.
    fn to_flat_mapping(&self) -> Result<Map<String, Value>> {
        match self.to_mapping()? {
            Value::Object(map) => Ok(flatten(&map, "_")),
            other => Err(Error::Serialization(format!(
                "record serialized to a non-object value: {other}"
            ))),
        }
    }

    /// The record as a JSON string.
    fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
