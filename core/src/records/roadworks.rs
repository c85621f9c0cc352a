//! Road construction works records.
//!
//! This API family is an XML-to-JSON bridge on the upstream side, which
//! shows in the payloads: PascalCase keys, `Items`/`ComboItem` wrappers,
//! and single results delivered as a bare object instead of a one-element
//! list.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::convert::to_datetime_t;
use crate::error::Result;
use crate::records::{raw, Record};

/// A company performing road construction works.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadWorksCompany {
    pub name: String,
    pub code: String,
}

impl RoadWorksCompany {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "road_works_companies";
        Ok(Self {
            name: raw::str_field(raw, DS, "Value")?,
            code: raw::str_field(raw, DS, "Code")?,
        })
    }
}

/// A node of the road-works category tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadWorksCategory {
    pub identifier: String,
    /// `None` for root nodes; the upstream marks those with an empty
    /// object rather than null.
    pub parent_id: Option<String>,
    pub name: String,
    pub special_mode_code: Option<String>,
}

impl RoadWorksCategory {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "road_works_categories";
        let parent = raw::field(raw, DS, "ParentID")?;
        Ok(Self {
            identifier: raw::str_field(raw, DS, "ID")?,
            parent_id: parent.as_str().map(str::to_string),
            name: raw::str_field(raw, DS, "Name")?,
            special_mode_code: raw::opt_str_field(raw, DS, "SpecialModeCode")?,
        })
    }
}

/// A district with active road construction works.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadWorksDistrict {
    pub name: String,
    pub code: String,
}

impl RoadWorksDistrict {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "road_works_districts";
        Ok(Self {
            name: raw::str_field(raw, DS, "Value")?,
            code: raw::str_field(raw, DS, "Code")?,
        })
    }
}

/// An open road-works investment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadWorksInvestment {
    pub identifier: String,
    pub name: String,
    pub street: String,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub last_modify_date: Option<NaiveDateTime>,
}

impl RoadWorksInvestment {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "road_works_investments";
        Ok(Self {
            identifier: raw::str_field(raw, DS, "ID")?,
            name: raw::str_field(raw, DS, "Name")?,
            street: raw::str_field(raw, DS, "Street")?,
            start_date: to_datetime_t(raw::nullable_str_field(raw, DS, "StartDate")?.as_deref())?,
            end_date: to_datetime_t(raw::nullable_str_field(raw, DS, "EndDate")?.as_deref())?,
            last_modify_date: to_datetime_t(
                raw::nullable_str_field(raw, DS, "LastModifyDate")?.as_deref(),
            )?,
        })
    }
}

impl Record for RoadWorksCompany {}
impl Record for RoadWorksCategory {}
impl Record for RoadWorksDistrict {}
impl Record for RoadWorksInvestment {}
