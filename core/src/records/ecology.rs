//! Greenery and municipal-waste records.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::convert::{to_date, CommaDecimal};
use crate::error::Result;
use crate::records::{raw, Record};

/// An individually inventoried shrub.
///
/// Coordinates come in both WGS84 (EPSG:4326) and PUWG2000 (EPSG:2178);
/// `age` is the plant age in days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shrub {
    pub x_wgs84: f64,
    pub y_wgs84: f64,
    pub x_pl2000: f64,
    pub y_pl2000: f64,
    pub inventory_number: String,
    pub district: String,
    pub administrative_unit: String,
    pub city: String,
    pub address: String,
    pub location: String,
    pub species_polish: String,
    pub species_latin: String,
    pub measurement_date: Option<NaiveDate>,
    pub age: i64,
    pub health: String,
}

impl Shrub {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "shrubs";
        Ok(Self {
            x_wgs84: raw::f64_field(raw, DS, "x_wgs84")?,
            y_wgs84: raw::f64_field(raw, DS, "y_wgs84")?,
            x_pl2000: raw::f64_field(raw, DS, "x")?,
            y_pl2000: raw::f64_field(raw, DS, "y")?,
            inventory_number: raw::str_field(raw, DS, "numer_inw")?,
            district: raw::str_field(raw, DS, "dzielnica")?,
            administrative_unit: raw::str_field(raw, DS, "jednostka")?,
            city: raw::str_field(raw, DS, "miasto")?,
            address: raw::str_field(raw, DS, "adres")?,
            location: raw::str_field(raw, DS, "lokalizacja")?,
            species_polish: raw::str_field(raw, DS, "gatunek")?,
            species_latin: raw::str_field(raw, DS, "gatunek1")?,
            measurement_date: to_date(raw::opt_int_field(raw, DS, "data_wyk_pom")?)?,
            age: raw::int_field(raw, DS, "wiek_w_dni")?,
            health: raw::str_field(raw, DS, "stan_zdrowia")?,
        })
    }
}

/// A mapped group of shrubs sharing one outline polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShrubsGroup {
    pub x_wgs84: f64,
    pub y_wgs84: f64,
    pub x_pl2000: f64,
    pub y_pl2000: f64,
    pub outline_id: i64,
    pub outline_partid: i64,
    pub inventory_number: String,
    pub district: String,
    pub administrative_unit: String,
    pub city: String,
    pub address: String,
    pub location: String,
    pub species: String,
    pub measurement_date: Option<NaiveDate>,
    pub age: i64,
    /// Occupied area in square meters; textual when the source cell is not
    /// a measurement.
    pub area: CommaDecimal,
    pub height: CommaDecimal,
    pub health: String,
}

impl ShrubsGroup {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "shrubs_groups";
        Ok(Self {
            x_wgs84: raw::f64_field(raw, DS, "x_wgs84")?,
            y_wgs84: raw::f64_field(raw, DS, "y_wgs84")?,
            x_pl2000: raw::f64_field(raw, DS, "x_pl2000")?,
            y_pl2000: raw::f64_field(raw, DS, "y_pl2000")?,
            outline_id: raw::int_field(raw, DS, "id_obrysu")?,
            outline_partid: raw::int_field(raw, DS, "partid_obrysu")?,
            inventory_number: raw::str_field(raw, DS, "numer_inw")?,
            district: raw::str_field(raw, DS, "dzielnica")?,
            administrative_unit: raw::str_field(raw, DS, "jednostka")?,
            city: raw::str_field(raw, DS, "miasto")?,
            address: raw::str_field(raw, DS, "adres")?,
            location: raw::str_field(raw, DS, "lokalizacja")?,
            species: raw::str_field(raw, DS, "gatunki")?,
            measurement_date: to_date(raw::opt_int_field(raw, DS, "data_wyk_pom")?)?,
            age: raw::int_field(raw, DS, "wiek_w_dni")?,
            area: raw::comma_field(raw, DS, "powierzchnia")?,
            height: raw::comma_field(raw, DS, "wysokosc")?,
            health: raw::str_field(raw, DS, "stan_zdrowia")?,
        })
    }
}

/// An individually inventoried tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree {
    pub x_wgs84: f64,
    pub y_wgs84: f64,
    pub x_pl2000: f64,
    pub y_pl2000: f64,
    pub inventory_number: String,
    pub district: String,
    pub administrative_unit: String,
    pub city: String,
    pub address: String,
    pub house_number: String,
    pub location: String,
    pub species_polish: String,
    pub species_latin: String,
    pub measurement_date: Option<NaiveDate>,
    pub age: i64,
    pub height: CommaDecimal,
    pub trunk_circumference: CommaDecimal,
    pub crown_diameter: CommaDecimal,
    pub health: String,
}

impl Tree {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "trees";
        Ok(Self {
            x_wgs84: raw::f64_field(raw, DS, "x_wgs84")?,
            y_wgs84: raw::f64_field(raw, DS, "y_wgs84")?,
            x_pl2000: raw::f64_field(raw, DS, "x_pl2000")?,
            y_pl2000: raw::f64_field(raw, DS, "y_pl2000")?,
            inventory_number: raw::str_field(raw, DS, "numer_inw")?,
            district: raw::str_field(raw, DS, "dzielnica")?,
            administrative_unit: raw::str_field(raw, DS, "jednostka")?,
            city: raw::str_field(raw, DS, "miasto")?,
            address: raw::str_field(raw, DS, "adres")?,
            house_number: raw::str_field(raw, DS, "numer_adres")?,
            location: raw::str_field(raw, DS, "lokalizacja")?,
            species_polish: raw::str_field(raw, DS, "gatunek")?,
            species_latin: raw::str_field(raw, DS, "gatunek_1")?,
            measurement_date: to_date(raw::opt_int_field(raw, DS, "data_wyk_pom")?)?,
            age: raw::int_field(raw, DS, "wiek_w_dni")?,
            height: raw::comma_field(raw, DS, "wysokosc")?,
            trunk_circumference: raw::comma_field(raw, DS, "pnie_obwod")?,
            crown_diameter: raw::comma_field(raw, DS, "srednica_k")?,
            health: raw::str_field(raw, DS, "stan_zdrowia")?,
        })
    }
}

/// A mapped group of trees sharing one outline polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreesGroup {
    pub x_wgs84: f64,
    pub y_wgs84: f64,
    pub x_pl2000: f64,
    pub y_pl2000: f64,
    pub inventory_number: String,
    pub outline_id: i64,
    pub outline_partid: i64,
    pub district: String,
    pub administrative_unit: String,
    pub city: String,
    pub address: String,
    pub location: String,
    pub species: String,
    pub measurement_date: Option<NaiveDate>,
    pub health: String,
}

impl TreesGroup {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "trees_groups";
        Ok(Self {
            x_wgs84: raw::f64_field(raw, DS, "x_wgs84")?,
            y_wgs84: raw::f64_field(raw, DS, "y_wgs84")?,
            x_pl2000: raw::f64_field(raw, DS, "x_pl2000")?,
            y_pl2000: raw::f64_field(raw, DS, "y_pl2000")?,
            inventory_number: raw::str_field(raw, DS, "numer_inw")?,
            outline_id: raw::int_field(raw, DS, "id_obrysu")?,
            outline_partid: raw::int_field(raw, DS, "partid_obrysu")?,
            district: raw::str_field(raw, DS, "dzielnica")?,
            administrative_unit: raw::str_field(raw, DS, "jednostka")?,
            city: raw::str_field(raw, DS, "miasto")?,
            address: raw::str_field(raw, DS, "adres")?,
            location: raw::str_field(raw, DS, "lokalizacja")?,
            species: raw::str_field(raw, DS, "gatunki")?,
            measurement_date: to_date(raw::opt_int_field(raw, DS, "data_wyk_pom")?)?,
            health: raw::str_field(raw, DS, "stan_zdrowia")?,
        })
    }
}

/// One division of a city forest inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forest {
    pub x_wgs84: f64,
    pub y_wgs84: f64,
    pub x_pl2000: f64,
    pub y_pl2000: f64,
    pub identifier: i64,
    pub partid: i64,
    pub district: String,
    pub forest_district: String,
    pub estate: String,
    pub unit_number: String,
    pub sub_unit_number: String,
    pub area: CommaDecimal,
    pub habitat_type: String,
    pub ecosystem_layer: String,
    pub dominant_species: String,
    pub surface_share: CommaDecimal,
    pub age: i64,
    pub bonitation: String,
    pub woodlot: CommaDecimal,
    pub density: String,
    pub mixing: String,
    pub sapling: String,
    pub underbrush: String,
    pub plan_type: String,
    pub plan: String,
    pub plan_duration: String,
    pub shape_area: f64,
    pub shape_len: f64,
}

impl Forest {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "forests";
        Ok(Self {
            x_wgs84: raw::f64_field(raw, DS, "x_wgs84")?,
            y_wgs84: raw::f64_field(raw, DS, "y_wgs84")?,
            x_pl2000: raw::f64_field(raw, DS, "x_pl2000")?,
            y_pl2000: raw::f64_field(raw, DS, "y_pl2000")?,
            identifier: raw::int_field(raw, DS, "id")?,
            partid: raw::int_field(raw, DS, "partid")?,
            district: raw::str_field(raw, DS, "dzielnica")?,
            forest_district: raw::str_field(raw, DS, "obwód")?,
            estate: raw::str_field(raw, DS, "osiedle")?,
            unit_number: raw::str_field(raw, DS, "nr_oddz")?,
            sub_unit_number: raw::str_field(raw, DS, "poddz")?,
            area: raw::comma_field(raw, DS, "powierzchnia")?,
            habitat_type: raw::str_field(raw, DS, "stl")?,
            ecosystem_layer: raw::str_field(raw, DS, "powierzchnia1")?,
            dominant_species: raw::str_field(raw, DS, "gat_panujacy")?,
            surface_share: raw::comma_field(raw, DS, "udział")?,
            age: raw::int_field(raw, DS, "wiek")?,
            bonitation: raw::str_field(raw, DS, "bonitacja")?,
            woodlot: raw::comma_field(raw, DS, "zadrzewienie")?,
            density: raw::str_field(raw, DS, "zwarcie")?,
            mixing: raw::str_field(raw, DS, "zmieszanie")?,
            sapling: raw::str_field(raw, DS, "podrost")?,
            underbrush: raw::str_field(raw, DS, "podszyt")?,
            plan_type: raw::str_field(raw, DS, "typ_planu")?,
            plan: raw::str_field(raw, DS, "planu")?,
            plan_duration: raw::str_field(raw, DS, "obowiazywanie")?,
            shape_area: raw::f64_field(raw, DS, "shape_area")?,
            shape_len: raw::f64_field(raw, DS, "shape_len")?,
        })
    }
}

/// One entry of the municipal waste segregation dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalWaste {
    pub identifier: i64,
    pub name: String,
    pub synonym: String,
    pub waste_type: String,
    pub description: String,
    /// An example of a thing that belongs in this category.
    pub yes: String,
    /// An example of a thing that does not.
    pub no: String,
}

impl MunicipalWaste {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "municipal_waste";
        Ok(Self {
            identifier: raw::int_field(raw, DS, "Identyfikator")?,
            name: raw::str_field(raw, DS, "Nazwa")?,
            synonym: raw::str_field(raw, DS, "Synonim")?,
            waste_type: raw::str_field(raw, DS, "Typ")?,
            description: raw::str_field(raw, DS, "Opis")?,
            yes: raw::str_field(raw, DS, "Tak")?,
            no: raw::str_field(raw, DS, "Nie")?,
        })
    }
}

impl Record for Shrub {}
impl Record for ShrubsGroup {}
impl Record for Tree {}
impl Record for TreesGroup {}
impl Record for Forest {}
impl Record for MunicipalWaste {}
