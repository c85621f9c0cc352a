//! Culture records.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::records::{raw, Record};

/// A theater registered in the city's culture layer.
///
/// `website`, `administrative_unit` and `mail` are absent for many venues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theater {
    pub phone_number_or_fax: String,
    pub administrative_unit: Option<String>,
    pub update_date: String,
    pub object_id: String,
    pub number: String,
    pub postcode: String,
    pub description: String,
    pub street: String,
    pub district: String,
    pub website: Option<String>,
    pub mail: Option<String>,
}

impl Theater {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "theaters";
        Ok(Self {
            phone_number_or_fax: raw::str_field(raw, DS, "TEL_FAX")?,
            administrative_unit: raw::opt_str_field(raw, DS, "JEDN_ADM")?,
            update_date: raw::str_field(raw, DS, "AKTU_DAN")?,
            object_id: raw::str_field(raw, DS, "OBJECTID")?,
            number: raw::str_field(raw, DS, "NUMER")?,
            postcode: raw::str_field(raw, DS, "KOD")?,
            description: raw::str_field(raw, DS, "OPIS")?,
            street: raw::str_field(raw, DS, "ULICA")?,
            district: raw::str_field(raw, DS, "DZIELNICA")?,
            website: raw::opt_str_field(raw, DS, "WWW")?,
            mail: raw::opt_str_field(raw, DS, "MAIL")?,
        })
    }
}

impl Record for Theater {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn theater_tolerates_absent_optional_keys() {
        let raw = json!({
            "TEL_FAX": "22 831 01 83", "AKTU_DAN": "2022-11-14", "OBJECTID": "12",
            "NUMER": "20", "KOD": "00-214", "OPIS": "Teatr Stara Prochownia",
            "ULICA": "BONIFRATERSKA", "DZIELNICA": "ŚRÓDMIEŚCIE"
        });
        let theater = Theater::from_raw(&raw).unwrap();
        assert_eq!(theater.website, None);
        assert_eq!(theater.administrative_unit, None);
        assert_eq!(theater.district, "ŚRÓDMIEŚCIE");
    }

    #[test]
    fn theater_keeps_optional_keys_when_present() {
        let raw = json!({
            "TEL_FAX": "22 620 21 02", "JEDN_ADM": "Miasto", "AKTU_DAN": "2022-11-14",
            "OBJECTID": "3", "NUMER": "3", "KOD": "00-841", "OPIS": "Teatr na Woli",
            "ULICA": "KASPRZAKA", "DZIELNICA": "WOLA",
            "WWW": "www.teatrnawoli.pl", "MAIL": "biuro@teatrnawoli.pl"
        });
        let theater = Theater::from_raw(&raw).unwrap();
        assert_eq!(theater.website.as_deref(), Some("www.teatrnawoli.pl"));
        assert_eq!(theater.mail.as_deref(), Some("biuro@teatrnawoli.pl"));
    }
}
