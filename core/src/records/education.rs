//! School equipment records.
//!
//! These datasets are CSV exports with natural-language Polish column
//! headers (including inconsistent spacing and capitalization — kept
//! verbatim, they are the wire format). Link-speed and computer-count
//! columns hold an integer, a numeric string, a blank cell, or null.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::records::{raw, Record};

/// Internet access available at one school or educational institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternetAccess {
    pub school_number: String,
    pub school_type: String,
    pub school_name: String,
    pub telephone_link_up_to_1: Option<i64>,
    pub telephone_link_up_to_2: Option<i64>,
    pub telephone_link_up_to_10: Option<i64>,
    pub telephone_link_above_10: Option<i64>,
    pub tv_link_up_to_1: Option<i64>,
    pub tv_link_up_to_2: Option<i64>,
    pub tv_link_up_to_10: Option<i64>,
    pub tv_link_above_10: Option<i64>,
    pub fiber_optics_up_to_1: Option<i64>,
    pub fiber_optics_up_to_2: Option<i64>,
    pub fiber_optics_up_to_10: Option<i64>,
    pub fiber_optics_above_10: Option<i64>,
    pub sat_link_up_to_1: Option<i64>,
    pub sat_link_up_to_2: Option<i64>,
    pub sat_link_up_to_10: Option<i64>,
    pub sat_link_above_10: Option<i64>,
    pub radio_link_up_to_1: Option<i64>,
    pub radio_link_up_to_2: Option<i64>,
    pub radio_link_up_to_10: Option<i64>,
    pub radio_link_above_10: Option<i64>,
    pub mobile_phone_link_up_to_1: Option<i64>,
    pub mobile_phone_link_up_to_2: Option<i64>,
    pub mobile_phone_link_up_to_10: Option<i64>,
    pub mobile_phone_link_above_10: Option<i64>,
    pub province: String,
    pub county: String,
    pub municipality: String,
    pub location: String,
    pub street: String,
    pub house_number: String,
    pub apartment_number: String,
    pub postal_code: String,
    pub post_office: String,
    pub phone: String,
    pub email: String,
    pub governing_body_type: String,
    pub audience: String,
    pub student_category: String,
    pub school_specificity: String,
    pub institution_type: String,
}

impl InternetAccess {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "internet_access";
        let flag = |key: &str| raw::opt_int_field(raw, DS, key);
        Ok(Self {
            school_number: raw::str_field(raw, DS, "Nr RSPO")?,
            school_type: raw::str_field(raw, DS, "Typ szkoły/placówki")?,
            school_name: raw::str_field(raw, DS, "Nazwa szkoły/placówki")?,
            telephone_link_up_to_1: flag("Łącze telefoniczne - do 1 Mbit")?,
            telephone_link_up_to_2: flag("Łącze telefoniczne - do 2 Mbit")?,
            telephone_link_up_to_10: flag("Łącze telefoniczne - do 10 Mbit")?,
            telephone_link_above_10: flag("Łącze telefoniczne - powyżej 10 Mbit")?,
            tv_link_up_to_1: flag("łącze TV - do 1 Mbit")?,
            tv_link_up_to_2: flag("łącze TV - do 2 Mbit")?,
            tv_link_up_to_10: flag("łącze TV - do 10 Mbit")?,
            tv_link_above_10: flag("łącze TV - powyżej 10 Mbit")?,
            fiber_optics_up_to_1: flag("Światłowód - do 1 Mbit")?,
            fiber_optics_up_to_2: flag("Światłowód - do 2 Mbit")?,
            fiber_optics_up_to_10: flag("Światłowód - do 10 Mbit")?,
            fiber_optics_above_10: flag("Światłowód - powyżej 10 Mbit")?,
            sat_link_up_to_1: flag("Łącze SAT -do 1 Mbit")?,
            sat_link_up_to_2: flag("Łącze SAT - do 2 Mbit")?,
            sat_link_up_to_10: flag("Łącze SAT - do 10 Mbit")?,
            sat_link_above_10: flag("Łącze SAT - powyżej 10 Mbit")?,
            radio_link_up_to_1: flag("Łącze radio - do 1 Mbit")?,
            radio_link_up_to_2: flag("Łącze radio - do 2 Mbit")?,
            radio_link_up_to_10: flag("Łącze radio - do 10 Mbit")?,
            radio_link_above_10: flag("Łącze radio - powyżej 10 Mbit")?,
            mobile_phone_link_up_to_1: flag("Łącze tel kom - do 1 Mbit")?,
            mobile_phone_link_up_to_2: flag("Łącze tel kom - do 2 Mbit")?,
            mobile_phone_link_up_to_10: flag("Łącze tel kom - do 10 Mbit")?,
            mobile_phone_link_above_10: flag("Łącze tel kom - powyżej 10 Mbit")?,
            province: raw::str_field(raw, DS, "Województwo")?,
            county: raw::str_field(raw, DS, "Powiat")?,
            municipality: raw::str_field(raw, DS, "Gmina")?,
            location: raw::str_field(raw, DS, "Miejscowość")?,
            street: raw::str_field(raw, DS, "Ulica")?,
            house_number: raw::str_field(raw, DS, "Nr domu")?,
            apartment_number: raw::str_field(raw, DS, "Nr mieszkania")?,
            postal_code: raw::str_field(raw, DS, "Kod pocztowy")?,
            post_office: raw::str_field(raw, DS, "Poczta")?,
            phone: raw::str_field(raw, DS, "Telefon")?,
            email: raw::str_field(raw, DS, "E-mail")?,
            governing_body_type: raw::str_field(raw, DS, "Typ organu prowadzącego")?,
            audience: raw::str_field(raw, DS, "Publiczność")?,
            student_category: raw::str_field(raw, DS, "Kategoria uczniów")?,
            school_specificity: raw::str_field(raw, DS, "Specyfika szkoły")?,
            institution_type: raw::str_field(raw, DS, "Rodzaj placówki")?,
        })
    }
}

/// How computers are used at one school or educational institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputerPurpose {
    pub school_number: String,
    pub school_type: String,
    pub school_name: String,
    pub total_teaching: Option<i64>,
    pub teaching_with_internet_access: Option<i64>,
    pub portable_teaching: Option<i64>,
    pub total_teaching_in_library: Option<i64>,
    pub total_with_internet_access_in_library: Option<i64>,
    pub teaching_portable_in_library: Option<i64>,
    pub total_teaching_available_for_students: Option<i64>,
    pub total_with_internet_access_available_for_students: Option<i64>,
    pub teaching_portable_available_for_students: Option<i64>,
    pub other_total: Option<i64>,
    pub other_with_internet_access: Option<i64>,
    pub other_portable: Option<i64>,
    pub province: String,
    pub county: String,
    pub municipality: String,
    pub location: String,
    pub street: String,
    pub house_number: String,
    pub apartment_number: String,
    pub postal_code: String,
    pub post_office: String,
    pub phone: String,
    pub email: String,
    pub governing_body_type: String,
    pub audience: String,
    pub student_category: String,
    pub school_specificity: String,
    pub institution_type: String,
}

impl ComputerPurpose {
    pub fn from_raw(raw: &Value) -> Result<Self> {
        const DS: &str = "computer_purposes";
        let count = |key: &str| raw::opt_int_field(raw, DS, key);
        Ok(Self {
            school_number: raw::str_field(raw, DS, "Nr RSPO")?,
            school_type: raw::str_field(raw, DS, "Typ szkoły/placówki")?,
            school_name: raw::str_field(raw, DS, "Nazwa szkoły/placówki")?,
            total_teaching: count("dydaktyka ogółem")?,
            teaching_with_internet_access: count("dydaktyka z dostępem do internetu")?,
            portable_teaching: count("dydaktyka  przenośne")?,
            total_teaching_in_library: count("z tego w bibliotece - ogółem")?,
            total_with_internet_access_in_library: count(
                "z tego w bibliotece - z dostępem do internetu",
            )?,
            teaching_portable_in_library: count("z tego w bibliotece - przenośne")?,
            total_teaching_available_for_students: count(
                "z tego dostępne dla uczniów - ogółem",
            )?,
            total_with_internet_access_available_for_students: count(
                "z tego dostępne dla uczniów - z dostępem do internetu",
            )?,
            teaching_portable_available_for_students: count(
                "z tego dostępne dla uczniów - przenośne",
            )?,
            other_total: count("pozostałe - ogółem")?,
            other_with_internet_access: count("pozostałe - z dostępem do internetu")?,
            other_portable: count("pozostałe - przenośne")?,
            province: raw::str_field(raw, DS, "Województwo")?,
            county: raw::str_field(raw, DS, "Powiat")?,
            municipality: raw::str_field(raw, DS, "Gmina")?,
            location: raw::str_field(raw, DS, "Miejscowość")?,
            street: raw::str_field(raw, DS, "Ulica")?,
            house_number: raw::str_field(raw, DS, "Nr domu")?,
            apartment_number: raw::str_field(raw, DS, "Nr mieszkania")?,
            postal_code: raw::str_field(raw, DS, "Kod pocztowy")?,
            post_office: raw::str_field(raw, DS, "Poczta")?,
            phone: raw::str_field(raw, DS, "Telefon")?,
            email: raw::str_field(raw, DS, "E-mail")?,
            governing_body_type: raw::str_field(raw, DS, "Typ organu prowadzącego")?,
            audience: raw::str_field(raw, DS, "Publiczność")?,
            student_category: raw::str_field(raw, DS, "Kategoria uczniów")?,
            school_specificity: raw::str_field(raw, DS, "Specyfika szkoły")?,
            institution_type: raw::str_field(raw, DS, "Rodzaj placówki")?,
        })
    }
}

impl Record for InternetAccess {}
impl Record for ComputerPurpose {}
