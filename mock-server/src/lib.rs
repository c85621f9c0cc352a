//! In-process stand-in for `api.um.warszawa.pl` used by the client's
//! integration tests.
//!
//! Serves one fixture payload per dataset under `/api/action/{endpoint}`
//! and reproduces the upstream's error convention: failures arrive as
//! HTTP 200 with a Polish sentinel string in the JSON envelope. The
//! municipal-waste fixture embeds a per-process request counter so tests
//! can tell a cached replay from a fresh fetch.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// The API key the fixtures accept.
pub const API_KEY: &str = "test-apikey";
/// An API key that is well-formed but no longer authorized.
pub const REVOKED_API_KEY: &str = "revoked";

// Dataset identifiers, mirroring the production catalogue.
pub const SHRUBS_ID: &str = "0b1af81f-247d-4266-9823-693858ad5b5d";
pub const SHRUBS_GROUPS_ID: &str = "4b792a76-5349-4aad-aa16-dadaf0a74be3";
pub const FORESTS_ID: &str = "75bedfd5-6c83-426b-9ae5-f03651857a48";
pub const TREES_ID: &str = "ed6217dd-c8d0-4f7b-8bed-3b7eb81a95ba";
pub const TREES_GROUPS_ID: &str = "913856f7-f71b-4638-abe2-12df14334e1a";
pub const MUNICIPAL_WASTE_ID: &str = "64b9d66c-d134-4a87-9f24-258676e9e498";
pub const VEHICLE_LOCATIONS_ID: &str = "f2e5503e-927d-4ad3-9500-4ab9e55deb59";
pub const STOP_SET_ID: &str = "b27f4c17-5c50-4a5b-89dd-236b282bc499";
pub const STOP_LINES_ID: &str = "88cd555f-6f31-43ca-9de4-66c479ad5942";
pub const LINE_TIMETABLE_ID: &str = "e923fa0e-d96c-43f9-ae6e-60518c9f3238";
pub const CYCLE_TRACKS_ID: &str = "8a235d27-b96a-4876-9b92-9e164940c9b6";
pub const CYCLE_STATIONS_ID: &str = "a08136ec-1037-4029-9aa5-b0d0ee0b9d88";
pub const PARKING_LOTS_ID: &str = "157648fd-a603-4861-af96-884a8e35b155";
pub const SUBWAY_ENTRANCES_ID: &str = "0ac7f6d1-a26b-430f-9e3d-a41c5356b9a3";
pub const STOP_INFO_ID: &str = "ab75c33d-3a26-4342-b36a-6e5fef0a3ac3";
pub const STOP_INFO_TODAY_ID: &str = "1c08a38c-ae09-46d2-8926-4f9d25cb0630";
pub const THEATERS_ID: &str = "e26218cb-61ec-4ccb-81cc-fd19a6fee0f8";
pub const INTERNET_ACCESS_ID: &str = "0a131e16-ec7f-4502-9b62-8f8af58d8cfd";
pub const COMPUTER_PURPOSES_ID: &str = "e22be977-f15d-42e6-843a-55fd0a0d756e";
pub const RW_COMPANIES_ID: &str = "2aa01577-9f24-4b8e-83f5-d3d15f6d094b";
pub const RW_CATEGORIES_ID: &str = "e1c8fb95-9979-418d-bf5b-6bdfd586555b";
pub const RW_DISTRICTS_ID: &str = "f3469922-27e3-4d2f-811d-8efa2e448606";
pub const RW_INVESTMENTS_ID: &str = "26b9ade1-f5d4-439e-84b4-9af37ab7ebf1";

/// Counts municipal-waste fetches so tests can observe cache hits.
pub type Hits = Arc<AtomicI64>;

pub fn app() -> Router {
    let hits: Hits = Arc::new(AtomicI64::new(0));
    Router::new()
        .route("/api/action/{endpoint}", get(dispatch))
        .with_state(hits)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn dispatch(
    State(hits): State<Hits>,
    Path(endpoint): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(respond(&endpoint, &params, &hits))
}

fn respond(endpoint: &str, params: &HashMap<String, String>, hits: &AtomicI64) -> Value {
    // datastore_search is the only key-less family upstream.
    if endpoint != "datastore_search" {
        if let Some(rejection) = check_api_key(params) {
            return rejection;
        }
    }
    match endpoint {
        "datastore_search" => datastore_search(params, hits),
        "air_sensors_get" => json!({"result": [air_station()]}),
        "aed_get" => json!({"result": [defibrillator(params.contains_key("defibrillator_id"))]}),
        "busestrams_get" => busestrams(params),
        "dbtimetable_get" => dbtimetable(params),
        "dbstore_get" => dbstore(params),
        "wfsstore_get" => wfsstore(params),
        "get_companies" => combo_items(&[("Budimex S.A.", "BDX"), ("Strabag Sp. z o.o.", "STR")]),
        "get_districts" => combo_items(&[("Mokotów", "4"), ("Wola", "13")]),
        "get_categories_tree" => categories_tree(),
        "get_open_invests" => open_invests(params),
        _ => bad_method(),
    }
}

fn check_api_key(params: &HashMap<String, String>) -> Option<Value> {
    match params.get("apikey").map(String::as_str) {
        Some(API_KEY) => None,
        Some(REVOKED_API_KEY) => Some(json!({
            "result": "false",
            "error": "Nieautoryzowany dostęp do danych"
        })),
        _ => Some(json!({
            "result": "false",
            "error": "Błędny apikey lub jego brak"
        })),
    }
}

fn bad_method() -> Value {
    json!({"result": "Błędna metoda lub parametry wywołania"})
}

// --- datastore_search ----------------------------------------------------

fn datastore_search(params: &HashMap<String, String>, hits: &AtomicI64) -> Value {
    let mut records = match params.get("resource_id").map(String::as_str) {
        Some(SHRUBS_ID) => vec![shrub()],
        Some(SHRUBS_GROUPS_ID) => vec![shrubs_group()],
        Some(FORESTS_ID) => vec![forest()],
        Some(TREES_ID) => vec![tree()],
        Some(TREES_GROUPS_ID) => vec![trees_group()],
        Some(MUNICIPAL_WASTE_ID) => {
            let serial = hits.fetch_add(1, Ordering::SeqCst) + 1;
            vec![municipal_waste(serial)]
        }
        Some(INTERNET_ACCESS_ID) => vec![internet_access()],
        Some(COMPUTER_PURPOSES_ID) => vec![computer_purpose()],
        _ => return bad_method(),
    };
    if let Some(limit) = params.get("limit").and_then(|v| v.parse::<usize>().ok()) {
        records.truncate(limit);
    }
    json!({"result": {"records": records}})
}

fn shrub() -> Value {
    json!({
        "_id": 1,
        "x_wgs84": 21.04, "y_wgs84": 52.27, "x": 7513451.31, "y": 5792293.18,
        "numer_inw": "BIA00001", "dzielnica": "Białołęka",
        "jednostka": "ZZW - dzielnica Białołęka", "miasto": "Warszawa",
        "adres": "Płochocińska", "lokalizacja": "pas drogowy",
        "gatunek": "tawuła van Houtte'a", "gatunek1": "Spiraea vanhouttei",
        "data_wyk_pom": 20200910, "wiek_w_dni": 3650, "stan_zdrowia": "dobry"
    })
}

fn shrubs_group() -> Value {
    json!({
        "_id": 2,
        "x_wgs84": 21.05, "y_wgs84": 52.26, "x_pl2000": 7513900.0, "y_pl2000": 5792000.0,
        "id_obrysu": 118, "partid_obrysu": 0, "numer_inw": "BIA00201",
        "dzielnica": "Białołęka", "jednostka": "ZZW - dzielnica Białołęka",
        "miasto": "Warszawa", "adres": "Modlińska", "lokalizacja": "skwer",
        "gatunki": "róża dzika, tawuła", "data_wyk_pom": 20210405,
        "wiek_w_dni": 2920, "powierzchnia": "34,5", "wysokosc": "1,2",
        "stan_zdrowia": "dobry"
    })
}

fn tree() -> Value {
    json!({
        "_id": 3,
        "x_wgs84": 21.0, "y_wgs84": 52.2, "x_pl2000": 7500000.0, "y_pl2000": 5790000.0,
        "numer_inw": "MOK001", "dzielnica": "Mokotów", "jednostka": "ZDM",
        "miasto": "Warszawa", "adres": "Puławska", "numer_adres": "12",
        "lokalizacja": "ulica", "gatunek": "lipa drobnolistna",
        "gatunek_1": "Tilia cordata", "data_wyk_pom": 20221201,
        "wiek_w_dni": 10950, "wysokosc": "21,15", "pnie_obwod": "160",
        "srednica_k": "8,5", "stan_zdrowia": "dobry"
    })
}

fn trees_group() -> Value {
    json!({
        "_id": 4,
        "x_wgs84": 20.98, "y_wgs84": 52.21, "x_pl2000": 7498000.0, "y_pl2000": 5791000.0,
        "numer_inw": "MOK900", "id_obrysu": 77, "partid_obrysu": 1,
        "dzielnica": "Mokotów", "jednostka": "ZZW - dzielnica Mokotów",
        "miasto": "Warszawa", "adres": "Idzikowskiego", "lokalizacja": "park",
        "gatunki": "klon, jesion", "data_wyk_pom": 20190620, "stan_zdrowia": "dostateczny"
    })
}

fn forest() -> Value {
    json!({
        "_id": 5,
        "x_wgs84": 21.09, "y_wgs84": 52.33, "x_pl2000": 7516000.0, "y_pl2000": 5799000.0,
        "id": 1243, "partid": 0, "dzielnica": "Białołęka", "obwód": "Obwód Białołęka",
        "osiedle": "Choszczówka", "nr_oddz": "12", "poddz": "c",
        "powierzchnia": "2,31", "stl": "BMśw", "powierzchnia1": "drzewostan",
        "gat_panujacy": "sosna pospolita", "udział": "0,8", "wiek": 92,
        "bonitacja": "I", "zadrzewienie": "0,7", "zwarcie": "umiarkowane",
        "zmieszanie": "jednostkowe", "podrost": "brak", "podszyt": "kruszyna",
        "typ_planu": "uproszczony plan", "planu": "UPUL Białołęka",
        "obowiazywanie": "2018-2027", "shape_area": 23100.5, "shape_len": 744.2
    })
}

fn municipal_waste(serial: i64) -> Value {
    json!({
        "_id": serial,
        "Identyfikator": serial, "Nazwa": "Butelka PET",
        "Synonim": "butelka plastikowa", "Typ": "metale i tworzywa sztuczne",
        "Opis": "opróżnij i zgnieć", "Tak": "butelka po wodzie",
        "Nie": "butelka po oleju"
    })
}

fn school_common() -> Value {
    json!({
        "Nr RSPO": "12345", "Typ szkoły/placówki": "Szkoła podstawowa",
        "Nazwa szkoły/placówki": "Szkoła Podstawowa nr 1",
        "Województwo": "MAZOWIECKIE", "Powiat": "Warszawa", "Gmina": "Mokotów",
        "Miejscowość": "Warszawa", "Ulica": "Puławska", "Nr domu": "97",
        "Nr mieszkania": "", "Kod pocztowy": "02-595", "Poczta": "Warszawa",
        "Telefon": "228455879", "E-mail": "sp1@edu.um.warszawa.pl",
        "Typ organu prowadzącego": "Gmina", "Publiczność": "publiczna",
        "Kategoria uczniów": "Dzieci lub młodzież",
        "Specyfika szkoły": "brak specyfiki",
        "Rodzaj placówki": "jednostka samodzielna"
    })
}

fn internet_access() -> Value {
    let mut record = school_common();
    let link_columns = [
        // Spacing quirks below are verbatim from the upstream CSV headers.
        ("Łącze telefoniczne - do 1 Mbit", json!(0)),
        ("Łącze telefoniczne - do 2 Mbit", json!(0)),
        ("Łącze telefoniczne - do 10 Mbit", json!(0)),
        ("Łącze telefoniczne - powyżej 10 Mbit", json!(1)),
        ("łącze TV - do 1 Mbit", json!(0)),
        ("łącze TV - do 2 Mbit", json!(0)),
        ("łącze TV - do 10 Mbit", json!(0)),
        ("łącze TV - powyżej 10 Mbit", json!(0)),
        ("Światłowód - do 1 Mbit", json!(0)),
        ("Światłowód - do 2 Mbit", json!(0)),
        ("Światłowód - do 10 Mbit", json!("0")),
        ("Światłowód - powyżej 10 Mbit", json!("1")),
        ("Łącze SAT -do 1 Mbit", json!(0)),
        ("Łącze SAT - do 2 Mbit", json!(0)),
        ("Łącze SAT - do 10 Mbit", json!(0)),
        ("Łącze SAT - powyżej 10 Mbit", json!(0)),
        ("Łącze radio - do 1 Mbit", Value::Null),
        ("Łącze radio - do 2 Mbit", json!(0)),
        ("Łącze radio - do 10 Mbit", json!(0)),
        ("Łącze radio - powyżej 10 Mbit", json!(0)),
        ("Łącze tel kom - do 1 Mbit", json!("")),
        ("Łącze tel kom - do 2 Mbit", json!(0)),
        ("Łącze tel kom - do 10 Mbit", json!(0)),
        ("Łącze tel kom - powyżej 10 Mbit", json!(1)),
    ];
    let map = record.as_object_mut().unwrap();
    for (key, value) in link_columns {
        map.insert(key.to_string(), value);
    }
    record
}

fn computer_purpose() -> Value {
    let mut record = school_common();
    let count_columns = [
        ("dydaktyka ogółem", json!(48)),
        ("dydaktyka z dostępem do internetu", json!(48)),
        ("dydaktyka  przenośne", json!(20)),
        ("z tego w bibliotece - ogółem", json!(4)),
        ("z tego w bibliotece - z dostępem do internetu", json!(4)),
        ("z tego w bibliotece - przenośne", json!(0)),
        ("z tego dostępne dla uczniów - ogółem", json!("30")),
        ("z tego dostępne dla uczniów - z dostępem do internetu", json!(30)),
        ("z tego dostępne dla uczniów - przenośne", json!(12)),
        ("pozostałe - ogółem", json!(6)),
        ("pozostałe - z dostępem do internetu", json!(6)),
        ("pozostałe - przenośne", json!("")),
    ];
    let map = record.as_object_mut().unwrap();
    for (key, value) in count_columns {
        map.insert(key.to_string(), value);
    }
    record
}

// --- flat-list endpoints -------------------------------------------------

fn air_station() -> Value {
    json!({
        "ijp": {
            "name": "Dobry",
            "recommendations": "Warunki dobre na aktywności na zewnątrz."
        },
        "data_source": "WIOŚ", "name": "MzWarKondrat",
        "station_type": "automatyczna", "lon": 21.041588, "lat": 52.290864,
        "owner": "GIOŚ", "station": "Warszawa-Targówek",
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

fn defibrillator(with_attachment: bool) -> Value {
    let mut device = json!({
        "geometry": {"type": "Point", "coordinates": [21.0122, 52.2297]},
        "properties": {
            "device_manufacturer": "Philips", "device_public_access": "tak",
            "location_building": "1", "location_city": "Warszawa",
            "location_description": "hol główny",
            "location_object_name": "Urząd Dzielnicy",
            "location_postcode": "00-001", "location_street": "Marszałkowska"
        }
    });
    if with_attachment {
        device["properties"]["attachment"] = json!("aGVsbG8=");
    }
    device
}

fn busestrams(params: &HashMap<String, String>) -> Value {
    if params.get("resource_id").map(String::as_str) != Some(VEHICLE_LOCATIONS_ID) {
        return bad_method();
    }
    let lines = match params.get("type").map(String::as_str) {
        Some("2") => ["17", "33"],
        _ => ["130", "523"],
    };
    let vehicles: Vec<Value> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            json!({
                "Lat": 52.2297 + i as f64 * 0.01, "Lon": 21.0122,
                "Time": "2023-02-01 14:00:07", "Lines": line,
                "Brigade": format!("{}", i + 1),
                "VehicleNumber": format!("94{}3", i + 1)
            })
        })
        .filter(|v| match params.get("line") {
            Some(line) => v["Lines"] == line.as_str(),
            None => true,
        })
        .collect();
    json!({"result": vehicles})
}

// --- key/value endpoints -------------------------------------------------

fn dbtimetable(params: &HashMap<String, String>) -> Value {
    match params.get("id").map(String::as_str) {
        Some(STOP_SET_ID) => {
            let name = params.get("name").cloned().unwrap_or_default();
            json!({"result": [
                {"values": [
                    {"value": "7009", "key": "zespol"},
                    {"value": name, "key": "nazwa"}
                ]}
            ]})
        }
        Some(STOP_LINES_ID) => json!({"result": [
            {"values": [{"value": "138", "key": "linia"}]},
            {"values": [{"value": "166", "key": "linia"}]}
        ]}),
        Some(LINE_TIMETABLE_ID) => json!({"result": [
            {"values": [
                {"value": null, "key": "symbol_2"},
                {"value": null, "key": "symbol_1"},
                {"value": "3", "key": "brygada"},
                {"value": "Wiatraczna", "key": "kierunek"},
                {"value": "TP-OST", "key": "trasa"},
                {"value": "05:32:00", "key": "czas"}
            ]},
            {"values": [
                {"value": null, "key": "symbol_2"},
                {"value": null, "key": "symbol_1"},
                {"value": "5", "key": "brygada"},
                {"value": "Wiatraczna", "key": "kierunek"},
                {"value": "TP-OST", "key": "trasa"},
                {"value": "05:47:00", "key": "czas"}
            ]}
        ]}),
        _ => bad_method(),
    }
}

fn dbstore(params: &HashMap<String, String>) -> Value {
    let stop = |bar: &str, direction: &str| {
        json!({"values": [
            {"value": "1001", "key": "zespol"},
            {"value": bar, "key": "slupek"},
            {"value": "Kijowska", "key": "nazwa_zespolu"},
            {"value": "2201", "key": "id_ulicy"},
            {"value": "52.248455", "key": "szer_geo"},
            {"value": "21.044827", "key": "dlug_geo"},
            {"value": direction, "key": "kierunek"},
            {"value": "2023-01-28 00:00:00.0", "key": "obowiazuje_od"}
        ]})
    };
    match params.get("id").map(String::as_str) {
        Some(STOP_INFO_ID) => {
            json!({"result": [stop("01", "al.Zieleniecka"), stop("02", "Ząbkowska")]})
        }
        Some(STOP_INFO_TODAY_ID) => json!({"result": [stop("01", "al.Zieleniecka")]}),
        _ => bad_method(),
    }
}

// --- wfsstore_get --------------------------------------------------------

fn wfsstore(params: &HashMap<String, String>) -> Value {
    let features = match params.get("id").map(String::as_str) {
        Some(CYCLE_TRACKS_ID) => json!([{
            "LOKALIZ": "al. KEN", "TYP_TRASY": "droga dla rowerów",
            "DZIELNICA": "Ursynów", "OBJECTID": "2144", "TYP_NAW": "asfalt"
        }]),
        Some(CYCLE_STATIONS_ID) => json!([{
            "STOJAKI": "28", "AKTU_DAN": "01-APR-22 12.38.06.000000 PM",
            "OBJECTID": "6", "LOKALIZACJA": "Metro Marymont", "ROWERY": "17",
            "NR_STACJI": "6387"
        }]),
        Some(PARKING_LOTS_ID) => json!([{
            "NIEPELNO": "11", "MOTORY": "10", "AUTA": "398",
            "OPIS": "parking działa w systemie Parkuj i Jedź",
            "OBJECTID": "1", "NAZWA": "P+R Metro Młociny",
            "AKTU_DAN": "2022-10-03"
        }]),
        Some(SUBWAY_ENTRANCES_ID) => json!([
            {"OBJECTID": "121"},
            {"OBJECTID": "122"}
        ]),
        Some(THEATERS_ID) => json!([{
            "TEL_FAX": "22 620 21 02", "JEDN_ADM": "Miasto",
            "AKTU_DAN": "2022-11-14", "OBJECTID": "3", "NUMER": "3",
            "KOD": "00-841", "OPIS": "Teatr na Woli", "ULICA": "KASPRZAKA",
            "DZIELNICA": "WOLA", "WWW": "www.teatrnawoli.pl",
            "MAIL": "biuro@teatrnawoli.pl"
        }]),
        _ => {
            return json!({
                "result": "Wfs error: IllegalArgumentException: FeatureMember list is empty"
            })
        }
    };
    json!({"result": {"featureMemberProperties": features}})
}

// --- road works ----------------------------------------------------------

fn combo_items(items: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(value, code)| json!({"Value": value, "Code": code}))
        .collect();
    json!({"result": {"Items": {"ComboItem": items}}})
}

fn categories_tree() -> Value {
    json!({"result": {"CategoryTreeNode": [
        {"ID": "1", "ParentID": {}, "Name": "Roboty drogowe"},
        {"ID": "24", "ParentID": "1", "Name": "Remont chodnika", "SpecialModeCode": "R"}
    ]}})
}

fn open_invests(params: &HashMap<String, String>) -> Value {
    let invest = json!({
        "ID": "8841", "Name": "Przebudowa skrzyżowania", "Street": "Marsa",
        "StartDate": "2023-03-01T00:00:00", "EndDate": "2023-09-30T00:00:00",
        "LastModifyDate": "2023-02-14T09:12:55"
    });
    // A query narrowed to one investment arrives as a bare object, the
    // way the upstream's XML bridge serializes single elements.
    let items = if params.contains_key("investmentName") {
        invest
    } else {
        json!([
            invest,
            {
                "ID": "8900", "Name": "Budowa ścieżki rowerowej", "Street": "Górczewska",
                "StartDate": "2023-04-15T00:00:00", "EndDate": null,
                "LastModifyDate": "2023-03-01T08:00:00"
            }
        ])
    };
    json!({"result": {"Items": {"InvestItem": items}}})
}
