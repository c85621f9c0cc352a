//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port and points a
//! client at it, so the fixture request counter and the cache state never
//! leak between tests. Assertions go through the typed records only — the
//! raw JSON shapes are the mock server's concern.

use std::time::Duration;

use warsaw_core::{CacheConfig, CommaDecimal, Error, Record, WarsawClient};

/// Start the mock server on a random port; returns the base URL the
/// client should use.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api/action/")
}

fn keyed_client(base_url: &str) -> WarsawClient {
    WarsawClient::with_api_key(mock_server::API_KEY).base_url(base_url)
}

// --- greenery and waste ---

#[test]
fn greenery_datasets_map_to_typed_records() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let shrubs = client.shrubs(Some(5), None, None).unwrap();
    assert_eq!(shrubs[0].district, "Białołęka");
    assert_eq!(shrubs[0].species_latin, "Spiraea vanhouttei");

    let groups = client.shrubs_groups(None, None, None).unwrap();
    assert_eq!(groups[0].area, CommaDecimal::Number(34.5));

    let trees = client.trees(None, Some("lipa"), None).unwrap();
    assert_eq!(trees[0].height, CommaDecimal::Number(21.15));
    assert_eq!(trees[0].trunk_circumference, CommaDecimal::Number(160.0));

    let tree_groups = client.trees_groups(None, None, None).unwrap();
    assert_eq!(tree_groups[0].species, "klon, jesion");

    let forests = client.forests(None, None, None).unwrap();
    assert_eq!(forests[0].dominant_species, "sosna pospolita");
    assert_eq!(forests[0].surface_share, CommaDecimal::Number(0.8));

    let waste = client.municipal_waste(None, None, None).unwrap();
    assert_eq!(waste[0].name, "Butelka PET");
}

#[test]
fn limit_parameter_truncates_results() {
    let base = spawn_server();
    let mut client = keyed_client(&base);
    let shrubs = client.shrubs(Some(0), None, None).unwrap();
    assert!(shrubs.is_empty());
}

// --- air quality ---

#[test]
fn air_quality_maps_nested_station() {
    let base = spawn_server();
    let mut client = keyed_client(&base);
    let stations = client.air_quality().unwrap();

    assert_eq!(stations.len(), 1);
    let station = &stations[0];
    assert_eq!(station.station, "Warszawa-Targówek");
    assert_eq!(station.address.district, "Targówek");
    assert_eq!(station.data.len(), 2);
    assert_eq!(station.data[0].param_code, "PM10");
    assert_eq!(station.data[1].time, None);

    let flat = station.to_flat_mapping().unwrap();
    assert_eq!(flat["data_param_code_0"], "PM10");
    assert_eq!(flat["data_param_code_1"], "NO2");
}

// --- defibrillators ---

#[test]
fn defibrillator_attachment_follows_query_mode() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let listed = client.defibrillators(None).unwrap();
    assert_eq!(listed[0].properties.attachment, None);

    let single = client.defibrillators(Some("1358")).unwrap();
    assert_eq!(single[0].properties.attachment.as_deref(), Some("aGVsbG8="));
}

// --- public transport ---

#[test]
fn vehicle_locations_respect_type_and_line() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let buses = client.vehicle_locations(1, None, None).unwrap();
    assert_eq!(buses.len(), 2);
    assert_eq!(buses[0].lines, "130");

    let trams = client.vehicle_locations(2, None, None).unwrap();
    assert_eq!(trams[0].lines, "17");

    let filtered = client.vehicle_locations(1, Some("523"), None).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].lines, "523");
}

#[test]
fn stop_set_maps_positional_values() {
    let base = spawn_server();
    let mut client = keyed_client(&base);
    let set = client.stop_set("Kijowska").unwrap();
    assert_eq!(set.set_number, "7009");
    assert_eq!(set.stop_name, "Kijowska");
}

#[test]
fn stop_lines_and_timetable_map_keyed_rows() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let lines = client.stop_lines("7009", "01").unwrap();
    let numbers: Vec<&str> = lines.iter().map(|l| l.line_number.as_str()).collect();
    assert_eq!(numbers, vec!["138", "166"]);

    let departures = client.line_timetable("7009", "01", "138").unwrap();
    assert_eq!(departures.len(), 2);
    assert_eq!(departures[0].brigade, "3");
    assert_eq!(departures[0].symbol_1, None);
    assert!(departures[0].time.is_some());
}

#[test]
fn stop_info_switches_dataset_for_current_day() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let all = client.stop_info(None, None, None, false).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].set_name, "Kijowska");
    assert_eq!(all[0].lat, 52.248455);

    let today = client.stop_info(None, None, None, true).unwrap();
    assert_eq!(today.len(), 1);
}

#[test]
fn wfs_datasets_map_feature_properties() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let tracks = client.cycle_tracks(None, None, None, None).unwrap();
    assert_eq!(tracks[0].district, "Ursynów");

    let stations = client
        .cycle_stations(Some(10), Some("20.9,52.1,21.2,52.3"), None, None)
        .unwrap();
    assert_eq!(stations[0].racks, 28);
    assert_eq!(stations[0].bikes, 17);
    assert!(stations[0].update_date.is_some());

    let lots = client.parking_lots(None, None, None, None).unwrap();
    assert_eq!(lots[0].car_places, 398);

    let entrances = client.subway_entrances(None, None, None, None).unwrap();
    assert_eq!(entrances.len(), 2);
    assert_eq!(entrances[0].object_id, "121");
}

// --- culture and education ---

#[test]
fn theaters_map_optional_contact_fields() {
    let base = spawn_server();
    let mut client = keyed_client(&base);
    let theaters = client.theaters(None, None, None, None).unwrap();
    assert_eq!(theaters[0].description, "Teatr na Woli");
    assert_eq!(theaters[0].website.as_deref(), Some("www.teatrnawoli.pl"));
}

#[test]
fn school_datasets_map_mixed_cell_shapes() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let access = client.internet_access(None, None, None).unwrap();
    assert_eq!(access[0].school_number, "12345");
    assert_eq!(access[0].fiber_optics_above_10, Some(1));
    assert_eq!(access[0].radio_link_up_to_1, None);
    assert_eq!(access[0].mobile_phone_link_up_to_1, None);

    let purposes = client.computer_purposes(None, None, None).unwrap();
    assert_eq!(purposes[0].total_teaching, Some(48));
    assert_eq!(purposes[0].total_teaching_available_for_students, Some(30));
    assert_eq!(purposes[0].other_portable, None);
}

// --- road works ---

#[test]
fn road_works_dictionaries_map_combo_items() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let companies = client.road_works_companies().unwrap();
    assert_eq!(companies[0].name, "Budimex S.A.");
    assert_eq!(companies[0].code, "BDX");

    let categories = client.road_works_categories().unwrap();
    assert_eq!(categories[0].parent_id, None);
    assert_eq!(categories[1].parent_id.as_deref(), Some("1"));

    let districts = client.road_works_districts().unwrap();
    assert_eq!(districts[1].name, "Wola");
}

#[test]
fn single_investment_arrives_as_one_element_list() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let all = client
        .road_works_investments(5, None, None, None, None, None)
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].end_date, None);

    let narrowed = client
        .road_works_investments(5, None, Some("Przebudowa"), None, None, None)
        .unwrap();
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].street, "Marsa");
}

// --- error classification and session lifecycle ---

#[test]
fn missing_api_key_classifies_and_closes_the_session() {
    let base = spawn_server();
    let mut client = WarsawClient::new().base_url(&base);

    let err = client.air_quality().unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey));

    // The session is unusable after a classified error.
    let err = client.shrubs(None, None, None).unwrap_err();
    assert!(matches!(err, Error::SessionClosed));
}

#[test]
fn revoked_api_key_classifies_as_unauthorized() {
    let base = spawn_server();
    let mut client = WarsawClient::with_api_key(mock_server::REVOKED_API_KEY).base_url(&base);

    let err = client.defibrillators(None).unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
}

#[test]
fn close_is_idempotent_and_final() {
    let base = spawn_server();
    let mut client = keyed_client(&base);
    client.close();
    client.close();
    let err = client.air_quality().unwrap_err();
    assert!(matches!(err, Error::SessionClosed));
}

// --- cache ---

#[test]
fn cached_session_replays_responses() {
    let base = spawn_server();
    let dir = tempfile::tempdir().unwrap();
    let mut client = keyed_client(&base);

    client
        .enable_cache(&CacheConfig::new(dir.path()).expire_after(Some(Duration::from_secs(60))))
        .unwrap();
    assert!(client.cache_enabled());

    // The fixture embeds a per-request serial; a replay keeps it stable.
    let first = client.municipal_waste(None, None, None).unwrap();
    let second = client.municipal_waste(None, None, None).unwrap();
    assert_eq!(first[0].identifier, second[0].identifier);

    client.disable_cache();
    assert!(!client.cache_enabled());
    let fresh = client.municipal_waste(None, None, None).unwrap();
    assert_ne!(fresh[0].identifier, first[0].identifier);
}

#[test]
fn force_clear_discards_previous_session_entries() {
    let base = spawn_server();
    let dir = tempfile::tempdir().unwrap();
    let mut client = keyed_client(&base);

    client.enable_cache(&CacheConfig::new(dir.path())).unwrap();
    let first = client.municipal_waste(None, None, None).unwrap();

    client
        .enable_cache(&CacheConfig::new(dir.path()).force_clear(true))
        .unwrap();
    let refetched = client.municipal_waste(None, None, None).unwrap();
    assert_ne!(refetched[0].identifier, first[0].identifier);
}

#[test]
fn enable_cache_rejects_missing_directory_without_breaking_the_session() {
    let base = spawn_server();
    let mut client = keyed_client(&base);

    let config = CacheConfig::new("/no/such/directory");
    let err = client.enable_cache(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidDirectory(_)));
    assert!(!client.cache_enabled());

    // The failed attempt leaves the plain transport untouched.
    assert!(client.municipal_waste(None, None, None).is_ok());
}
