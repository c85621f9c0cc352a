use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let resp = app()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

// --- datastore_search ---

#[tokio::test]
async fn datastore_search_returns_records_for_known_resource() {
    let (status, payload) = get(&format!(
        "/api/action/datastore_search?resource_id={}",
        mock_server::SHRUBS_ID
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = payload["result"]["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["dzielnica"], "Białołęka");
}

#[tokio::test]
async fn datastore_search_honors_limit() {
    let (_, payload) = get(&format!(
        "/api/action/datastore_search?resource_id={}&limit=0",
        mock_server::TREES_ID
    ))
    .await;

    assert!(payload["result"]["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn datastore_search_unknown_resource_is_http_200_with_error_body() {
    let (status, payload) =
        get("/api/action/datastore_search?resource_id=not-a-resource").await;

    // The upstream never signals errors through the status code.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["result"], "Błędna metoda lub parametry wywołania");
}

// --- api key handling ---

#[tokio::test]
async fn keyed_endpoint_without_key_returns_error_envelope() {
    let (status, payload) = get("/api/action/air_sensors_get?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["result"], "false");
    assert_eq!(payload["error"], "Błędny apikey lub jego brak");
}

#[tokio::test]
async fn revoked_key_returns_unauthorized_envelope() {
    let (_, payload) = get(&format!(
        "/api/action/aed_get?apikey={}",
        mock_server::REVOKED_API_KEY
    ))
    .await;

    assert_eq!(payload["error"], "Nieautoryzowany dostęp do danych");
}

#[tokio::test]
async fn valid_key_unlocks_keyed_endpoint() {
    let (_, payload) = get(&format!(
        "/api/action/air_sensors_get?apikey={}",
        mock_server::API_KEY
    ))
    .await;

    assert_eq!(payload["result"][0]["station"], "Warszawa-Targówek");
}

// --- wfsstore_get ---

#[tokio::test]
async fn wfs_endpoint_serves_feature_member_properties() {
    let (_, payload) = get(&format!(
        "/api/action/wfsstore_get?id={}&apikey={}",
        mock_server::THEATERS_ID,
        mock_server::API_KEY
    ))
    .await;

    let features = payload["result"]["featureMemberProperties"].as_array().unwrap();
    assert_eq!(features[0]["DZIELNICA"], "WOLA");
}

#[tokio::test]
async fn wfs_unknown_layer_reports_empty_feature_list() {
    let (_, payload) = get(&format!(
        "/api/action/wfsstore_get?id=not-a-layer&apikey={}",
        mock_server::API_KEY
    ))
    .await;

    assert_eq!(
        payload["result"],
        "Wfs error: IllegalArgumentException: FeatureMember list is empty"
    );
}

// --- timetable family ---

#[tokio::test]
async fn stop_set_echoes_requested_name_in_positional_values() {
    let (_, payload) = get(&format!(
        "/api/action/dbtimetable_get?id={}&name=Kijowska&apikey={}",
        mock_server::STOP_SET_ID,
        mock_server::API_KEY
    ))
    .await;

    let values = payload["result"][0]["values"].as_array().unwrap();
    assert_eq!(values[0]["value"], "7009");
    assert_eq!(values[1]["value"], "Kijowska");
}

#[tokio::test]
async fn timetable_rows_are_key_value_pairs() {
    let (_, payload) = get(&format!(
        "/api/action/dbtimetable_get?id={}&busstopId=7009&busstopNr=01&line=130&apikey={}",
        mock_server::LINE_TIMETABLE_ID,
        mock_server::API_KEY
    ))
    .await;

    let rows = payload["result"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let pair = &rows[0]["values"][2];
    assert_eq!(pair["key"], "brygada");
    assert_eq!(pair["value"], "3");
}

// --- vehicle locations ---

#[tokio::test]
async fn vehicles_filter_by_line() {
    let (_, payload) = get(&format!(
        "/api/action/busestrams_get?resource_id={}&apikey={}&type=1&line=523",
        mock_server::VEHICLE_LOCATIONS_ID,
        mock_server::API_KEY
    ))
    .await;

    let vehicles = payload["result"].as_array().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["Lines"], "523");
}

// --- waste serial counter ---

#[tokio::test]
async fn waste_serial_is_per_router_instance() {
    use tower::Service;

    let mut app = app().into_service();
    let uri = format!(
        "/api/action/datastore_search?resource_id={}",
        mock_server::MUNICIPAL_WASTE_ID
    );

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().uri(&uri).body(String::new()).unwrap())
        .await
        .unwrap();
    let first = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().uri(&uri).body(String::new()).unwrap())
        .await
        .unwrap();
    let second = body_json(resp).await;

    assert_eq!(first["result"]["records"][0]["Identyfikator"], 1);
    assert_eq!(second["result"]["records"][0]["Identyfikator"], 2);
}
