//! Client facade for the Warsaw Open Data API.
//!
//! # Design
//! `WarsawClient` owns a [`Transport`] and exposes one method per dataset.
//! Every method follows the same pipeline: build the endpoint URL with the
//! dataset's fixed resource id, execute the GET, classify the JSON envelope
//! against the upstream's known error strings, then map each raw record
//! into its typed counterpart. Methods are independent of each other; the
//! only shared state is the transport and its optional cache.

use log::debug;
use serde_json::{Map, Value};

use crate::cache::{CacheConfig, ResponseCache};
use crate::error::{Error, Result};
use crate::records::{
    AirQuality, ComputerPurpose, CycleStation, CycleTrack, Defibrillator, Forest,
    InternetAccess, LineTimetable, MunicipalWaste, ParkingLot, RoadWorksCategory,
    RoadWorksCompany, RoadWorksDistrict, RoadWorksInvestment, Shrub, ShrubsGroup, StopInfo,
    StopLine, StopSet, SubwayEntrance, Theater, Tree, TreesGroup, VehicleLocation,
};
use crate::transport::Transport;

/// Production base URL of the upstream API.
pub const DEFAULT_BASE_URL: &str = "https://api.um.warszawa.pl/api/action/";

// Fixed dataset identifiers, one per endpoint.
const SHRUBS_ID: &str = "0b1af81f-247d-4266-9823-693858ad5b5d";
const SHRUBS_GROUPS_ID: &str = "4b792a76-5349-4aad-aa16-dadaf0a74be3";
const FORESTS_ID: &str = "75bedfd5-6c83-426b-9ae5-f03651857a48";
const TREES_ID: &str = "ed6217dd-c8d0-4f7b-8bed-3b7eb81a95ba";
const TREES_GROUPS_ID: &str = "913856f7-f71b-4638-abe2-12df14334e1a";
const MUNICIPAL_WASTE_ID: &str = "64b9d66c-d134-4a87-9f24-258676e9e498";
const VEHICLE_LOCATIONS_ID: &str = "f2e5503e-927d-4ad3-9500-4ab9e55deb59";
const STOP_SET_ID: &str = "b27f4c17-5c50-4a5b-89dd-236b282bc499";
const STOP_LINES_ID: &str = "88cd555f-6f31-43ca-9de4-66c479ad5942";
const LINE_TIMETABLE_ID: &str = "e923fa0e-d96c-43f9-ae6e-60518c9f3238";
const CYCLE_TRACKS_ID: &str = "8a235d27-b96a-4876-9b92-9e164940c9b6";
const CYCLE_STATIONS_ID: &str = "a08136ec-1037-4029-9aa5-b0d0ee0b9d88";
const PARKING_LOTS_ID: &str = "157648fd-a603-4861-af96-884a8e35b155";
const SUBWAY_ENTRANCES_ID: &str = "0ac7f6d1-a26b-430f-9e3d-a41c5356b9a3";
const STOP_INFO_ID: &str = "ab75c33d-3a26-4342-b36a-6e5fef0a3ac3";
const STOP_INFO_TODAY_ID: &str = "1c08a38c-ae09-46d2-8926-4f9d25cb0630";
const THEATERS_ID: &str = "e26218cb-61ec-4ccb-81cc-fd19a6fee0f8";
const INTERNET_ACCESS_ID: &str = "0a131e16-ec7f-4502-9b62-8f8af58d8cfd";
const COMPUTER_PURPOSES_ID: &str = "e22be977-f15d-42e6-843a-55fd0a0d756e";
const RW_COMPANIES_ID: &str = "2aa01577-9f24-4b8e-83f5-d3d15f6d094b";
const RW_CATEGORIES_ID: &str = "e1c8fb95-9979-418d-bf5b-6bdfd586555b";
const RW_DISTRICTS_ID: &str = "f3469922-27e3-4d2f-811d-8efa2e448606";
const RW_INVESTMENTS_ID: &str = "26b9ade1-f5d4-439e-84b4-9af37ab7ebf1";

// Upstream error sentinels, matched literally and case-sensitively.
const RESULT_BAD_QUERY: &str = "Błędna metoda lub parametry wywołania";
const RESULT_EMPTY_FEATURES: &str =
    "Wfs error: IllegalArgumentException: FeatureMember list is empty";
const ERROR_BAD_API_KEY: &str = "Błędny apikey lub jego brak";
const ERROR_UNAUTHORIZED: &str = "Nieautoryzowany dostęp do danych";

/// Blocking client for the Warsaw Open Data API.
pub struct WarsawClient {
    base_url: String,
    api_key: Option<String>,
    transport: Transport,
}

impl WarsawClient {
    /// Client against the production API, without an API key.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            transport: Transport::direct(),
        }
    }

    /// Client with the API key some endpoints require.
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::new()
        }
    }

    /// Point the client at a different base URL (tests, proxies).
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Switch the transport to cached mode rooted at the configured
    /// directory.
    ///
    /// Fails with [`Error::InvalidDirectory`] — before creating any file or
    /// touching the network — when the directory does not exist.
    pub fn enable_cache(&mut self, config: &CacheConfig) -> Result<()> {
        let store = ResponseCache::open(config)?;
        self.transport = Transport::cached(store);
        debug!("cache enabled in {}", config.dir().display());
        Ok(())
    }

    /// Switch back to an uncached transport.
    pub fn disable_cache(&mut self) {
        self.transport = Transport::direct();
        debug!("cache disabled");
    }

    /// Whether the transport currently serves from the cache.
    pub fn cache_enabled(&self) -> bool {
        self.transport.is_cached()
    }

    /// Release the connection pool and the cache handle. Any call after
    /// this fails with [`Error::SessionClosed`].
    pub fn close(&mut self) {
        self.transport.close();
    }

    fn url(&self, endpoint: &str, params: &[(&str, Option<String>)]) -> String {
        build_url(&self.base_url, endpoint, params)
    }

    /// Execute a GET and classify the envelope; on a recognized error
    /// payload the transport is closed before the error is returned.
    fn get_payload(&mut self, url: &str) -> Result<Value> {
        let payload = self.transport.get(url)?;
        if let Some(err) = classify(&payload) {
            self.transport.close();
            return Err(err);
        }
        Ok(payload)
    }

    // --- ecology -----------------------------------------------------

    /// Individually inventoried shrubs.
    pub fn shrubs(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<Shrub>> {
        let url = self.url("datastore_search", &search_params(SHRUBS_ID, limit, q, filters));
        let payload = self.get_payload(&url)?;
        records_at(&payload, "shrubs", &["result", "records"])?
            .iter()
            .map(Shrub::from_raw)
            .collect()
    }

    /// Groups of shrubs sharing an outline.
    pub fn shrubs_groups(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<ShrubsGroup>> {
        let url = self.url(
            "datastore_search",
            &search_params(SHRUBS_GROUPS_ID, limit, q, filters),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "shrubs_groups", &["result", "records"])?
            .iter()
            .map(ShrubsGroup::from_raw)
            .collect()
    }

    /// Forest inventory divisions.
    pub fn forests(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<Forest>> {
        let url = self.url("datastore_search", &search_params(FORESTS_ID, limit, q, filters));
        let payload = self.get_payload(&url)?;
        records_at(&payload, "forests", &["result", "records"])?
            .iter()
            .map(Forest::from_raw)
            .collect()
    }

    /// Individually inventoried trees.
    pub fn trees(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<Tree>> {
        let url = self.url("datastore_search", &search_params(TREES_ID, limit, q, filters));
        let payload = self.get_payload(&url)?;
        records_at(&payload, "trees", &["result", "records"])?
            .iter()
            .map(Tree::from_raw)
            .collect()
    }

    /// Groups of trees sharing an outline.
    pub fn trees_groups(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<TreesGroup>> {
        let url = self.url(
            "datastore_search",
            &search_params(TREES_GROUPS_ID, limit, q, filters),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "trees_groups", &["result", "records"])?
            .iter()
            .map(TreesGroup::from_raw)
            .collect()
    }

    /// The municipal waste segregation dictionary.
    pub fn municipal_waste(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<MunicipalWaste>> {
        let url = self.url(
            "datastore_search",
            &search_params(MUNICIPAL_WASTE_ID, limit, q, filters),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "municipal_waste", &["result", "records"])?
            .iter()
            .map(MunicipalWaste::from_raw)
            .collect()
    }

    // --- air quality -------------------------------------------------

    /// Current air quality at every measuring station.
    pub fn air_quality(&mut self) -> Result<Vec<AirQuality>> {
        let url = self.url("air_sensors_get", &[("apikey", self.api_key.clone())]);
        let payload = self.get_payload(&url)?;
        records_at(&payload, "air_quality", &["result"])?
            .iter()
            .map(AirQuality::from_raw)
            .collect()
    }

    // --- safety ------------------------------------------------------

    /// Registered defibrillators; querying a single device by id includes
    /// its Base64 photo attachment.
    pub fn defibrillators(
        &mut self,
        defibrillator_id: Option<&str>,
    ) -> Result<Vec<Defibrillator>> {
        let with_attachment = defibrillator_id.is_some();
        let url = self.url(
            "aed_get",
            &[
                ("apikey", self.api_key.clone()),
                ("defibrillator_id", defibrillator_id.map(str::to_string)),
            ],
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "defibrillators", &["result"])?
            .iter()
            .map(|raw| Defibrillator::from_raw(raw, with_attachment))
            .collect()
    }

    // --- public transport --------------------------------------------

    /// Live vehicle positions; `vehicle_type` is 1 for buses, 2 for trams.
    pub fn vehicle_locations(
        &mut self,
        vehicle_type: u32,
        line: Option<&str>,
        brigade: Option<&str>,
    ) -> Result<Vec<VehicleLocation>> {
        let url = self.url(
            "busestrams_get",
            &[
                ("resource_id", Some(VEHICLE_LOCATIONS_ID.to_string())),
                ("apikey", self.api_key.clone()),
                ("type", Some(vehicle_type.to_string())),
                ("line", line.map(str::to_string)),
                ("brigade", brigade.map(str::to_string)),
            ],
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "vehicle_locations", &["result"])?
            .iter()
            .map(VehicleLocation::from_raw)
            .collect()
    }

    /// The stop set matching a stop name.
    pub fn stop_set(&mut self, stop_name: &str) -> Result<StopSet> {
        let url = self.url(
            "dbtimetable_get",
            &[
                ("id", Some(STOP_SET_ID.to_string())),
                ("name", Some(stop_name.to_string())),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        let rows = records_at(&payload, "stop_set", &["result"])?;
        let first = rows.first().ok_or(Error::Parse {
            expected: "non-empty result list",
            value: "[]".to_string(),
        })?;
        let values = positional_values(first, "stop_set")?;
        Ok(StopSet {
            stop_name: values
                .get(1)
                .cloned()
                .ok_or_else(|| missing("stop_set", "values[1]"))?,
            set_number: values
                .first()
                .cloned()
                .ok_or_else(|| missing("stop_set", "values[0]"))?,
        })
    }

    /// Lines serving one stop bar.
    pub fn stop_lines(&mut self, busstop_id: &str, busstop_nr: &str) -> Result<Vec<StopLine>> {
        let url = self.url(
            "dbtimetable_get",
            &[
                ("id", Some(STOP_LINES_ID.to_string())),
                ("busstopId", Some(busstop_id.to_string())),
                ("busstopNr", Some(busstop_nr.to_string())),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "stop_lines", &["result"])?
            .iter()
            .map(|row| {
                let values = positional_values(row, "stop_lines")?;
                Ok(StopLine {
                    line_number: values
                        .first()
                        .cloned()
                        .ok_or_else(|| missing("stop_lines", "values[0]"))?,
                })
            })
            .collect()
    }

    /// Departures of one line from one stop bar.
    pub fn line_timetable(
        &mut self,
        busstop_id: &str,
        busstop_nr: &str,
        line: &str,
    ) -> Result<Vec<LineTimetable>> {
        let url = self.url(
            "dbtimetable_get",
            &[
                ("id", Some(LINE_TIMETABLE_ID.to_string())),
                ("busstopId", Some(busstop_id.to_string())),
                ("busstopNr", Some(busstop_nr.to_string())),
                ("line", Some(line.to_string())),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        keyed_rows(&payload, "line_timetable")?
            .iter()
            .map(LineTimetable::from_raw)
            .collect()
    }

    /// Cycle track segments.
    pub fn cycle_tracks(
        &mut self,
        limit: Option<u32>,
        bbox: Option<&str>,
        circle: Option<&str>,
        query_filter: Option<&str>,
    ) -> Result<Vec<CycleTrack>> {
        let url = self.url(
            "wfsstore_get",
            &wfs_params(CYCLE_TRACKS_ID, limit, bbox, circle, query_filter, &self.api_key),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "cycle_tracks", &["result", "featureMemberProperties"])?
            .iter()
            .map(CycleTrack::from_raw)
            .collect()
    }

    /// Bike-share stations.
    pub fn cycle_stations(
        &mut self,
        limit: Option<u32>,
        bbox: Option<&str>,
        circle: Option<&str>,
        query_filter: Option<&str>,
    ) -> Result<Vec<CycleStation>> {
        let url = self.url(
            "wfsstore_get",
            &wfs_params(CYCLE_STATIONS_ID, limit, bbox, circle, query_filter, &self.api_key),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "cycle_stations", &["result", "featureMemberProperties"])?
            .iter()
            .map(CycleStation::from_raw)
            .collect()
    }

    /// Park-and-ride lots.
    pub fn parking_lots(
        &mut self,
        limit: Option<u32>,
        bbox: Option<&str>,
        circle: Option<&str>,
        query_filter: Option<&str>,
    ) -> Result<Vec<ParkingLot>> {
        let url = self.url(
            "wfsstore_get",
            &wfs_params(PARKING_LOTS_ID, limit, bbox, circle, query_filter, &self.api_key),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "parking_lots", &["result", "featureMemberProperties"])?
            .iter()
            .map(ParkingLot::from_raw)
            .collect()
    }

    /// Subway station entrances.
    pub fn subway_entrances(
        &mut self,
        limit: Option<u32>,
        bbox: Option<&str>,
        circle: Option<&str>,
        query_filter: Option<&str>,
    ) -> Result<Vec<SubwayEntrance>> {
        let url = self.url(
            "wfsstore_get",
            &wfs_params(SUBWAY_ENTRANCES_ID, limit, bbox, circle, query_filter, &self.api_key),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "subway_entrances", &["result", "featureMemberProperties"])?
            .iter()
            .map(SubwayEntrance::from_raw)
            .collect()
    }

    /// Static stop information; `current_day` switches to the dataset
    /// covering only the current day.
    pub fn stop_info(
        &mut self,
        page: Option<u32>,
        size: Option<u32>,
        sort_by: Option<&str>,
        current_day: bool,
    ) -> Result<Vec<StopInfo>> {
        let resource = if current_day { STOP_INFO_TODAY_ID } else { STOP_INFO_ID };
        let url = self.url(
            "dbstore_get",
            &[
                ("id", Some(resource.to_string())),
                ("page", page.map(|v| v.to_string())),
                ("size", size.map(|v| v.to_string())),
                ("sortBy", sort_by.map(str::to_string)),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        keyed_rows(&payload, "stop_info")?
            .iter()
            .map(StopInfo::from_raw)
            .collect()
    }

    // --- culture -----------------------------------------------------

    /// Theaters.
    pub fn theaters(
        &mut self,
        limit: Option<u32>,
        bbox: Option<&str>,
        circle: Option<&str>,
        query_filter: Option<&str>,
    ) -> Result<Vec<Theater>> {
        let url = self.url(
            "wfsstore_get",
            &wfs_params(THEATERS_ID, limit, bbox, circle, query_filter, &self.api_key),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "theaters", &["result", "featureMemberProperties"])?
            .iter()
            .map(Theater::from_raw)
            .collect()
    }

    // --- education ---------------------------------------------------

    /// Internet access reported by schools.
    pub fn internet_access(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<InternetAccess>> {
        let url = self.url(
            "datastore_search",
            &search_params(INTERNET_ACCESS_ID, limit, q, filters),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "internet_access", &["result", "records"])?
            .iter()
            .map(InternetAccess::from_raw)
            .collect()
    }

    /// Computer usage reported by schools.
    pub fn computer_purposes(
        &mut self,
        limit: Option<u32>,
        q: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<ComputerPurpose>> {
        let url = self.url(
            "datastore_search",
            &search_params(COMPUTER_PURPOSES_ID, limit, q, filters),
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "computer_purposes", &["result", "records"])?
            .iter()
            .map(ComputerPurpose::from_raw)
            .collect()
    }

    // --- road works --------------------------------------------------

    /// Companies performing road construction works.
    pub fn road_works_companies(&mut self) -> Result<Vec<RoadWorksCompany>> {
        let url = self.url(
            "get_companies",
            &[
                ("resource_id", Some(RW_COMPANIES_ID.to_string())),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "road_works_companies", &["result", "Items", "ComboItem"])?
            .iter()
            .map(RoadWorksCompany::from_raw)
            .collect()
    }

    /// The category tree of road construction works.
    pub fn road_works_categories(&mut self) -> Result<Vec<RoadWorksCategory>> {
        let url = self.url(
            "get_categories_tree",
            &[
                ("resource_id", Some(RW_CATEGORIES_ID.to_string())),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "road_works_categories", &["result", "CategoryTreeNode"])?
            .iter()
            .map(RoadWorksCategory::from_raw)
            .collect()
    }

    /// Districts with active road construction works.
    pub fn road_works_districts(&mut self) -> Result<Vec<RoadWorksDistrict>> {
        let url = self.url(
            "get_districts",
            &[
                ("resource_id", Some(RW_DISTRICTS_ID.to_string())),
                ("apikey", self.api_key.clone()),
            ],
        );
        let payload = self.get_payload(&url)?;
        records_at(&payload, "road_works_districts", &["result", "Items", "ComboItem"])?
            .iter()
            .map(RoadWorksDistrict::from_raw)
            .collect()
    }

    /// Open road-works investments. The upstream returns an empty page
    /// unless `page_size` is set; a single match arrives as a bare object
    /// and is wrapped into a one-element list.
    #[allow(clippy::too_many_arguments)]
    pub fn road_works_investments(
        &mut self,
        page_size: u32,
        start_index: Option<u32>,
        investment_name: Option<&str>,
        street_name: Option<&str>,
        company_code: Option<&str>,
        investment_number: Option<&str>,
    ) -> Result<Vec<RoadWorksInvestment>> {
        let url = self.url(
            "get_open_invests",
            &[
                ("resource_id", Some(RW_INVESTMENTS_ID.to_string())),
                ("apikey", self.api_key.clone()),
                ("pageSize", Some(page_size.to_string())),
                ("StartIndex", start_index.map(|v| v.to_string())),
                ("investmentName", investment_name.map(str::to_string)),
                ("streetName", street_name.map(str::to_string)),
                ("companyCode", company_code.map(str::to_string)),
                ("investmentNumber", investment_number.map(str::to_string)),
            ],
        );
        let payload = self.get_payload(&url)?;
        let items = value_at(&payload, "road_works_investments", &["result", "Items", "InvestItem"])?;
        match items {
            Value::Array(items) => items.iter().map(RoadWorksInvestment::from_raw).collect(),
            single @ Value::Object(_) => Ok(vec![RoadWorksInvestment::from_raw(single)?]),
            other => Err(Error::Parse {
                expected: "list or object",
                value: other.to_string(),
            }),
        }
    }
}

impl Default for WarsawClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate `base + endpoint + "?"` and the non-null parameters in
/// insertion order. Values are passed through unescaped — the upstream
/// expects raw commas and colons in `bbox`/`circle`/filter values.
pub(crate) fn build_url(base: &str, endpoint: &str, params: &[(&str, Option<String>)]) -> String {
    let query = params
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}={v}")))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}{endpoint}?{query}")
}

/// Match the envelope against the upstream's known error payloads.
fn classify(payload: &Value) -> Option<Error> {
    let result = payload.get("result").and_then(Value::as_str);
    if matches!(result, Some(RESULT_BAD_QUERY) | Some(RESULT_EMPTY_FEATURES)) {
        return Some(Error::InvalidQuery);
    }
    if result == Some("false") {
        match payload.get("error").and_then(Value::as_str) {
            Some(ERROR_BAD_API_KEY) => return Some(Error::InvalidApiKey),
            Some(ERROR_UNAUTHORIZED) => return Some(Error::Unauthorized),
            _ => {}
        }
    }
    None
}

fn search_params(
    resource_id: &str,
    limit: Option<u32>,
    q: Option<&str>,
    filters: Option<&str>,
) -> [(&'static str, Option<String>); 4] {
    [
        ("resource_id", Some(resource_id.to_string())),
        ("limit", limit.map(|v| v.to_string())),
        ("q", q.map(str::to_string)),
        ("filters", filters.map(str::to_string)),
    ]
}

fn wfs_params(
    resource_id: &str,
    limit: Option<u32>,
    bbox: Option<&str>,
    circle: Option<&str>,
    query_filter: Option<&str>,
    api_key: &Option<String>,
) -> [(&'static str, Option<String>); 6] {
    [
        ("id", Some(resource_id.to_string())),
        ("limit", limit.map(|v| v.to_string())),
        ("bbox", bbox.map(str::to_string)),
        ("circle", circle.map(str::to_string)),
        ("filter", query_filter.map(str::to_string)),
        ("apikey", api_key.clone()),
    ]
}

/// Walk `path` into the payload and expect a list there.
fn records_at<'a>(
    payload: &'a Value,
    dataset: &'static str,
    path: &[&str],
) -> Result<&'a Vec<Value>> {
    match value_at(payload, dataset, path)? {
        Value::Array(items) => Ok(items),
        other => Err(Error::Parse {
            expected: "list",
            value: other.to_string(),
        }),
    }
}

fn value_at<'a>(payload: &'a Value, dataset: &'static str, path: &[&str]) -> Result<&'a Value> {
    let mut current = payload;
    for key in path {
        current = current.get(key).ok_or_else(|| missing(dataset, key))?;
    }
    Ok(current)
}

/// The `value` texts of a `values` pair list, in payload order. Used for
/// the two endpoints whose rows are positional rather than keyed.
fn positional_values(row: &Value, dataset: &'static str) -> Result<Vec<String>> {
    let pairs = match row.get("values") {
        Some(Value::Array(pairs)) => pairs,
        Some(other) => {
            return Err(Error::Parse {
                expected: "list of key/value pairs",
                value: other.to_string(),
            })
        }
        None => return Err(missing(dataset, "values")),
    };
    pairs
        .iter()
        .map(|pair| {
            pair.get("value")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| missing(dataset, "value"))
        })
        .collect()
}

/// Collapse `result[].values` key/value pairs into plain JSON objects.
fn keyed_rows(payload: &Value, dataset: &'static str) -> Result<Vec<Value>> {
    records_at(payload, dataset, &["result"])?
        .iter()
        .map(|row| {
            let pairs = match row.get("values") {
                Some(Value::Array(pairs)) => pairs,
                Some(other) => {
                    return Err(Error::Parse {
                        expected: "list of key/value pairs",
                        value: other.to_string(),
                    })
                }
                None => return Err(missing(dataset, "values")),
            };
            let mut map = Map::new();
            for pair in pairs {
                let key = pair
                    .get("key")
                    .and_then(Value::as_str)
                    .ok_or_else(|| missing(dataset, "key"))?;
                let value = pair.get("value").cloned().unwrap_or(Value::Null);
                map.insert(key.to_string(), value);
            }
            Ok(Value::Object(map))
        })
        .collect()
}

fn missing(dataset: &'static str, key: &str) -> Error {
    Error::MissingField {
        dataset,
        field: key.to_string(),
    }
}
