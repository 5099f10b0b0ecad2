//! Google Maps Platform HTTP adapters for the planner's collaborators.
//!
//! All calls are blocking. Each client method maps one service request; the
//! planner decides what a failure means.

use std::env;
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CollaboratorError;
use crate::geo::Coordinate;
use crate::places::RawPlace;
use crate::traits::{Geocoder, ImageFinder, LocationProvider, PlaceSearch, RouteLeg, RouteProvider};

/// Pause between nearby-search requests.
pub const DEFAULT_PLACE_DELAY: Duration = Duration::from_secs(2);

/// Results requested per place type.
const PLACES_PER_TYPE: usize = 20;

const ROUTES_FIELD_MASK: &str = "routes.distanceMeters,routes.duration";
const PLACES_FIELD_MASK: &str = "places.displayName,places.accessibilityOptions,places.location,places.currentOpeningHours,places.id";

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    /// Custom search engine id used for image lookups.
    pub search_engine_id: String,
    pub timeout_secs: u64,
    pub place_delay: Duration,
    pub routes_url: String,
    pub geocode_url: String,
    pub geolocation_url: String,
    pub places_url: String,
    pub image_search_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_engine_id: String::new(),
            timeout_secs: 10,
            place_delay: DEFAULT_PLACE_DELAY,
            routes_url: "https://routes.googleapis.com/directions/v2:computeRoutes".to_string(),
            geocode_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            geolocation_url: "https://www.googleapis.com/geolocation/v1/geolocate".to_string(),
            places_url: "https://places.googleapis.com/v1/places:searchNearby".to_string(),
            image_search_url: "https://www.googleapis.com/customsearch/v1".to_string(),
        }
    }
}

impl GoogleConfig {
    /// Read `API_KEY` (required) and `SEARCH_ID` (optional) from the environment.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            api_key: env::var("API_KEY")?,
            search_engine_id: env::var("SEARCH_ID").unwrap_or_default(),
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct GoogleClient {
    config: GoogleConfig,
    client: reqwest::blocking::Client,
}

impl GoogleClient {
    pub fn new(config: GoogleConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }

    fn search_place_type(
        &self,
        place_type: &str,
        center: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<RawPlace>, CollaboratorError> {
        let response = self
            .client
            .post(&self.config.places_url)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .header("X-Goog-FieldMask", PLACES_FIELD_MASK)
            .json(&nearby_request(place_type, center, radius_m))
            .send()?;

        let body: NearbySearchResponse = read_json(response)?;
        Ok(body.places)
    }
}

impl RouteProvider for GoogleClient {
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, CollaboratorError> {
        let response = self
            .client
            .post(&self.config.routes_url)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .header("X-Goog-FieldMask", ROUTES_FIELD_MASK)
            .json(&route_request(origin, destination))
            .send()?;

        leg_from_response(read_json(response)?)
    }
}

impl Geocoder for GoogleClient {
    fn geocode(&self, address: &str) -> Result<Coordinate, CollaboratorError> {
        let response = self
            .client
            .get(&self.config.geocode_url)
            .query(&[("address", address), ("key", self.config.api_key.as_str())])
            .send()?;

        let body: GeocodeResponse = read_json(response)?;
        body.results
            .into_iter()
            .next()
            .ok_or(CollaboratorError::EmptyResponse)
            .and_then(|result| result.geometry.location.coordinate())
    }
}

impl LocationProvider for GoogleClient {
    fn current_location(&self) -> Result<Coordinate, CollaboratorError> {
        let response = self
            .client
            .post(&self.config.geolocation_url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&serde_json::json!({}))
            .send()?;

        let body: GeolocationResponse = read_json(response)?;
        body.location
            .ok_or(CollaboratorError::EmptyResponse)
            .and_then(|location| location.coordinate())
    }
}

impl PlaceSearch for GoogleClient {
    /// One request per place type; places are de-duplicated by id and capped
    /// at `max_results`. A failed place type is skipped.
    fn search_nearby(
        &self,
        keywords: &[String],
        center: Coordinate,
        radius_m: f64,
        max_results: usize,
    ) -> Result<Vec<RawPlace>, CollaboratorError> {
        let mut places: Vec<RawPlace> = Vec::new();

        for (i, place_type) in keywords.iter().enumerate() {
            if places.len() >= max_results {
                break;
            }
            if i > 0 && !self.config.place_delay.is_zero() {
                thread::sleep(self.config.place_delay);
            }

            let found = match self.search_place_type(place_type, center, radius_m) {
                Ok(found) => found,
                Err(err) => {
                    warn!(place_type = %place_type, error = %err, "nearby search failed");
                    continue;
                }
            };
            merge_places(&mut places, found, max_results);
        }

        debug!(types = keywords.len(), places = places.len(), "nearby search finished");
        Ok(places)
    }
}

impl ImageFinder for GoogleClient {
    fn find_representative_image(&self, query: &str) -> Result<Option<String>, CollaboratorError> {
        let response = self
            .client
            .get(&self.config.image_search_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.search_engine_id.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("num", "1"),
            ])
            .send()?;

        let body: ImageSearchResponse = read_json(response)?;
        Ok(body.items.into_iter().next().map(|item| item.link))
    }
}

fn read_json<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, CollaboratorError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CollaboratorError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response.json::<T>()?)
}

/// Append places with unseen ids until `max_results` is reached. Places
/// without an id are dropped.
fn merge_places(places: &mut Vec<RawPlace>, found: Vec<RawPlace>, max_results: usize) {
    for place in found {
        if places.len() >= max_results {
            break;
        }
        let Some(id) = place.id.as_deref() else {
            continue;
        };
        if places.iter().any(|seen| seen.id.as_deref() == Some(id)) {
            continue;
        }
        places.push(place);
    }
}

// ============================================================================
// Routes API
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: RouteWaypoint,
    destination: RouteWaypoint,
    routing_preference: &'static str,
}

#[derive(Debug, Serialize)]
struct RouteWaypoint {
    location: RouteLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteLocation {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinate> for RouteWaypoint {
    fn from(c: Coordinate) -> Self {
        Self {
            location: RouteLocation {
                lat_lng: LatLng {
                    latitude: c.lat,
                    longitude: c.lon,
                },
            },
        }
    }
}

fn route_request(origin: Coordinate, destination: Coordinate) -> ComputeRoutesRequest {
    ComputeRoutesRequest {
        origin: origin.into(),
        destination: destination.into(),
        routing_preference: "TRAFFIC_AWARE",
    }
}

#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteBody {
    #[serde(default)]
    distance_meters: f64,
    duration: Option<DurationValue>,
}

/// Route duration, either plain seconds or a string such as `"754s"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Seconds(f64),
    Text(String),
}

impl DurationValue {
    fn seconds(&self) -> Result<f64, CollaboratorError> {
        match self {
            DurationValue::Seconds(secs) => Ok(*secs),
            DurationValue::Text(text) => {
                let trimmed = text.trim();
                let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);
                digits
                    .parse::<f64>()
                    .map_err(|_| CollaboratorError::Malformed(format!("duration {:?}", text)))
            }
        }
    }
}

fn leg_from_response(body: ComputeRoutesResponse) -> Result<RouteLeg, CollaboratorError> {
    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or(CollaboratorError::EmptyResponse)?;

    let duration_seconds = match route.duration {
        Some(duration) => duration.seconds()?,
        None => 0.0,
    };

    Ok(RouteLeg {
        distance_meters: route.distance_meters,
        duration_seconds,
    })
}

// ============================================================================
// Places, geocoding, geolocation, image search
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NearbySearchRequest {
    included_types: Vec<String>,
    max_result_count: usize,
    location_restriction: LocationRestriction,
}

#[derive(Debug, Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Debug, Serialize)]
struct Circle {
    center: LatLng,
    radius: f64,
}

fn nearby_request(place_type: &str, center: Coordinate, radius_m: f64) -> NearbySearchRequest {
    NearbySearchRequest {
        included_types: vec![place_type.to_string()],
        max_result_count: PLACES_PER_TYPE,
        location_restriction: LocationRestriction {
            circle: Circle {
                center: LatLng {
                    latitude: center.lat,
                    longitude: center.lon,
                },
                radius: radius_m,
            },
        },
    }
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    places: Vec<RawPlace>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLngLiteral,
}

#[derive(Debug, Deserialize)]
struct LatLngLiteral {
    lat: Option<f64>,
    lng: Option<f64>,
}

impl LatLngLiteral {
    fn coordinate(&self) -> Result<Coordinate, CollaboratorError> {
        Coordinate::from_parts(self.lat, self.lng)
            .ok_or_else(|| CollaboratorError::Malformed("location without lat/lng".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    location: Option<LatLngLiteral>,
}

#[derive(Debug, Deserialize)]
struct ImageSearchResponse {
    #[serde(default)]
    items: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    link: String,
}
