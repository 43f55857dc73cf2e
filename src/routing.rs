//! Road-distance resolution against an external routing service.
//!
//! The pipeline treats routing as a black box behind [`RoadDistance`]: a
//! lookup either yields a positive finite distance in kilometers or the
//! `f64::INFINITY` sentinel. Every failure mode (missing credential,
//! malformed coordinate, network error, no route found) is encoded in the
//! sentinel so a single failing lookup can never fail a whole request.

#[cfg(feature = "geoapify")]
use crate::error::{Result, VicinityError};
use geo::Point;
use std::future::Future;
#[cfg(feature = "geoapify")]
use std::time::Duration;

/// Mean Earth radius in kilometers for haversine calculations.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Resolver for road distance between two coordinates.
///
/// # Contract
///
/// `road_distance_km` returns a positive finite distance in kilometers on
/// success and `f64::INFINITY` on any failure. Implementations must not
/// panic or surface errors; the sentinel guarantees exclusion under any
/// finite distance threshold.
pub trait RoadDistance {
    /// Travel distance in kilometers from `from` to `to`, or
    /// `f64::INFINITY` when it cannot be resolved.
    fn road_distance_km(&self, from: Point, to: Point) -> impl Future<Output = f64> + Send;
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: Point, to: Point) -> f64 {
    let lat1_rad = from.y().to_radians();
    let lat2_rad = to.y().to_radians();
    let delta_lat = (to.y() - from.y()).to_radians();
    let delta_lon = (to.x() - from.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Straight-line router backed by the haversine formula.
///
/// Useful when no routing service is configured and in tests; road networks
/// are never shorter than the great circle, so distances from this router
/// are a lower bound on the real travel distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl RoadDistance for GreatCircle {
    async fn road_distance_km(&self, from: Point, to: Point) -> f64 {
        if ![from.x(), from.y(), to.x(), to.y()]
            .iter()
            .all(|v| v.is_finite())
        {
            return f64::INFINITY;
        }
        haversine_km(from, to)
    }
}

/// Default Geoapify API endpoint.
#[cfg(feature = "geoapify")]
pub const GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com";

/// Routing client for the Geoapify routing API.
///
/// The API credential is injected at construction rather than read from
/// ambient process state, so two clients with different credentials can
/// coexist and tests can construct keyless clients deliberately.
#[cfg(feature = "geoapify")]
#[derive(Debug, Clone)]
pub struct GeoapifyClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[cfg(feature = "geoapify")]
impl GeoapifyClient {
    /// Create a client against the production Geoapify endpoint.
    ///
    /// An empty `api_key` is accepted but logged: every lookup through such
    /// a client resolves as unreachable, which empties any distance-filtered
    /// result. That situation is indistinguishable from "no nearby listings"
    /// in the response, so the log line is the signal to watch for.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, GEOAPIFY_BASE_URL)
    }

    /// Create a client against a custom endpoint (e.g. a local stub).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            log::warn!(
                "geoapify client constructed without an API key; all distance lookups will be unreachable"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| VicinityError::Routing(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_distance_km(&self, from: Point, to: Point) -> Option<f64> {
        let url = format!(
            "{}/v1/routing?waypoints={},{}|{},{}&mode=drive&apiKey={}",
            self.base_url,
            from.y(),
            from.x(),
            to.y(),
            to.x(),
            self.api_key,
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("routing request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            log::debug!("routing service answered {}", response.status());
            return None;
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("routing response was not valid JSON: {e}");
                return None;
            }
        };

        // Route distance lives in the first feature, in meters.
        body.pointer("/features/0/properties/distance")
            .and_then(serde_json::Value::as_f64)
            .filter(|meters| meters.is_finite() && *meters >= 0.0)
            .map(|meters| meters / 1000.0)
    }
}

#[cfg(feature = "geoapify")]
impl RoadDistance for GeoapifyClient {
    async fn road_distance_km(&self, from: Point, to: Point) -> f64 {
        if ![from.x(), from.y(), to.x(), to.y()]
            .iter()
            .all(|v| v.is_finite())
        {
            return f64::INFINITY;
        }
        if self.api_key.is_empty() {
            return f64::INFINITY;
        }

        self.fetch_distance_km(from, to)
            .await
            .unwrap_or(f64::INFINITY)
    }
}
