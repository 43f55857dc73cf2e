//! Listing records, search hits, and configuration for Vicinity.
//!
//! This module provides the serializable types shared across the crate:
//! the listing record in its historically grown shape (structured `geo`
//! field plus legacy scalar latitude/longitude), the distance-tagged
//! search hit, and the pipeline configuration.

use serde::de::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Visible to searches.
    Active,
    /// Newly created listings start out inactive.
    #[default]
    Inactive,
}

/// Structured geolocation field in GeoJSON position order.
///
/// `coordinates` is `[longitude, latitude]`. Records written before the
/// schema migration may carry a malformed pair (wrong length, non-finite
/// values); resolution treats those as absent rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Geometry kind tag, always `"Point"` for listings.
    #[serde(rename = "type", default = "GeoPoint::default_kind")]
    pub kind: String,
    /// `[longitude, latitude]` pair.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    fn default_kind() -> String {
        "Point".to_string()
    }

    /// Create a point geometry from a longitude/latitude pair.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            kind: Self::default_kind(),
            coordinates: vec![lng, lat],
        }
    }
}

/// A listing record as supplied by the record store.
///
/// Location may be stored in either of two legacy shapes: the structured
/// [`GeoPoint`] field, or the older scalar `latitude`/`longitude` pair.
/// Both, one, or neither may be present on any given record; see
/// [`crate::resolve::resolve_coordinates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing identifier.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Free-text address. Never geocoded; display only.
    #[serde(default)]
    pub location: Option<String>,
    /// Structured geolocation (preferred shape).
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    /// Legacy scalar latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Legacy scalar longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Sleeping capacity.
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Listing category, e.g. `"apartment"`.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub status: ListingStatus,
}

impl Listing {
    /// Create a listing with a fresh id and no location data.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            price: None,
            location: None,
            geo: None,
            latitude: None,
            longitude: None,
            capacity: None,
            images: Vec::new(),
            category: None,
            facilities: Vec::new(),
            status: ListingStatus::default(),
        }
    }

    /// Create a listing located at a longitude/latitude pair.
    ///
    /// Writes both location shapes, the same way the record store does on
    /// creation: the structured `geo` field and the scalar pair.
    pub fn with_coordinates(title: impl Into<String>, lng: f64, lat: f64) -> Self {
        let mut listing = Self::new(title);
        listing.geo = Some(GeoPoint::new(lng, lat));
        listing.longitude = Some(lng);
        listing.latitude = Some(lat);
        listing
    }

    /// Consume and return the listing with `status` set to `Active`.
    pub fn activated(mut self) -> Self {
        self.status = ListingStatus::Active;
        self
    }
}

/// A listing returned from a search, optionally tagged with road distance.
///
/// `distance_km` is present exactly when the spatial pipeline ran; the
/// unfiltered bypass mode returns hits without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub listing: Listing,
    /// Road distance from the user position in kilometers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl SearchHit {
    /// A hit produced by the spatial pipeline.
    pub fn ranked(listing: Listing, distance_km: f64) -> Self {
        Self {
            listing,
            distance_km: Some(distance_km),
        }
    }

    /// A hit produced by the unfiltered bypass mode.
    pub fn unranked(listing: Listing) -> Self {
        Self {
            listing,
            distance_km: None,
        }
    }
}

/// Search pipeline configuration.
///
/// Designed to be easily serializable and loadable from JSON while keeping
/// complexity minimal.
///
/// # Example
///
/// ```rust
/// use vicinity::Config;
///
/// let config = Config::default();
///
/// let json = r#"{
///     "node_capacity": 8,
///     "max_tree_depth": 12
/// }"#;
/// let config: Config = Config::from_json(json).unwrap();
/// assert_eq!(config.node_capacity, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Points a quadtree node buffers before subdividing.
    #[serde(default = "Config::default_node_capacity")]
    pub node_capacity: usize,

    /// Maximum quadtree depth. Nodes at this depth stop subdividing and
    /// buffer past `node_capacity`, which bounds recursion under
    /// coordinate clustering.
    #[serde(default = "Config::default_max_tree_depth")]
    pub max_tree_depth: usize,

    /// Kilometers per degree used to derive the search box from a distance
    /// threshold. 111 km approximates one degree of latitude; reusing it
    /// for longitude overstates the box at high latitudes, which keeps the
    /// box a superset of the true search radius.
    #[serde(default = "Config::default_km_per_degree")]
    pub km_per_degree: f64,
}

impl Config {
    const fn default_node_capacity() -> usize {
        4
    }

    const fn default_max_tree_depth() -> usize {
        16
    }

    const fn default_km_per_degree() -> f64 {
        111.0
    }

    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity >= 1, "Node capacity must be at least 1");
        self.node_capacity = capacity;
        self
    }

    pub fn with_max_tree_depth(mut self, depth: usize) -> Self {
        assert!(depth >= 1, "Max tree depth must be at least 1");
        self.max_tree_depth = depth;
        self
    }

    pub fn with_km_per_degree(mut self, km: f64) -> Self {
        assert!(
            km.is_finite() && km > 0.0,
            "Kilometers per degree must be finite and positive"
        );
        self.km_per_degree = km;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.node_capacity < 1 {
            return Err("Node capacity must be at least 1".to_string());
        }

        if self.max_tree_depth < 1 {
            return Err("Max tree depth must be at least 1".to_string());
        }

        if !self.km_per_degree.is_finite() || self.km_per_degree <= 0.0 {
            return Err("Kilometers per degree must be finite and positive".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_capacity: Self::default_node_capacity(),
            max_tree_depth: Self::default_max_tree_depth(),
            km_per_degree: Self::default_km_per_degree(),
        }
    }
}
