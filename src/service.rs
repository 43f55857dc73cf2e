//! The search service facade: record store + distance pipeline.

use crate::error::Result;
use crate::pipeline::SearchPipeline;
use crate::routing::RoadDistance;
use crate::store::{ListingFilter, ListingStore};
use crate::types::{Config, SearchHit};
use geo::Point;
use serde::{Deserialize, Serialize};

/// Location constraint of a search.
///
/// All three parameters are required together; [`NearQuery::from_params`]
/// collapses partial presence to `None`, which selects the unfiltered
/// bypass mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearQuery {
    pub lat: f64,
    pub lng: f64,
    pub max_distance_km: f64,
}

impl NearQuery {
    pub fn new(lat: f64, lng: f64, max_distance_km: f64) -> Self {
        Self {
            lat,
            lng,
            max_distance_km,
        }
    }

    /// Build a location constraint from independently optional parameters.
    ///
    /// Returns `None` unless all three are present. Partial presence is not
    /// an error; it just deactivates the spatial pipeline.
    pub fn from_params(
        lat: Option<f64>,
        lng: Option<f64>,
        max_distance_km: Option<f64>,
    ) -> Option<Self> {
        match (lat, lng, max_distance_km) {
            (Some(lat), Some(lng), Some(max_distance_km)) => {
                Some(Self::new(lat, lng, max_distance_km))
            }
            _ => None,
        }
    }

    /// The user position as a longitude/latitude point.
    pub fn user_position(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

/// A full search request: record filters plus an optional location
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub filter: ListingFilter,
    #[serde(default)]
    pub near: Option<NearQuery>,
}

impl SearchQuery {
    /// A query matching every listing, without spatial filtering.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// A location-constrained query matching every listing.
    pub fn near(lat: f64, lng: f64, max_distance_km: f64) -> Self {
        Self {
            filter: ListingFilter::default(),
            near: Some(NearQuery::new(lat, lng, max_distance_km)),
        }
    }

    pub fn with_filter(mut self, filter: ListingFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// The assembled search service.
///
/// Owns its two collaborators: a [`ListingStore`] supplying candidate
/// records and a [`RoadDistance`] router resolving travel distances. Both
/// are injected at construction; the service holds no ambient state.
#[derive(Debug, Clone)]
pub struct Vicinity<S, R> {
    store: S,
    pipeline: SearchPipeline<R>,
}

impl<S: ListingStore, R: RoadDistance> Vicinity<S, R> {
    /// Assemble a service with the default pipeline configuration.
    pub fn new(store: S, router: R) -> Self {
        Self::with_config(store, router, Config::default())
    }

    /// Assemble a service with an explicit pipeline configuration.
    pub fn with_config(store: S, router: R, config: Config) -> Self {
        Self {
            store,
            pipeline: SearchPipeline::with_config(router, config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pipeline(&self) -> &SearchPipeline<R> {
        &self.pipeline
    }

    /// Execute a search.
    ///
    /// Record filters apply first. With a location constraint the distance
    /// pipeline runs and hits come back nearest-first with `distance_km`
    /// attached; without one, every matching listing is returned untagged
    /// in store-native order. Only a store failure fails the request.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        let listings = self.store.find(&query.filter)?;

        let Some(near) = &query.near else {
            return Ok(listings.into_iter().map(SearchHit::unranked).collect());
        };

        Ok(self
            .pipeline
            .filter_by_distance(listings, near.user_position(), near.max_distance_km)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_requires_all_three() {
        assert!(NearQuery::from_params(Some(1.0), Some(2.0), Some(3.0)).is_some());
        assert!(NearQuery::from_params(None, Some(2.0), Some(3.0)).is_none());
        assert!(NearQuery::from_params(Some(1.0), None, Some(3.0)).is_none());
        assert!(NearQuery::from_params(Some(1.0), Some(2.0), None).is_none());
        assert!(NearQuery::from_params(None, None, None).is_none());
    }

    #[test]
    fn test_user_position_is_lng_lat() {
        let near = NearQuery::new(40.7128, -74.0060, 10.0);
        let position = near.user_position();
        assert_eq!(position.x(), -74.0060);
        assert_eq!(position.y(), 40.7128);
    }

    #[test]
    fn test_query_serialization_roundtrip() {
        let query = SearchQuery::near(40.7, -74.0, 25.0);
        let json = serde_json::to_string(&query).unwrap();
        let back: SearchQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
