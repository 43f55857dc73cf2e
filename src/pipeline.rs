//! The distance-filter pipeline: bounding-box prefilter, concurrent
//! road-distance resolution, threshold filter, ordering.

use crate::quadtree::{QuadTree, Rect, SpatialPoint};
use crate::resolve::resolve_coordinates;
use crate::routing::RoadDistance;
use crate::sort::sort_by_distance;
use crate::types::{Config, Listing, SearchHit};
use futures::future::join_all;
use geo::Point;

/// Orchestrates one spatial search over a candidate set.
///
/// For every request the pipeline builds a fresh quadtree over the whole
/// longitude/latitude domain, prunes the candidates to a square around the
/// user, resolves exact road distances through the injected [`RoadDistance`]
/// collaborator, drops everything past the threshold, and orders the rest
/// ascending by distance. The tree lives only for the duration of the call,
/// so nothing here is shared between requests.
///
/// The per-candidate lookups run as one scatter/gather fan-out: all futures
/// are joined before filtering, and each produces an independent distance
/// keyed to its own candidate. Dropping the returned future abandons any
/// in-flight lookups without corrupting state.
#[derive(Debug, Clone)]
pub struct SearchPipeline<R> {
    router: R,
    config: Config,
}

impl<R: RoadDistance> SearchPipeline<R> {
    /// Create a pipeline with the default configuration.
    pub fn new(router: R) -> Self {
        Self::with_config(router, Config::default())
    }

    /// Create a pipeline with an explicit configuration.
    pub fn with_config(router: R, config: Config) -> Self {
        Self { router, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Run the full pipeline over `listings`.
    ///
    /// Candidates without resolvable coordinates are skipped before
    /// indexing; they can never match a location-filtered query. A lookup
    /// that resolves to the unreachable sentinel is dropped by the
    /// threshold filter like any other too-distant candidate.
    pub async fn filter_by_distance(
        &self,
        listings: Vec<Listing>,
        user: Point,
        max_distance_km: f64,
    ) -> Vec<SearchHit> {
        let mut tree = QuadTree::with_max_depth(
            Rect::WORLD,
            self.config.node_capacity,
            self.config.max_tree_depth,
        );

        // Index candidates by position; payloads are indexes into `listings`.
        let mut positions: Vec<Option<Point>> = Vec::with_capacity(listings.len());
        for (index, listing) in listings.iter().enumerate() {
            let position = resolve_coordinates(listing);
            if position.is_none() {
                log::debug!("listing {} has no resolvable coordinates; skipping", listing.id);
            }
            positions.push(position);
            if let Some(position) = position {
                tree.insert(SpatialPoint::new(position, index));
            }
        }

        // A square superset of the true search circle: the flat-earth
        // divisor overstates the box at high latitudes, never understates.
        let half_extent = max_distance_km / self.config.km_per_degree;
        let search_region = Rect::around(user, half_extent);
        let candidates = tree.query(&search_region);
        log::debug!(
            "spatial prefilter kept {} of {} indexed listings",
            candidates.len(),
            tree.len(),
        );

        let targets: Vec<(usize, Point)> = candidates
            .iter()
            .filter_map(|&index| positions[index].map(|p| (index, p)))
            .collect();

        let distances = join_all(
            targets
                .iter()
                .map(|&(_, position)| self.router.road_distance_km(user, position)),
        )
        .await;

        let unreachable = distances.iter().filter(|d| d.is_infinite()).count();
        if unreachable > 0 && unreachable == targets.len() {
            log::warn!(
                "all {unreachable} road-distance lookups were unreachable; \
                 check the routing credential"
            );
        }

        let mut hits: Vec<SearchHit> = targets
            .into_iter()
            .zip(distances)
            .filter(|&(_, distance)| distance.is_finite() && distance <= max_distance_km)
            .map(|((index, _), distance)| SearchHit::ranked(listings[index].clone(), distance))
            .collect();

        sort_by_distance(&mut hits);
        hits
    }
}
