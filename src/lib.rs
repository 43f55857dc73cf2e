//! Embedded geospatial search pipeline for distance-ranked nearby-listing
//! lookups.
//!
//! Given a user location and a maximum travel distance, `vicinity` prunes a
//! candidate set with a per-request region quadtree, resolves exact road
//! distances through an injected routing collaborator (concurrently, with
//! per-candidate failure absorption), and returns the survivors ordered
//! nearest-first.
//!
//! ```rust
//! use vicinity::{GreatCircle, Listing, ListingStore, MemoryStore, SearchQuery, Vicinity};
//!
//! let store = MemoryStore::new();
//! store.insert(Listing::with_coordinates("Harbor loft", -0.1278, 51.5074))?;
//! store.insert(Listing::with_coordinates("Airport pod", -0.4543, 51.4700))?;
//!
//! let service = Vicinity::new(store, GreatCircle);
//!
//! // Find everything within 60 km of central London, nearest first.
//! let query = SearchQuery::near(51.5074, -0.1278, 60.0);
//! let hits = futures::executor::block_on(service.search(&query))?;
//! assert_eq!(hits[0].listing.title, "Harbor loft");
//! assert!(hits[0].distance_km.unwrap() < hits[1].distance_km.unwrap());
//!
//! // Without a location constraint the store order comes back untagged.
//! let all = futures::executor::block_on(service.search(&SearchQuery::unfiltered()))?;
//! assert_eq!(all.len(), 2);
//! assert!(all[0].distance_km.is_none());
//! # Ok::<(), vicinity::VicinityError>(())
//! ```

pub mod error;
pub mod pipeline;
pub mod quadtree;
pub mod resolve;
pub mod routing;
pub mod service;
pub mod sort;
pub mod store;
pub mod types;

pub use error::{Result, VicinityError};

pub use quadtree::{QuadTree, Rect, SpatialPoint};

pub use resolve::resolve_coordinates;

pub use pipeline::SearchPipeline;
#[cfg(feature = "geoapify")]
pub use routing::GeoapifyClient;
pub use routing::{GreatCircle, RoadDistance, haversine_km};
pub use sort::sort_by_distance;

pub use service::{NearQuery, SearchQuery, Vicinity};
pub use store::{ListingFilter, ListingStore, MemoryStore};
pub use types::{Config, GeoPoint, Listing, ListingStatus, SearchHit};

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, Vicinity, VicinityError};

    pub use crate::{NearQuery, SearchQuery};

    pub use crate::{ListingFilter, ListingStore, MemoryStore};

    pub use crate::{Config, Listing, ListingStatus, SearchHit};

    #[cfg(feature = "geoapify")]
    pub use crate::GeoapifyClient;
    pub use crate::{GreatCircle, RoadDistance};

    pub use geo::Point;
}
