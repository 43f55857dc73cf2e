//! Canonical coordinate extraction from legacy listing shapes.

use crate::types::Listing;
use geo::Point;

/// Extract a canonical position from a listing record.
///
/// Location has been stored in two shapes over the record schema's history,
/// tried in order:
///
/// 1. the structured `geo` field with a two-element `[longitude, latitude]`
///    pair,
/// 2. the older scalar `latitude`/`longitude` fields.
///
/// Returns `None` when neither shape yields a usable pair. Absence is a
/// normal outcome, not an error: records created before the schema change
/// may lack the structured field, and a location-filtered query can simply
/// never match them. Non-finite values count as unusable.
pub fn resolve_coordinates(listing: &Listing) -> Option<Point> {
    if let Some(geo) = &listing.geo
        && let &[lng, lat] = &geo.coordinates[..]
        && lng.is_finite()
        && lat.is_finite()
    {
        return Some(Point::new(lng, lat));
    }

    match (listing.longitude, listing.latitude) {
        (Some(lng), Some(lat)) if lng.is_finite() && lat.is_finite() => {
            Some(Point::new(lng, lat))
        }
        _ => None,
    }
}

impl Listing {
    /// Canonical position of this listing, if it has one.
    ///
    /// See [`resolve_coordinates`].
    pub fn coordinates(&self) -> Option<Point> {
        resolve_coordinates(self)
    }
}
