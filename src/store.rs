//! Record store abstraction for listing candidates.
//!
//! The search service only needs one read operation: fetch every listing
//! matching a set of equality/membership filters, in store-native order.
//! [`ListingStore`] abstracts that collaborator; [`MemoryStore`] is the
//! in-process implementation used in tests and embedded deployments.

use crate::error::{Result, VicinityError};
use crate::types::{Listing, ListingStatus};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Equality/membership filters applied before the spatial stage.
///
/// An empty filter matches every listing. `facilities` is a membership
/// filter: a listing matches only when it offers all requested facilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

impl ListingFilter {
    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facilities.push(facility.into());
        self
    }

    /// Check whether a listing satisfies every set filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(status) = self.status
            && listing.status != status
        {
            return false;
        }

        if let Some(category) = &self.category
            && listing.category.as_deref() != Some(category.as_str())
        {
            return false;
        }

        self.facilities
            .iter()
            .all(|required| listing.facilities.iter().any(|f| f == required))
    }
}

/// Trait for record store implementations.
///
/// The search core consumes only `find`; the mutating operations exist so
/// embedded callers can manage records through the same handle. Transport,
/// validation, and access control stay with the caller.
pub trait ListingStore: Send + Sync {
    /// All listings matching `filter`, in store-native order.
    fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;

    /// Fetch a listing by id.
    fn get(&self, id: Uuid) -> Result<Option<Listing>>;

    /// Add a new listing; fails on a duplicate id.
    fn insert(&self, listing: Listing) -> Result<Uuid>;

    /// Replace an existing listing in place, keeping its store position.
    fn update(&self, listing: Listing) -> Result<()>;

    /// Number of stored listings.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[derive(Default)]
struct StoreInner {
    /// Listings in insertion order; this order is the store-native order
    /// surfaced by `find`.
    listings: Vec<Listing>,
    /// Id to slot index.
    by_id: FxHashMap<Uuid, usize>,
}

/// In-memory listing store.
///
/// Cheaply cloneable; clones share the same underlying records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `listings`, preserving their order.
    pub fn with_listings(listings: impl IntoIterator<Item = Listing>) -> Result<Self> {
        let store = Self::new();
        for listing in listings {
            store.insert(listing)?;
        }
        Ok(store)
    }
}

impl ListingStore for MemoryStore {
    fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let inner = self.inner.read();
        Ok(inner
            .listings
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }

    fn get(&self, id: Uuid) -> Result<Option<Listing>> {
        let inner = self.inner.read();
        Ok(inner.by_id.get(&id).map(|&slot| inner.listings[slot].clone()))
    }

    fn insert(&self, listing: Listing) -> Result<Uuid> {
        let mut inner = self.inner.write();
        let id = listing.id;
        if inner.by_id.contains_key(&id) {
            return Err(VicinityError::DuplicateListing(id));
        }

        let slot = inner.listings.len();
        inner.listings.push(listing);
        inner.by_id.insert(id, slot);
        Ok(id)
    }

    fn update(&self, listing: Listing) -> Result<()> {
        let mut inner = self.inner.write();
        let Some(&slot) = inner.by_id.get(&listing.id) else {
            return Err(VicinityError::UnknownListing(listing.id));
        };
        inner.listings[slot] = listing;
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.inner.read().listings.len())
    }
}
