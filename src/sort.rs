//! Distance ordering for search hits.
//!
//! A deliberate from-scratch partition-exchange sort (Lomuto scheme, last
//! element as pivot) rather than the standard library sort, so the ordering
//! stage is fully deterministic and dependency-free. Average `O(n log n)`
//! comparisons; worst case `O(n^2)` on adversarial pivot sequences. That is
//! acceptable here: candidate counts after geometric pruning are small.

use crate::types::SearchHit;

/// Sort hits in place, ascending by road distance.
///
/// Hits without a distance order as if infinitely far. Not stable: hits at
/// equal distance may be reordered. Distances themselves are never mutated.
pub fn sort_by_distance(hits: &mut [SearchHit]) {
    if hits.len() > 1 {
        quicksort(hits, 0, hits.len() - 1);
    }
}

fn distance_of(hit: &SearchHit) -> f64 {
    hit.distance_km.unwrap_or(f64::INFINITY)
}

fn quicksort(hits: &mut [SearchHit], low: usize, high: usize) {
    if low < high {
        let pivot = partition(hits, low, high);
        if pivot > low {
            quicksort(hits, low, pivot - 1);
        }
        quicksort(hits, pivot + 1, high);
    }
}

/// Lomuto partition: everything strictly closer than the pivot distance is
/// swapped into the left partition, then the pivot lands at the boundary.
fn partition(hits: &mut [SearchHit], low: usize, high: usize) -> usize {
    let pivot = distance_of(&hits[high]);
    let mut boundary = low;

    for j in low..high {
        if distance_of(&hits[j]) < pivot {
            hits.swap(boundary, j);
            boundary += 1;
        }
    }

    hits.swap(boundary, high);
    boundary
}
