use geo::Point;
use vicinity::{
    Config, GreatCircle, Listing, ListingStore, MemoryStore, QuadTree, Rect, SearchQuery,
    SpatialPoint, Vicinity,
};

/// Test 1: degenerate clustering. capacity + 1 points at one coordinate
/// must subdivide without recursing unboundedly and stay fully queryable.
#[test]
fn test_identical_coordinate_cluster_subdivides_safely() {
    let mut tree = QuadTree::new(Rect::WORLD, 4);
    for i in 0..5 {
        assert!(tree.insert(SpatialPoint::new(Point::new(13.4, 52.5), i)));
    }

    let found = tree.query(&Rect::WORLD);
    assert_eq!(found.len(), 5);
}

/// Test 2: large clustered dataset stress
#[test]
fn test_large_clustered_dataset() {
    let mut tree = QuadTree::new(Rect::WORLD, 4);

    // 10K points packed into a tiny neighborhood (keeping it reasonable for CI)
    for i in 0..10_000u32 {
        let lng = -74.0 + (i % 100) as f64 * 0.000_01;
        let lat = 40.7 + (i / 100) as f64 * 0.000_01;
        assert!(tree.insert(SpatialPoint::new(Point::new(lng, lat), i)));
    }
    assert_eq!(tree.len(), 10_000);

    // The whole cluster sits inside a small search box.
    let found = tree.query(&Rect::new(-74.0, 40.7, 0.01, 0.01));
    assert_eq!(found.len(), 10_000);

    // A disjoint box sees nothing.
    let found = tree.query(&Rect::new(100.0, -40.0, 1.0, 1.0));
    assert!(found.is_empty());
}

/// Test 3: extreme coordinate values
#[test]
fn test_extreme_coordinates() {
    let mut tree = QuadTree::new(Rect::WORLD, 4);

    let north_pole = Point::new(0.0, 90.0);
    let south_pole = Point::new(0.0, -90.0);
    let date_line_west = Point::new(180.0, 0.0);
    let date_line_east = Point::new(-180.0, 0.0);

    for (i, point) in [north_pole, south_pole, date_line_west, date_line_east]
        .into_iter()
        .enumerate()
    {
        assert!(
            tree.insert(SpatialPoint::new(point, i)),
            "boundary point {i} rejected"
        );
    }

    assert_eq!(tree.query(&Rect::WORLD).len(), 4);
    assert_eq!(tree.query(&Rect::new(0.0, 90.0, 0.5, 0.5)).len(), 1);
}

/// Test 4: a search against an empty store succeeds with no hits.
#[tokio::test]
async fn test_empty_store_search() {
    let service = Vicinity::new(MemoryStore::new(), GreatCircle);

    let hits = service
        .search(&SearchQuery::near(0.0, 0.0, 50.0))
        .await
        .unwrap();
    assert!(hits.is_empty());

    let hits = service.search(&SearchQuery::unfiltered()).await.unwrap();
    assert!(hits.is_empty());
}

/// Test 5: clustered listings flow through the whole service intact even
/// with an aggressive depth bound.
#[tokio::test]
async fn test_clustered_listings_end_to_end() {
    let store = MemoryStore::new();
    for i in 0..25 {
        store
            .insert(Listing::with_coordinates(format!("unit {i}"), 13.4, 52.5).activated())
            .unwrap();
    }

    let config = Config::default().with_node_capacity(4).with_max_tree_depth(6);
    let service = Vicinity::with_config(store, GreatCircle, config);

    let hits = service
        .search(&SearchQuery::near(52.5, 13.4, 5.0))
        .await
        .unwrap();
    assert_eq!(hits.len(), 25);
    assert!(hits.iter().all(|h| h.distance_km.unwrap() < 0.1));
}

/// Test 6: zero-distance threshold keeps only exact-position matches.
#[tokio::test]
async fn test_zero_threshold() {
    let store = MemoryStore::new();
    store
        .insert(Listing::with_coordinates("here", 10.0, 10.0).activated())
        .unwrap();
    store
        .insert(Listing::with_coordinates("near", 10.0, 10.1).activated())
        .unwrap();

    let service = Vicinity::new(store, GreatCircle);
    let hits = service
        .search(&SearchQuery::near(10.0, 10.0, 0.0))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].listing.title, "here");
}
