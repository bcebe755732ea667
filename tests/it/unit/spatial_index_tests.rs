//! Spatial index agrees with a linear scan.

use crate::helpers::geom;
use rectboard::spatial_index::SpatialIndex;
use rectboard::types::{Point, SelectionGeometry};

fn grid() -> Vec<(u64, SelectionGeometry)> {
    (0..100u64)
        .map(|i| {
            let col = (i % 10) as f32;
            let row = (i / 10) as f32;
            (i, geom(col * 30.0, row * 15.0, 40.0, 20.0))
        })
        .collect()
}

fn sorted(mut ids: Vec<u64>) -> Vec<u64> {
    ids.sort_unstable();
    ids
}

#[test]
fn test_point_queries_match_linear_scan() {
    let items = grid();
    let mut index = SpatialIndex::new();
    index.rebuild(items.iter().map(|(id, g)| (*id, g)));
    assert_eq!(index.len(), 100);

    for point in [
        Point::new(0.0, 0.0),
        Point::new(35.0, 17.0),
        Point::new(150.0, 80.0),
        Point::new(299.0, 149.0),
        Point::new(500.0, 500.0),
    ] {
        let expected: Vec<u64> = items
            .iter()
            .filter(|(_, g)| g.contains(point))
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(sorted(index.query_near(point, 0.0)), expected, "point {point:?}");
    }
}

#[test]
fn test_removed_entries_stop_matching() {
    let items = grid();
    let mut index = SpatialIndex::new();
    index.rebuild(items.iter().map(|(id, g)| (*id, g)));

    for (id, _) in &items {
        assert!(index.remove(*id));
    }
    assert!(index.is_empty());
    assert!(!index.remove(0));
    assert!(index.query_near(Point::new(10.0, 10.0), 5.0).is_empty());
}
