//! Spatial index over committed selections.
//!
//! R-tree lookup for "which rectangles are under or next to the pointer",
//! used by the store to resolve pointer-down and hover targets without
//! scanning the list. One entry per id: re-inserting an id moves it.

use crate::types::{Point, SelectionGeometry};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    id: u64,
    geometry: SelectionGeometry,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let g = &self.geometry;
        AABB::from_corners([g.x, g.y], [g.right(), g.bottom()])
    }
}

pub struct SpatialIndex {
    tree: RTree<Entry>,
    by_id: HashMap<u64, Entry>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            by_id: HashMap::new(),
        }
    }

    /// Insert `id`, replacing its previous bounds.
    pub fn insert(&mut self, id: u64, geometry: &SelectionGeometry) {
        self.remove(id);
        let entry = Entry {
            id,
            geometry: *geometry,
        };
        self.tree.insert(entry);
        self.by_id.insert(id, entry);
    }

    pub fn remove(&mut self, id: u64) -> bool {
        match self.by_id.remove(&id) {
            Some(entry) => self.tree.remove(&entry).is_some(),
            None => false,
        }
    }

    /// Ids whose bounds, grown by `margin` on every side, contain the point.
    ///
    /// A zero margin is a plain containment query (edges inclusive).
    pub fn query_near(&self, point: Point, margin: f32) -> Vec<u64> {
        let margin = margin.max(0.0);
        let window = AABB::from_corners(
            [point.x - margin, point.y - margin],
            [point.x + margin, point.y + margin],
        );

        self.tree
            .locate_in_envelope_intersecting(&window)
            .map(|entry| entry.id)
            .collect()
    }

    /// Replace every entry; a repeated id keeps its last bounds.
    pub fn rebuild<'a, I>(&mut self, items: I)
    where
        I: Iterator<Item = (u64, &'a SelectionGeometry)>,
    {
        self.by_id = items
            .map(|(id, geometry)| {
                (
                    id,
                    Entry {
                        id,
                        geometry: *geometry,
                    },
                )
            })
            .collect();
        self.tree = RTree::bulk_load(self.by_id.values().copied().collect());
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
