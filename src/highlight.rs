//! Highlight overlay - a surface-sized mask with a rectangular cutout.
//!
//! The outer ring runs clockwise over the whole surface and the inner ring
//! runs counter-clockwise over the highlighted rectangle, so a nonzero fill
//! paints everything except the highlight.

use crate::geometry::normalize_rect;
use crate::types::{HighlightCoords, Point, SelectionGeometry, Surface};
use tracing::trace;

/// Compound path: surface boundary plus an oppositely wound cutout.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightMask {
    pub outer: [Point; 4],
    pub inner: [Point; 4],
}

impl HighlightMask {
    fn new(surface: &Surface, cutout: SelectionGeometry) -> Self {
        let (w, h) = (surface.width, surface.height);
        let (left, top, right, bottom) = (cutout.x, cutout.y, cutout.right(), cutout.bottom());
        Self {
            outer: [
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
            inner: [
                Point::new(left, top),
                Point::new(left, bottom),
                Point::new(right, bottom),
                Point::new(right, top),
            ],
        }
    }

    /// The cutout as a rectangle.
    pub fn inner_rect(&self) -> SelectionGeometry {
        let [top_left, _, bottom_right, _] = self.inner;
        SelectionGeometry::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    /// SVG path data, e.g. `M0 0 L100 0 L100 100 L0 100 Z M5 5 L5 20 L25 20 L25 5 Z`.
    pub fn to_svg_path(&self) -> String {
        [&self.outer, &self.inner]
            .iter()
            .map(|ring| {
                let segments: Vec<String> = ring
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let cmd = if i == 0 { 'M' } else { 'L' };
                        format!("{}{} {}", cmd, p.x, p.y)
                    })
                    .collect();
                format!("{} Z", segments.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Mask for the given coordinates, `None` when either dimension is zero.
pub fn project(surface: &Surface, coords: &HighlightCoords) -> Option<HighlightMask> {
    if !coords.is_visible() {
        return None;
    }
    let cutout = normalize_rect(SelectionGeometry::new(
        coords.x,
        coords.y,
        coords.width,
        coords.height,
    ));
    Some(HighlightMask::new(surface, cutout))
}

/// Memoizing wrapper over [`project`] for one surface.
#[derive(Clone, Debug)]
pub struct HighlightProjector {
    surface: Surface,
    last: Option<(HighlightCoords, Option<HighlightMask>)>,
    computations: u64,
}

impl HighlightProjector {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            last: None,
            computations: 0,
        }
    }

    /// Mask for `coords`, recomputed only when they differ from the last call.
    pub fn project(&mut self, coords: HighlightCoords) -> Option<&HighlightMask> {
        let stale = !matches!(&self.last, Some((prev, _)) if *prev == coords);
        if stale {
            trace!(?coords, "recomputing highlight mask");
            self.computations += 1;
            self.last = Some((coords, project(&self.surface, &coords)));
        }
        self.current()
    }

    pub fn current(&self) -> Option<&HighlightMask> {
        self.last.as_ref().and_then(|(_, mask)| mask.as_ref())
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// How many times a mask was actually computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
