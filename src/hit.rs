//! Hit-testing: which photo, if any, is on top under a pointer.
//!
//! Each candidate's bounding quadrilateral is tested with a horizontal ray
//! cast toward +x, counting edge crossings (even-odd rule). Stacks are
//! searched from the end, so the last element, drawn on top, wins.
//!
//! The loop stops after the second crossing. That is only sound for convex,
//! simple quadrilaterals, which every rectangle-derived [`Quad`] is.
//!
//! A point exactly on an edge or a vertex may resolve either way.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Edge, Point, Quad};
use crate::photo::{Photo, PhotoId};

/// Which membership collection a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    Active,
    Inactive,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub photo_id: PhotoId,
    pub stack: Stack,
    /// Index within that stack.
    pub index: usize,
}

/// X coordinate where the ray from `pt` crosses `edge`, or `None` when the
/// edge cannot be crossed.
#[allow(clippy::float_cmp)]
fn crossing_x(edge: &Edge, pt: Point) -> Option<f64> {
    let Edge { origin: o, dest: d } = *edge;

    // Entirely below the ray.
    if o.y < pt.y && d.y < pt.y {
        return None;
    }
    // Entirely at or above it.
    if o.y >= pt.y && d.y >= pt.y {
        return None;
    }

    if o.x == d.x {
        return Some(o.x);
    }

    let slope = (d.y - o.y) / (d.x - o.x);
    let intercept = o.y - slope * o.x;
    Some(-(pt.y - intercept) / (0.0 - slope))
}

/// Number of boundary crossings to the right of `pt`, capped at two.
#[must_use]
pub fn crossings(quad: &Quad, pt: Point) -> usize {
    let mut count = 0;
    for edge in &quad.edges() {
        if let Some(xi) = crossing_x(edge, pt)
            && xi >= pt.x
        {
            count += 1;
        }
        if count == 2 {
            break;
        }
    }
    count
}

/// Whether `pt` lies inside `quad`.
#[must_use]
pub fn contains(quad: &Quad, pt: Point) -> bool {
    let count = crossings(quad, pt);
    count % 2 == 1 && count != 0
}

/// Index of the topmost photo in `stack` containing `pt`.
///
/// Photos without content have no bounds and are never hit.
#[must_use]
pub fn hit_test_stack(pt: Point, stack: &[Photo]) -> Option<usize> {
    stack
        .iter()
        .enumerate()
        .rev()
        .find(|(_, photo)| photo.bounds().is_some_and(|quad| contains(&quad, pt)))
        .map(|(index, _)| index)
}

/// Topmost photo under `pt`, searching the active stack before the pile so
/// lifted photos win over piled ones.
#[must_use]
pub fn find_target(pt: Point, active: &[Photo], inactive: &[Photo]) -> Option<Hit> {
    if let Some(index) = hit_test_stack(pt, active) {
        return Some(Hit { photo_id: active[index].id(), stack: Stack::Active, index });
    }
    hit_test_stack(pt, inactive).map(|index| Hit { photo_id: inactive[index].id(), stack: Stack::Inactive, index })
}
