//! Plane geometry shared by the pose model, the hit tester and the surface.
//!
//! Everything here is in surface coordinates (CSS pixels, origin at the
//! top-left of the surface, y growing downward). [`Viewport`] is the only
//! type that knows about page coordinates.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A point in surface (or page) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Uniformly scaled copy.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }

    /// Whether either dimension is zero or negative.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Directed segment from `origin` to `dest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub origin: Point,
    pub dest: Point,
}

/// Oriented bounding quadrilateral of a rotated, scaled rectangle.
///
/// Corners are named for the unrotated rectangle: at `theta = 0` `tl` is the
/// top-left corner and the corners run clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quad {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
}

impl Quad {
    /// The four boundary edges in order top, right, bottom, left.
    #[must_use]
    pub fn edges(&self) -> [Edge; 4] {
        [
            Edge { origin: self.tl, dest: self.tr },
            Edge { origin: self.tr, dest: self.br },
            Edge { origin: self.br, dest: self.bl },
            Edge { origin: self.bl, dest: self.tl },
        ]
    }

    /// Intersection of the diagonals, which for a rectangle is its center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.tl.x + self.br.x) * 0.5, (self.tl.y + self.br.y) * 0.5)
    }
}

/// Placement of the interaction surface on the page.
///
/// `x` / `y` are the page coordinates of the surface's top-left corner;
/// `width` / `height` its size in CSS pixels. The host delivers a fresh
/// viewport whenever the surface moves or resizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport at the page origin.
    #[must_use]
    pub fn sized(size: Size) -> Self {
        Self { x: 0.0, y: 0.0, width: size.width, height: size.height }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Convert a page-space pointer position to surface coordinates.
    #[must_use]
    pub fn page_to_surface(&self, page: Point) -> Point {
        Point::new(page.x - self.x, page.y - self.y)
    }

    /// The whole surface, in surface coordinates.
    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The middle third of the surface, where piled photos land.
    #[must_use]
    pub fn pile_area(&self) -> Rect {
        let w = self.width / 3.0;
        let h = self.height / 3.0;
        Rect::new(w, h, w, h)
    }
}
