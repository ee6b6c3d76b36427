//! Input model: what the host passes in and the feedback the surface hands back.
//!
//! `ClickRecord` is the only gesture state the surface keeps between a
//! pointer-down and the following pointer-up; everything else about a drag
//! lives on the photo being dragged.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::photo::{Photo, PhotoId};

/// Pointer cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Nothing under the pointer.
    #[default]
    Default,
    /// Hovering a photo that can be picked up.
    Move,
    /// A photo is being carried; the photo is the cursor.
    None,
}

/// Where and when the last pointer-down happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickRecord {
    pub time_ms: f64,
    /// Surface-space position.
    pub position: Point,
}

impl ClickRecord {
    /// Whether the pointer travelled more than `distance` along either axis.
    #[must_use]
    pub fn moved_beyond(&self, position: Point, distance: f64) -> bool {
        (position.x - self.position.x).abs() > distance || (position.y - self.position.y).abs() > distance
    }

    #[must_use]
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        now_ms - self.time_ms
    }
}

/// Which paint layers need redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layers {
    Active,
    Inactive,
    Both,
}

impl Layers {
    #[must_use]
    pub fn includes_active(self) -> bool {
        matches!(self, Self::Active | Self::Both)
    }

    #[must_use]
    pub fn includes_inactive(self) -> bool {
        matches!(self, Self::Inactive | Self::Both)
    }

    /// Smallest selection covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Layers) -> Layers {
        if self == other { self } else { Self::Both }
    }
}

/// Bulk placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Random position in the middle third of the surface, random tilt.
    Pile,
    /// Random position anywhere on the surface, random tilt.
    #[default]
    Random,
    /// Pull photos that fell outside the surface back in.
    Conform,
    /// Leave positions untouched.
    AsIs,
}

/// Options for [`crate::surface::SurfaceCore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOptions {
    /// `Random` scatters new photos; `AsIs` keeps their positions.
    pub placement: Placement,
    /// Fit each photo to the surface before shrinking it to its pile scale.
    pub normalise: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self { placement: Placement::Random, normalise: true }
    }
}

/// An argument that may be a single item or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl From<Photo> for OneOrMany<Photo> {
    fn from(photo: Photo) -> Self {
        Self::One(photo)
    }
}

impl From<PhotoId> for OneOrMany<PhotoId> {
    fn from(id: PhotoId) -> Self {
        Self::One(id)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}
