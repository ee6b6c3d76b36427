//! Rendering seam: the collaborator that owns pixels, and the geometry it is
//! handed.
//!
//! The surface never draws. It asks a [`Renderer`] to clear a layer and paint
//! each photo on it in z-order; how a photo looks (border, shadow, image,
//! loading indicator) is the renderer's business. [`Shadow`] computes the
//! stacked soft-shadow rectangles so every renderer lifts photos the same way.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{SHADOW_BASE_DEPTH, SHADOW_LIFT_BIAS};
use crate::geom::{Rect, Size};
use crate::input::Layers;
use crate::photo::Photo;

/// One of the two paint layers. Active photos are drawn above the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Inactive,
    Active,
}

/// The rendering collaborator.
pub trait Renderer {
    /// Current size of the drawing surface in CSS pixels.
    fn viewport_size(&self) -> Size;

    /// Wipe `layer` and size it to `size`.
    fn clear(&mut self, layer: Layer, size: Size);

    /// Draw `photo` at its current pose on `layer`.
    ///
    /// Called once per photo per repaint, bottom of the stack first. Must
    /// not mutate anything but the layer's pixels.
    fn paint(&mut self, layer: Layer, photo: &Photo);
}

/// Clear and repaint the selected layers.
pub fn draw<R: Renderer + ?Sized>(renderer: &mut R, active: &[Photo], inactive: &[Photo], layers: Layers) {
    let size = renderer.viewport_size();

    if layers.includes_active() {
        renderer.clear(Layer::Active, size);
        for photo in active {
            renderer.paint(Layer::Active, photo);
        }
    }
    if layers.includes_inactive() {
        renderer.clear(Layer::Inactive, size);
        for photo in inactive {
            renderer.paint(Layer::Inactive, photo);
        }
    }
}

/// One translucent rectangle of a stacked shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowLayer {
    /// In the photo's local frame: origin at `position`, before scale and
    /// rotation are applied.
    pub rect: Rect,
    /// Corner radius; zero for square shadows.
    pub radius: f64,
    pub alpha: f64,
}

/// Soft shadow under a photo, deeper and fainter the higher it is lifted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shadow {
    pub depth: f64,
    pub layers: Vec<ShadowLayer>,
}

impl Shadow {
    /// Shadow for `photo` on a surface `viewport_height` pixels tall.
    ///
    /// Lift is how far the photo's scale is above its resting scale. Each
    /// layer grows the base rectangle by one step on every side.
    #[must_use]
    pub fn for_photo(photo: &Photo, viewport_height: f64) -> Self {
        let options = photo.options();
        let shadow = options.shadow;
        let lift = (photo.scale - options.deactivated.scale + SHADOW_LIFT_BIAS).max(SHADOW_LIFT_BIAS);

        let depth = SHADOW_BASE_DEPTH + shadow.blur * viewport_height * lift;
        if !depth.is_finite() {
            return Self::default();
        }
        let step = (depth / f64::from(shadow.steps.max(1))).max(1.0);
        let opacity = (shadow.opacity.min / lift).min(shadow.opacity.max);
        let alpha = opacity / (depth / step);
        let radius = if shadow.rounded_blur { depth } else { 0.0 };

        let base = photo.base_size();
        let (cx, cy) = (base.width / 2.0, base.height / 2.0);

        let mut layers = Vec::new();
        let mut inset = 0.0;
        while inset <= depth {
            layers.push(ShadowLayer {
                rect: Rect::new(-cx - inset, -cy - inset, base.width + 2.0 * inset, base.height + 2.0 * inset),
                radius,
                alpha,
            });
            inset += step;
        }

        Self { depth, layers }
    }
}
