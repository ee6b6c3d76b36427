//! Shared numeric defaults for the photo surface.

// ── Photo chrome ────────────────────────────────────────────────

/// Width of the white border around every photo, in CSS pixels.
pub const BORDER_SIZE: f64 = 15.0;

/// Border fill colour.
pub const BORDER_COLOUR: &str = "#ffffff";

// ── Poses ───────────────────────────────────────────────────────

/// Scale of a photo that has been picked up.
pub const ACTIVATED_SCALE: f64 = 0.8;

/// Scale of a photo lying in the pile.
pub const DEACTIVATED_SCALE: f64 = 0.2;

/// Random tilts are drawn as whole degrees from this half-open range.
pub const TILT_RANGE_DEG: std::ops::Range<i32> = -20..25;

/// Scale delta at which a random tilt is applied at full strength.
pub const TILT_SCALE_NORMALISER: f64 = 0.7;

// ── Pointer ─────────────────────────────────────────────────────

/// Longest press, in milliseconds, still treated as a click.
pub const CLICK_DURATION_MS: f64 = 500.0;

/// Largest per-axis pointer travel, in pixels, still treated as a click.
pub const CLICK_DISTANCE_PX: f64 = 25.0;

// ── Animation ───────────────────────────────────────────────────

/// Duration of the pick-up animation.
pub const SELECT_DURATION_MS: f64 = 750.0;

/// Duration of the put-down animation.
pub const DESELECT_DURATION_MS: f64 = 300.0;

// ── Shadow ──────────────────────────────────────────────────────

/// Maximum shadow blur as a fraction of the viewport height.
pub const SHADOW_BLUR: f64 = 0.1;

/// Upper bound on the number of stacked shadow rectangles.
pub const SHADOW_STEPS: u32 = 12;

/// Shadow opacity when a photo is lifted fully off the surface.
pub const SHADOW_OPACITY_MIN: f64 = 0.4;

/// Shadow opacity when a photo lies on the surface.
pub const SHADOW_OPACITY_MAX: f64 = 0.7;

/// Added to the lift factor so a resting photo still casts a shadow.
pub const SHADOW_LIFT_BIAS: f64 = 0.05;

/// Blur depth every shadow starts from, in pixels.
pub const SHADOW_BASE_DEPTH: f64 = 2.0;
