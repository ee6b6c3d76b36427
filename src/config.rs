//! Surface and photo configuration.
//!
//! Every record deserializes with `#[serde(default)]`, so a JSON document only
//! needs the keys it wants to override. Loaders validate after parsing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anim::{Easing, FxOptions, Link};
use crate::consts::{
    ACTIVATED_SCALE, BORDER_COLOUR, BORDER_SIZE, CLICK_DISTANCE_PX, CLICK_DURATION_MS, DEACTIVATED_SCALE,
    DESELECT_DURATION_MS, SELECT_DURATION_MS, SHADOW_BLUR, SHADOW_OPACITY_MAX, SHADOW_OPACITY_MIN, SHADOW_STEPS,
    TILT_RANGE_DEG, TILT_SCALE_NORMALISER,
};
use crate::geom::Size;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// =============================================================
// Surface
// =============================================================

/// Thresholds separating a click from a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Longest press still treated as a click, in milliseconds.
    pub duration_ms: f64,
    /// Largest per-axis pointer travel still treated as a click, in pixels.
    pub distance: f64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self { duration_ms: CLICK_DURATION_MS, distance: CLICK_DISTANCE_PX }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub click: ClickConfig,
    /// Pull photos back inside the surface when the viewport changes.
    pub manage_resize: bool,
    /// Pick-up animation.
    pub select: FxOptions,
    /// Put-down animation.
    pub deselect: FxOptions,
    /// Seed for placement and tilt randomness. Drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            click: ClickConfig::default(),
            manage_resize: true,
            select: FxOptions { duration_ms: SELECT_DURATION_MS, easing: Easing::CubicIn, link: Link::Cancel },
            deselect: FxOptions { duration_ms: DESELECT_DURATION_MS, easing: Easing::QuadOut, link: Link::Cancel },
            seed: None,
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("click.duration_ms", self.click.duration_ms)?;
        non_negative("click.distance", self.click.distance)?;
        non_negative("select.duration_ms", self.select.duration_ms)?;
        non_negative("deselect.duration_ms", self.deselect.duration_ms)?;
        Ok(())
    }
}

// =============================================================
// Photo
// =============================================================

/// Target rotation of a pose: a fixed angle or a fresh random tilt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTheta", into = "RawTheta")]
pub enum ThetaSetting {
    /// Angle in radians.
    Fixed(f64),
    /// A random tilt relative to the current angle, scaled by the scale change.
    Random,
}

impl Default for ThetaSetting {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl ThetaSetting {
    /// Resolve to a concrete angle for a transition from the current pose to
    /// `target_scale`.
    ///
    /// A random tilt is `current_theta + deg(n) * (current_scale - target_scale) / 0.7`
    /// with `n` a whole number of degrees in `[-20, 25)`, so a full pick-up
    /// tilts more than a small rescale.
    pub fn resolve(self, current_theta: f64, current_scale: f64, target_scale: f64, rng: &mut impl Rng) -> f64 {
        match self {
            Self::Fixed(theta) => theta,
            Self::Random => {
                let degrees = f64::from(rng.random_range(TILT_RANGE_DEG));
                current_theta + degrees.to_radians() * ((current_scale - target_scale) / TILT_SCALE_NORMALISER)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawTheta {
    Angle(f64),
    Keyword(String),
}

impl TryFrom<RawTheta> for ThetaSetting {
    type Error = ConfigError;

    fn try_from(raw: RawTheta) -> Result<Self, Self::Error> {
        match raw {
            RawTheta::Angle(theta) => Ok(Self::Fixed(theta)),
            RawTheta::Keyword(word) if word == "random" => Ok(Self::Random),
            RawTheta::Keyword(other) => {
                Err(ConfigError::Invalid(format!("theta must be a number or \"random\", got \"{other}\"")))
            }
        }
    }
}

impl From<ThetaSetting> for RawTheta {
    fn from(setting: ThetaSetting) -> Self {
        match setting {
            ThetaSetting::Fixed(theta) => Self::Angle(theta),
            ThetaSetting::Random => Self::Keyword("random".into()),
        }
    }
}

/// Scale and rotation a photo animates toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseTarget {
    pub scale: f64,
    #[serde(default)]
    pub theta: ThetaSetting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// Inset around the content on every side, in unscaled pixels.
    pub size: f64,
    pub colour: String,
}

impl Default for Border {
    fn default() -> Self {
        Self { size: BORDER_SIZE, colour: BORDER_COLOUR.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowOpacity {
    /// When lifted fully off the surface.
    pub min: f64,
    /// When lying on the surface.
    pub max: f64,
}

impl Default for ShadowOpacity {
    fn default() -> Self {
        Self { min: SHADOW_OPACITY_MIN, max: SHADOW_OPACITY_MAX }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowOptions {
    /// Round the shadow corners more as the blur deepens.
    pub rounded_blur: bool,
    /// Maximum blur distance as a fraction of the viewport height.
    pub blur: f64,
    /// Maximum number of stacked shadow rectangles.
    pub steps: u32,
    pub opacity: ShadowOpacity,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self { rounded_blur: true, blur: SHADOW_BLUR, steps: SHADOW_STEPS, opacity: ShadowOpacity::default() }
    }
}

/// Per-photo options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoOptions {
    pub border: Border,
    pub shadow: ShadowOptions,
    /// Pose while picked up.
    pub activated: PoseTarget,
    /// Pose while lying in the pile.
    pub deactivated: PoseTarget,
    /// When set, swapped-in content is fitted to this area so a low-res
    /// preview and its high-res replacement occupy the same footprint.
    pub normalising_area: Option<Size>,
}

impl Default for PhotoOptions {
    fn default() -> Self {
        Self {
            border: Border::default(),
            shadow: ShadowOptions::default(),
            activated: PoseTarget { scale: ACTIVATED_SCALE, theta: ThetaSetting::Fixed(0.0) },
            deactivated: PoseTarget { scale: DEACTIVATED_SCALE, theta: ThetaSetting::Random },
            normalising_area: None,
        }
    }
}

impl PhotoOptions {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("border.size", self.border.size)?;
        positive("activated.scale", self.activated.scale)?;
        positive("deactivated.scale", self.deactivated.scale)?;
        non_negative("shadow.blur", self.shadow.blur)?;
        if self.shadow.steps == 0 {
            return Err(ConfigError::Invalid("shadow.steps must be at least 1".into()));
        }
        if self.shadow.opacity.min > self.shadow.opacity.max {
            return Err(ConfigError::Invalid("shadow.opacity.min exceeds shadow.opacity.max".into()));
        }
        Ok(())
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{key} must be a non-negative number, got {value}")))
    }
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{key} must be a positive number, got {value}")))
    }
}
