//! Property tweening: easing curves and the [`Fx`] animation handle.
//!
//! An `Fx` interpolates a set of named numeric properties from a start value
//! to an end value. The host owns the clock: it calls [`Fx::tick`] with the
//! time elapsed since the previous tick and the object being animated. The
//! handle never holds a reference to its target, so the target is free to own
//! its handles.

#[cfg(test)]
#[path = "anim_test.rs"]
mod anim_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Maps normalized elapsed time in `[0, 1]` to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`. Input is clamped to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => ease_in(t, quad),
            Self::QuadOut => ease_out(t, quad),
            Self::QuadInOut => ease_in_out(t, quad),
            Self::CubicIn => ease_in(t, cubic),
            Self::CubicOut => ease_out(t, cubic),
            Self::CubicInOut => ease_in_out(t, cubic),
            Self::SineIn => ease_in(t, sine),
            Self::SineOut => ease_out(t, sine),
            Self::SineInOut => ease_in_out(t, sine),
        }
    }
}

fn quad(t: f64) -> f64 {
    t * t
}

fn cubic(t: f64) -> f64 {
    t * t * t
}

fn sine(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

fn ease_in(t: f64, curve: fn(f64) -> f64) -> f64 {
    curve(t)
}

fn ease_out(t: f64, curve: fn(f64) -> f64) -> f64 {
    1.0 - curve(1.0 - t)
}

fn ease_in_out(t: f64, curve: fn(f64) -> f64) -> f64 {
    if t <= 0.5 { curve(2.0 * t) / 2.0 } else { (2.0 - curve(2.0 * (1.0 - t))) / 2.0 }
}

/// A numeric property an [`Fx`] can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Scale,
    Theta,
}

/// Start and end value for one animated property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRange {
    pub property: Property,
    pub from: f64,
    pub to: f64,
}

impl PropertyRange {
    #[must_use]
    pub fn new(property: Property, from: f64, to: f64) -> Self {
        Self { property, from, to }
    }

    /// Linear interpolation at an already-eased `fraction`. Exactly `to` at 1.
    #[must_use]
    pub fn at(&self, fraction: f64) -> f64 {
        if fraction >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * fraction
    }
}

/// Something an [`Fx`] can mutate.
pub trait Animatable {
    /// Assign one interpolated value.
    fn set_property(&mut self, property: Property, value: f64);

    /// Recompute derived state after a batch of assignments.
    fn update(&mut self);
}

/// What happens when `start` is called while the handle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    /// Halt the running tween and start over with the new ranges.
    #[default]
    Cancel,
    /// Keep the running tween; the new start is dropped.
    Ignore,
}

/// Timing parameters of an [`Fx`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxOptions {
    pub duration_ms: f64,
    pub easing: Easing,
    pub link: Link,
}

impl Default for FxOptions {
    fn default() -> Self {
        Self { duration_ms: 500.0, easing: Easing::Linear, link: Link::Cancel }
    }
}

/// Lifecycle of an [`Fx`] handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxState {
    /// Never started.
    Idle,
    Running,
    /// Reached `fraction == 1`.
    Completed,
    /// Halted by [`Fx::cancel`] or replaced by a restart.
    Cancelled,
}

/// Outcome of one [`Fx::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step<C> {
    /// The handle is not running; the target was left untouched.
    Inert,
    /// Values were applied at this eased fraction.
    Progress(f64),
    /// Final values were applied. Carries the registered completion token.
    Completed(Option<C>),
}

/// A restartable tween over a set of [`PropertyRange`]s.
///
/// `C` is the completion token handed back from the final tick; the owner
/// decides what completing means.
#[derive(Debug, Clone)]
pub struct Fx<C = ()> {
    options: FxOptions,
    ranges: Vec<PropertyRange>,
    elapsed_ms: f64,
    state: FxState,
    on_complete: Option<C>,
}

impl<C: Clone> Fx<C> {
    #[must_use]
    pub fn new(options: FxOptions) -> Self {
        Self { options, ranges: Vec::new(), elapsed_ms: 0.0, state: FxState::Idle, on_complete: None }
    }

    /// Register the token returned when a run completes.
    #[must_use]
    pub fn on_complete(mut self, token: C) -> Self {
        self.on_complete = Some(token);
        self
    }

    #[must_use]
    pub fn state(&self) -> FxState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == FxState::Running
    }

    #[must_use]
    pub fn ranges(&self) -> &[PropertyRange] {
        &self.ranges
    }

    /// Begin a run over `ranges`. Returns `false` when the link policy
    /// dropped the request.
    pub fn start(&mut self, ranges: Vec<PropertyRange>) -> bool {
        if self.is_running() && self.options.link == Link::Ignore {
            return false;
        }
        self.ranges = ranges;
        self.elapsed_ms = 0.0;
        self.state = FxState::Running;
        true
    }

    /// Halt a running tween in place. The target keeps whatever values the
    /// last tick applied and no completion token is produced.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = FxState::Cancelled;
        true
    }

    /// Eased progress after `elapsed_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_at(&self, elapsed_ms: f64) -> f64 {
        if self.options.duration_ms <= 0.0 || elapsed_ms >= self.options.duration_ms {
            return 1.0;
        }
        self.options.easing.apply(elapsed_ms / self.options.duration_ms).clamp(0.0, 1.0)
    }

    /// Advance by `dt_ms`, assign the interpolated values to `target` and
    /// call its `update`.
    ///
    /// A zero-duration run still applies exactly one tick at `fraction = 1`.
    /// The handle is marked completed before the token is returned, so the
    /// owner may restart it straight away.
    pub fn tick<T: Animatable>(&mut self, dt_ms: f64, target: &mut T) -> Step<C> {
        if !self.is_running() {
            return Step::Inert;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let done = self.options.duration_ms <= 0.0 || self.elapsed_ms >= self.options.duration_ms;
        let fraction = self.fraction_at(self.elapsed_ms);

        for range in &self.ranges {
            target.set_property(range.property, range.at(fraction));
        }
        target.update();

        if done {
            self.state = FxState::Completed;
            Step::Completed(self.on_complete.clone())
        } else {
            Step::Progress(fraction)
        }
    }
}
