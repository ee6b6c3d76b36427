//! Pose/bounds model: a photo's position, scale and rotation, its content
//! source, and the oriented quadrilateral derived from them.
//!
//! `position`, `scale` and `theta` are public so the host can move photos
//! directly, but [`Photo::update`] must run after any such mutation before the
//! photo is hit-tested or painted. Skipping it leaves `bounds` stale; nothing
//! detects that.

#[cfg(test)]
#[path = "photo_test.rs"]
mod photo_test;

use uuid::Uuid;

use crate::anim::{Animatable, Fx, FxState, Property, Step};
use crate::config::PhotoOptions;
use crate::geom::{Point, Quad, Size};

/// Unique identifier for a photo.
pub type PhotoId = Uuid;

/// Loading progress of a lazily fetched image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
}

/// A path-backed image the host fetches on request.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoData {
    path: String,
    state: LoadState,
    /// Display size of the last image that finished loading.
    size: Option<Size>,
}

impl PhotoData {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), state: LoadState::NotLoaded, size: None }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Point at a new path. The previous image stays visible until the new
    /// one is ready.
    pub fn set(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.state = LoadState::NotLoaded;
    }

    /// Move `NotLoaded` to `Loading`. Returns the path to fetch, or `None`
    /// when a load is already in flight or done.
    pub fn load(&mut self) -> Option<&str> {
        if self.state != LoadState::NotLoaded {
            return None;
        }
        self.state = LoadState::Loading;
        Some(&self.path)
    }
}

/// Where a photo's pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Already decoded; `size` is the display size of the image without border.
    Static { size: Size },
    /// Fetched by the host; has no size until the first load completes.
    Lazy(PhotoData),
}

impl Content {
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        match self {
            Self::Static { size } => Some(*size),
            Self::Lazy(data) => data.size,
        }
    }

    fn set_size(&mut self, size: Size) {
        match self {
            Self::Static { size: current } => *current = size,
            Self::Lazy(data) => data.size = Some(size),
        }
    }
}

/// Which pose transition an animation handle drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Select,
    Deselect,
}

/// Result of advancing a photo's transitions by one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TransitionTick {
    /// At least one property was reassigned.
    pub moved: bool,
    /// A transition with a completion token finished on this tick.
    pub completed: Option<Transition>,
}

/// A flat rectangular item on the surface.
#[derive(Debug, Clone)]
pub struct Photo {
    id: PhotoId,
    /// Reference point; the center of the bounding quadrilateral.
    pub position: Point,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in radians, clockwise on screen.
    pub theta: f64,
    options: PhotoOptions,
    content: Content,
    loading: bool,
    base: Size,
    scaled: Size,
    bounds: Option<Quad>,
    pub(crate) active: bool,
    pub(crate) activated_at: Option<f64>,
    pub(crate) deactivated_at: Option<f64>,
    pub(crate) click_offset: Option<Point>,
    pub(crate) select_fx: Option<Fx<Transition>>,
    pub(crate) deselect_fx: Option<Fx<Transition>>,
}

impl Photo {
    /// Create a photo at the origin with unit scale and no rotation.
    #[must_use]
    pub fn new(content: Content, options: PhotoOptions) -> Self {
        let mut photo = Self {
            id: Uuid::new_v4(),
            position: Point::default(),
            scale: 1.0,
            theta: 0.0,
            options,
            content,
            loading: false,
            base: Size::default(),
            scaled: Size::default(),
            bounds: None,
            active: false,
            activated_at: None,
            deactivated_at: None,
            click_offset: None,
            select_fx: None,
            deselect_fx: None,
        };
        photo.update();
        photo
    }

    /// A photo whose image is already decoded at `size`.
    #[must_use]
    pub fn with_size(size: Size, options: PhotoOptions) -> Self {
        Self::new(Content::Static { size }, options)
    }

    /// A photo the host loads from `path`.
    #[must_use]
    pub fn from_path(path: impl Into<String>, options: PhotoOptions) -> Self {
        Self::new(Content::Lazy(PhotoData::new(path)), options)
    }

    #[must_use]
    pub fn id(&self) -> PhotoId {
        self.id
    }

    #[must_use]
    pub fn options(&self) -> &PhotoOptions {
        &self.options
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Whether there is an image to draw and hit-test.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.content.size().is_some()
    }

    /// A replacement image is being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Content size plus border, before scaling.
    #[must_use]
    pub fn base_size(&self) -> Size {
        self.base
    }

    /// Base size times scale.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        self.scaled
    }

    /// Oriented bounding quadrilateral as of the last [`Photo::update`].
    /// `None` until the photo has content.
    #[must_use]
    pub fn bounds(&self) -> Option<Quad> {
        self.bounds
    }

    /// Picked up and not yet put down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn activated_at(&self) -> Option<f64> {
        self.activated_at
    }

    #[must_use]
    pub fn deactivated_at(&self) -> Option<f64> {
        self.deactivated_at
    }

    /// Pointer offset from `position`, set while the photo is being dragged.
    #[must_use]
    pub fn click_offset(&self) -> Option<Point> {
        self.click_offset
    }

    /// State of the handle driving `transition`, if one was ever created.
    #[must_use]
    pub fn transition_state(&self, transition: Transition) -> Option<FxState> {
        let fx = match transition {
            Transition::Select => self.select_fx.as_ref(),
            Transition::Deselect => self.deselect_fx.as_ref(),
        };
        fx.map(Fx::state)
    }

    /// Recompute base size, scaled size and bounds from the current pose.
    pub fn update(&mut self) {
        let Some(content) = self.content.size() else {
            return;
        };
        let inset = 2.0 * self.options.border.size.max(0.0);
        self.base = Size::new(content.width + inset, content.height + inset);
        self.scaled = self.base.scaled(self.scale);
        self.bounds = Some(bounding_quad(self.position, self.scaled, self.theta));
    }

    /// Fit the content into `reference` (aspect preserved, border included)
    /// and reset the scale to 1.
    pub fn normalise(&mut self, reference: Size) {
        if let Some(content) = self.content.size() {
            self.content.set_size(fit(content, reference, self.options.border.size));
        }
        self.scale = 1.0;
        self.update();
    }

    /// Swap in newly decoded content of display size `size`.
    ///
    /// With a normalising area configured the content is fitted to it without
    /// touching the current scale.
    pub fn set_content(&mut self, size: Size) {
        let size = match self.options.normalising_area {
            Some(area) => fit(size, area, self.options.border.size),
            None => size,
        };
        self.content.set_size(size);
        self.update();
    }

    /// Request the host fetch the lazy content. Returns the path when a load
    /// should start.
    pub fn load(&mut self) -> Option<String> {
        match &mut self.content {
            Content::Lazy(data) => data.load().map(str::to_owned),
            Content::Static { .. } => None,
        }
    }

    /// Point the photo at a new image path. The current image keeps showing,
    /// flagged as loading, until [`Photo::content_ready`] arrives. Returns the
    /// path to fetch.
    pub fn set_path(&mut self, path: impl Into<String>) -> Option<String> {
        match &mut self.content {
            Content::Lazy(data) => data.set(path),
            Content::Static { size } => {
                let mut data = PhotoData::new(path);
                data.size = Some(*size);
                self.content = Content::Lazy(data);
            }
        }
        self.loading = true;
        self.load()
    }

    /// The loading collaborator finished decoding an image of `natural` size.
    pub fn content_ready(&mut self, natural: Size) {
        if let Content::Lazy(data) = &mut self.content {
            data.state = LoadState::Loaded;
        }
        self.set_content(natural);
        self.loading = false;
    }

    /// Advance both transition handles by `dt_ms`.
    pub(crate) fn tick_transitions(&mut self, dt_ms: f64) -> TransitionTick {
        let mut tick = TransitionTick::default();

        let mut select = self.select_fx.take();
        if let Some(fx) = select.as_mut() {
            record(&mut tick, fx.tick(dt_ms, self));
        }
        self.select_fx = select;

        let mut deselect = self.deselect_fx.take();
        if let Some(fx) = deselect.as_mut() {
            record(&mut tick, fx.tick(dt_ms, self));
        }
        self.deselect_fx = deselect;

        tick
    }
}

fn record(tick: &mut TransitionTick, step: Step<Transition>) {
    match step {
        Step::Inert => {}
        Step::Progress(_) => tick.moved = true,
        Step::Completed(token) => {
            tick.moved = true;
            if token.is_some() {
                tick.completed = token;
            }
        }
    }
}

impl Animatable for Photo {
    fn set_property(&mut self, property: Property, value: f64) {
        match property {
            Property::X => self.position.x = value,
            Property::Y => self.position.y = value,
            Property::Scale => self.scale = value,
            Property::Theta => self.theta = value,
        }
    }

    fn update(&mut self) {
        Photo::update(self);
    }
}

/// Corners of a `size` rectangle centered on `position` and rotated by `theta`.
///
/// The top-left corner sits half a diagonal from `position` along
/// `corner_angle + theta`; the other three follow by walking the rotated edges.
#[must_use]
pub fn bounding_quad(position: Point, size: Size, theta: f64) -> Quad {
    let Size { width, height } = size;
    let hypotenuse = (width / 2.0).hypot(height / 2.0);
    // atan2 keeps a zero-sized rectangle finite where atan(h / w) would not.
    let corner_angle = height.atan2(width);

    let (sin_c, cos_c) = (corner_angle + theta).sin_cos();
    let (sin_t, cos_t) = theta.sin_cos();

    let tl = Point::new(position.x - hypotenuse * cos_c, position.y - hypotenuse * sin_c);
    let tr = Point::new(tl.x + width * cos_t, tl.y + width * sin_t);
    let br = Point::new(tr.x - height * sin_t, tr.y + height * cos_t);
    let bl = Point::new(tl.x - height * sin_t, tl.y + height * cos_t);
    Quad { tl, tr, br, bl }
}

/// Scale `content` to fit `reference` by the tighter ratio, then take the
/// border off both dimensions so the bordered photo fills the fit exactly.
fn fit(content: Size, reference: Size, border: f64) -> Size {
    if content.is_degenerate() {
        return content;
    }
    let width_ratio = reference.width / content.width;
    let height_ratio = reference.height / content.height;
    let (width, height) = if width_ratio > height_ratio {
        (reference.height * (content.width / content.height), reference.height)
    } else {
        (reference.width, reference.width * (content.height / content.width))
    };
    let inset = 2.0 * border.max(0.0);
    Size::new((width - inset).max(0.0), (height - inset).max(0.0))
}
