//! Surface controller: membership of the inactive pile and the active stack,
//! pointer routing, and the pick-up/put-down state machine.
//!
//! [`SurfaceCore`] holds all state and returns [`Action`]s instead of talking
//! to a renderer, so it runs headless in tests. [`Surface`] wraps a core and a
//! [`Renderer`], executes repaint requests, and passes every other action back
//! to the host.
//!
//! Per-photo lifecycle:
//!
//! ```text
//! inactive --activate--> activating --(select done)--> active
//!    ^                        |                          |
//!    |                    deactivate                 deactivate
//!    |                        v                          |
//!    +--(deselect done)-- deactivating <-----------------+
//! ```
//!
//! A photo is *picked up* when it is the last element of the active stack
//! and its `active` flag is set; dragging always targets that photo.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::anim::{Fx, Property, PropertyRange};
use crate::config::SurfaceConfig;
use crate::consts::TILT_RANGE_DEG;
use crate::geom::{Point, Rect, Size, Viewport};
use crate::hit::{self, Hit};
use crate::input::{AddOptions, ClickRecord, Cursor, Layers, OneOrMany, Placement};
use crate::photo::{Photo, PhotoId, Transition};
use crate::render::{self, Renderer};

/// Events and requests returned from surface operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A photo was picked up.
    Activated(PhotoId),
    /// A photo was put down. Emitted when the put-down starts; the photo is
    /// still on the active stack until [`Action::Settled`].
    Deactivated(PhotoId),
    /// A put-down animation finished and the photo joined the pile.
    Settled(PhotoId),
    /// New content was swapped into a photo.
    Set(PhotoId),
    /// The host should fetch `path` and report back via `content_ready`.
    LoadRequested { id: PhotoId, path: String },
    SetCursor(Cursor),
    /// The given layers are stale.
    Render(Layers),
}

/// All surface state that does not depend on a renderer.
pub struct SurfaceCore {
    config: SurfaceConfig,
    viewport: Viewport,
    /// The pile, bottom first.
    inactive: Vec<Photo>,
    /// The stack, top last.
    active: Vec<Photo>,
    /// Added before their content was ready.
    pending: Vec<Photo>,
    click: Option<ClickRecord>,
    cursor: Cursor,
    rng: StdRng,
}

impl Default for SurfaceCore {
    fn default() -> Self {
        Self::new(SurfaceConfig::default(), Viewport::default())
    }
}

impl SurfaceCore {
    #[must_use]
    pub fn new(config: SurfaceConfig, viewport: Viewport) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            viewport,
            inactive: Vec::new(),
            active: Vec::new(),
            pending: Vec::new(),
            click: None,
            cursor: Cursor::Default,
            rng,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The whole surface in surface coordinates.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.viewport.area()
    }

    /// The pile, bottom first.
    #[must_use]
    pub fn inactive(&self) -> &[Photo] {
        &self.inactive
    }

    /// The active stack, top last.
    #[must_use]
    pub fn active(&self) -> &[Photo] {
        &self.active
    }

    /// Photos waiting for their content.
    #[must_use]
    pub fn pending(&self) -> &[Photo] {
        &self.pending
    }

    /// Every placed photo in z-order: the pile, then the active stack.
    #[must_use]
    pub fn photos(&self) -> Vec<&Photo> {
        self.inactive.iter().chain(self.active.iter()).collect()
    }

    /// Look up a photo by id, including pending ones.
    #[must_use]
    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.inactive.iter().chain(&self.active).chain(&self.pending).find(|p| p.id() == id)
    }

    /// Mutable lookup. Call [`Photo::update`] after changing the pose.
    pub fn photo_mut(&mut self, id: PhotoId) -> Option<&mut Photo> {
        self.inactive.iter_mut().chain(&mut self.active).chain(&mut self.pending).find(|p| p.id() == id)
    }

    /// The photo currently being carried, if any.
    #[must_use]
    pub fn picked_up(&self) -> Option<&Photo> {
        self.active.last().filter(|p| p.active)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether any pose transition is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.iter().any(|p| {
            p.select_fx.as_ref().is_some_and(Fx::is_running) || p.deselect_fx.as_ref().is_some_and(Fx::is_running)
        })
    }

    /// Topmost photo under a surface-space point.
    #[must_use]
    pub fn find_target(&self, pt: Point) -> Option<Hit> {
        hit::find_target(pt, &self.active, &self.inactive)
    }

    // --- Viewport ---

    /// The host moved or resized the surface.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        debug!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = viewport;
        if self.config.manage_resize {
            self.position(Placement::Conform, None);
        }
        vec![Action::Render(Layers::Both)]
    }

    // --- Membership ---

    /// Put photos on the surface, inactive.
    ///
    /// Photos without content are parked and a load is requested; they are
    /// added with default options once [`SurfaceCore::content_ready`] arrives.
    pub fn add(&mut self, photos: impl Into<OneOrMany<Photo>>, options: AddOptions) -> Vec<Action> {
        let mut actions = Vec::new();
        let area = self.viewport.size();
        let mut added = 0;

        for mut photo in photos.into().into_vec() {
            let id = photo.id();
            if self.photo(id).is_some() {
                warn!(photo_id = %id, "photo already on the surface; ignoring add");
                continue;
            }
            if !photo.is_ready() {
                if let Some(path) = photo.load() {
                    actions.push(Action::LoadRequested { id, path });
                }
                debug!(photo_id = %id, "photo parked until content is ready");
                self.pending.push(photo);
                continue;
            }

            if options.normalise {
                photo.normalise(area);
            }
            photo.scale = photo.options().deactivated.scale;
            photo.update();
            place(&mut photo, options.placement, &self.viewport, &mut self.rng);

            photo.active = false;
            self.inactive.push(photo);
            added += 1;
        }

        if added > 0 {
            debug!(added, "photos added to pile");
            actions.push(Action::Render(Layers::Inactive));
        }
        actions
    }

    /// Take photos off the surface.
    pub fn remove(&mut self, ids: impl Into<OneOrMany<PhotoId>>) -> Vec<Action> {
        let ids = ids.into().into_vec();
        self.inactive.retain(|p| !ids.contains(&p.id()));
        self.active.retain(|p| !ids.contains(&p.id()));
        self.pending.retain(|p| !ids.contains(&p.id()));

        let mut actions = Vec::new();
        if self.picked_up().is_none() {
            self.set_cursor(Cursor::Default, &mut actions);
        }
        actions.push(Action::Render(Layers::Both));
        actions
    }

    /// Take every photo off the surface.
    pub fn empty(&mut self) -> Vec<Action> {
        self.inactive.clear();
        self.active.clear();
        self.pending.clear();
        let mut actions = Vec::new();
        self.set_cursor(Cursor::Default, &mut actions);
        actions.push(Action::Render(Layers::Both));
        actions
    }

    // --- Content ---

    /// The loading collaborator decoded the image for `id` at `natural` size.
    pub fn content_ready(&mut self, id: PhotoId, natural: Size) -> Vec<Action> {
        if let Some(index) = self.pending.iter().position(|p| p.id() == id) {
            let mut photo = self.pending.remove(index);
            photo.content_ready(natural);
            let mut actions = vec![Action::Set(id)];
            actions.extend(self.add(photo, AddOptions::default()));
            return actions;
        }

        let Some(photo) = self.photo_mut(id) else {
            warn!(photo_id = %id, "content ready for unknown photo");
            return Vec::new();
        };
        photo.content_ready(natural);
        vec![Action::Set(id), Action::Render(Layers::Both)]
    }

    /// Swap a photo's image for the one at `path`.
    pub fn set_path(&mut self, id: PhotoId, path: impl Into<String>) -> Vec<Action> {
        let Some(photo) = self.photo_mut(id) else {
            warn!(photo_id = %id, "set_path for unknown photo");
            return Vec::new();
        };
        let mut actions = Vec::new();
        if let Some(path) = photo.set_path(path) {
            actions.push(Action::LoadRequested { id, path });
        }
        actions.push(Action::Render(Layers::Both));
        actions
    }

    // --- Bulk pose ---

    /// Reposition the selected photos, or every placed photo when `selection` is `None`.
    pub fn position(&mut self, placement: Placement, selection: Option<OneOrMany<PhotoId>>) -> Vec<Action> {
        let touched = self.for_each_selected(selection, |photo, viewport, rng| place(photo, placement, viewport, rng));
        debug!(?placement, touched, "photos positioned");
        vec![Action::Render(Layers::Both)]
    }

    /// Set the scale of the selected photos, or of every placed photo.
    pub fn scale(&mut self, factor: f64, selection: Option<OneOrMany<PhotoId>>) -> Vec<Action> {
        self.for_each_selected(selection, |photo, _, _| {
            photo.scale = factor;
            photo.update();
        });
        vec![Action::Render(Layers::Both)]
    }

    /// Fit the selected photos, or every placed photo, to the surface.
    pub fn normalise(&mut self, selection: Option<OneOrMany<PhotoId>>) -> Vec<Action> {
        self.for_each_selected(selection, |photo, viewport, _| photo.normalise(viewport.size()));
        vec![Action::Render(Layers::Both)]
    }

    fn for_each_selected<F>(&mut self, selection: Option<OneOrMany<PhotoId>>, mut f: F) -> usize
    where
        F: FnMut(&mut Photo, &Viewport, &mut StdRng),
    {
        let ids = selection.map(OneOrMany::into_vec);
        let viewport = self.viewport;
        let mut touched = 0;
        for photo in self.inactive.iter_mut().chain(self.active.iter_mut()) {
            if ids.as_ref().is_none_or(|ids| ids.contains(&photo.id())) {
                f(photo, &viewport, &mut self.rng);
                touched += 1;
            }
        }
        touched
    }

    // --- Transitions ---

    /// Pick up `id` with the pointer at surface-space `pointer`.
    ///
    /// The photo moves to the top of the active stack and starts animating
    /// toward its activated pose. Ignored while any photo is picked up, so at
    /// most one photo is carried at a time. A photo that is still being put
    /// down is picked back up from wherever its put-down animation had reached.
    pub fn activate(&mut self, id: PhotoId, pointer: Point, now_ms: f64) -> Vec<Action> {
        if let Some(carried) = self.picked_up()
            && carried.id() != id
        {
            debug!(photo_id = %id, carried = %carried.id(), "another photo is picked up; ignoring activate");
            return Vec::new();
        }
        if let Some(index) = self.active.iter().position(|p| p.id() == id) {
            if self.active[index].active {
                debug!(photo_id = %id, "already active; ignoring activate");
                return Vec::new();
            }
            let photo = self.active.remove(index);
            self.active.push(photo);
        } else if let Some(index) = self.inactive.iter().position(|p| p.id() == id) {
            let photo = self.inactive.remove(index);
            self.active.push(photo);
        } else {
            warn!(photo_id = %id, "activate for photo not on the surface");
            return Vec::new();
        }

        let SurfaceCore { active, rng, config, .. } = self;
        let Some(photo) = active.last_mut() else {
            return Vec::new();
        };

        photo.click_offset = Some(pointer - photo.position);
        photo.active = true;
        photo.activated_at = Some(now_ms);

        if let Some(fx) = photo.deselect_fx.as_mut() {
            fx.cancel();
        }

        let target = photo.options().activated;
        let theta = target.theta.resolve(photo.theta, photo.scale, target.scale, rng);
        let ranges = vec![
            PropertyRange::new(Property::Scale, photo.scale, target.scale),
            PropertyRange::new(Property::Theta, photo.theta, theta),
        ];
        photo.select_fx.get_or_insert_with(|| Fx::new(config.select)).start(ranges);
        debug!(photo_id = %id, now_ms, "photo activated");

        let mut actions = Vec::new();
        self.set_cursor(Cursor::None, &mut actions);
        actions.push(Action::Activated(id));
        actions.push(Action::Render(Layers::Both));
        actions
    }

    /// Start putting down `id`. Only the picked-up photo can be put down.
    ///
    /// [`Action::Deactivated`] is returned straight away; the photo leaves
    /// the active stack when its animation completes, reported by
    /// [`Action::Settled`] from a later [`SurfaceCore::tick`].
    pub fn deactivate(&mut self, id: PhotoId, now_ms: f64) -> Vec<Action> {
        let SurfaceCore { active, rng, config, .. } = self;
        let Some(photo) = active.last_mut().filter(|p| p.active && p.id() == id) else {
            debug!(photo_id = %id, "not the picked-up photo; ignoring deactivate");
            return Vec::new();
        };

        photo.active = false;
        photo.deactivated_at = Some(now_ms);
        photo.click_offset = None;

        if let Some(fx) = photo.select_fx.as_mut() {
            fx.cancel();
        }

        let target = photo.options().deactivated;
        let theta = target.theta.resolve(photo.theta, photo.scale, target.scale, rng);
        let ranges = vec![
            PropertyRange::new(Property::Scale, photo.scale, target.scale),
            PropertyRange::new(Property::Theta, photo.theta, theta),
        ];
        photo
            .deselect_fx
            .get_or_insert_with(|| Fx::new(config.deselect).on_complete(Transition::Deselect))
            .start(ranges);
        debug!(photo_id = %id, now_ms, "photo deactivated");

        let mut actions = Vec::new();
        self.set_cursor(Cursor::Move, &mut actions);
        actions.push(Action::Deactivated(id));
        actions
    }

    /// Move a photo whose put-down finished from the active stack to the pile.
    fn settle(&mut self, id: PhotoId) -> Vec<Action> {
        let Some(index) = self.active.iter().position(|p| p.id() == id && !p.active) else {
            return Vec::new();
        };
        let photo = self.active.remove(index);
        self.inactive.push(photo);
        debug!(photo_id = %id, "photo settled on pile");
        vec![Action::Settled(id), Action::Render(Layers::Both)]
    }

    /// Advance every running transition by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<Action> {
        let mut moved = false;
        let mut settled = Vec::new();
        for photo in &mut self.active {
            let tick = photo.tick_transitions(dt_ms);
            moved |= tick.moved;
            if tick.completed == Some(Transition::Deselect) {
                settled.push(photo.id());
            }
        }

        let mut actions = Vec::new();
        if moved {
            trace!(dt_ms, "animation tick");
            actions.push(Action::Render(Layers::Active));
        }
        for id in settled {
            actions.extend(self.settle(id));
        }
        actions
    }

    // --- Pointer ---

    /// Pointer pressed at page-space `page`.
    pub fn on_pointer_down(&mut self, page: Point, now_ms: f64) -> Vec<Action> {
        let pos = self.viewport.page_to_surface(page);
        self.click = Some(ClickRecord { time_ms: now_ms, position: pos });

        if self.picked_up().is_some() {
            return Vec::new();
        }
        match self.find_target(pos) {
            Some(hit) => self.activate(hit.photo_id, pos, now_ms),
            None => Vec::new(),
        }
    }

    /// Pointer moved to page-space `page`.
    ///
    /// Drags the picked-up photo, repainting only the active layer. With
    /// nothing picked up, only the hover cursor changes.
    pub fn on_pointer_move(&mut self, page: Point) -> Vec<Action> {
        let pos = self.viewport.page_to_surface(page);

        if let Some(photo) = self.active.last_mut().filter(|p| p.active) {
            let offset = photo.click_offset.unwrap_or_default();
            photo.position = pos - offset;
            photo.update();
            return vec![Action::Render(Layers::Active)];
        }

        let cursor = if self.find_target(pos).is_some() { Cursor::Move } else { Cursor::Default };
        let mut actions = Vec::new();
        self.set_cursor(cursor, &mut actions);
        actions
    }

    /// Pointer released at page-space `page`.
    ///
    /// A quick release with little travel is a click: it keeps a photo that
    /// was just picked up, puts down one that was already held, or picks up
    /// the photo under the pointer. A slow release or a long drag always puts
    /// the carried photo down.
    pub fn on_pointer_up(&mut self, page: Point, now_ms: f64) -> Vec<Action> {
        let Some(click) = self.click else {
            return Vec::new();
        };
        let pos = self.viewport.page_to_surface(page);
        let limits = self.config.click;
        let carried = self.picked_up().map(|p| (p.id(), p.activated_at.unwrap_or(now_ms)));

        if click.elapsed(now_ms) < limits.duration_ms {
            match carried {
                Some((id, activated_at)) => {
                    let held_ms = now_ms - activated_at;
                    if held_ms > limits.duration_ms || click.moved_beyond(pos, limits.distance) {
                        return self.deactivate(id, now_ms);
                    }
                    Vec::new()
                }
                None => match self.find_target(pos) {
                    Some(hit) => self.activate(hit.photo_id, pos, now_ms),
                    None => Vec::new(),
                },
            }
        } else if let Some((id, _)) = carried {
            self.deactivate(id, now_ms)
        } else {
            Vec::new()
        }
    }

    /// Pointer left the surface. Handled as a release.
    pub fn on_pointer_leave(&mut self, page: Point, now_ms: f64) -> Vec<Action> {
        self.on_pointer_up(page, now_ms)
    }

    fn set_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

/// Apply a placement strategy to one photo.
fn place(photo: &mut Photo, placement: Placement, viewport: &Viewport, rng: &mut impl Rng) {
    let area = match placement {
        Placement::AsIs => return,
        Placement::Conform => {
            let bounds = viewport.area();
            let scaled = photo.scaled_size();
            if photo.position.x > bounds.width {
                photo.position.x = bounds.width - scaled.width;
            }
            if photo.position.y > bounds.height {
                photo.position.y = bounds.height - scaled.height;
            }
            photo.update();
            return;
        }
        Placement::Pile => viewport.pile_area(),
        Placement::Random => viewport.area(),
    };

    photo.theta = f64::from(rng.random_range(TILT_RANGE_DEG)).to_radians();
    photo.position = Point::new(
        (rng.random::<f64>() * area.width + area.x).floor(),
        (rng.random::<f64>() * area.height + area.y).floor(),
    );
    photo.update();
}

/// The full surface: a [`SurfaceCore`] plus the renderer it paints through.
///
/// Every operation returns the non-render actions of the core; repaint
/// requests are coalesced and executed before returning.
pub struct Surface<R: Renderer> {
    renderer: R,
    pub core: SurfaceCore,
}

impl<R: Renderer> Surface<R> {
    /// Create a surface sized to the renderer's viewport.
    #[must_use]
    pub fn new(renderer: R, config: SurfaceConfig) -> Self {
        let viewport = Viewport::sized(renderer.viewport_size());
        Self { renderer, core: SurfaceCore::new(config, viewport) }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut layers: Option<Layers> = None;
        let mut out = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                Action::Render(l) => layers = Some(layers.map_or(l, |current| current.union(l))),
                other => out.push(other),
            }
        }
        if let Some(layers) = layers {
            render::draw(&mut self.renderer, &self.core.active, &self.core.inactive, layers);
        }
        out
    }

    // --- Delegated operations ---

    /// Re-read the renderer's size; `origin` is the surface's page position.
    pub fn resize(&mut self, origin: Point) -> Vec<Action> {
        let size = self.renderer.viewport_size();
        let viewport = Viewport { x: origin.x, y: origin.y, width: size.width, height: size.height };
        let actions = self.core.set_viewport(viewport);
        self.dispatch(actions)
    }

    /// Repaint the given layers.
    pub fn repaint(&mut self, layers: Layers) {
        render::draw(&mut self.renderer, &self.core.active, &self.core.inactive, layers);
    }

    pub fn add(&mut self, photos: impl Into<OneOrMany<Photo>>, options: AddOptions) -> Vec<Action> {
        let actions = self.core.add(photos, options);
        self.dispatch(actions)
    }

    pub fn remove(&mut self, ids: impl Into<OneOrMany<PhotoId>>) -> Vec<Action> {
        let actions = self.core.remove(ids);
        self.dispatch(actions)
    }

    pub fn empty(&mut self) -> Vec<Action> {
        let actions = self.core.empty();
        self.dispatch(actions)
    }

    pub fn content_ready(&mut self, id: PhotoId, natural: Size) -> Vec<Action> {
        let actions = self.core.content_ready(id, natural);
        self.dispatch(actions)
    }

    pub fn set_path(&mut self, id: PhotoId, path: impl Into<String>) -> Vec<Action> {
        let actions = self.core.set_path(id, path);
        self.dispatch(actions)
    }

    pub fn position(&mut self, placement: Placement, selection: Option<OneOrMany<PhotoId>>) -> Vec<Action> {
        let actions = self.core.position(placement, selection);
        self.dispatch(actions)
    }

    pub fn scale(&mut self, factor: f64, selection: Option<OneOrMany<PhotoId>>) -> Vec<Action> {
        let actions = self.core.scale(factor, selection);
        self.dispatch(actions)
    }

    pub fn normalise(&mut self, selection: Option<OneOrMany<PhotoId>>) -> Vec<Action> {
        let actions = self.core.normalise(selection);
        self.dispatch(actions)
    }

    pub fn activate(&mut self, id: PhotoId, pointer: Point, now_ms: f64) -> Vec<Action> {
        let actions = self.core.activate(id, pointer, now_ms);
        self.dispatch(actions)
    }

    pub fn deactivate(&mut self, id: PhotoId, now_ms: f64) -> Vec<Action> {
        let actions = self.core.deactivate(id, now_ms);
        self.dispatch(actions)
    }

    pub fn tick(&mut self, dt_ms: f64) -> Vec<Action> {
        let actions = self.core.tick(dt_ms);
        self.dispatch(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, page: Point, now_ms: f64) -> Vec<Action> {
        let actions = self.core.on_pointer_down(page, now_ms);
        self.dispatch(actions)
    }

    pub fn on_pointer_move(&mut self, page: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(page);
        self.dispatch(actions)
    }

    pub fn on_pointer_up(&mut self, page: Point, now_ms: f64) -> Vec<Action> {
        let actions = self.core.on_pointer_up(page, now_ms);
        self.dispatch(actions)
    }

    pub fn on_pointer_leave(&mut self, page: Point, now_ms: f64) -> Vec<Action> {
        let actions = self.core.on_pointer_leave(page, now_ms);
        self.dispatch(actions)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn photos(&self) -> Vec<&Photo> {
        self.core.photos()
    }

    #[must_use]
    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.core.photo(id)
    }

    #[must_use]
    pub fn find_target(&self, pt: Point) -> Option<Hit> {
        self.core.find_target(pt)
    }
}
