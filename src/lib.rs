//! Interaction core for a surface of photos scattered like prints on a table.
//!
//! Photos lie tilted in an inactive pile. Clicking or dragging one picks it
//! up: it moves to the active stack, grows, straightens and follows the
//! pointer. Releasing it (or clicking it again) puts it down, and once the
//! put-down animation finishes it settles back on top of the pile.
//!
//! The crate owns no pixels, no clock and no image decoder. The host feeds
//! pointer events and frame ticks in, implements [`render::Renderer`] to
//! draw, and fetches images when asked through [`surface::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`surface`] | Top-level [`surface::Surface`] and testable [`surface::SurfaceCore`] |
//! | [`photo`] | Photo pose, content source and bounding quadrilateral |
//! | [`anim`] | Easing curves and the [`anim::Fx`] tween handle |
//! | [`hit`] | Ray-cast hit-testing against photo bounds |
//! | [`input`] | Pointer feedback, placement strategies and call options |
//! | [`render`] | Renderer seam and shadow geometry |
//! | [`geom`] | Points, sizes, quads and the page/surface viewport |
//! | [`config`] | Surface and photo options with JSON loading |
//! | [`consts`] | Shared numeric defaults (scales, durations, click limits) |

pub mod anim;
pub mod config;
pub mod consts;
pub mod geom;
pub mod hit;
pub mod input;
pub mod photo;
pub mod render;
pub mod surface;
