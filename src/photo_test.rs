#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::anim::{Easing, FxOptions, Link, PropertyRange};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn dist(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// 70x20 content with the default 15px border gives a 100x50 base.
fn sample_photo() -> Photo {
    let mut photo = Photo::with_size(Size::new(70.0, 20.0), PhotoOptions::default());
    photo.position = pt(200.0, 200.0);
    photo.update();
    photo
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn base_size_includes_border_on_both_sides() {
    let photo = sample_photo();
    assert_eq!(photo.base_size(), Size::new(100.0, 50.0));
    assert_eq!(photo.scaled_size(), Size::new(100.0, 50.0));
}

#[test]
fn bounds_unrotated_corners() {
    let quad = sample_photo().bounds().unwrap();
    assert!(point_approx_eq(quad.tl, pt(150.0, 175.0)));
    assert!(point_approx_eq(quad.tr, pt(250.0, 175.0)));
    assert!(point_approx_eq(quad.br, pt(250.0, 225.0)));
    assert!(point_approx_eq(quad.bl, pt(150.0, 225.0)));
}

#[test]
fn bounds_scale_about_position() {
    let mut photo = sample_photo();
    photo.scale = 0.2;
    photo.update();
    let quad = photo.bounds().unwrap();
    assert!(point_approx_eq(quad.tl, pt(190.0, 195.0)));
    assert!(point_approx_eq(quad.br, pt(210.0, 205.0)));
}

#[test]
fn bounds_quarter_turn_swaps_extent() {
    let mut photo = sample_photo();
    photo.theta = FRAC_PI_2;
    photo.update();
    let quad = photo.bounds().unwrap();
    let xs = [quad.tl.x, quad.tr.x, quad.br.x, quad.bl.x];
    let ys = [quad.tl.y, quad.tr.y, quad.br.y, quad.bl.y];
    let (min_x, max_x) = xs.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let (min_y, max_y) = ys.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &y| (lo.min(y), hi.max(y)));
    assert!(approx_eq(max_x - min_x, 50.0));
    assert!(approx_eq(max_y - min_y, 100.0));
}

#[test]
fn bounds_are_a_rectangle_at_any_angle() {
    let mut photo = sample_photo();
    for step in 0..24 {
        photo.theta = f64::from(step) * 0.3 - 3.0;
        photo.update();
        let q = photo.bounds().unwrap();
        assert!(approx_eq(dist(q.tl, q.br), dist(q.tr, q.bl)), "theta {}", photo.theta);
        assert!(approx_eq(dist(q.tl, q.tr), 100.0));
        assert!(approx_eq(dist(q.tr, q.br), 50.0));
        assert!(point_approx_eq(q.center(), photo.position));
    }
}

#[test]
fn zero_sized_content_has_finite_bounds() {
    let options = PhotoOptions { border: crate::config::Border { size: 0.0, ..Default::default() }, ..Default::default() };
    let photo = Photo::with_size(Size::new(0.0, 0.0), options);
    let quad = photo.bounds().unwrap();
    assert!(quad.tl.x.is_finite() && quad.tl.y.is_finite());
}

#[test]
fn lazy_photo_without_content_has_no_bounds() {
    let photo = Photo::from_path("a.jpg", PhotoOptions::default());
    assert!(!photo.is_ready());
    assert!(photo.bounds().is_none());
}

// =============================================================
// Normalise
// =============================================================

#[test]
fn normalise_fits_wide_content_by_width() {
    let mut photo = Photo::with_size(Size::new(2000.0, 1000.0), PhotoOptions::default());
    photo.scale = 0.5;
    photo.normalise(Size::new(800.0, 600.0));
    assert_eq!(photo.scale, 1.0);
    assert_eq!(photo.content().size(), Some(Size::new(770.0, 370.0)));
    assert_eq!(photo.base_size(), Size::new(800.0, 400.0));
}

#[test]
fn normalise_fits_tall_content_by_height() {
    let mut photo = Photo::with_size(Size::new(500.0, 1000.0), PhotoOptions::default());
    photo.normalise(Size::new(800.0, 600.0));
    let base = photo.base_size();
    assert!(approx_eq(base.height, 600.0));
    assert!(approx_eq(base.width, 300.0));
}

#[test]
fn normalise_never_exceeds_reference() {
    for (w, h) in [(10.0, 10.0), (3000.0, 20.0), (20.0, 3000.0), (640.0, 480.0)] {
        let mut photo = Photo::with_size(Size::new(w, h), PhotoOptions::default());
        photo.normalise(Size::new(800.0, 600.0));
        let base = photo.base_size();
        assert!(base.width <= 800.0 + EPSILON && base.height <= 600.0 + EPSILON, "{w}x{h} -> {base:?}");
    }
}

#[test]
fn normalise_without_content_only_resets_scale() {
    let mut photo = Photo::from_path("a.jpg", PhotoOptions::default());
    photo.scale = 0.3;
    photo.normalise(Size::new(800.0, 600.0));
    assert_eq!(photo.scale, 1.0);
    assert!(photo.bounds().is_none());
}

// =============================================================
// Content loading
// =============================================================

#[test]
fn lazy_load_requests_path_once() {
    let mut photo = Photo::from_path("a.jpg", PhotoOptions::default());
    assert_eq!(photo.load(), Some("a.jpg".to_string()));
    assert_eq!(photo.load(), None);
}

#[test]
fn static_photo_never_requests_load() {
    let mut photo = sample_photo();
    assert_eq!(photo.load(), None);
}

#[test]
fn content_ready_marks_loaded_and_sizes_photo() {
    let mut photo = Photo::from_path("a.jpg", PhotoOptions::default());
    photo.load();
    photo.content_ready(Size::new(70.0, 20.0));
    assert!(photo.is_ready());
    assert!(!photo.is_loading());
    assert_eq!(photo.base_size(), Size::new(100.0, 50.0));
    match photo.content() {
        Content::Lazy(data) => assert_eq!(data.state(), LoadState::Loaded),
        Content::Static { .. } => panic!("expected lazy content"),
    }
}

#[test]
fn set_path_keeps_old_image_while_loading() {
    let mut photo = sample_photo();
    assert_eq!(photo.set_path("hi-res.jpg"), Some("hi-res.jpg".to_string()));
    assert!(photo.is_loading());
    assert!(photo.is_ready());
    assert_eq!(photo.base_size(), Size::new(100.0, 50.0));

    photo.content_ready(Size::new(170.0, 70.0));
    assert!(!photo.is_loading());
    assert_eq!(photo.base_size(), Size::new(200.0, 100.0));
}

#[test]
fn set_content_with_normalising_area_keeps_footprint() {
    let options = PhotoOptions { normalising_area: Some(Size::new(400.0, 300.0)), ..Default::default() };
    let mut photo = Photo::with_size(Size::new(370.0, 170.0), options);
    photo.scale = 0.5;
    photo.set_content(Size::new(4000.0, 2000.0));
    assert_eq!(photo.base_size(), Size::new(400.0, 200.0));
    assert_eq!(photo.scale, 0.5);
}

#[test]
fn photo_data_set_resets_state() {
    let mut data = PhotoData::new("a.jpg");
    data.load();
    assert_eq!(data.state(), LoadState::Loading);
    data.set("b.jpg");
    assert_eq!(data.state(), LoadState::NotLoaded);
    assert_eq!(data.path(), "b.jpg");
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn tick_transitions_reports_deselect_completion() {
    let mut photo = sample_photo();
    let options = FxOptions { duration_ms: 100.0, easing: Easing::Linear, link: Link::Cancel };
    let mut fx = Fx::new(options).on_complete(Transition::Deselect);
    fx.start(vec![PropertyRange::new(Property::Scale, 1.0, 0.2)]);
    photo.deselect_fx = Some(fx);

    let first = photo.tick_transitions(50.0);
    assert!(first.moved);
    assert_eq!(first.completed, None);
    assert!(approx_eq(photo.scale, 0.6));

    let last = photo.tick_transitions(50.0);
    assert_eq!(last.completed, Some(Transition::Deselect));
    assert_eq!(photo.scale, 0.2);
    assert_eq!(photo.transition_state(Transition::Deselect), Some(FxState::Completed));
    assert_eq!(photo.transition_state(Transition::Select), None);
}

#[test]
fn tick_transitions_keeps_bounds_current() {
    let mut photo = sample_photo();
    let mut fx = Fx::new(FxOptions { duration_ms: 0.0, ..FxOptions::default() });
    fx.start(vec![PropertyRange::new(Property::X, 200.0, 300.0)]);
    photo.select_fx = Some(fx);

    photo.tick_transitions(16.0);
    assert!(point_approx_eq(photo.bounds().unwrap().center(), pt(300.0, 200.0)));
}

#[test]
fn tick_transitions_without_handles_is_inert() {
    let mut photo = sample_photo();
    assert_eq!(photo.tick_transitions(16.0), TransitionTick::default());
}
