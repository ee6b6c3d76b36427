#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_sub_is_componentwise() {
    let d = Point::new(10.0, 4.0) - Point::new(3.0, 6.0);
    assert_eq!(d, Point::new(7.0, -2.0));
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

// --- Size ---

#[test]
fn size_scaled_multiplies_both_dimensions() {
    let s = Size::new(100.0, 50.0).scaled(0.2);
    assert!(approx_eq(s.width, 20.0));
    assert!(approx_eq(s.height, 10.0));
}

#[test]
fn size_degenerate_when_either_side_non_positive() {
    assert!(Size::new(0.0, 10.0).is_degenerate());
    assert!(Size::new(10.0, 0.0).is_degenerate());
    assert!(Size::new(-1.0, 10.0).is_degenerate());
    assert!(!Size::new(1.0, 1.0).is_degenerate());
}

// --- Quad ---

#[test]
fn quad_edges_walk_the_boundary() {
    let q = Quad {
        tl: Point::new(0.0, 0.0),
        tr: Point::new(10.0, 0.0),
        br: Point::new(10.0, 5.0),
        bl: Point::new(0.0, 5.0),
    };
    let edges = q.edges();
    for i in 0..4 {
        assert_eq!(edges[i].dest, edges[(i + 1) % 4].origin);
    }
    assert_eq!(edges[0].origin, q.tl);
    assert_eq!(edges[3].dest, q.tl);
}

#[test]
fn quad_center_is_midpoint_of_diagonal() {
    let q = Quad {
        tl: Point::new(150.0, 175.0),
        tr: Point::new(250.0, 175.0),
        br: Point::new(250.0, 225.0),
        bl: Point::new(150.0, 225.0),
    };
    assert_eq!(q.center(), Point::new(200.0, 200.0));
}

// --- Viewport ---

#[test]
fn viewport_page_to_surface_subtracts_offset() {
    let vp = Viewport { x: 40.0, y: 25.0, width: 800.0, height: 600.0 };
    assert_eq!(vp.page_to_surface(Point::new(140.0, 125.0)), Point::new(100.0, 100.0));
}

#[test]
fn viewport_sized_sits_at_page_origin() {
    let vp = Viewport::sized(Size::new(800.0, 600.0));
    assert_eq!(vp.x, 0.0);
    assert_eq!(vp.y, 0.0);
    assert_eq!(vp.size(), Size::new(800.0, 600.0));
}

#[test]
fn viewport_area_ignores_page_offset() {
    let vp = Viewport { x: 40.0, y: 25.0, width: 800.0, height: 600.0 };
    assert_eq!(vp.area(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn viewport_pile_area_is_middle_third() {
    let vp = Viewport::sized(Size::new(900.0, 600.0));
    let pile = vp.pile_area();
    assert_eq!(pile, Rect::new(300.0, 200.0, 300.0, 200.0));
    assert_eq!(pile.size(), Size::new(300.0, 200.0));
}
