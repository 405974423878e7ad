use backdrop_shooter::collision::*;
use backdrop_shooter::entities::Player;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn random_rect(rng: &mut StdRng) -> Rect {
    let left = rng.gen_range(-100.0..100.0);
    let top = rng.gen_range(-100.0..100.0);
    Rect::new(left, top, left + rng.gen_range(1.0..80.0), top + rng.gen_range(1.0..80.0))
}

// ── rect_overlap ──────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_intersecting() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 15.0, 15.0);
    assert!(rect_overlap(&a, &b));
}

#[test]
fn rect_overlap_touching_edges_counts() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 20.0, 10.0);
    assert!(rect_overlap(&a, &b));
}

#[test]
fn rect_overlap_separated() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!rect_overlap(&a, &Rect::new(11.0, 0.0, 20.0, 10.0)));
    assert!(!rect_overlap(&a, &Rect::new(0.0, 11.0, 10.0, 20.0)));
}

#[test]
fn rect_overlap_containment() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 60.0, 60.0);
    assert!(rect_overlap(&outer, &inner));
    assert!(rect_overlap(&inner, &outer));
}

#[test]
fn rect_overlap_is_symmetric() {
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let a = random_rect(&mut rng);
        let b = random_rect(&mut rng);
        assert_eq!(rect_overlap(&a, &b), rect_overlap(&b, &a), "{a:?} vs {b:?}");
    }
}

#[test]
fn centered_rect_edges() {
    let r = Rect::centered(50.0, 20.0, 40.0, 10.0);
    assert_eq!(r, Rect::new(30.0, 15.0, 70.0, 25.0));
    assert_eq!(r.expanded(5.0), Rect::new(25.0, 10.0, 75.0, 30.0));
}

// ── circle_rect_overlap ───────────────────────────────────────────────────────

#[test]
fn circle_centre_inside_rect() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(circle_rect_overlap(&Circle::new(5.0, 5.0, 1.0), &r));
}

#[test]
fn circle_reaching_an_edge() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(circle_rect_overlap(&Circle::new(13.0, 5.0, 3.0), &r));
    assert!(!circle_rect_overlap(&Circle::new(13.5, 5.0, 3.0), &r));
}

#[test]
fn circle_near_a_corner_uses_true_distance() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    // 3 right and 3 below the corner: ~4.24 away.
    assert!(!circle_rect_overlap(&Circle::new(13.0, 13.0, 4.0), &r));
    assert!(circle_rect_overlap(&Circle::new(13.0, 13.0, 4.5), &r));
}

#[test]
fn circle_far_outside() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!circle_rect_overlap(&Circle::new(500.0, -300.0, 20.0), &r));
}

// ── point_in_triangle ─────────────────────────────────────────────────────────

const A: Point = Point::new(0.0, 0.0);
const B: Point = Point::new(30.0, 0.0);
const C: Point = Point::new(0.0, 30.0);

#[test]
fn centroid_is_inside() {
    assert!(point_in_triangle(Point::new(10.0, 10.0), A, B, C));
}

#[test]
fn vertices_and_edges_are_inside() {
    assert!(point_in_triangle(A, A, B, C));
    assert!(point_in_triangle(Point::new(15.0, 15.0), A, B, C));
}

#[test]
fn far_point_is_outside() {
    assert!(!point_in_triangle(Point::new(100.0, 100.0), A, B, C));
    assert!(!point_in_triangle(Point::new(-1.0, 5.0), A, B, C));
    assert!(!point_in_triangle(Point::new(16.0, 16.0), A, B, C));
}

#[test]
fn winding_order_does_not_matter() {
    let p = Point::new(5.0, 5.0);
    assert!(point_in_triangle(p, A, B, C));
    assert!(point_in_triangle(p, C, B, A));
    assert!(point_in_triangle(p, B, A, C));
}

#[test]
fn large_triangles_keep_precision() {
    let (a, b, c) = (
        Point::new(1000.0, 1000.0),
        Point::new(5000.0, 1000.0),
        Point::new(1000.0, 5000.0),
    );
    assert!(point_in_triangle(Point::new(2000.0, 2000.0), a, b, c));
    assert!(!point_in_triangle(Point::new(3100.0, 3100.0), a, b, c));
}

// ── Player silhouette ─────────────────────────────────────────────────────────

fn player() -> Player {
    Player {
        x: 640.0,
        y: 640.0,
        width: 40.0,
        height: 60.0,
        lives: 3,
        hit_effect_timer: 0,
        shoot_cooldown: 0,
    }
}

#[test]
fn wings_reach_past_the_body() {
    let p = player();
    let body = p.body_rect();
    let [left, right] = p.wings();
    let left_tip = Point::new(614.0, 682.0);
    let right_tip = Point::new(666.0, 682.0);
    assert!(!body.contains(left_tip));
    assert!(left.contains(left_tip));
    assert!(right.contains(right_tip));
    assert!(!left.contains(right_tip));
}

#[test]
fn body_rect_spans_the_ship() {
    let p = player();
    assert_eq!(p.body_rect(), Rect::new(620.0, 640.0, 660.0, 700.0));
    assert_eq!(p.center(), Point::new(640.0, 670.0));
}
