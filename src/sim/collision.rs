//! Collision detection for axis-aligned bricks
//!
//! Pure geometry: rectangle overlap for pickups, and circle-vs-rectangle for
//! the ball, including which side of the rectangle was struck.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Ball, Body};

/// Compass direction of a collision, in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Scan order used by `classify_direction`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit compass vector
    pub fn compass(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a ball-vs-rectangle check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Side classification of `offset` (meaningless on a miss)
    pub direction: Direction,
    /// Closest point on the rectangle minus the circle centre (zero on a miss)
    pub offset: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            direction: Direction::Up,
            offset: Vec2::ZERO,
        }
    }

    /// Distance the circle has sunk past the struck edge along the resolved axis
    pub fn penetration(&self, radius: f32) -> f32 {
        if self.direction.is_horizontal() {
            radius - self.offset.x.abs()
        } else {
            radius - self.offset.y.abs()
        }
    }
}

/// Axis-aligned bounding-box test; touching edges count as overlapping
pub fn rect_overlap(a: &Body, b: &Body) -> bool {
    let overlap_x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let overlap_y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Check collision between the ball's circle and a rectangle
pub fn circle_rect_collision(ball: &Ball, rect: &Body) -> CollisionResult {
    circle_rect(ball.center(), ball.radius, rect.pos, rect.size)
}

/// Circle-vs-rectangle on raw geometry
pub fn circle_rect(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> CollisionResult {
    let half_extents = rect_size * 0.5;
    let rect_center = rect_pos + half_extents;

    // Clamp the centre-to-centre vector onto the box to get the closest point
    let difference = center - rect_center;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = rect_center + clamped;

    let offset = closest - center;
    if offset.length() < radius {
        CollisionResult {
            hit: true,
            direction: classify_direction(offset),
            offset,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Classify a vector by the compass direction it points closest to.
///
/// Scans Up, Right, Down, Left and keeps a direction only if its dot product
/// strictly beats the running best (seeded at 0), so the first of two equal
/// maxima wins. A zero vector never beats the seed and falls through to
/// `Left`, the last direction compared.
pub fn classify_direction(target: Vec2) -> Direction {
    let normalized = target.normalize_or_zero();
    let mut max = 0.0;
    let mut best = Direction::Left;
    for direction in Direction::ALL {
        let dot = normalized.dot(direction.compass());
        if dot > max {
            max = dot;
            best = direction;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Sprite;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h), Sprite::Block)
    }

    fn ball_at_center(cx: f32, cy: f32, radius: f32) -> Ball {
        Ball::new(Vec2::new(cx - radius, cy - radius), radius, Vec2::ZERO)
    }

    #[test]
    fn test_rect_overlap_touching_edges() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert!(rect_overlap(&a, &b));

        let c = rect(10.1, 0.0, 10.0, 10.0);
        assert!(!rect_overlap(&a, &c));
    }

    #[test]
    fn test_rect_overlap_needs_both_axes() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 20.0, 10.0, 10.0);
        assert!(!rect_overlap(&a, &b));
    }

    #[test]
    fn test_classify_compass_vectors() {
        assert_eq!(classify_direction(Vec2::new(0.0, 1.0)), Direction::Up);
        assert_eq!(classify_direction(Vec2::new(1.0, 0.0)), Direction::Right);
        assert_eq!(classify_direction(Vec2::new(0.0, -1.0)), Direction::Down);
        assert_eq!(classify_direction(Vec2::new(-1.0, 0.0)), Direction::Left);
    }

    #[test]
    fn test_classify_tie_prefers_first_scanned() {
        // Exact diagonal: Up and Right tie, Up is scanned first
        assert_eq!(classify_direction(Vec2::new(1.0, 1.0)), Direction::Up);
        // Right and Down tie, Right is scanned first
        assert_eq!(classify_direction(Vec2::new(1.0, -1.0)), Direction::Right);
        assert_eq!(classify_direction(Vec2::new(-1.0, -1.0)), Direction::Down);
    }

    #[test]
    fn test_classify_is_scale_invariant() {
        let v = Vec2::new(3.0, -7.0);
        assert_eq!(classify_direction(v), classify_direction(v * 100.0));
        assert_eq!(classify_direction(v), Direction::Down);
    }

    #[test]
    fn test_circle_hits_left_face_of_brick() {
        // Ball to the left of the brick: closest point lies to its right
        let brick = rect(100.0, 0.0, 100.0, 100.0);
        let ball = ball_at_center(95.0, 50.0, 12.5);
        let result = circle_rect_collision(&ball, &brick);
        assert!(result.hit);
        assert_eq!(result.direction, Direction::Right);
        assert_eq!(result.offset, Vec2::new(5.0, 0.0));
        assert!((result.penetration(12.5) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_circle_hits_top_face_of_brick() {
        // Ball above the brick (smaller y): closest point is below its centre
        let brick = rect(0.0, 100.0, 100.0, 20.0);
        let ball = ball_at_center(50.0, 90.0, 12.5);
        let result = circle_rect_collision(&ball, &brick);
        assert!(result.hit);
        assert_eq!(result.direction, Direction::Up);
        assert!((result.penetration(12.5) - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_circle_misses_corner() {
        let brick = rect(100.0, 100.0, 50.0, 50.0);
        // 10 px diagonal gap on each axis => distance ~14.1 > 12.5
        let ball = ball_at_center(90.0, 90.0, 12.5);
        let result = circle_rect_collision(&ball, &brick);
        assert!(!result.hit);
        assert_eq!(result.offset, Vec2::ZERO);
    }

    #[test]
    fn test_circle_exactly_radius_away_is_miss() {
        let brick = rect(100.0, 0.0, 100.0, 100.0);
        let ball = ball_at_center(87.5, 50.0, 12.5);
        assert!(!circle_rect_collision(&ball, &brick).hit);
    }

    #[test]
    fn test_horizontal_correction_removes_overlap() {
        let brick = rect(100.0, 0.0, 100.0, 100.0);
        let mut ball = ball_at_center(95.0, 50.0, 12.5);
        let result = circle_rect_collision(&ball, &brick);
        assert_eq!(result.direction, Direction::Right);

        ball.body.pos.x -= result.penetration(ball.radius);
        let after = circle_rect_collision(&ball, &brick);
        assert!(!after.hit);
        assert!((ball.center().x + ball.radius - brick.pos.x).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_rect_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(rect_overlap(&a, &b), rect_overlap(&b, &a));
        }

        #[test]
        fn prop_circle_rect_result_is_consistent(
            cx in -100.0f32..300.0, cy in -100.0f32..300.0, radius in 1.0f32..40.0,
            rx in 0.0f32..200.0, ry in 0.0f32..200.0, rw in 1.0f32..150.0, rh in 1.0f32..150.0,
        ) {
            let ball = ball_at_center(cx, cy, radius);
            let brick = rect(rx, ry, rw, rh);
            let result = circle_rect_collision(&ball, &brick);
            if result.hit {
                prop_assert!(result.offset.length() < radius);
            } else {
                prop_assert_eq!(result.offset, Vec2::ZERO);
            }
        }

        #[test]
        fn prop_classify_is_deterministic(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let v = Vec2::new(x, y);
            prop_assert_eq!(classify_direction(v), classify_direction(v));
        }
    }
}
