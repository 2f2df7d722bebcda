//! Pointer hit testing against falling shapes
//!
//! All tests are strict: a pointer exactly on the boundary misses.
//! Triangles use the circle test. That is a known approximation of the
//! drawn outline (apex at `y - size`, base at `y + size`), kept as is.

use glam::Vec2;

use super::state::{Shape, ShapeKind};

/// Pointer strictly inside a circle of `radius` around `center`
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Pointer strictly inside an axis-aligned square of half-extent `half`
#[inline]
pub fn point_in_square(point: Vec2, center: Vec2, half: f32) -> bool {
    let d = (point - center).abs();
    d.x < half && d.y < half
}

/// Approximate triangle test (bounding circle)
#[inline]
pub fn point_in_triangle_approx(point: Vec2, center: Vec2, size: f32) -> bool {
    point_in_circle(point, center, size)
}

/// Variant-specific containment test for one shape
pub fn shape_contains(shape: &Shape, point: Vec2) -> bool {
    match shape.kind {
        ShapeKind::Circle => point_in_circle(point, shape.pos, shape.size),
        ShapeKind::Square => point_in_square(point, shape.pos, shape.size),
        ShapeKind::Triangle => point_in_triangle_approx(point, shape.pos, shape.size),
    }
}

/// Index of the topmost (most recently spawned) shape under `point`
///
/// `shapes` must be sorted oldest first.
pub fn pick_shape(shapes: &[Shape], point: Vec2) -> Option<usize> {
    shapes.iter().rposition(|s| shape_contains(s, point))
}
