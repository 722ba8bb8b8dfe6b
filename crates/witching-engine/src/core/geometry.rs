//! 2D ray geometry for light-beam puzzles.
//!
//! Angles are radians in screen space (x right, y down), so a positive angle
//! turns clockwise on screen.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Unit vector pointing along `angle`.
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the vector from `from` to `to`.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Reflect a travel direction off a flat surface lying along `surface_angle`.
///
/// The surface normal is `surface_angle + PI/2`; the result is
/// `2 * normal - incident - PI`.
pub fn reflect_angle(incident: f32, surface_angle: f32) -> f32 {
    let normal = surface_angle + FRAC_PI_2;
    2.0 * normal - incident - PI
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Segment of length `2 * half_length` centred on `center`, lying along `angle`.
    pub fn centered(center: Vec2, angle: f32, half_length: f32) -> Self {
        let half = direction(angle) * half_length;
        Self::new(center - half, center + half)
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

/// Where a ray first crosses a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray (the ray direction is a unit vector).
    pub distance: f32,
    pub point: Vec2,
}

/// Intersect the ray `origin + t * direction(angle)`, `t > 0`, with `segment`.
/// Rays parallel to the segment never hit.
pub fn ray_segment_intersection(origin: Vec2, angle: f32, segment: &Segment) -> Option<RayHit> {
    let d = direction(angle);
    let s = segment.b - segment.a;
    let denom = d.perp_dot(s);
    if denom.abs() < 1e-6 {
        return None;
    }
    let w = segment.a - origin;
    let t = w.perp_dot(s) / denom;
    let u = w.perp_dot(d) / denom;
    if t > 0.0 && (0.0..=1.0).contains(&u) {
        Some(RayHit { distance: t, point: origin + d * t })
    } else {
        None
    }
}

/// The playfield rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Point where a ray leaving `origin` along `angle` meets the border.
    /// Uses the nearest positive crossing among the four edges, so the
    /// result always lies on the boundary for an origin inside the bounds.
    pub fn exit_point(&self, origin: Vec2, angle: f32) -> Vec2 {
        let d = direction(angle);
        let candidates = [
            (self.width - origin.x) / d.x,
            (0.0 - origin.x) / d.x,
            (self.height - origin.y) / d.y,
            (0.0 - origin.y) / d.y,
        ];
        let t = candidates
            .into_iter()
            .filter(|t| t.is_finite() && *t > 0.0)
            .fold(f32::INFINITY, f32::min);
        if !t.is_finite() {
            return origin;
        }
        let p = origin + d * t;
        // Snap away float error so the point is exactly on the border.
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}
