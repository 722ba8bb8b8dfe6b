//! Light beam tracing through rotatable mirrors toward fixed targets.

use glam::Vec2;
use witching_engine::core::geometry::{
    angle_between, ray_segment_intersection, reflect_angle, wrap_angle,
};
use witching_engine::{Bounds, Segment};

/// Visual and collision length of a mirror.
pub const MIRROR_LENGTH: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamParams {
    pub max_bounces: u32,
    /// Mirror hits closer than this are ignored, so a beam leaving a
    /// mirror does not hit it again.
    pub min_hit_distance: f32,
    /// Radians either side of a target's bearing that still count as aimed at it.
    pub target_tolerance: f32,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            max_bounces: 10,
            min_hit_distance: 5.0,
            target_tolerance: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    pub center: Vec2,
    pub angle_deg: f32,
}

impl Mirror {
    pub fn new(center: Vec2, angle_deg: f32) -> Self {
        Self { center, angle_deg }
    }

    pub fn segment(&self) -> Segment {
        Segment::centered(self.center, self.angle_deg.to_radians(), MIRROR_LENGTH / 2.0)
    }

    /// Turn the mirror to face a pointer dragged around its centre.
    pub fn aim_at(&mut self, pointer: Vec2) {
        self.angle_deg = angle_between(self.center, pointer).to_degrees() + 90.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamEnd {
    Target(usize),
    Edge,
    BounceLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeamPath {
    /// Source first, then every mirror hit, then the end point.
    pub points: Vec<Vec2>,
    pub end: BeamEnd,
    pub bounces: u32,
}

impl BeamPath {
    pub fn hit_target(&self) -> Option<usize> {
        match self.end {
            BeamEnd::Target(i) => Some(i),
            _ => None,
        }
    }
}

enum Hit {
    Mirror(usize, Vec2),
    Target(usize, Vec2),
}

fn nearest_hit(
    origin: Vec2,
    angle: f32,
    mirrors: &[Mirror],
    targets: &[Vec2],
    params: &BeamParams,
) -> Option<Hit> {
    let mut best: Option<(f32, Hit)> = None;

    for (i, mirror) in mirrors.iter().enumerate() {
        let Some(hit) = ray_segment_intersection(origin, angle, &mirror.segment()) else {
            continue;
        };
        if hit.distance <= params.min_hit_distance {
            continue;
        }
        if best.as_ref().map_or(true, |(d, _)| hit.distance < *d) {
            best = Some((hit.distance, Hit::Mirror(i, hit.point)));
        }
    }

    for (i, &target) in targets.iter().enumerate() {
        let off = wrap_angle(angle - angle_between(origin, target)).abs();
        if off >= params.target_tolerance {
            continue;
        }
        let distance = origin.distance(target);
        if best.as_ref().map_or(true, |(d, _)| distance < *d) {
            best = Some((distance, Hit::Target(i, target)));
        }
    }

    best.map(|(_, hit)| hit)
}

/// Follow a beam from `source` until it reaches a target, leaves the
/// screen, or runs out of bounces.
pub fn trace(
    source: Vec2,
    angle: f32,
    mirrors: &[Mirror],
    targets: &[Vec2],
    bounds: Bounds,
    params: &BeamParams,
) -> BeamPath {
    let mut points = vec![source];
    let mut origin = source;
    let mut angle = angle;
    let mut bounces = 0;

    while bounces < params.max_bounces {
        match nearest_hit(origin, angle, mirrors, targets, params) {
            Some(Hit::Mirror(i, point)) => {
                points.push(point);
                angle = reflect_angle(angle, mirrors[i].angle_deg.to_radians());
                origin = point;
                bounces += 1;
            }
            Some(Hit::Target(i, point)) => {
                points.push(point);
                return BeamPath { points, end: BeamEnd::Target(i), bounces };
            }
            None => {
                points.push(bounds.exit_point(origin, angle));
                return BeamPath { points, end: BeamEnd::Edge, bounces };
            }
        }
    }

    BeamPath { points, end: BeamEnd::BounceLimit, bounces }
}
