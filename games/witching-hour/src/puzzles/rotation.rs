//! Floating runes: click each rune to turn it 45 degrees until it faces
//! its destined direction.

use glam::Vec2;
use witching_engine::{Bounds, Rng};

pub const RUNE_COUNT: usize = 4;
pub const HIT_RADIUS: f32 = 35.0;
pub const STEP_DEG: u32 = 45;
/// A rune within this many degrees of its target locks in place.
pub const TOLERANCE_DEG: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuneDef {
    pub symbol: &'static str,
    pub target_deg: u32,
}

pub const RUNES: [RuneDef; RUNE_COUNT] = [
    RuneDef { symbol: "⚡", target_deg: 0 },
    RuneDef { symbol: "🌙", target_deg: 90 },
    RuneDef { symbol: "🔮", target_deg: 180 },
    RuneDef { symbol: "⭐", target_deg: 270 },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rune {
    pub position: Vec2,
    pub rotation_deg: u32,
    pub target_deg: u32,
    pub locked: bool,
}

impl Rune {
    fn is_aligned(&self) -> bool {
        let diff = self.rotation_deg.abs_diff(self.target_deg);
        diff <= TOLERANCE_DEG || diff >= 360 - TOLERANCE_DEG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    Ignored,
    Turned,
    Locked,
    /// This rune locked and it was the last one.
    Completed,
}

#[derive(Debug, Clone)]
pub struct RotationPuzzle {
    runes: [Rune; RUNE_COUNT],
    complete: bool,
}

impl RotationPuzzle {
    /// Place the runes around the centre of `bounds` with random rotations.
    pub fn new(bounds: Bounds, rng: &mut Rng) -> Self {
        let center = Vec2::new(bounds.width / 2.0, bounds.height * 0.5);
        let radius = bounds.width.min(bounds.height) * 0.15;
        let runes = RUNES.map(|def| {
            let a = (def.target_deg as f32).to_radians();
            Rune {
                position: center + Vec2::new(a.cos(), a.sin()) * radius,
                rotation_deg: rng.range(0, 360),
                target_deg: def.target_deg,
                locked: false,
            }
        });
        Self { runes, complete: false }
    }

    pub fn runes(&self) -> &[Rune; RUNE_COUNT] {
        &self.runes
    }

    pub fn rune_at(&self, point: Vec2) -> Option<usize> {
        self.runes
            .iter()
            .position(|r| r.position.distance(point) <= HIT_RADIUS)
    }

    pub fn rotate(&mut self, index: usize) -> RotateOutcome {
        if self.complete {
            return RotateOutcome::Ignored;
        }
        let Some(rune) = self.runes.get_mut(index) else {
            return RotateOutcome::Ignored;
        };
        if rune.locked {
            return RotateOutcome::Ignored;
        }

        rune.rotation_deg = (rune.rotation_deg + STEP_DEG) % 360;
        if !rune.is_aligned() {
            return RotateOutcome::Turned;
        }
        rune.locked = true;

        if self.runes.iter().all(|r| r.locked) {
            self.complete = true;
            RotateOutcome::Completed
        } else {
            RotateOutcome::Locked
        }
    }

    pub fn locked_count(&self) -> usize {
        self.runes.iter().filter(|r| r.locked).count()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
