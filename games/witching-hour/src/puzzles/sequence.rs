//! Pentagram sequence: click the five elements in the one correct order.

use glam::Vec2;
use witching_engine::Bounds;

pub const NODE_COUNT: usize = 5;
/// Pointer distance that counts as clicking a node.
pub const HIT_RADIUS: f32 = 40.0;
/// Earth, Water, Spirit, Fire, Air.
pub const CORRECT_PATH: [usize; NODE_COUNT] = [0, 2, 4, 1, 3];
/// Star lines drawn from each node.
pub const CONNECTIONS: [[usize; 2]; NODE_COUNT] = [[2, 4], [3, 0], [4, 1], [0, 2], [1, 3]];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub angle_deg: f32,
}

pub const ELEMENTS: [Element; NODE_COUNT] = [
    Element { symbol: "🌍", name: "Earth", angle_deg: 0.0 },
    Element { symbol: "🔥", name: "Fire", angle_deg: 72.0 },
    Element { symbol: "💧", name: "Water", angle_deg: 144.0 },
    Element { symbol: "💨", name: "Air", angle_deg: 216.0 },
    Element { symbol: "✨", name: "Spirit", angle_deg: 288.0 },
];

/// Result of clicking a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    /// Already active, or the puzzle is finished.
    Ignored,
    Advanced,
    Completed,
    /// Wrong node; the whole path was cleared.
    Reset,
}

#[derive(Debug, Clone)]
pub struct SequencePuzzle {
    nodes: [Vec2; NODE_COUNT],
    path: Vec<usize>,
    complete: bool,
}

impl SequencePuzzle {
    /// Lay the nodes out on a circle centred in `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        let center = Vec2::new(bounds.width / 2.0, bounds.height * 0.5);
        let radius = bounds.width.min(bounds.height) * 0.2;
        let nodes = ELEMENTS.map(|e| {
            let a = e.angle_deg.to_radians();
            center + Vec2::new(a.cos(), a.sin()) * radius
        });
        Self {
            nodes,
            path: Vec::with_capacity(NODE_COUNT),
            complete: false,
        }
    }

    pub fn positions(&self) -> &[Vec2; NODE_COUNT] {
        &self.nodes
    }

    /// The node under `point`, if any.
    pub fn node_at(&self, point: Vec2) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.distance(point) <= HIT_RADIUS)
    }

    pub fn activate(&mut self, index: usize) -> SequenceStep {
        if self.complete || index >= NODE_COUNT || self.is_active(index) {
            return SequenceStep::Ignored;
        }
        let expected = CORRECT_PATH[self.path.len()];
        if index != expected {
            log::debug!("pentagram: {} out of order, resetting", ELEMENTS[index].name);
            self.path.clear();
            return SequenceStep::Reset;
        }
        self.path.push(index);
        if self.path.len() == NODE_COUNT {
            self.complete = true;
            SequenceStep::Completed
        } else {
            SequenceStep::Advanced
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.path.contains(&index)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Lines between consecutive activated nodes.
    pub fn path_segments(&self) -> Vec<(Vec2, Vec2)> {
        self.path
            .windows(2)
            .map(|w| (self.nodes[w[0]], self.nodes[w[1]]))
            .collect()
    }

    /// The pentagram star: the correct path drawn as a closed loop.
    pub fn star_segments(&self) -> Vec<(Vec2, Vec2)> {
        (0..NODE_COUNT)
            .map(|i| {
                let from = CORRECT_PATH[i];
                let to = CORRECT_PATH[(i + 1) % NODE_COUNT];
                (self.nodes[from], self.nodes[to])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle() -> SequencePuzzle {
        SequencePuzzle::new(Bounds::new(1024.0, 768.0))
    }

    #[test]
    fn correct_order_completes() {
        let mut p = puzzle();
        for &i in &CORRECT_PATH[..4] {
            assert_eq!(p.activate(i), SequenceStep::Advanced);
        }
        assert_eq!(p.activate(3), SequenceStep::Completed);
        assert!(p.is_complete());
        assert_eq!(p.path_segments().len(), 4);
    }

    #[test]
    fn wrong_node_resets_path() {
        let mut p = puzzle();
        p.activate(0);
        p.activate(2);
        assert_eq!(p.activate(1), SequenceStep::Reset);
        assert!(p.path().is_empty());
        assert_eq!(p.activate(0), SequenceStep::Advanced);
    }

    #[test]
    fn repeat_and_post_completion_clicks_are_ignored() {
        let mut p = puzzle();
        p.activate(0);
        assert_eq!(p.activate(0), SequenceStep::Ignored);
        for &i in &CORRECT_PATH[1..] {
            p.activate(i);
        }
        assert_eq!(p.activate(1), SequenceStep::Ignored);
    }

    #[test]
    fn nodes_sit_on_the_circle() {
        let p = puzzle();
        let center = Vec2::new(512.0, 384.0);
        for n in p.positions() {
            assert!((n.distance(center) - 768.0 * 0.2).abs() < 1e-3);
        }
        // Earth sits at angle zero, to the right of centre.
        assert_eq!(p.node_at(center + Vec2::new(153.6, 10.0)), Some(0));
        assert_eq!(p.node_at(center), None);
    }

    #[test]
    fn star_has_five_lines() {
        assert_eq!(puzzle().star_segments().len(), 5);
    }
}
