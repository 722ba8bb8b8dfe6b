use bytemuck::{Pod, Zeroable};

/// A sound cue emitted by scene logic.
/// The numeric value maps to a clip in the host page's audio table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event forwarded from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Event with only a kind and a single payload value.
    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }

    pub fn with_b(mut self, b: f32) -> Self {
        self.b = b;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_is_four_packed_floats() {
        let events = [GameEvent::new(3.0, 12.0).with_b(1.0)];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats, &[3.0, 12.0, 1.0, 0.0]);
        assert_eq!(floats.len(), GameEvent::FLOATS);
    }
}
