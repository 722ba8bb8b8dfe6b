/// Key code the host reports for the Enter key.
pub const KEY_ENTER: u32 = 13;

/// Input event types the engine understands.
/// Generic: no game-specific semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer (HTML buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
    /// Text typed into a host-side field. `field` identifies the input box.
    Text { field: u32, value: String },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Build a queue holding exactly `events`.
    pub fn from_events(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    /// True when the host sent a custom event of `kind` (a button press).
    pub fn has_custom(&self, kind: u32) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, InputEvent::Custom { kind: k, .. } if *k == kind))
    }

    pub fn has_key_down(&self, key_code: u32) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, InputEvent::KeyDown { key_code: k } if *k == key_code))
    }

    /// True when any click or touch began this step.
    pub fn has_pointer_down(&self) -> bool {
        self.events.iter().any(|e| matches!(e, InputEvent::PointerDown { .. }))
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: KEY_ENTER });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let events = q.drain();
        assert_eq!(events.len(), 1);
        match events[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!(a, 1.5);
                assert_eq!(b, 2.5);
                assert_eq!(c, 3.5);
            }
            _ => panic!("Expected Custom event"),
        }
    }

    #[test]
    fn button_and_key_queries() {
        let q = InputQueue::from_events(vec![
            InputEvent::Custom { kind: 3, a: 0.0, b: 0.0, c: 0.0 },
            InputEvent::KeyDown { key_code: 32 },
        ]);
        assert!(q.has_custom(3));
        assert!(!q.has_custom(4));
        assert!(q.has_key_down(32));
        assert!(!q.has_key_down(KEY_ENTER));
        assert!(!q.has_pointer_down());
    }

    #[test]
    fn text_event_carries_owned_value() {
        let q = InputQueue::from_events(vec![InputEvent::Text { field: 2, value: " 7.2 ".into() }]);
        let first = q.iter().next().cloned();
        assert_eq!(first, Some(InputEvent::Text { field: 2, value: " 7.2 ".into() }));
    }
}
