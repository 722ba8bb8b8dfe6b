use serde::{Deserialize, Serialize};

/// Data passed from one scene to the next at transition time.
/// Every field is optional; scenes read what they understand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handoff {
    /// Seconds left on the countdown being carried across scenes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<u32>,
    /// Wall-clock start of the run in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Handoff {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_time_left(time_left: u32) -> Self {
        Self { time_left: Some(time_left), ..Self::default() }
    }

    pub fn with_start_time(start_time: f64) -> Self {
        Self { start_time: Some(start_time), ..Self::default() }
    }
}

/// Ordered list of scene keys with forward/backward navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFlow<K> {
    order: Vec<K>,
}

impl<K: Copy + PartialEq> SceneFlow<K> {
    pub fn new(order: Vec<K>) -> Self {
        Self { order }
    }

    pub fn first(&self) -> Option<K> {
        self.order.first().copied()
    }

    pub fn position(&self, key: K) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_some()
    }

    /// The key after `current`. `None` when `current` is last or unknown.
    pub fn next(&self, current: K) -> Option<K> {
        let idx = self.position(current)?;
        self.order.get(idx + 1).copied()
    }

    /// The key before `current`. `None` when `current` is first or unknown.
    pub fn prev(&self, current: K) -> Option<K> {
        let idx = self.position(current)?;
        idx.checked_sub(1).and_then(|i| self.order.get(i).copied())
    }

    /// A copy of the ordered keys.
    pub fn order(&self) -> Vec<K> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
