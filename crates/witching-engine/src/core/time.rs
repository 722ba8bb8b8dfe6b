//! Cooperative time keeping: the fixed-step accumulator driven by the host
//! frame loop, per-second countdowns and delayed/repeating callbacks.

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// What a [`Countdown`] did during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Less than a second elapsed, or the countdown is paused/finished.
    Idle,
    /// One or more seconds elapsed; carries the new remaining value.
    Ticked(u32),
    /// The value just reached zero. Reported exactly once.
    Expired,
}

/// Integer seconds-remaining countdown, decremented once per elapsed second.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    /// Partial second carried between calls, in f64 so sixty 1/60 s steps
    /// add up to a whole second.
    carry: f64,
    paused: bool,
    expired: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            carry: 0.0,
            paused: false,
            // A countdown restored at zero is already spent.
            expired: seconds == 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop decrementing. Partial seconds are kept.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// True while `remaining` is within the final `threshold` seconds.
    pub fn is_warning(&self, threshold: u32) -> bool {
        self.remaining > 0 && self.remaining <= threshold
    }

    pub fn advance(&mut self, dt: f32) -> CountdownTick {
        if self.paused || self.expired {
            return CountdownTick::Idle;
        }
        self.carry += dt as f64;
        if self.carry < 1.0 {
            return CountdownTick::Idle;
        }
        let whole = self.carry.floor();
        self.carry -= whole;
        self.remaining = self.remaining.saturating_sub(whole as u32);
        if self.remaining == 0 {
            self.expired = true;
            CountdownTick::Expired
        } else {
            CountdownTick::Ticked(self.remaining)
        }
    }
}

/// Handle for cancelling a scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct Scheduled<E> {
    id: TimerId,
    due_ms: f64,
    period_ms: Option<f64>,
    event: E,
}

/// Delayed and repeating callbacks, expressed as events the owner matches on.
///
/// Owned by a scene, so tearing the scene down cancels everything it
/// scheduled.
#[derive(Debug, Clone)]
pub struct Timeline<E> {
    elapsed_ms: f64,
    next_id: u32,
    entries: Vec<Scheduled<E>>,
}

impl<E: Clone> Timeline<E> {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0.0,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Fire `event` once, `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u32, event: E) -> TimerId {
        self.schedule(delay_ms as f64, None, event)
    }

    /// Fire `event` every `period_ms`, first time one period from now.
    pub fn every(&mut self, period_ms: u32, event: E) -> TimerId {
        let period = (period_ms as f64).max(1.0);
        self.schedule(period, Some(period), event)
    }

    fn schedule(&mut self, delay_ms: f64, period_ms: Option<f64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Scheduled {
            id,
            due_ms: self.elapsed_ms + delay_ms,
            period_ms,
            event,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Advance by `dt` seconds and return every event that came due, ordered
    /// by due time. Repeating entries may fire several times in one call.
    pub fn advance(&mut self, dt: f32) -> Vec<E> {
        self.elapsed_ms += dt as f64 * 1000.0;
        let now = self.elapsed_ms;

        let mut fired: Vec<(f64, u32, E)> = Vec::new();
        self.entries.retain_mut(|entry| {
            while entry.due_ms <= now {
                fired.push((entry.due_ms, entry.id.0, entry.event.clone()));
                match entry.period_ms {
                    Some(period) => entry.due_ms += period,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, event)| event).collect()
    }
}

impl<E: Clone> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}
