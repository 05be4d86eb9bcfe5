//! Deterministic timer queue advanced by the fixed step.
//!
//! Timers carry a game-defined `kind` and an optional owning entity instead
//! of a callback; fired timers are handed back to the game as plain data.

use crate::api::types::EntityId;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u32);

/// A timer that came due during `TimerQueue::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub owner: Option<EntityId>,
    pub kind: u32,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    owner: Option<EntityId>,
    kind: u32,
    deadline: f64,
    /// `Some` for repeating timers.
    interval: Option<f64>,
}

const EPSILON: f64 = 1e-9;
const MIN_INTERVAL: f64 = 1e-3;

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: f64,
    timers: Vec<Timer>,
    next_id: u32,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the queue was created or cleared.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// One-shot timer firing `delay` seconds from now.
    pub fn after(&mut self, delay: f32, owner: Option<EntityId>, kind: u32) -> TimerId {
        self.schedule(delay.max(0.0) as f64, None, owner, kind)
    }

    /// Repeating timer firing every `interval` seconds, first after one interval.
    pub fn every(&mut self, interval: f32, owner: Option<EntityId>, kind: u32) -> TimerId {
        let interval = (interval as f64).max(MIN_INTERVAL);
        self.schedule(interval, Some(interval), owner, kind)
    }

    fn schedule(&mut self, delay: f64, interval: Option<f64>, owner: Option<EntityId>, kind: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            owner,
            kind,
            deadline: self.now + delay,
            interval,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer owned by `owner`.
    pub fn cancel_owner(&mut self, owner: EntityId) {
        self.timers.retain(|t| t.owner != Some(owner));
    }

    /// Advance the clock and return every timer that came due, ordered by
    /// deadline then creation. A repeating timer may fire several times.
    pub fn advance(&mut self, dt: f32) -> Vec<FiredTimer> {
        self.now += dt.max(0.0) as f64;
        let mut fired: Vec<(f64, FiredTimer)> = Vec::new();

        for timer in &mut self.timers {
            while timer.deadline <= self.now + EPSILON {
                fired.push((
                    timer.deadline,
                    FiredTimer {
                        id: timer.id,
                        owner: timer.owner,
                        kind: timer.kind,
                    },
                ));
                match timer.interval {
                    Some(interval) => timer.deadline += interval,
                    None => break,
                }
            }
        }

        self.timers
            .retain(|t| t.interval.is_some() || t.deadline > self.now + EPSILON);

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
        fired.into_iter().map(|(_, f)| f).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every timer and rewind the clock.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.now = 0.0;
    }
}
