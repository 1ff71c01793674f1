//! Cooperative timer queue driven by a virtual millisecond clock.
//!
//! All session timers (clock tick, spawn tick, per-target expiry, combo
//! display hide, post-session delay) are multiplexed here. Nothing runs on
//! its own: the owner advances the clock and drains due timers one at a
//! time, so handlers never overlap.

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Scheduled<E> {
    id: TimerId,
    due_ms: u64,
    /// Repeat interval; `None` for one-shot timers.
    every_ms: Option<u64>,
    event: E,
}

/// A set of pending timers ordered by deadline.
///
/// Timers with equal deadlines fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E: Clone> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a one-shot timer firing `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.push(delay_ms, None, event)
    }

    /// Schedule a repeating timer. The first firing is one interval from now.
    pub fn every(&mut self, interval_ms: u64, event: E) -> TimerId {
        // A zero interval would never let the clock move past it.
        let interval_ms = interval_ms.max(1);
        self.push(interval_ms, Some(interval_ms), event)
    }

    fn push(&mut self, delay_ms: u64, every_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due_ms: self.now_ms + delay_ms,
            every_ms,
            event,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock is moved to the timer's deadline before returning, so
    /// anything the handler schedules is relative to when the timer fired.
    /// Repeating timers are re-armed with the same id.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, E)> {
        // Ids grow monotonically, so (due, id) gives deadline then FIFO order.
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        let fired = (timer.id, timer.event.clone());

        if let Some(every_ms) = timer.every_ms {
            self.pending.push(Scheduled {
                due_ms: timer.due_ms + every_ms,
                ..timer
            });
        }

        Some(fired)
    }

    /// Move the clock forward to `until_ms` once all due timers are drained.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, until: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, e)) = queue.pop_due(until) {
            fired.push(e);
        }
        queue.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.after(300, "c");
        queue.after(100, "a");
        queue.after(200, "b");

        assert_eq!(drain(&mut queue, 1000), vec!["a", "b", "c"]);
        assert!(queue.is_empty());
        assert_eq!(queue.now(), 1000);
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.after(100, "first");
        queue.after(100, "second");
        assert_eq!(drain(&mut queue, 100), vec!["first", "second"]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TimerQueue::new();
        queue.after(500, "later");
        assert!(drain(&mut queue, 499).is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(drain(&mut queue, 500), vec!["later"]);
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let id = queue.after(100, "cancelled");
        queue.after(200, "kept");

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id), "second cancel is a no-op");
        assert!(!queue.is_pending(id));
        assert_eq!(drain(&mut queue, 1000), vec!["kept"]);
    }

    #[test]
    fn test_repeating_timer() {
        let mut queue = TimerQueue::new();
        let id = queue.every(1000, "tick");

        assert_eq!(drain(&mut queue, 3500), vec!["tick", "tick", "tick"]);
        assert!(queue.is_pending(id));

        queue.cancel(id);
        assert!(drain(&mut queue, 10_000).is_empty());
    }

    #[test]
    fn test_clock_moves_to_deadline_while_draining() {
        let mut queue = TimerQueue::new();
        queue.after(250, "a");
        let (_, _) = queue.pop_due(1000).unwrap();
        assert_eq!(queue.now(), 250);

        // Scheduled from inside a handler: relative to the firing time
        queue.after(100, "b");
        let (_, e) = queue.pop_due(1000).unwrap();
        assert_eq!(e, "b");
        assert_eq!(queue.now(), 350);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.after(1, "a");
        queue.every(5, "b");
        queue.cancel_all();
        assert!(queue.is_empty());
        assert!(drain(&mut queue, 100).is_empty());
    }
}
