// core/timer.rs
//
// Named, cancellable timers over a simulated millisecond clock.
// Owners drive the clock explicitly:
//
//   let until = timers.now_ms() + dt_ms;
//   while let Some(fired) = timers.poll(until) { handle(fired) }
//   timers.settle(until);
//
// Handlers may schedule or cancel timers between polls; a timer scheduled
// with a due time inside the current window fires in the same drive loop.

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    name: &'static str,
    due_ms: u64,
    period_ms: Option<u64>,
    /// Tie-breaker: timers due at the same instant fire in scheduling order.
    seq: u64,
    event: E,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub name: &'static str,
    /// Clock time the timer was due at (the clock is set to this before returning).
    pub at_ms: u64,
    pub event: E,
}

/// Timer wheel with one-shot and repeating timers.
#[derive(Debug)]
pub struct TimerService<E> {
    now_ms: u64,
    timers: Vec<Timer<E>>,
    next_id: u32,
    next_seq: u64,
}

impl<E: Clone> TimerService<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            timers: Vec::with_capacity(8),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Current simulated time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `event` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, name: &'static str, delay_ms: u64, event: E) -> TimerId {
        self.insert(name, delay_ms, None, event)
    }

    /// Fire `event` every `period_ms`, first at `now + period_ms`.
    /// A zero period is treated as 1 ms.
    pub fn schedule_repeating(&mut self, name: &'static str, period_ms: u64, event: E) -> TimerId {
        let period = period_ms.max(1);
        self.insert(name, period, Some(period), event)
    }

    fn insert(&mut self, name: &'static str, delay_ms: u64, period_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.timers.push(Timer {
            id,
            name,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            seq,
            event,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer with this name. Returns how many were removed.
    pub fn cancel_named(&mut self, name: &str) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.name != name);
        before - self.timers.len()
    }

    /// Cancel everything. Returns how many timers were removed.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Repeating timers are re-armed at `due + period`.
    pub fn poll(&mut self, until_ms: u64) -> Option<Fired<E>> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        let due = self.timers[idx].due_ms;
        self.now_ms = self.now_ms.max(due);

        match self.timers[idx].period_ms {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = &mut self.timers[idx];
                timer.due_ms = due.saturating_add(period);
                timer.seq = seq;
                Some(Fired {
                    id: timer.id,
                    name: timer.name,
                    at_ms: due,
                    event: timer.event.clone(),
                })
            }
            None => {
                let timer = self.timers.swap_remove(idx);
                Some(Fired {
                    id: timer.id,
                    name: timer.name,
                    at_ms: due,
                    event: timer.event,
                })
            }
        }
    }

    /// Move the clock forward to `until_ms` once every due timer has been polled.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<E: Clone> Default for TimerService<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timers: &mut TimerService<u32>, until: u64) -> Vec<(u64, u32)> {
        let mut out = Vec::new();
        while let Some(f) = timers.poll(until) {
            out.push((f.at_ms, f.event));
        }
        timers.settle(until);
        out
    }

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut timers = TimerService::new();
        timers.schedule_once("a", 100, 1);
        assert!(drain(&mut timers, 99).is_empty());
        assert_eq!(drain(&mut timers, 100), vec![(100, 1)]);
        assert!(drain(&mut timers, 1_000).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn repeating_rearms() {
        let mut timers = TimerService::new();
        timers.schedule_repeating("tick", 7_000, 7);
        let fired = drain(&mut timers, 21_000);
        assert_eq!(fired, vec![(7_000, 7), (14_000, 7), (21_000, 7)]);
        assert_eq!(timers.next_due(), Some(28_000));
    }

    #[test]
    fn fires_in_due_order_then_schedule_order() {
        let mut timers = TimerService::new();
        timers.schedule_once("late", 300, 3);
        timers.schedule_once("tie-a", 100, 1);
        timers.schedule_once("tie-b", 100, 2);
        let fired: Vec<u32> = drain(&mut timers, 500).into_iter().map(|(_, e)| e).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn handler_scheduled_timer_fires_in_same_window() {
        let mut timers = TimerService::new();
        timers.schedule_once("first", 100, 1);
        let mut seen = Vec::new();
        while let Some(f) = timers.poll(1_000) {
            seen.push((f.at_ms, f.event));
            if f.event == 1 {
                timers.schedule_once("second", 50, 2);
            }
        }
        assert_eq!(seen, vec![(100, 1), (150, 2)]);
    }

    #[test]
    fn cancel_reports_liveness() {
        let mut timers = TimerService::new();
        let id = timers.schedule_once("a", 100, 1);
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(drain(&mut timers, 1_000).is_empty());
    }

    #[test]
    fn cancel_named_only_hits_matching() {
        let mut timers = TimerService::new();
        timers.schedule_once("reveal", 100, 1);
        timers.schedule_once("hide", 200, 2);
        timers.schedule_once("reveal", 300, 3);
        assert_eq!(timers.cancel_named("reveal"), 2);
        assert_eq!(drain(&mut timers, 1_000), vec![(200, 2)]);
    }

    #[test]
    fn cancel_all_empties_the_service() {
        let mut timers = TimerService::new();
        timers.schedule_repeating("tick", 10, 0);
        timers.schedule_once("a", 5, 1);
        assert_eq!(timers.cancel_all(), 2);
        assert_eq!(timers.cancel_all(), 0);
        assert!(drain(&mut timers, 10_000).is_empty());
        assert_eq!(timers.now_ms(), 10_000);
    }
}
