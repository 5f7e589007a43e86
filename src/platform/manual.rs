use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use super::{ListenerId, Platform, TimerId};

/// Deterministic platform driven by a virtual clock.
///
/// Timers only elapse when the owner calls [`ManualPlatform::advance`], so
/// widgets can be exercised headless and step by step.
#[derive(Debug, Default)]
pub struct ManualPlatform {
    now: Duration,
    next_id: u64,
    /// Pending timers ordered by (deadline, id) so equal deadlines keep scheduling order
    timers: BTreeSet<(Duration, TimerId)>,
    listeners: HashSet<ListenerId>,
}

impl ManualPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and return every timer that elapsed, in deadline order.
    ///
    /// `advance(Duration::ZERO)` runs the "next turn": timers scheduled with a
    /// zero delay elapse here and not at scheduling time.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .take_while(|(deadline, _)| *deadline <= self.now)
            .copied()
            .collect();
        for key in &due {
            self.timers.remove(key);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }
}

impl Platform for ManualPlatform {
    fn schedule_after(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert((self.now + delay, id));
        id
    }

    fn cancel_scheduled(&mut self, id: TimerId) {
        self.timers.retain(|(_, timer)| *timer != id);
    }

    fn add_outside_click_listener(&mut self) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id);
        id
    }

    fn remove_outside_click_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_elapse_in_deadline_order() {
        let mut platform = ManualPlatform::new();
        let late = platform.schedule_after(Duration::from_millis(50));
        let early = platform.schedule_after(Duration::from_millis(10));

        assert!(platform.advance(Duration::from_millis(5)).is_empty());
        assert_eq!(platform.advance(Duration::from_millis(100)), vec![early, late]);
        assert_eq!(platform.pending_timers(), 0);
    }

    #[test]
    fn zero_delay_waits_for_next_turn() {
        let mut platform = ManualPlatform::new();
        let id = platform.schedule_after(Duration::ZERO);
        assert_eq!(platform.pending_timers(), 1);
        assert_eq!(platform.advance(Duration::ZERO), vec![id]);
    }

    #[test]
    fn cancelled_timer_never_elapses() {
        let mut platform = ManualPlatform::new();
        let id = platform.schedule_after(Duration::from_millis(10));
        platform.cancel_scheduled(id);
        assert!(platform.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn listeners_are_tracked() {
        let mut platform = ManualPlatform::new();
        let a = platform.add_outside_click_listener();
        let b = platform.add_outside_click_listener();
        assert_eq!(platform.active_listeners(), 2);
        platform.remove_outside_click_listener(a);
        platform.remove_outside_click_listener(b);
        assert_eq!(platform.active_listeners(), 0);
    }
}
