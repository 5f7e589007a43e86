use std::time::Duration;

use crate::platform::{Platform, TimerId};

/// Holds back a rapidly changing value until it has been stable for a quiet period.
///
/// Only the latest value is ever emitted. Each [`push`](Self::push) cancels the
/// timer of the previous one, and the owner hands elapsed timers back through
/// [`fire`](Self::fire). Timers that were superseded or cancelled yield nothing.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(TimerId, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the pending value and restart the quiet period.
    pub fn push(&mut self, value: T, platform: &mut dyn Platform) {
        self.cancel(platform);
        let id = platform.schedule_after(self.quiet);
        self.pending = Some((id, value));
    }

    /// Take the pending value if `id` is the timer currently guarding it.
    pub fn fire(&mut self, id: TimerId) -> Option<T> {
        match self.pending.take() {
            Some((pending_id, value)) if pending_id == id => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending value, if any, and cancel its timer.
    pub fn cancel(&mut self, platform: &mut dyn Platform) {
        if let Some((id, _)) = self.pending.take() {
            platform.cancel_scheduled(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualPlatform;

    const QUIET: Duration = Duration::from_millis(300);

    fn drain(debouncer: &mut Debouncer<&'static str>, fired: Vec<TimerId>) -> Vec<&'static str> {
        fired.into_iter().filter_map(|id| debouncer.fire(id)).collect()
    }

    #[test]
    fn emits_last_value_after_quiet_period() {
        let mut platform = ManualPlatform::new();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.push("a", &mut platform);
        let fired = platform.advance(Duration::from_millis(100));
        assert!(drain(&mut debouncer, fired).is_empty());

        debouncer.push("ab", &mut platform);
        let fired = platform.advance(Duration::from_millis(100));
        assert!(drain(&mut debouncer, fired).is_empty());

        debouncer.push("abc", &mut platform);
        let fired = platform.advance(QUIET);
        assert_eq!(drain(&mut debouncer, fired), vec!["abc"]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn at_most_one_emission_per_window() {
        let mut platform = ManualPlatform::new();
        let mut debouncer = Debouncer::new(QUIET);

        for value in ["x", "xy", "xyz", "xyzw"] {
            debouncer.push(value, &mut platform);
        }
        assert_eq!(platform.pending_timers(), 1);

        let fired = platform.advance(Duration::from_secs(5));
        assert_eq!(drain(&mut debouncer, fired), vec!["xyzw"]);
    }

    #[test]
    fn zero_quiet_period_defers_to_next_turn() {
        let mut platform = ManualPlatform::new();
        let mut debouncer = Debouncer::new(Duration::ZERO);

        debouncer.push("now", &mut platform);
        assert!(debouncer.is_pending());

        let fired = platform.advance(Duration::ZERO);
        assert_eq!(drain(&mut debouncer, fired), vec!["now"]);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut platform = ManualPlatform::new();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.push("old", &mut platform);
        let stale = TimerId(1);
        debouncer.push("new", &mut platform);

        assert_eq!(debouncer.fire(stale), None);
        assert!(debouncer.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut platform = ManualPlatform::new();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.push("gone", &mut platform);
        debouncer.cancel(&mut platform);

        assert_eq!(platform.pending_timers(), 0);
        let fired = platform.advance(Duration::from_secs(1));
        assert!(drain(&mut debouncer, fired).is_empty());
    }
}
