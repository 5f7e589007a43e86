pub mod manual;
pub mod tasks;

use std::time::Duration;

pub use manual::ManualPlatform;
pub use tasks::TaskPlatform;

/// Handle for a timer scheduled through a [`Platform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Handle for an outside-click listener registered through a [`Platform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host services the widgets need from the surrounding UI runtime.
///
/// Widgets never touch timers or window-level pointer tracking directly.
/// The host decides how a timer elapses (a tokio sleep in the app, a virtual
/// clock in tests) and feeds the elapsed [`TimerId`] back as an input.
pub trait Platform {
    /// Schedule a timer that elapses after `delay`. A zero delay still
    /// elapses on a later turn, never during this call.
    fn schedule_after(&mut self, delay: Duration) -> TimerId;

    /// Cancel a scheduled timer. Cancelling an elapsed or unknown timer is a no-op.
    fn cancel_scheduled(&mut self, id: TimerId);

    /// Start reporting pointer presses that land outside the widget.
    fn add_outside_click_listener(&mut self) -> ListenerId;

    /// Stop reporting outside pointer presses for this listener.
    fn remove_outside_click_listener(&mut self, id: ListenerId);
}
