use std::collections::HashSet;
use std::time::Duration;

use iced::Task;

use super::{ListenerId, Platform, TimerId};

/// [`Platform`] for the iced runtime.
///
/// Scheduled timers are queued until the app drains them into
/// `tokio::time::sleep` tasks after each update. A timer cancelled after it
/// was handed to the runtime is remembered and swallowed when it elapses.
#[derive(Debug, Default)]
pub struct TaskPlatform {
    next_id: u64,
    queued: Vec<(TimerId, Duration)>,
    in_flight: HashSet<TimerId>,
    cancelled: HashSet<TimerId>,
    listeners: HashSet<ListenerId>,
}

impl TaskPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn newly scheduled timers into runtime tasks.
    pub fn drain<M>(&mut self, on_elapsed: fn(TimerId) -> M) -> Task<M>
    where
        M: Send + 'static,
    {
        if self.queued.is_empty() {
            return Task::none();
        }
        let tasks: Vec<Task<M>> = self
            .queued
            .drain(..)
            .map(|(id, delay)| {
                self.in_flight.insert(id);
                Task::perform(
                    async move {
                        tokio::time::sleep(delay).await;
                        id
                    },
                    on_elapsed,
                )
            })
            .collect();
        Task::batch(tasks)
    }

    /// Record that a timer elapsed. Returns `false` if it was cancelled meanwhile.
    pub fn elapsed(&mut self, id: TimerId) -> bool {
        self.in_flight.remove(&id);
        !self.cancelled.remove(&id)
    }

    pub fn wants_outside_clicks(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Platform for TaskPlatform {
    fn schedule_after(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.queued.push((id, delay));
        id
    }

    fn cancel_scheduled(&mut self, id: TimerId) {
        if let Some(pos) = self.queued.iter().position(|(queued, _)| *queued == id) {
            self.queued.remove(pos);
        } else if self.in_flight.contains(&id) {
            self.cancelled.insert(id);
        }
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
