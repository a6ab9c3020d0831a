//! Cursor-sync ticker for text editing.
//!
//! Some surfaces let the blinking caret drift out of sync with the selection
//! highlight unless the scene is repainted continuously while a text object
//! is being edited. The ticker is that repaint schedule: it is started when an
//! annotation enters editing, polled from the host's frame loop, and cancelled
//! the moment editing ends.

use std::time::{Duration, Instant};

use crate::surface::ObjectId;

/// Cancellable periodic task bound to one editing session.
#[derive(Debug)]
pub struct CursorSyncTicker {
    interval: Duration,
    task: Option<TickTask>,
}

#[derive(Debug, Clone, Copy)]
struct TickTask {
    target: ObjectId,
    next_due: Instant,
}

impl CursorSyncTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts ticking for `target`, replacing any running task.
    pub fn start(&mut self, target: ObjectId) {
        self.start_at(target, Instant::now());
    }

    fn start_at(&mut self, target: ObjectId, now: Instant) {
        if let Some(previous) = self.task.replace(TickTask {
            target,
            next_due: now + self.interval,
        }) {
            if previous.target != target {
                log::debug!("Cursor sync moved from {:?} to {:?}", previous.target, target);
            }
        }
    }

    /// Cancels the running task. Returns true if one was running.
    pub fn cancel(&mut self) -> bool {
        self.task.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Annotation the running task repaints for.
    pub fn target(&self) -> Option<ObjectId> {
        self.task.map(|task| task.target)
    }

    /// Returns the target when a tick is due at `now` and schedules the next one.
    ///
    /// Missed ticks are not replayed: after a long stall the next deadline is
    /// one interval after `now`.
    pub fn poll(&mut self, now: Instant) -> Option<ObjectId> {
        let task = self.task.as_mut()?;
        if now < task.next_due {
            return None;
        }
        task.next_due = now + self.interval;
        Some(task.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn polls_fire_once_per_interval() {
        let start = Instant::now();
        let mut ticker = CursorSyncTicker::new(INTERVAL);
        ticker.start_at(ObjectId(3), start);

        assert_eq!(ticker.poll(start), None);
        assert_eq!(ticker.poll(start + INTERVAL), Some(ObjectId(3)));
        assert_eq!(ticker.poll(start + INTERVAL), None);
        assert_eq!(ticker.poll(start + INTERVAL * 2), Some(ObjectId(3)));
    }

    #[test]
    fn long_stalls_do_not_burst() {
        let start = Instant::now();
        let mut ticker = CursorSyncTicker::new(INTERVAL);
        ticker.start_at(ObjectId(1), start);

        let late = start + Duration::from_secs(1);
        assert!(ticker.poll(late).is_some());
        assert!(ticker.poll(late + Duration::from_millis(1)).is_none());
    }

    #[test]
    fn cancelled_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = CursorSyncTicker::new(INTERVAL);
        ticker.start_at(ObjectId(1), start);

        assert!(ticker.cancel());
        assert!(!ticker.cancel());
        assert!(!ticker.is_running());
        assert_eq!(ticker.poll(start + INTERVAL * 10), None);
    }

    #[test]
    fn restart_retargets() {
        let start = Instant::now();
        let mut ticker = CursorSyncTicker::new(INTERVAL);
        ticker.start_at(ObjectId(1), start);
        ticker.start_at(ObjectId(2), start);

        assert_eq!(ticker.target(), Some(ObjectId(2)));
        assert_eq!(ticker.poll(start + INTERVAL), Some(ObjectId(2)));
    }
}
