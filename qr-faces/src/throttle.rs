use std::time::{Duration, Instant};

// Rate limit for the displayed face. A scan loop can produce a new face every frame; the
// display only changes at most once per interval, and the latest value always lands.

#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_emit: Instant,
    shown: T,
    pending: Option<(T, Instant)>,
}

impl<T: PartialEq> Throttle<T> {
    pub fn new(initial: T, interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_emit: now,
            shown: initial,
            pending: None,
        }
    }

    /// Offers a new value. Shown at once if the interval has elapsed since the last emission,
    /// otherwise held until `interval` after this call. A newer offer replaces a held one.
    pub fn update(&mut self, value: T, now: Instant) {
        let latest = self.pending.as_ref().map(|(v, _)| v).unwrap_or(&self.shown);
        if *latest == value {
            return;
        }
        if now >= self.last_emit + self.interval {
            self.shown = value;
            self.last_emit = now;
            self.pending = None;
        } else {
            self.pending = Some((value, now + self.interval));
        }
    }

    pub fn poll(&mut self, now: Instant) -> &T {
        let due = self.pending.as_ref().map(|(_, due)| *due);
        if let Some(due) = due.filter(|due| now >= *due) {
            if let Some((value, _)) = self.pending.take() {
                self.shown = value;
                self.last_emit = due;
            }
        }
        &self.shown
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
