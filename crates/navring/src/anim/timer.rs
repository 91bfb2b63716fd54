use std::time::Duration;

/// Fires every `period` once armed. Polling returns the exact instants that
/// became due, so a late frame still sees each fire at its scheduled time.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Option<Duration>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedules the first fire one period after `now`.
    pub fn arm(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Pops the earliest due instant, rescheduling the next one.
    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        let due = self.next_due.filter(|due| *due <= now)?;
        self.next_due = Some(due + self.period);
        Some(due)
    }
}

/// Fires once at a fixed delay after being armed.
#[derive(Debug, Clone)]
pub struct OneShotTimer {
    delay: Duration,
    due: Option<Duration>,
}

impl OneShotTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    pub fn arm(&mut self, now: Duration) {
        self.due = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        let due = self.due.filter(|due| *due <= now)?;
        self.due = None;
        Some(due)
    }
}
