use super::easing::CubicBezier;
use std::time::Duration;

/// A single value interpolated over time, the unit every animation in the
/// widget is built from. Elapsed time is measured from the owner's start
/// instant; `delay` holds the tween at `from` before it begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: &'static CubicBezier,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration, easing: &'static CubicBezier) -> Self {
        Self {
            from,
            to,
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    pub fn has_started(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }

    pub fn sample(&self, elapsed: Duration) -> f64 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return self.from;
        };
        if self.duration.is_zero() || active >= self.duration {
            return self.to;
        }
        let linear = active.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.ease(linear)
    }
}

/// A tween bound to the instant it was started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Running {
    pub started_at: Duration,
    pub tween: Tween,
}

impl Running {
    pub fn new(started_at: Duration, tween: Tween) -> Self {
        Self { started_at, tween }
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    pub fn sample(&self, now: Duration) -> f64 {
        self.tween.sample(self.elapsed(now))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.tween.is_finished(self.elapsed(now))
    }

    pub fn finishes_at(&self) -> Duration {
        self.started_at + self.tween.total()
    }
}
