use std::time::Duration;

pub mod easing;
pub mod timer;
pub mod tween;

pub use easing::{ALPHA_EASE, CubicBezier, SCALE_EASE};
pub use timer::{OneShotTimer, RepeatingTimer};
pub use tween::{Running, Tween};

/// Something that can be started with typed arguments and torn down at once.
/// `stop` must be idempotent.
pub trait Animation {
    type Args;
    type Error;

    fn start(&mut self, now: Duration, args: Self::Args) -> Result<(), Self::Error>;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

pub const fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
