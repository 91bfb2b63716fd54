use crate::anim::{OneShotTimer, RepeatingTimer};
use crate::state::StateKind;
use crate::view::CarNavigationView;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Progress is stepped on an integer counter so the ramp lands on exactly 1.0.
const RESOLUTION: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub enabled: bool,
    pub start: f64,
    pub step: f64,
    pub tick_ms: u64,
    pub hold_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 0.8,
            step: 0.0003,
            tick_ms: 3,
            hold_ms: 5000,
        }
    }
}

impl DriverConfig {
    fn to_counter(value: f64) -> u32 {
        (value.clamp(0.0, 1.0) * RESOLUTION as f64).round() as u32
    }
}

/// Demo route: ramps progress in Search, holds at the destination, then
/// switches to Nearby.
pub struct ScriptedDriver {
    counter: u32,
    step: u32,
    ticker: RepeatingTimer,
    hold: OneShotTimer,
    started: bool,
    finished: bool,
}

impl ScriptedDriver {
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            counter: DriverConfig::to_counter(config.start),
            step: DriverConfig::to_counter(config.step).max(1),
            ticker: RepeatingTimer::new(Duration::from_millis(config.tick_ms.max(1))),
            hold: OneShotTimer::new(Duration::from_millis(config.hold_ms)),
            started: false,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> f64 {
        self.counter as f64 / RESOLUTION as f64
    }

    /// Puts the view in Search at the starting progress.
    pub fn begin(&mut self, now: Duration, view: &mut CarNavigationView) {
        if self.started {
            return;
        }
        self.started = true;
        view.tick(now);
        view.set_state(StateKind::Search);
        view.set_progress(self.progress());
        log::debug!("Driver started at progress {}", self.progress());
        if self.counter >= RESOLUTION {
            self.hold.arm(now);
        } else {
            self.ticker.arm(now);
        }
    }

    /// Applies every step that came due up to `now`, each at its own instant,
    /// then brings the view to `now`.
    pub fn advance(&mut self, now: Duration, view: &mut CarNavigationView) {
        if !self.started {
            self.begin(now, view);
        }
        while let Some(due) = self.ticker.poll(now) {
            view.tick(due);
            self.counter = (self.counter + self.step).min(RESOLUTION);
            view.set_progress(self.progress());
            if self.counter == RESOLUTION {
                self.ticker.cancel();
                self.hold.arm(due);
                log::debug!("Driver reached the destination, holding");
            }
        }
        if let Some(due) = self.hold.poll(now) {
            view.tick(due);
            view.set_state(StateKind::Nearby);
            self.finished = true;
            log::info!("Driver switched to nearby");
        }
        view.tick(now);
    }

    /// Drops every pending step and the hold.
    pub fn cancel(&mut self) {
        self.ticker.cancel();
        self.hold.cancel();
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Animation, millis};
    use crate::dimens::{Dimens, PartColors};
    use crate::parts::UiPart;

    fn view() -> CarNavigationView {
        let mut view = CarNavigationView::new(Dimens::default(), PartColors::default());
        view.on_measure(400);
        view
    }

    #[test]
    fn test_reference_scenario() {
        let mut view = view();
        let mut driver = ScriptedDriver::new(&DriverConfig::default());
        driver.begin(millis(0), &mut view);
        assert_eq!(view.state(), Some(StateKind::Search));
        assert_eq!(view.progress(), Some(0.8));

        // 667 steps of 3 ms bring the counter from 8000 to 10000
        driver.advance(millis(1998), &mut view);
        assert!(view.progress().unwrap() < 1.0);
        assert!(!view.parts().car_water_wave.is_running());

        driver.advance(millis(2001), &mut view);
        assert_eq!(view.progress(), Some(1.0));
        let emitter = &view.parts().car_water_wave;
        assert!(emitter.is_enabled());
        assert_eq!(emitter.waves()[0].started_at, millis(2001));
        assert_eq!(view.parts().car_icon.params().polar_position.angle, -90.0);

        // held at the destination for 5 s, in 16 ms frames
        let mut now = 2001;
        while now < 7000 {
            now += 16;
            driver.advance(millis(now.min(7000)), &mut view);
        }
        assert_eq!(view.state(), Some(StateKind::Search));
        assert_eq!(view.parts().car_water_wave.waves().len(), 4);

        driver.advance(millis(7001), &mut view);
        assert!(driver.is_finished());
        assert_eq!(view.state(), Some(StateKind::Nearby));
        assert!(view.parts().car_water_wave.waves().is_empty());
        assert_eq!(view.active_transitions(), 1);

        driver.advance(millis(7600), &mut view);
        assert_eq!(view.active_transitions(), 1);
        assert!(!view.parts().car_water_wave.is_running());

        driver.advance(millis(7601), &mut view);
        assert_eq!(view.active_transitions(), 0);
        let emitter = &view.parts().car_water_wave;
        assert!(emitter.is_enabled());
        assert_eq!(emitter.waves().len(), 1);
        assert_eq!(emitter.waves()[0].started_at, millis(7601));
        assert_eq!(emitter.waves()[0].scale, 1.0);
        assert_eq!(view.parts().car_water_wave.params().scale, 3.7);

        driver.advance(millis(9000), &mut view);
        let scales: Vec<f64> = view
            .parts()
            .car_water_wave
            .waves()
            .iter()
            .map(|w| w.scale)
            .collect();
        assert_eq!(scales.len(), 2);
        assert!(scales.iter().all(|s| (1.0..=1.92).contains(s)));
    }

    #[test]
    fn test_cancelled_hold_never_switches() {
        let mut view = view();
        let mut driver = ScriptedDriver::new(&DriverConfig {
            start: 1.0,
            ..DriverConfig::default()
        });
        driver.begin(millis(0), &mut view);
        assert!(view.parts().car_water_wave.is_enabled());

        driver.cancel();
        driver.advance(millis(60_000), &mut view);
        assert_eq!(view.state(), Some(StateKind::Search));
    }

    #[test]
    fn test_begin_is_idempotent() {
        let mut view = view();
        let mut driver = ScriptedDriver::new(&DriverConfig::default());
        driver.begin(millis(0), &mut view);
        driver.advance(millis(30), &mut view);
        let progress = view.progress();
        driver.begin(millis(30), &mut view);
        assert_eq!(view.progress(), progress);
    }
}
