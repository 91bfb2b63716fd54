use super::{Invalidator, PartCore, UiPart};
use crate::anim::{ALPHA_EASE, Animation, RepeatingTimer, SCALE_EASE, Tween, millis};
use crate::canvas::{Canvas, CanvasError, Paint};
use crate::dimens::{Dimens, PartColors};
use palette::Srgba;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

const EMIT_PERIOD: Duration = millis(1000);
const WAVE_ALPHA: f64 = 0.2;

#[derive(Debug, Error, PartialEq)]
pub enum WaveError {
    #[error("Wave scales must be finite and non-negative, got {0} -> {1}")]
    InvalidScale(f64, f64),
}

/// Timing of a single wave, shared by every instance of one emission chain.
#[derive(Debug, Clone, Copy)]
struct WaveTimeline {
    enlarge: Tween,
    fade_in: Tween,
    fade_out: Tween,
    blur: Tween,
}

impl WaveTimeline {
    fn new(scale_start: f64, scale_end: f64) -> Self {
        Self {
            enlarge: Tween::new(scale_start, scale_end, millis(4500), &SCALE_EASE),
            fade_in: Tween::new(0.0, WAVE_ALPHA, millis(500), &ALPHA_EASE),
            fade_out: Tween::new(WAVE_ALPHA, 0.0, millis(2500), &ALPHA_EASE)
                .with_delay(millis(2000)),
            blur: Tween::new(0.0, 1.0, millis(2500), &ALPHA_EASE).with_delay(millis(2000)),
        }
    }

    fn lifetime(&self) -> Duration {
        [self.enlarge, self.fade_in, self.fade_out, self.blur]
            .iter()
            .map(Tween::total)
            .max()
            .unwrap_or_default()
    }

    fn alpha(&self, elapsed: Duration) -> f64 {
        if self.fade_out.has_started(elapsed) {
            self.fade_out.sample(elapsed)
        } else {
            self.fade_in.sample(elapsed)
        }
    }
}

/// One expanding, fading ring.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveInstance {
    pub started_at: Duration,
    /// Current scale factor of the enlarge track.
    pub scale: f64,
    pub radius: f64,
    pub alpha: f64,
    /// Blur progress in `[0, 1]`.
    pub blur: f64,
}

/// Pulsing rings behind the car, built from overlapping wave instances
/// emitted once a second while enabled.
pub struct CarWaterWave {
    core: PartCore,
    color: Srgba<f64>,
    bg_radius: f64,
    enabled: AtomicBool,
    timeline: Option<WaveTimeline>,
    timer: RepeatingTimer,
    waves: Vec<WaveInstance>,
}

impl CarWaterWave {
    pub fn new(dimens: &Dimens, colors: &PartColors, invalidator: Invalidator) -> Self {
        Self {
            core: PartCore::new(Paint::fill(colors.car_icon_bounds), invalidator),
            color: colors.car_icon_bounds,
            bg_radius: dimens.car_bg_radius,
            enabled: AtomicBool::new(false),
            timeline: None,
            timer: RepeatingTimer::new(EMIT_PERIOD),
            waves: Vec::new(),
        }
    }

    pub fn waves(&self) -> &[WaveInstance] {
        &self.waves
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn next_emission(&self) -> Option<Duration> {
        self.timer.next_due()
    }

    fn emit(&mut self, at: Duration) {
        if !self.is_enabled() {
            return;
        }
        let Some(timeline) = self.timeline else {
            return;
        };
        let scale = timeline.enlarge.from;
        let radius = self.bg_radius * self.params().scale * scale;
        self.waves.push(WaveInstance {
            started_at: at,
            scale,
            radius,
            alpha: 0.0,
            blur: 0.0,
        });
        self.core.invalidator().invalidate();
    }

    /// Emits every wave that came due up to `now`, then advances and prunes
    /// the live waves.
    pub fn tick(&mut self, now: Duration) {
        while let Some(due) = self.timer.poll(now) {
            if !self.is_enabled() {
                self.timer.cancel();
                break;
            }
            self.emit(due);
        }

        let Some(timeline) = self.timeline else {
            return;
        };
        if self.waves.is_empty() {
            return;
        }
        let lifetime = timeline.lifetime();
        let part_scale = self.params().scale;
        let bg_radius = self.bg_radius;
        self.waves.retain_mut(|wave| {
            let elapsed = now.saturating_sub(wave.started_at);
            if elapsed >= lifetime {
                return false;
            }
            wave.scale = timeline.enlarge.sample(elapsed);
            wave.radius = bg_radius * part_scale * wave.scale;
            wave.alpha = timeline.alpha(elapsed);
            wave.blur = timeline.blur.sample(elapsed);
            true
        });
        self.core.invalidator().invalidate();
    }

    fn wave_paint(&self, wave: &WaveInstance) -> Paint {
        let mut paint = Paint::fill(self.color);
        paint.set_alpha(wave.alpha);
        paint.blur = self.bg_radius * wave.blur;
        paint
    }
}

impl Animation for CarWaterWave {
    /// `(scale_start, scale_end)` of the enlarge track.
    type Args = (f64, f64);
    type Error = WaveError;

    fn start(
        &mut self,
        now: Duration,
        (scale_start, scale_end): (f64, f64),
    ) -> Result<(), WaveError> {
        let valid = |s: f64| s.is_finite() && s >= 0.0;
        if !valid(scale_start) || !valid(scale_end) {
            return Err(WaveError::InvalidScale(scale_start, scale_end));
        }
        if self.is_running() {
            return Ok(());
        }
        log::debug!("Wave emission started ({} -> {})", scale_start, scale_end);
        self.enabled.store(true, Ordering::Release);
        self.timeline = Some(WaveTimeline::new(scale_start, scale_end));
        self.emit(now);
        self.timer.arm(now);
        Ok(())
    }

    fn stop(&mut self) {
        if self.enabled.swap(false, Ordering::AcqRel) {
            log::debug!("Wave emission stopped");
        }
        self.waves.clear();
        self.timer.cancel();
        self.timeline = None;
        self.core.invalidator().invalidate();
    }

    fn is_running(&self) -> bool {
        self.is_enabled() || !self.waves.is_empty()
    }
}

impl UiPart for CarWaterWave {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let center = self.core.position(dimens);
        for wave in &self.waves {
            canvas.draw_circle(center, wave.radius, &self.wave_paint(wave))?;
        }
        Ok(())
    }

    fn on_dimens_changed(&mut self, dimens: &Dimens) {
        self.bg_radius = dimens.car_bg_radius;
    }

    fn on_colors_changed(&mut self, colors: &PartColors) {
        self.color = colors.car_icon_bounds;
        self.core.paint_mut().color = colors.car_icon_bounds;
    }
}
