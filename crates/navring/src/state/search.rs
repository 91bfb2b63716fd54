use super::{NavigationState, Scene, StateKind};
use crate::anim::Animation;
use crate::geometry::PolarPosition;
use crate::parts::{ParamsPatch, UiParams, UiPart};
use std::time::Duration;

const FRONT_WAVE_SCALE: (f64, f64) = (0.2, 1.6);

/// The car travels around the ring as the route progresses.
#[derive(Debug, Default)]
pub struct SearchState {
    progress: f64,
}

impl SearchState {
    /// Polar angle of the car for a progress value.
    pub fn car_angle(progress: f64) -> f64 {
        270.0 - progress * 360.0
    }

    fn on_progress_changed(&mut self, scene: &mut Scene, now: Duration) {
        let position = PolarPosition::new(
            scene.dimens.progress_bar_radius,
            Self::car_angle(self.progress),
        );
        let parts = &mut scene.parts;
        parts.car_icon.set_params(ParamsPatch::position(position));
        parts
            .car_icon_background
            .set_params(ParamsPatch::position(position));
        parts.car_water_wave.set_params(ParamsPatch::position(position));
        parts.progress_ring.set_params(ParamsPatch::position(position));

        if self.progress == 1.0 {
            Self::start_at_front_anim(scene, now);
        } else {
            Self::stop_at_front_anim(scene);
            scene.parts.car_arrow.set_params(ParamsPatch::alpha(0.0));
            scene.invalidate();
        }
    }

    fn start_at_front_anim(scene: &mut Scene, now: Duration) {
        if let Err(e) = scene.parts.car_water_wave.start(now, FRONT_WAVE_SCALE) {
            log::error!("Failed to start front wave: {}", e);
        }
        scene.parts.car_arrow.start_fade(now, true);
    }

    fn stop_at_front_anim(scene: &mut Scene) {
        scene.parts.car_water_wave.stop();
        scene.parts.car_arrow.stop_anim();
    }
}

impl NavigationState for SearchState {
    fn kind(&self) -> StateKind {
        StateKind::Search
    }

    fn progress(&self) -> f64 {
        self.progress
    }

    /// Values outside `[0, 1]` are clamped; NaN and infinities are ignored.
    fn set_progress(&mut self, scene: &mut Scene, now: Duration, progress: f64) {
        if !progress.is_finite() {
            log::warn!("Ignoring non-finite progress {}", progress);
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        if self.progress != progress {
            self.progress = progress;
            self.on_progress_changed(scene, now);
        }
    }

    fn init_params(&mut self, scene: &mut Scene) {
        let radius = scene.dimens.progress_bar_radius;
        let on_ring = UiParams::at(PolarPosition::new(radius, 0.0));
        let parts = &mut scene.parts;

        parts.center_point.reset_params(UiParams::default());
        parts.front_sector.reset_params(UiParams::default());
        parts
            .empty_progress_ring
            .reset_params(UiParams::default().with_alpha(0.1));
        parts.car_icon.reset_params(on_ring);
        parts.car_icon_background.reset_params(on_ring);
        parts.car_water_wave.reset_params(on_ring);
        parts
            .progress_ring
            .reset_params(UiParams::at(PolarPosition::new(0.0, -90.0)));
        parts.car_arrow.reset_params(
            UiParams::at(PolarPosition::new(scene.dimens.arrow_distance, 270.0)).with_alpha(0.0),
        );
    }

    fn on_exit(&mut self, scene: &mut Scene) {
        Self::stop_at_front_anim(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::millis;
    use crate::dimens::{Dimens, PartColors};
    use crate::parts::{Invalidator, Parts};

    fn scene() -> Scene {
        let dimens = Dimens::default();
        let invalidator = Invalidator::default();
        Scene {
            parts: Parts::new(&dimens, &PartColors::default(), &invalidator),
            dimens,
            invalidator,
        }
    }

    fn entered() -> (SearchState, Scene) {
        let mut scene = scene();
        let mut state = SearchState::default();
        state.init_params(&mut scene);
        state.on_enter(&mut scene, Duration::ZERO);
        (state, scene)
    }

    #[test]
    fn test_init_params_layout() {
        let (_, scene) = entered();
        let parts = &scene.parts;
        assert_eq!(
            parts.car_icon.params().polar_position,
            PolarPosition::new(120.0, 0.0)
        );
        assert_eq!(parts.progress_ring.params().polar_position.angle, -90.0);
        assert_eq!(parts.empty_progress_ring.params().alpha, 0.1);
        assert_eq!(parts.car_arrow.params().alpha, 0.0);
        assert_eq!(
            parts.car_arrow.params().polar_position,
            PolarPosition::new(60.0, 270.0)
        );
    }

    #[test]
    fn test_car_angle_follows_progress() {
        let (mut state, mut scene) = entered();
        for i in 1..=100 {
            let p = i as f64 / 100.0;
            state.set_progress(&mut scene, millis(i), p);
            let expected = 270.0 - p * 360.0;
            let parts = &scene.parts;
            assert_eq!(parts.car_icon.params().polar_position.angle, expected);
            assert_eq!(parts.car_icon_background.params().polar_position.angle, expected);
            assert_eq!(parts.car_water_wave.params().polar_position.angle, expected);
            assert_eq!(parts.progress_ring.sweep(), (-90.0, expected + 90.0));
        }
        assert_eq!(scene.parts.car_icon.params().polar_position.angle, -90.0);
        assert_eq!(scene.parts.progress_ring.sweep().1, 0.0);
    }

    #[test]
    fn test_zero_progress_is_full_ring() {
        let (mut state, mut scene) = entered();
        state.set_progress(&mut scene, millis(1), 0.5);
        state.set_progress(&mut scene, millis(2), 0.0);
        assert_eq!(scene.parts.car_icon.params().polar_position.angle, 270.0);
        assert_eq!(scene.parts.progress_ring.sweep().1, 360.0);
    }

    #[test]
    fn test_same_progress_has_no_side_effect() {
        let (mut state, mut scene) = entered();
        state.set_progress(&mut scene, millis(1), 0.4);
        scene.invalidator.take();

        state.set_progress(&mut scene, millis(2), 0.4);
        assert!(!scene.invalidator.is_pending());
    }

    #[test]
    fn test_arrival_starts_front_anim_once() {
        let (mut state, mut scene) = entered();
        state.set_progress(&mut scene, millis(0), 0.9997);
        assert!(!scene.parts.car_water_wave.is_running());

        state.set_progress(&mut scene, millis(3), 1.0);
        assert!(scene.parts.car_water_wave.is_enabled());
        assert_eq!(scene.parts.car_water_wave.waves().len(), 1);
        assert!(scene.parts.car_arrow.is_fading());

        state.set_progress(&mut scene, millis(6), 1.0);
        assert_eq!(scene.parts.car_water_wave.waves().len(), 1);

        state.set_progress(&mut scene, millis(9), 0.5);
        assert!(!scene.parts.car_water_wave.is_running());
        assert!(!scene.parts.car_arrow.is_fading());
        assert_eq!(scene.parts.car_arrow.params().alpha, 0.0);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let (mut state, mut scene) = entered();
        state.set_progress(&mut scene, millis(1), 1.4);
        assert_eq!(state.progress(), 1.0);
        assert!(scene.parts.car_water_wave.is_enabled());

        state.set_progress(&mut scene, millis(2), -0.3);
        assert_eq!(state.progress(), 0.0);

        state.set_progress(&mut scene, millis(3), f64::NAN);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_exit_stops_everything() {
        let (mut state, mut scene) = entered();
        state.set_progress(&mut scene, millis(0), 1.0);
        state.on_exit(&mut scene);
        state.on_exit(&mut scene);
        assert!(!scene.parts.car_water_wave.is_running());
        assert!(!scene.parts.car_arrow.is_fading());
    }
}
