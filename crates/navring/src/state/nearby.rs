use super::{NavigationState, Scene, StateKind};
use crate::anim::{ALPHA_EASE, Animation, Tween, millis};
use crate::geometry::PolarPosition;
use crate::parts::{ParamsPatch, UiParams, UiPart};
use std::time::Duration;

const TRANSITION: Duration = millis(600);
const AMBIENT_WAVE_SCALE: (f64, f64) = (1.0, 1.92);
const NEARBY_ANGLE: f64 = -90.0;

/// The four tracks that pull the car into the centre of the view.
#[derive(Debug, Clone, Copy)]
struct IntermediateTransition {
    started_at: Duration,
    translation: Tween,
    fade_out: Tween,
    ring_enlarge: Tween,
    background_enlarge: Tween,
}

impl IntermediateTransition {
    fn new(started_at: Duration, ring_radius: f64) -> Self {
        Self {
            started_at,
            translation: Tween::new(0.0, ring_radius, TRANSITION, &ALPHA_EASE),
            fade_out: Tween::new(1.0, 0.0, TRANSITION, &ALPHA_EASE),
            ring_enlarge: Tween::new(1.0, 1.8, TRANSITION, &ALPHA_EASE),
            background_enlarge: Tween::new(1.0, 3.7, TRANSITION, &ALPHA_EASE),
        }
    }

    fn finishes_at(&self) -> Duration {
        self.started_at + TRANSITION
    }

    fn apply(&self, scene: &mut Scene, now: Duration) {
        let elapsed = now.saturating_sub(self.started_at);
        let radius = scene.dimens.progress_bar_radius - self.translation.sample(elapsed);
        let position = ParamsPatch::position(PolarPosition::new(radius, NEARBY_ANGLE));
        let alpha = ParamsPatch::alpha(self.fade_out.sample(elapsed));
        let background_scale = ParamsPatch::scale(self.background_enlarge.sample(elapsed));

        let parts = &mut scene.parts;
        parts.car_icon.set_params(position);
        parts.car_icon_background.set_params(position);
        parts.car_water_wave.set_params(position);

        parts.car_icon.set_params(alpha);
        parts.front_sector.set_params(alpha);

        parts
            .empty_progress_ring
            .set_params(ParamsPatch::scale(self.ring_enlarge.sample(elapsed)));

        parts.car_icon_background.set_params(background_scale);
        parts.car_water_wave.set_params(background_scale);
        scene.invalidate();
    }
}

/// The car has arrived: it settles at the centre and pulses.
#[derive(Debug, Default)]
pub struct NearbyState {
    progress: f64,
    transitions: Vec<IntermediateTransition>,
}

impl NearbyState {
    fn start_intermediate_anim(&mut self, scene: &mut Scene, now: Duration) {
        scene
            .parts
            .car_water_wave
            .set_params(ParamsPatch::position(PolarPosition::new(0.0, NEARBY_ANGLE)));

        let transition = IntermediateTransition::new(now, scene.dimens.progress_bar_radius);
        transition.apply(scene, now);
        self.transitions.push(transition);
    }

    fn start_nearby_anim(scene: &mut Scene, at: Duration) {
        if let Err(e) = scene.parts.car_water_wave.start(at, AMBIENT_WAVE_SCALE) {
            log::error!("Failed to start nearby wave: {}", e);
        }
    }
}

impl NavigationState for NearbyState {
    fn kind(&self) -> StateKind {
        StateKind::Nearby
    }

    fn progress(&self) -> f64 {
        self.progress
    }

    fn set_progress(&mut self, _scene: &mut Scene, _now: Duration, progress: f64) {
        self.progress = progress;
    }

    fn init_params(&mut self, scene: &mut Scene) {
        let radius = scene.dimens.progress_bar_radius;
        let parked = UiParams::at(PolarPosition::new(radius, NEARBY_ANGLE));
        let parts = &mut scene.parts;

        parts.center_point.reset_params(UiParams::default());
        parts.front_sector.reset_params(UiParams::default());
        parts
            .empty_progress_ring
            .reset_params(UiParams::default().with_alpha(0.1));
        parts.car_icon.reset_params(parked);
        parts.car_icon_background.reset_params(parked);
        parts
            .car_water_wave
            .reset_params(parked.with_alpha(0.0).with_scale(1.0));
        parts
            .progress_ring
            .reset_params(UiParams::at(PolarPosition::new(0.0, NEARBY_ANGLE)));
        parts.car_arrow.reset_params(
            UiParams::at(PolarPosition::new(scene.dimens.arrow_distance, NEARBY_ANGLE))
                .with_alpha(0.0),
        );
    }

    fn on_enter(&mut self, scene: &mut Scene, now: Duration) {
        self.start_intermediate_anim(scene, now);
    }

    fn tick(&mut self, scene: &mut Scene, now: Duration) {
        let mut finished = Vec::new();
        self.transitions.retain(|transition| {
            let done = now >= transition.finishes_at();
            if done {
                finished.push(*transition);
            }
            !done
        });
        for transition in &self.transitions {
            transition.apply(scene, now);
        }
        for transition in finished {
            transition.apply(scene, transition.finishes_at());
            Self::start_nearby_anim(scene, transition.finishes_at());
        }
    }

    fn on_exit(&mut self, scene: &mut Scene) {
        self.transitions.clear();
        scene.parts.car_water_wave.stop();
    }

    fn active_transitions(&self) -> usize {
        self.transitions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimens::{Dimens, PartColors};
    use crate::parts::{Invalidator, Parts};

    fn entered(now: Duration) -> (NearbyState, Scene) {
        let dimens = Dimens::default();
        let invalidator = Invalidator::default();
        let mut scene = Scene {
            parts: Parts::new(&dimens, &PartColors::default(), &invalidator),
            dimens,
            invalidator,
        };
        let mut state = NearbyState::default();
        state.init_params(&mut scene);
        state.on_enter(&mut scene, now);
        (state, scene)
    }

    #[test]
    fn test_enter_starts_one_transition() {
        let (state, scene) = entered(millis(0));
        assert_eq!(state.active_transitions(), 1);
        assert!(!scene.parts.car_water_wave.is_running());
        assert_eq!(
            scene.parts.car_icon.params().polar_position,
            PolarPosition::new(120.0, -90.0)
        );
        assert_eq!(scene.parts.car_arrow.params().alpha, 0.0);
    }

    #[test]
    fn test_transition_midpoint() {
        let (mut state, mut scene) = entered(millis(1000));
        state.tick(&mut scene, millis(1300));
        let parts = &scene.parts;
        assert!((parts.car_icon.params().polar_position.radius - 60.0).abs() < 1e-4);
        assert!((parts.car_icon.params().alpha - 0.5).abs() < 1e-6);
        assert!((parts.front_sector.params().alpha - 0.5).abs() < 1e-6);
        assert!((parts.empty_progress_ring.params().scale - 1.4).abs() < 1e-6);
        assert!((parts.car_water_wave.params().scale - 2.35).abs() < 1e-6);
    }

    #[test]
    fn test_completion_settles_and_starts_ambient_wave() {
        let (mut state, mut scene) = entered(millis(0));
        state.tick(&mut scene, millis(599));
        assert_eq!(state.active_transitions(), 1);
        assert!(!scene.parts.car_water_wave.is_running());

        state.tick(&mut scene, millis(650));
        assert_eq!(state.active_transitions(), 0);
        let parts = &scene.parts;
        assert_eq!(parts.car_icon.params().polar_position.radius, 0.0);
        assert_eq!(parts.car_icon.params().alpha, 0.0);
        assert_eq!(parts.front_sector.params().alpha, 0.0);
        assert_eq!(parts.empty_progress_ring.params().scale, 1.8);
        assert_eq!(parts.car_icon_background.params().scale, 3.7);
        assert_eq!(parts.car_water_wave.params().scale, 3.7);

        let emitter = &parts.car_water_wave;
        assert!(emitter.is_enabled());
        assert_eq!(emitter.waves()[0].started_at, millis(600));
        assert_eq!(emitter.next_emission(), Some(millis(1600)));
    }

    #[test]
    fn test_exit_cancels_transition() {
        let (mut state, mut scene) = entered(millis(0));
        state.tick(&mut scene, millis(200));
        state.on_exit(&mut scene);
        assert_eq!(state.active_transitions(), 0);

        let frozen = scene.parts.car_icon.params().polar_position;
        state.tick(&mut scene, millis(5000));
        assert_eq!(scene.parts.car_icon.params().polar_position, frozen);
        assert!(!scene.parts.car_water_wave.is_running());
        state.on_exit(&mut scene);
    }

    #[test]
    fn test_progress_is_inert() {
        let (mut state, mut scene) = entered(millis(0));
        scene.invalidator.take();
        state.set_progress(&mut scene, millis(1), 0.3);
        assert_eq!(state.progress(), 0.3);
        assert!(!scene.invalidator.is_pending());
    }
}
