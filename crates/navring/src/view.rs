use crate::anim::Animation;
use crate::canvas::{Canvas, CanvasError};
use crate::dimens::{Dimens, PartColors};
use crate::geometry::ViewSize;
use crate::parts::{Invalidator, Parts};
use crate::state::{NavigationState, Scene, StateKind};
use std::time::Duration;

/// The navigation indicator: owns the parts, the active state and the clock
/// every animation is sampled against.
pub struct CarNavigationView {
    scene: Scene,
    state: Option<Box<dyn NavigationState>>,
    now: Duration,
}

impl CarNavigationView {
    pub fn new(dimens: Dimens, colors: PartColors) -> Self {
        let invalidator = Invalidator::default();
        let parts = Parts::new(&dimens, &colors, &invalidator);
        Self {
            scene: Scene {
                dimens,
                parts,
                invalidator,
            },
            state: None,
            now: Duration::ZERO,
        }
    }

    pub fn state(&self) -> Option<StateKind> {
        self.state.as_ref().map(|s| s.kind())
    }

    /// Switches to `kind`. Setting the active state again does nothing.
    pub fn set_state(&mut self, kind: StateKind) {
        if self.state() == Some(kind) {
            return;
        }
        let now = self.now;
        if let Some(old) = self.state.as_mut() {
            old.on_exit(&mut self.scene);
        }
        log::debug!(
            "Navigation state {} -> {}",
            self.state().map(|k| k.to_string()).unwrap_or("none".into()),
            kind
        );
        let state = self.state.insert(kind.create());
        state.init_params(&mut self.scene);
        state.on_enter(&mut self.scene, now);
        self.scene.invalidate();
    }

    pub fn progress(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.progress())
    }

    pub fn set_progress(&mut self, progress: f64) {
        if let Some(state) = self.state.as_mut() {
            state.set_progress(&mut self.scene, self.now, progress);
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advances every animation to `now`. Time never runs backwards; an
    /// earlier instant is treated as the current one.
    pub fn tick(&mut self, now: Duration) {
        self.now = self.now.max(now);
        if let Some(state) = self.state.as_mut() {
            state.tick(&mut self.scene, self.now);
        }
        self.scene.parts.car_arrow.tick(self.now);
        self.scene.parts.car_water_wave.tick(self.now);
    }

    /// Lays the view out for `width`, returning the measured size.
    pub fn on_measure(&mut self, width: i32) -> ViewSize {
        let size = self.scene.dimens.measure(width);
        if size != self.scene.dimens.view_size {
            self.scene.dimens.view_size = size;
            self.dispatch_dimens_changed();
        }
        size
    }

    /// Replaces the fixed sizes and re-measures at the current width.
    pub fn set_dimens(&mut self, dimens: Dimens) {
        let view_size = dimens.measure(self.scene.dimens.view_size.width);
        self.scene.dimens = Dimens { view_size, ..dimens };
        self.dispatch_dimens_changed();
    }

    pub fn set_colors(&mut self, colors: PartColors) {
        for part in self.scene.parts.draw_order_mut() {
            part.on_colors_changed(&colors);
        }
        self.scene.invalidate();
    }

    fn dispatch_dimens_changed(&mut self) {
        let dimens = self.scene.dimens;
        for part in self.scene.parts.draw_order_mut() {
            part.on_dimens_changed(&dimens);
        }
        self.scene.invalidate();
    }

    pub fn dimens(&self) -> &Dimens {
        &self.scene.dimens
    }

    pub fn parts(&self) -> &Parts {
        &self.scene.parts
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        for part in self.scene.parts.draw_order() {
            part.draw(&self.scene.dimens, canvas)?;
        }
        Ok(())
    }

    /// Whether a redraw was requested since the last call.
    pub fn take_redraw(&self) -> bool {
        self.scene.invalidator.take()
    }

    pub fn active_transitions(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.active_transitions())
    }

    /// Whether any animation is still running, so the host knows to keep
    /// ticking.
    pub fn is_animating(&self) -> bool {
        let parts = &self.scene.parts;
        self.active_transitions() > 0
            || parts.car_arrow.is_fading()
            || parts.car_water_wave.is_running()
    }
}

impl Drop for CarNavigationView {
    fn drop(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.on_exit(&mut self.scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::millis;
    use crate::canvas::recording::{DrawOp, RecordingCanvas};
    use crate::canvas::Bitmap;
    use crate::parts::UiPart;

    fn view() -> CarNavigationView {
        let mut view = CarNavigationView::new(Dimens::default(), PartColors::default());
        view.on_measure(400);
        view.set_state(StateKind::Search);
        view
    }

    #[test]
    fn test_redundant_state_is_noop() {
        let mut view = view();
        view.set_progress(0.6);
        view.take_redraw();
        view.set_state(StateKind::Search);
        assert_eq!(view.progress(), Some(0.6));
        assert!(!view.take_redraw());
    }

    #[test]
    fn test_search_to_nearby_leaves_no_search_animation() {
        let mut view = view();
        view.tick(millis(10));
        view.set_progress(1.0);
        view.tick(millis(2500));
        assert_eq!(view.parts().car_water_wave.waves().len(), 3);
        assert!(view.parts().car_arrow.is_fading() || view.parts().car_arrow.params().alpha == 1.0);

        view.set_state(StateKind::Nearby);
        assert_eq!(view.state(), Some(StateKind::Nearby));
        assert!(view.parts().car_water_wave.waves().is_empty());
        assert!(!view.parts().car_water_wave.is_enabled());
        assert!(!view.parts().car_arrow.is_fading());
        assert_eq!(view.active_transitions(), 1);

        // the cancelled emission chain never fires again
        view.tick(millis(3000));
        assert!(view.parts().car_water_wave.waves().is_empty());
    }

    #[test]
    fn test_nearby_back_to_search() {
        let mut view = view();
        view.set_state(StateKind::Nearby);
        view.tick(millis(700));
        assert!(view.parts().car_water_wave.is_enabled());

        view.set_state(StateKind::Search);
        assert_eq!(view.active_transitions(), 0);
        assert!(!view.parts().car_water_wave.is_running());
        assert_eq!(view.parts().car_icon.params().alpha, 1.0);
        assert_eq!(view.parts().empty_progress_ring.params().scale, 1.0);
        assert_eq!(view.progress(), Some(0.0));
    }

    #[test]
    fn test_draw_order() {
        let mut view = view();
        view.set_progress(0.25);
        let mut canvas = RecordingCanvas::default();
        view.draw(&mut canvas).unwrap();

        let kinds: Vec<&str> = canvas
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::Circle { .. } => "circle",
                DrawOp::Arc { .. } => "arc",
                DrawOp::Bitmap { bitmap, .. } => match bitmap {
                    Bitmap::FrontSector => "sector",
                    Bitmap::Car => "car",
                    Bitmap::Arrow => "arrow",
                },
            })
            .collect();
        // no waves are live, so the emitter draws nothing
        assert_eq!(
            kinds,
            vec!["circle", "arc", "sector", "circle", "arrow", "circle", "car"]
        );
    }

    #[test]
    fn test_measure_updates_ring_geometry() {
        let mut view = view();
        assert_eq!(view.dimens().view_size, ViewSize::new(400, 448));
        view.take_redraw();
        assert_eq!(view.on_measure(400), ViewSize::new(400, 448));
        assert!(!view.take_redraw());

        view.on_measure(600);
        assert_eq!(view.parts().progress_ring.oval().center().x, 300.0);
        assert!(view.take_redraw());
    }

    #[test]
    fn test_set_dimens_keeps_width_and_remeasures_height() {
        let mut view = view();
        view.set_dimens(Dimens {
            progress_bar_radius: 90.0,
            ..Dimens::default()
        });
        assert_eq!(view.dimens().view_size, ViewSize::new(400, 448));
        assert_eq!(view.parts().progress_ring.oval().width(), 180.0);

        view.take_redraw();
        view.set_dimens(Dimens {
            car_icon_size: 100,
            ..Dimens::default()
        });
        assert_eq!(view.dimens().view_size, ViewSize::new(400, 500));
        assert_eq!(view.parts().progress_ring.oval().center().y, 250.0);
        assert!(view.take_redraw());
    }

    #[test]
    fn test_tick_is_monotonic() {
        let mut view = view();
        view.tick(millis(500));
        view.tick(millis(100));
        assert_eq!(view.now(), millis(500));
    }
}
