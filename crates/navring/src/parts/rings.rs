use super::{Invalidator, PartCore, UiPart};
use crate::canvas::{Canvas, CanvasError, Paint, PaintStyle, StrokeCap};
use crate::dimens::{Dimens, PartColors};
use crate::geometry::Rect;

/// Small dot marking the view centre.
pub struct CenterPoint {
    core: PartCore,
}

impl CenterPoint {
    pub fn new(colors: &PartColors, invalidator: Invalidator) -> Self {
        Self {
            core: PartCore::new(Paint::fill(colors.car_icon_bounds), invalidator),
        }
    }
}

impl UiPart for CenterPoint {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        canvas.draw_circle(
            self.core.position(dimens),
            dimens.center_point_radius,
            self.core.paint(),
        )
    }

    fn on_colors_changed(&mut self, colors: &PartColors) {
        self.core.paint_mut().color = colors.car_icon_bounds;
    }
}

/// Full track of the progress ring, drawn faintly beneath the filled arc.
pub struct EmptyProgressRing {
    core: PartCore,
}

impl EmptyProgressRing {
    pub fn new(dimens: &Dimens, colors: &PartColors, invalidator: Invalidator) -> Self {
        let paint = Paint::stroke(
            colors.progress_unused,
            dimens.progress_bar_width,
            StrokeCap::Butt,
        );
        Self {
            core: PartCore::new(paint, invalidator),
        }
    }
}

impl UiPart for EmptyProgressRing {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        canvas.draw_circle(
            self.core.position(dimens),
            dimens.progress_bar_radius * self.params().scale,
            self.core.paint(),
        )
    }

    fn on_dimens_changed(&mut self, dimens: &Dimens) {
        self.core.paint_mut().style = PaintStyle::Stroke {
            width: dimens.progress_bar_width,
            cap: StrokeCap::Butt,
        };
    }

    fn on_colors_changed(&mut self, colors: &PartColors) {
        self.core.paint_mut().color = colors.progress_unused;
    }
}

/// Arc of remaining route. Its params angle encodes progress as
/// `270 - progress * 360`, so the arc runs from -90 deg with a sweep of
/// `angle + 90`: full at progress 0 and empty at progress 1.
pub struct FilledProgressRing {
    core: PartCore,
    oval: Rect,
}

impl FilledProgressRing {
    pub fn new(dimens: &Dimens, colors: &PartColors, invalidator: Invalidator) -> Self {
        let paint = Paint::stroke(
            colors.progress_used,
            dimens.progress_bar_width,
            StrokeCap::Round,
        );
        Self {
            core: PartCore::new(paint, invalidator),
            oval: Rect::centered_square(dimens.view_size, dimens.progress_bar_radius),
        }
    }

    /// Start angle and sweep length of the drawn arc for a params angle.
    pub fn sweep_for_angle(angle: f64) -> (f64, f64) {
        (-90.0, angle + 90.0)
    }

    pub fn sweep(&self) -> (f64, f64) {
        Self::sweep_for_angle(self.params().polar_position.angle)
    }

    pub fn oval(&self) -> Rect {
        self.oval
    }
}

impl UiPart for FilledProgressRing {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, _dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let (start, sweep) = self.sweep();
        canvas.draw_arc(self.oval, start, sweep, self.core.paint())
    }

    fn on_dimens_changed(&mut self, dimens: &Dimens) {
        self.oval = Rect::centered_square(dimens.view_size, dimens.progress_bar_radius);
        self.core.paint_mut().style = PaintStyle::Stroke {
            width: dimens.progress_bar_width,
            cap: StrokeCap::Round,
        };
    }

    fn on_colors_changed(&mut self, colors: &PartColors) {
        self.core.paint_mut().color = colors.progress_used;
    }
}

/// Disc behind the car icon.
pub struct CarIconBackground {
    core: PartCore,
}

impl CarIconBackground {
    pub fn new(colors: &PartColors, invalidator: Invalidator) -> Self {
        Self {
            core: PartCore::new(Paint::fill(colors.car_icon_bounds), invalidator),
        }
    }
}

impl UiPart for CarIconBackground {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        canvas.draw_circle(
            self.core.position(dimens),
            dimens.car_bg_radius * self.params().scale,
            self.core.paint(),
        )
    }

    fn on_colors_changed(&mut self, colors: &PartColors) {
        self.core.paint_mut().color = colors.car_icon_bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{DrawOp, RecordingCanvas};
    use crate::geometry::{PolarPosition, ViewSize};
    use crate::parts::{ParamsPatch, UiParams};

    fn dimens() -> Dimens {
        Dimens {
            view_size: ViewSize::new(400, 448),
            ..Dimens::default()
        }
    }

    #[test]
    fn test_sweep_mapping() {
        for i in 0..=20 {
            let p = i as f64 / 20.0;
            let angle = 270.0 - p * 360.0;
            let (start, sweep) = FilledProgressRing::sweep_for_angle(angle);
            assert_eq!(start, -90.0);
            assert_eq!(sweep, angle + 90.0);
        }
        assert_eq!(FilledProgressRing::sweep_for_angle(270.0).1, 360.0);
        assert_eq!(FilledProgressRing::sweep_for_angle(-90.0).1, 0.0);
    }

    #[test]
    fn test_oval_follows_dimens() {
        let mut ring = FilledProgressRing::new(
            &Dimens::default(),
            &PartColors::default(),
            Invalidator::default(),
        );
        let dimens = dimens();
        ring.on_dimens_changed(&dimens);
        assert_eq!(ring.oval(), Rect::new(80.0, 104.0, 320.0, 344.0));

        ring.reset_params(UiParams::at(PolarPosition::new(120.0, 90.0)));
        let mut canvas = RecordingCanvas::default();
        ring.draw(&dimens, &mut canvas).unwrap();
        match &canvas.ops[..] {
            [DrawOp::Arc { start, sweep, .. }] => {
                assert_eq!(*start, -90.0);
                assert_eq!(*sweep, 180.0);
            }
            ops => panic!("unexpected ops {ops:?}"),
        }
    }

    #[test]
    fn test_scaled_circles() {
        let dimens = dimens();
        let colors = PartColors::default();
        let mut ring = EmptyProgressRing::new(&dimens, &colors, Invalidator::default());
        let mut bg = CarIconBackground::new(&colors, Invalidator::default());
        ring.set_params(ParamsPatch::scale(1.8));
        bg.set_params(ParamsPatch::scale(3.7));

        let mut canvas = RecordingCanvas::default();
        ring.draw(&dimens, &mut canvas).unwrap();
        bg.draw(&dimens, &mut canvas).unwrap();
        let radii: Vec<f64> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![120.0 * 1.8, 30.0 * 3.7]);
    }
}
