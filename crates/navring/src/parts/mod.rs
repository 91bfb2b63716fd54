use crate::canvas::{Canvas, CanvasError, Paint};
use crate::dimens::{Dimens, PartColors};
use crate::geometry::{Point, PolarPosition};
use std::cell::Cell;
use std::rc::Rc;

pub mod icons;
pub mod rings;
pub mod wave;

pub use icons::{CarArrow, CarIcon, FrontSector};
pub use rings::{CarIconBackground, CenterPoint, EmptyProgressRing, FilledProgressRing};
pub use wave::{CarWaterWave, WaveError, WaveInstance};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiParams {
    pub polar_position: PolarPosition,
    pub rotation: f64,
    pub scale: f64,
    pub alpha: f64,
}

impl Default for UiParams {
    fn default() -> Self {
        Self::at(PolarPosition::ORIGIN)
    }
}

impl UiParams {
    pub fn at(polar_position: PolarPosition) -> Self {
        Self {
            polar_position,
            rotation: 0.0,
            scale: 1.0,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn patched(self, patch: ParamsPatch) -> Self {
        Self {
            polar_position: patch.polar_position.unwrap_or(self.polar_position),
            rotation: patch.rotation.unwrap_or(self.rotation),
            scale: patch.scale.unwrap_or(self.scale),
            alpha: patch.alpha.unwrap_or(self.alpha),
        }
    }

    /// Clamps every field into its valid range.
    pub fn sanitized(self) -> Self {
        Self {
            polar_position: self.polar_position.sanitized(),
            rotation: self.rotation,
            scale: self.scale.max(0.0),
            alpha: self.alpha.clamp(0.0, 1.0),
        }
    }
}

/// Partial update of [`UiParams`]; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamsPatch {
    pub polar_position: Option<PolarPosition>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
    pub alpha: Option<f64>,
}

impl ParamsPatch {
    pub fn position(polar_position: PolarPosition) -> Self {
        Self {
            polar_position: Some(polar_position),
            ..Self::default()
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn alpha(alpha: f64) -> Self {
        Self {
            alpha: Some(alpha),
            ..Self::default()
        }
    }
}

/// Redraw request shared between the parts and the host view.
#[derive(Debug, Clone, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
    pub fn invalidate(&self) {
        self.0.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.0.get()
    }

    /// Returns whether a redraw was requested and clears the request.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// State every part carries: its params, its paint and a way to ask for a redraw.
#[derive(Debug, Clone)]
pub struct PartCore {
    params: UiParams,
    paint: Paint,
    invalidator: Invalidator,
}

impl PartCore {
    pub fn new(paint: Paint, invalidator: Invalidator) -> Self {
        Self {
            params: UiParams::default(),
            paint,
            invalidator,
        }
    }

    pub fn params(&self) -> &UiParams {
        &self.params
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut Paint {
        &mut self.paint
    }

    pub fn invalidator(&self) -> &Invalidator {
        &self.invalidator
    }

    /// Position of the part on the view, in view coordinates.
    pub fn position(&self, dimens: &Dimens) -> Point {
        let center = dimens.view_size.center();
        self.params
            .polar_position
            .to_cartesian()
            .offset(center.x, center.y)
    }
}

pub trait UiPart {
    fn core(&self) -> &PartCore;
    fn core_mut(&mut self) -> &mut PartCore;

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError>;

    fn params(&self) -> &UiParams {
        self.core().params()
    }

    /// Replaces the params wholesale.
    fn reset_params(&mut self, params: UiParams) {
        self.core_mut().params = params.sanitized();
        self.on_params_changed();
        self.core().invalidator.invalidate();
    }

    fn set_params(&mut self, patch: ParamsPatch) {
        let next = self.core().params.patched(patch);
        self.reset_params(next);
    }

    fn on_params_changed(&mut self) {
        let core = self.core_mut();
        core.paint.set_alpha(core.params.alpha);
    }

    fn on_dimens_changed(&mut self, _dimens: &Dimens) {}

    fn on_colors_changed(&mut self, _colors: &PartColors) {}
}

/// Every visual part of the widget.
pub struct Parts {
    pub center_point: CenterPoint,
    pub front_sector: FrontSector,
    pub empty_progress_ring: EmptyProgressRing,
    pub progress_ring: FilledProgressRing,
    pub car_arrow: CarArrow,
    pub car_icon: CarIcon,
    pub car_icon_background: CarIconBackground,
    pub car_water_wave: CarWaterWave,
}

impl Parts {
    pub fn new(dimens: &Dimens, colors: &PartColors, invalidator: &Invalidator) -> Self {
        Self {
            center_point: CenterPoint::new(colors, invalidator.clone()),
            front_sector: FrontSector::new(invalidator.clone()),
            empty_progress_ring: EmptyProgressRing::new(dimens, colors, invalidator.clone()),
            progress_ring: FilledProgressRing::new(dimens, colors, invalidator.clone()),
            car_arrow: CarArrow::new(invalidator.clone()),
            car_icon: CarIcon::new(invalidator.clone()),
            car_icon_background: CarIconBackground::new(colors, invalidator.clone()),
            car_water_wave: CarWaterWave::new(dimens, colors, invalidator.clone()),
        }
    }

    /// Parts in painting order, back to front.
    pub fn draw_order(&self) -> [&dyn UiPart; 8] {
        [
            &self.empty_progress_ring,
            &self.progress_ring,
            &self.front_sector,
            &self.center_point,
            &self.car_arrow,
            &self.car_water_wave,
            &self.car_icon_background,
            &self.car_icon,
        ]
    }

    pub fn draw_order_mut(&mut self) -> [&mut dyn UiPart; 8] {
        [
            &mut self.empty_progress_ring,
            &mut self.progress_ring,
            &mut self.front_sector,
            &mut self.center_point,
            &mut self.car_arrow,
            &mut self.car_water_wave,
            &mut self.car_icon_background,
            &mut self.car_icon,
        ]
    }
}
