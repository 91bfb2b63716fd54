use super::{Invalidator, ParamsPatch, PartCore, UiPart};
use crate::anim::{ALPHA_EASE, Running, Tween, millis};
use crate::canvas::{Bitmap, Canvas, CanvasError, Paint};
use crate::dimens::Dimens;
use std::time::Duration;

const ARROW_FADE: Duration = millis(650);

/// Heading cone; its bottom-centre sits on the part's position.
pub struct FrontSector {
    core: PartCore,
}

impl FrontSector {
    pub fn new(invalidator: Invalidator) -> Self {
        Self {
            core: PartCore::new(Paint::default(), invalidator),
        }
    }
}

impl UiPart for FrontSector {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        let (w, h) = canvas.bitmap_size(Bitmap::FrontSector);
        let top_left = self.core.position(dimens).offset(-w / 2.0, -h);
        canvas.draw_bitmap(Bitmap::FrontSector, top_left, self.core.paint())
    }
}

pub struct CarIcon {
    core: PartCore,
}

impl CarIcon {
    pub fn new(invalidator: Invalidator) -> Self {
        Self {
            core: PartCore::new(Paint::default(), invalidator),
        }
    }
}

impl UiPart for CarIcon {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        draw_centered(&self.core, Bitmap::Car, dimens, canvas)
    }
}

/// Direction arrow shown once the car has reached the front of the ring.
pub struct CarArrow {
    core: PartCore,
    fade: Option<Running>,
}

impl CarArrow {
    pub fn new(invalidator: Invalidator) -> Self {
        Self {
            core: PartCore::new(Paint::default(), invalidator),
            fade: None,
        }
    }

    /// Starts a 650 ms fade, replacing any fade already running.
    pub fn start_fade(&mut self, now: Duration, fade_in: bool) {
        let (from, to) = if fade_in { (0.0, 1.0) } else { (1.0, 0.0) };
        self.fade = Some(Running::new(
            now,
            Tween::new(from, to, ARROW_FADE, &ALPHA_EASE),
        ));
        self.set_params(ParamsPatch::alpha(from));
    }

    pub fn stop_anim(&mut self) {
        self.fade = None;
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn tick(&mut self, now: Duration) {
        let Some(fade) = self.fade else {
            return;
        };
        self.set_params(ParamsPatch::alpha(fade.sample(now)));
        if fade.is_finished(now) {
            self.fade = None;
        }
    }
}

impl UiPart for CarArrow {
    fn core(&self) -> &PartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PartCore {
        &mut self.core
    }

    fn draw(&self, dimens: &Dimens, canvas: &mut dyn Canvas) -> Result<(), CanvasError> {
        draw_centered(&self.core, Bitmap::Arrow, dimens, canvas)
    }
}

fn draw_centered(
    core: &PartCore,
    bitmap: Bitmap,
    dimens: &Dimens,
    canvas: &mut dyn Canvas,
) -> Result<(), CanvasError> {
    let (w, h) = canvas.bitmap_size(bitmap);
    let top_left = core.position(dimens).offset(-w / 2.0, -h / 2.0);
    canvas.draw_bitmap(bitmap, top_left, core.paint())
}
