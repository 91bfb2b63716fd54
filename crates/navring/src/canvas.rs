use crate::geometry::{Point, Rect};
use palette::Srgba;
use strum::{Display, EnumIter};
use thiserror::Error;

/// Bitmaps the widget blits. The backend owns loading and caching them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Bitmap {
    FrontSector,
    Car,
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke { width: f64, cap: StrokeCap },
}

/// Drawing attributes handed to the backend with every primitive.
/// `alpha` overrides the colour's own alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Srgba<f64>,
    pub alpha: u8,
    pub style: PaintStyle,
    /// Gaussian blur radius in pixels, 0 for none.
    pub blur: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(Srgba::new(0.0, 0.0, 0.0, 1.0))
    }
}

impl Paint {
    pub fn fill(color: Srgba<f64>) -> Self {
        Self {
            color,
            alpha: 255,
            style: PaintStyle::Fill,
            blur: 0.0,
        }
    }

    pub fn stroke(color: Srgba<f64>, width: f64, cap: StrokeCap) -> Self {
        Self {
            style: PaintStyle::Stroke { width, cap },
            ..Self::fill(color)
        }
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    }

    pub fn rgba(&self) -> (f64, f64, f64, f64) {
        let (r, g, b, _) = self.color.into_components();
        (r, g, b, self.alpha as f64 / 255.0)
    }
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Rendering backend error: {0}")]
    Backend(String),
}

/// The rasterization backend the parts draw into.
pub trait Canvas {
    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint)
    -> Result<(), CanvasError>;

    /// Arc inscribed in `oval`, angles in degrees with the same convention
    /// as [`crate::geometry::PolarPosition`].
    fn draw_arc(
        &mut self,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        paint: &Paint,
    ) -> Result<(), CanvasError>;

    fn draw_bitmap(
        &mut self,
        bitmap: Bitmap,
        top_left: Point,
        paint: &Paint,
    ) -> Result<(), CanvasError>;

    fn bitmap_size(&self, bitmap: Bitmap) -> (f64, f64);
}
