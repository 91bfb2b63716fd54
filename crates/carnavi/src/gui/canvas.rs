use super::bitmaps::Bitmaps;
use cairo::Context;
use gdk4::prelude::*;
use navring::{Bitmap, Canvas, CanvasError, Paint, PaintStyle, Point, Rect, StrokeCap};
use std::f64::consts::PI;

/// Draws the widget's primitives with cairo.
pub struct CairoCanvas<'a> {
    cr: &'a Context,
    bitmaps: &'a Bitmaps,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context, bitmaps: &'a Bitmaps) -> Self {
        Self { cr, bitmaps }
    }

    fn apply_stroke(&self, paint: &Paint) {
        if let PaintStyle::Stroke { width, cap } = paint.style {
            self.cr.set_line_width(width);
            self.cr.set_line_cap(match cap {
                StrokeCap::Butt => cairo::LineCap::Butt,
                StrokeCap::Round => cairo::LineCap::Round,
            });
        }
    }

    fn finish(&self, paint: &Paint) -> Result<(), cairo::Error> {
        match paint.style {
            PaintStyle::Fill => self.cr.fill(),
            PaintStyle::Stroke { .. } => self.cr.stroke(),
        }
    }

    /// Cairo has no mask blur; a radial falloff across the edge stands in for it.
    fn blurred_circle(&self, center: Point, radius: f64, paint: &Paint) -> Result<(), cairo::Error> {
        let (r, g, b, a) = paint.rgba();
        let inner = (radius - paint.blur).max(0.0);
        let outer = radius + paint.blur;
        let gradient = cairo::RadialGradient::new(center.x, center.y, inner, center.x, center.y, outer);
        gradient.add_color_stop_rgba(0.0, r, g, b, a);
        gradient.add_color_stop_rgba(0.5, r, g, b, a / 2.0);
        gradient.add_color_stop_rgba(1.0, r, g, b, 0.0);

        self.cr.save()?;
        self.cr.set_source(&gradient)?;
        self.cr.new_path();
        self.cr.arc(center.x, center.y, outer, 0.0, 2.0 * PI);
        self.cr.fill()?;
        self.cr.restore()
    }

    fn draw_fallback(&self, bitmap: Bitmap, top_left: Point, paint: &Paint) -> Result<(), cairo::Error> {
        let (w, h) = self.bitmaps.size(bitmap);
        let (r, g, b, a) = paint.rgba();
        let cr = self.cr;
        cr.save()?;
        cr.new_path();
        match bitmap {
            Bitmap::Car => {
                cr.set_source_rgba(1.0, 1.0, 1.0, a);
                cr.arc(top_left.x + w / 2.0, top_left.y + h / 2.0, w / 2.0, 0.0, 2.0 * PI);
            }
            Bitmap::Arrow => {
                cr.set_source_rgba(r, g, b, a);
                cr.move_to(top_left.x + w / 2.0, top_left.y);
                cr.line_to(top_left.x + w, top_left.y + h);
                cr.line_to(top_left.x, top_left.y + h);
                cr.close_path();
            }
            Bitmap::FrontSector => {
                cr.set_source_rgba(r, g, b, a * 0.3);
                cr.move_to(top_left.x + w / 2.0, top_left.y + h);
                cr.line_to(top_left.x, top_left.y);
                cr.line_to(top_left.x + w, top_left.y);
                cr.close_path();
            }
        }
        cr.fill()?;
        cr.restore()
    }
}

fn backend(e: cairo::Error) -> CanvasError {
    CanvasError::Backend(e.to_string())
}

impl Canvas for CairoCanvas<'_> {
    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), CanvasError> {
        if paint.alpha == 0 || radius <= 0.0 {
            return Ok(());
        }
        if paint.blur > 0.0 {
            return self.blurred_circle(center, radius, paint).map_err(backend);
        }
        let (r, g, b, a) = paint.rgba();
        self.cr.set_source_rgba(r, g, b, a);
        self.apply_stroke(paint);
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.finish(paint).map_err(backend)
    }

    fn draw_arc(
        &mut self,
        oval: Rect,
        start_angle: f64,
        sweep_angle: f64,
        paint: &Paint,
    ) -> Result<(), CanvasError> {
        if paint.alpha == 0 || sweep_angle == 0.0 {
            return Ok(());
        }
        let center = oval.center();
        let radius = oval.width().min(oval.height()) / 2.0;
        let sweep = sweep_angle.clamp(-360.0, 360.0);
        let (from, to) = (start_angle.to_radians(), (start_angle + sweep).to_radians());

        let (r, g, b, a) = paint.rgba();
        self.cr.set_source_rgba(r, g, b, a);
        self.apply_stroke(paint);
        self.cr.new_path();
        if sweep > 0.0 {
            self.cr.arc(center.x, center.y, radius, from, to);
        } else {
            self.cr.arc_negative(center.x, center.y, radius, from, to);
        }
        self.finish(paint).map_err(backend)
    }

    fn draw_bitmap(&mut self, bitmap: Bitmap, top_left: Point, paint: &Paint) -> Result<(), CanvasError> {
        if paint.alpha == 0 {
            return Ok(());
        }
        let Some(pixbuf) = self.bitmaps.get(bitmap) else {
            return self.draw_fallback(bitmap, top_left, paint).map_err(backend);
        };
        let (w, h) = (pixbuf.width() as f64, pixbuf.height() as f64);
        let cr = self.cr;
        let draw = || -> Result<(), cairo::Error> {
            cr.save()?;
            cr.rectangle(top_left.x, top_left.y, w, h);
            cr.clip();
            cr.set_source_pixbuf(pixbuf, top_left.x, top_left.y);
            cr.paint_with_alpha(paint.alpha as f64 / 255.0)?;
            cr.restore()
        };
        draw().map_err(backend)
    }

    fn bitmap_size(&self, bitmap: Bitmap) -> (f64, f64) {
        self.bitmaps.size(bitmap)
    }
}
