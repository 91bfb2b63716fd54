use gtk::prelude::*;
use gtk4 as gtk;
use navring::ViewSize;
use std::cell::Cell;
use std::time::Duration;

pub fn init_window(window: &gtk::ApplicationWindow, width: i32) {
    window.set_title(Some("Car Navigation"));
    window.add_css_class("carnavi-window");
    window.set_default_size(width, -1);
    window.set_resizable(true);
}

/// Keeps the drawing area as tall as the measured view.
pub fn apply_view_size(drawing_area: &gtk::DrawingArea, size: ViewSize) {
    if drawing_area.content_height() != size.height {
        drawing_area.set_content_height(size.height);
    }
}

/// Frame clock time relative to the first frame seen.
pub fn frame_elapsed(clock: &gtk::gdk::FrameClock, origin: &Cell<Option<i64>>) -> Duration {
    let micros = clock.frame_time();
    let first = origin.get().unwrap_or(micros);
    origin.set(Some(first));
    Duration::from_micros((micros - first).max(0) as u64)
}
