//! Layout and animation engine for the car navigation indicator.
//!
//! The view is driven entirely by [`CarNavigationView::tick`] with a
//! monotonically increasing [`std::time::Duration`], and draws through the
//! [`Canvas`] trait, so it runs the same under a GTK frame clock and under a
//! virtual clock in tests.

pub mod anim;
pub mod canvas;
pub mod dimens;
pub mod driver;
pub mod geometry;
pub mod parts;
pub mod state;
pub mod view;

pub use canvas::{Bitmap, Canvas, CanvasError, Paint, PaintStyle, StrokeCap};
pub use dimens::{Dimens, PartColors};
pub use driver::{DriverConfig, ScriptedDriver};
pub use geometry::{Point, PolarPosition, Rect, ViewSize};
pub use state::StateKind;
pub use view::CarNavigationView;
