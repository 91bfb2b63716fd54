pub mod app;
pub mod bitmaps;
pub mod canvas;
pub mod theme;
pub mod window;
