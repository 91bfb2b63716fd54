use crate::geometry::ViewSize;
use palette::Srgba;
use serde::{Deserialize, Serialize};

/// Fixed pixel sizes of the widget, plus the measured view size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimens {
    pub car_icon_size: i32,
    pub car_bg_radius: f64,
    pub center_point_radius: f64,
    pub progress_bar_radius: f64,
    pub progress_bar_width: f64,
    pub arrow_distance: f64,
    #[serde(skip)]
    pub view_size: ViewSize,
}

impl Default for Dimens {
    fn default() -> Self {
        Self {
            car_icon_size: 48,
            car_bg_radius: 30.0,
            center_point_radius: 6.0,
            progress_bar_radius: 120.0,
            progress_bar_width: 8.0,
            arrow_distance: 60.0,
            view_size: ViewSize::default(),
        }
    }
}

impl Dimens {
    /// Height is the width plus one car icon.
    pub fn measure(&self, width: i32) -> ViewSize {
        ViewSize::new(width, width + self.car_icon_size)
    }
}

/// Colours of the widget's parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartColors {
    pub car_icon_bounds: Srgba<f64>,
    pub progress_unused: Srgba<f64>,
    pub progress_used: Srgba<f64>,
}

impl Default for PartColors {
    fn default() -> Self {
        Self {
            car_icon_bounds: Srgba::new(0.16, 0.47, 1.0, 1.0),
            progress_unused: Srgba::new(0.16, 0.47, 1.0, 1.0),
            progress_used: Srgba::new(0.16, 0.47, 1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_adds_icon_height() {
        let dimens = Dimens::default();
        assert_eq!(dimens.measure(400), ViewSize::new(400, 448));
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let dimens: Dimens = serde_json::from_str(r#"{ "progress_bar_radius": 90.0 }"#).unwrap();
        assert_eq!(dimens.progress_bar_radius, 90.0);
        assert_eq!(dimens.car_bg_radius, Dimens::default().car_bg_radius);
    }
}
