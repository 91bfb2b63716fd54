use crate::config::{ColorConfig, HexColor};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use navring::PartColors;
use palette::Srgba;

/// Resolves part colours: config overrides first, then the GTK theme.
pub struct ThemeColors;

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext, overrides: &ColorConfig) -> PartColors {
        let defaults = PartColors::default();
        PartColors {
            car_icon_bounds: Self::resolve(
                context,
                overrides.car_icon_bounds,
                "theme_selected_bg_color",
                defaults.car_icon_bounds,
            ),
            progress_unused: Self::resolve(
                context,
                overrides.progress_unused,
                "borders",
                defaults.progress_unused,
            ),
            progress_used: Self::resolve(
                context,
                overrides.progress_used,
                "theme_selected_bg_color",
                defaults.progress_used,
            ),
        }
    }

    fn resolve(
        context: &gtk::StyleContext,
        configured: Option<HexColor>,
        name: &str,
        fallback: Srgba<f64>,
    ) -> Srgba<f64> {
        configured
            .map(HexColor::to_srgba)
            .unwrap_or_else(|| Self::lookup_color(context, name, fallback))
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.carnavi-window, .carnavi-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
