use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub card: Srgba<f64>,
    pub card_active: Srgba<f64>,
    pub card_border: Srgba<f64>,
    pub text: Srgba<f64>,
    pub muted: Srgba<f64>,
    pub accent: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            card: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.09, 0.08, 0.12, 0.92),
                Some(0.92),
            ),
            card_active: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.16, 0.12, 0.24, 0.96),
                Some(0.96),
            ),
            card_border: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.55, 0.44, 0.72, 0.5),
                Some(0.5),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.94, 0.98, 1.0),
                None,
            ),
            muted: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.65, 0.63, 0.7, 1.0),
                None,
            ),
            // gold accent for chevrons and the active card badge
            accent: Srgba::new(0.91, 0.73, 0.36, 1.0),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.gyre-window {
    background-color: #0b0a10;
}
.gyre-hero-title {
    font-size: 54px;
    font-weight: 800;
    color: #f2f0f7;
}
.gyre-hero-sub {
    font-size: 18px;
    color: #a9a4b8;
}
.gyre-section-title {
    font-size: 28px;
    font-weight: 700;
    color: #e8b95b;
}
.gyre-footer-line {
    font-size: 16px;
    color: #a9a4b8;
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
