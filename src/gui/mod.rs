pub mod app;
pub mod theme;
pub mod view;

// Page sections
pub const HERO_HEIGHT: i32 = 620;
pub const FOOTER_HEIGHT: i32 = 380;
pub const CAROUSEL_HEIGHT: i32 = 540;

// Card ring geometry
pub const RING_RADIUS: f64 = 900.0; // card orbital radius, pivot far below the widget
pub const CARD_WIDTH: f64 = 250.0;
pub const CARD_HEIGHT: f64 = 330.0;
pub const CARD_CORNER: f64 = 18.0;
pub const CARD_FADE_ANGLE: f64 = 80.0; // degrees at which a card is fully faded
pub const CARD_MIN_ALPHA: f64 = 0.12;

pub const TITLE_FONT_SIZE: f64 = 21.0;
pub const BLURB_FONT_SIZE: f64 = 12.5;
pub const BADGE_FONT_SIZE: f64 = 30.0;

// Escape/navigation affordances
pub const CHEVRON_SIZE: f64 = 18.0;
pub const CHEVRON_MARGIN: f64 = 42.0;
