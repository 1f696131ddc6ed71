use super::app::Deck;
use super::theme::ThemeColors;
use super::{
    BADGE_FONT_SIZE, BLURB_FONT_SIZE, CARD_CORNER, CARD_FADE_ANGLE, CARD_HEIGHT, CARD_MIN_ALPHA,
    CARD_WIDTH, CHEVRON_MARGIN, CHEVRON_SIZE, RING_RADIUS, TITLE_FONT_SIZE,
};
use crate::carousel::FrameSnapshot;
use crate::config::Category;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

struct CardRenderer<'a> {
    category: &'a Category,
    index: usize,
    angle: f64,
    active: bool,
}

impl<'a> CardRenderer<'a> {
    /// Screen placement on the ring: the pivot sits far below the
    /// widget, so cards near angle 0 stand upright at the center and
    /// neighbours fan out left and right with a slight tilt.
    fn place(&self, cr: &Context, width: f64, height: f64) {
        let rad = self.angle * PI / 180.0;
        let cx = width / 2.0 + RING_RADIUS * rad.sin();
        let cy = height / 2.0 + RING_RADIUS * (1.0 - rad.cos());
        cr.translate(cx, cy);
        cr.rotate(rad);
    }

    fn alpha(&self) -> f64 {
        (1.0 - self.angle.abs() / CARD_FADE_ANGLE).clamp(CARD_MIN_ALPHA, 1.0)
    }

    fn draw(
        &self,
        cr: &Context,
        deck: &Deck,
        colors: &ThemeColors,
        width: f64,
        height: f64,
    ) -> Result<(), cairo::Error> {
        cr.save()?;
        self.place(cr, width, height);

        let alpha = self.alpha();
        let fill = if self.active { colors.card_active } else { colors.card };
        set_color(cr, fill, alpha);
        rounded_rect(cr, -CARD_WIDTH / 2.0, -CARD_HEIGHT / 2.0, CARD_WIDTH, CARD_HEIGHT);
        cr.fill_preserve()?;
        set_color(cr, colors.card_border, alpha);
        cr.set_line_width(1.5);
        cr.stroke()?;

        self.draw_badge(cr, colors, alpha)?;
        self.draw_text(cr, deck, colors, alpha)?;
        cr.restore()
    }

    fn draw_badge(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        alpha: f64,
    ) -> Result<(), cairo::Error> {
        let badge = if self.active { colors.accent } else { colors.muted };
        set_color(cr, badge, alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(BADGE_FONT_SIZE);
        let label = format!("{:02}", self.index + 1);
        cr.move_to(-CARD_WIDTH / 2.0 + 24.0, -CARD_HEIGHT / 2.0 + 52.0);
        cr.show_text(&label)
    }

    fn draw_text(
        &self,
        cr: &Context,
        deck: &Deck,
        colors: &ThemeColors,
        alpha: f64,
    ) -> Result<(), cairo::Error> {
        set_color(cr, colors.text, alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(TITLE_FONT_SIZE);
        let title = self.category.title(deck.lang);
        if let Ok(ext) = cr.text_extents(title) {
            cr.move_to(-ext.width() / 2.0, 0.0);
            cr.show_text(title)?;
        }

        // blurb only on the front card; the back cards are too small
        if self.active
            && let Some(blurb) = self.category.blurb(deck.lang)
        {
            set_color(cr, colors.muted, alpha);
            cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
            cr.set_font_size(BLURB_FONT_SIZE);
            if let Ok(ext) = cr.text_extents(blurb) {
                cr.move_to(-ext.width() / 2.0, 36.0);
                cr.show_text(blurb)?;
            }
        }
        Ok(())
    }
}

pub fn draw(
    cr: &Context,
    frame: &FrameSnapshot,
    deck: &Deck,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let len = deck.categories.len();
    if len == 0 {
        return Ok(());
    }
    let step = crate::carousel::ARC_SIZE / len as f64;

    // Far cards first so nearer ones paint over them.
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by(|&a, &b| {
        let da = (frame.rotation + a as f64 * step).abs();
        let db = (frame.rotation + b as f64 * step).abs();
        db.total_cmp(&da)
    });

    for i in order {
        CardRenderer {
            category: &deck.categories[i],
            index: i,
            angle: frame.rotation + i as f64 * step,
            active: i == frame.active,
        }
        .draw(cr, deck, colors, width, height)?;
    }

    draw_affordances(cr, frame, len, colors, width, height)
}

/// Chevrons: left/right for in-ring navigation, up/down when an escape
/// to the surrounding page is available.
fn draw_affordances(
    cr: &Context,
    frame: &FrameSnapshot,
    len: usize,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    if frame.active > 0 {
        draw_chevron(cr, CHEVRON_MARGIN, height / 2.0, -PI / 2.0, colors.accent)?;
    }
    if frame.active < len - 1 {
        draw_chevron(cr, width - CHEVRON_MARGIN, height / 2.0, PI / 2.0, colors.accent)?;
    }
    if frame.can_scroll_up {
        draw_chevron(cr, width / 2.0, CHEVRON_MARGIN, 0.0, colors.muted)?;
    }
    if frame.can_scroll_down {
        draw_chevron(cr, width / 2.0, height - CHEVRON_MARGIN, PI, colors.muted)?;
    }
    Ok(())
}

/// A single chevron centered at (x, y). `rotation` 0 points up.
fn draw_chevron(
    cr: &Context,
    x: f64,
    y: f64,
    rotation: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(x, y);
    cr.rotate(rotation);
    set_color(cr, color, 0.9);
    cr.set_line_width(2.5);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.move_to(-CHEVRON_SIZE / 2.0, CHEVRON_SIZE / 4.0);
    cr.line_to(0.0, -CHEVRON_SIZE / 4.0);
    cr.line_to(CHEVRON_SIZE / 2.0, CHEVRON_SIZE / 4.0);
    cr.stroke()?;
    cr.restore()
}

fn set_color(cr: &Context, color: Srgba<f64>, alpha_scale: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * alpha_scale);
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64) {
    let r = CARD_CORNER;
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}
