//! Circular initials placeholder
//!
//! [`PlaceholderBadgeView`] paints a filled circle with up to two initials
//! centered on top, the kind of stand-in avatar shown for group chats.

use log::{debug, trace};

use crate::color::Color;
use crate::draw::{Canvas, Rect};
use crate::font::Font;
use crate::redraw::RedrawScheduler;

/// Maximum number of characters drawn
pub const MAX_INITIALS: usize = 2;

/// Rendered font size as a fraction of the badge's shorter side
pub const INITIALS_FONT_RATIO: f32 = 0.42;

/// A square view of fixed diameter that draws a circle with initials.
///
/// Every setter requests one redraw from the scheduler. Use
/// [`batch_update`](Self::batch_update) to change several attributes at the
/// cost of a single redraw.
pub struct PlaceholderBadgeView<S: RedrawScheduler> {
    diameter: u32,
    font: Font,
    text_color: Color,
    circle_color: Color,
    initials: String,
    scheduler: S,
}

impl<S: RedrawScheduler> PlaceholderBadgeView<S> {
    /// Create a badge with a `diameter × diameter` frame.
    ///
    /// Defaults: bold system font, white text, light gray circle, no
    /// initials. No redraw is requested; the host paints new views itself.
    pub fn new(diameter: u32, scheduler: S) -> Self {
        Self {
            diameter,
            font: Font::default(),
            text_color: Color::WHITE,
            circle_color: Color::LIGHT_GRAY,
            initials: String::new(),
            scheduler,
        }
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// The view's frame, always square
    pub fn frame(&self) -> Rect {
        Rect::square(self.diameter)
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn circle_color(&self) -> Color {
        self.circle_color
    }

    /// The stored initials, at most two characters
    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
        self.request_redraw();
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
        self.request_redraw();
    }

    pub fn set_circle_color(&mut self, color: Color) {
        self.circle_color = color;
        self.request_redraw();
    }

    /// Store `initials`, keeping only the first two characters
    pub fn set_initials(&mut self, initials: &str) {
        self.initials = truncate_initials(initials);
        self.request_redraw();
    }

    /// Apply any subset of the four attributes, then request exactly one
    /// redraw. `None` leaves the attribute unchanged.
    pub fn batch_update(
        &mut self,
        initials: Option<&str>,
        circle_color: Option<Color>,
        text_color: Option<Color>,
        font: Option<Font>,
    ) {
        debug!(
            "Batch update: initials={:?} circle_color={:?} text_color={:?} font={}",
            initials,
            circle_color,
            text_color,
            font.is_some()
        );
        if let Some(initials) = initials {
            self.initials = truncate_initials(initials);
        }
        if let Some(color) = circle_color {
            self.circle_color = color;
        }
        if let Some(color) = text_color {
            self.text_color = color;
        }
        if let Some(font) = font {
            self.font = font;
        }
        self.request_redraw();
    }

    /// Pixel size the initials are rendered at inside `bounds`
    pub fn font_size_for(bounds: Rect) -> f32 {
        bounds.width.min(bounds.height) as f32 * INITIALS_FONT_RATIO
    }

    /// Paint the badge into `bounds` on `canvas`
    pub fn draw(&self, canvas: &mut Canvas, bounds: Rect) {
        canvas.fill_circle(bounds, self.circle_color);

        let text = truncate_initials(&self.initials);
        if text.is_empty() {
            return;
        }
        let Some(face) = self.font.face() else {
            return;
        };
        let px = Self::font_size_for(bounds);
        canvas.draw_text_centered(face, &text, px, bounds, self.text_color);
    }

    fn request_redraw(&self) {
        trace!("Badge requesting redraw");
        self.scheduler.request_redraw();
    }
}

fn truncate_initials(initials: &str) -> String {
    initials.chars().take(MAX_INITIALS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    fn counting_badge(diameter: u32) -> (PlaceholderBadgeView<impl Fn()>, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let badge = PlaceholderBadgeView::new(diameter, move || c.set(c.get() + 1));
        (badge, count)
    }

    #[test]
    fn defaults() {
        let (badge, count) = counting_badge(44);
        assert_eq!(badge.frame(), Rect::new(0, 0, 44, 44));
        assert_eq!(badge.circle_color(), Color::LIGHT_GRAY);
        assert_eq!(badge.text_color(), Color::WHITE);
        assert_eq!(badge.initials(), "");
        assert!(badge.font().is_bold());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn frame_is_square_of_diameter() {
        for d in [1, 17, 64, 300] {
            let (badge, _) = counting_badge(d);
            let frame = badge.frame();
            assert_eq!(frame.width, d);
            assert_eq!(frame.height, d);
            assert_eq!(badge.diameter(), d);
        }
    }

    #[test]
    fn long_initials_are_truncated() {
        let (mut badge, _) = counting_badge(44);
        badge.set_initials("Brian Michel");
        assert_eq!(badge.initials(), "Br");
        badge.set_initials("");
        badge.set_initials("XYZ");
        assert_eq!(badge.initials(), "XY");
    }

    #[test]
    fn short_initials_are_kept() {
        let (mut badge, _) = counting_badge(44);
        for s in ["", "A", "AB", "7#"] {
            badge.set_initials(s);
            assert_eq!(badge.initials(), s);
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let (mut badge, _) = counting_badge(44);
        badge.set_initials("ÅÉÎ");
        assert_eq!(badge.initials(), "ÅÉ");
        badge.set_initials("日本語");
        assert_eq!(badge.initials(), "日本");
    }

    #[test]
    fn each_setter_requests_one_redraw() {
        let (mut badge, count) = counting_badge(44);
        badge.set_font(Font::bold_system(20.0));
        assert_eq!(count.get(), 1);
        badge.set_text_color(Color::BLACK);
        assert_eq!(count.get(), 2);
        badge.set_circle_color(Color::rgb(0, 122, 255));
        assert_eq!(count.get(), 3);
        badge.set_initials("AB");
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn empty_batch_redraws_once_and_changes_nothing() {
        let (mut badge, count) = counting_badge(44);
        badge.set_initials("CD");
        count.set(0);
        let font = badge.font().clone();

        badge.batch_update(None, None, None, None);

        assert_eq!(count.get(), 1);
        assert_eq!(badge.initials(), "CD");
        assert_eq!(badge.circle_color(), Color::LIGHT_GRAY);
        assert_eq!(badge.text_color(), Color::WHITE);
        assert_eq!(badge.font(), &font);
    }

    #[test]
    fn full_batch_updates_everything_with_one_redraw() {
        let (mut badge, count) = counting_badge(44);
        let circle = Color::rgb(52, 199, 89);
        let text = Color::BLACK;
        let font = Font::bold_system(30.0);

        badge.batch_update(Some("ABC"), Some(circle), Some(text), Some(font.clone()));

        assert_eq!(count.get(), 1);
        assert_eq!(badge.initials(), "AB");
        assert_eq!(badge.circle_color(), circle);
        assert_eq!(badge.text_color(), text);
        assert_eq!(badge.font(), &font);
    }

    #[test]
    fn partial_batch_leaves_other_attributes() {
        let (mut badge, count) = counting_badge(44);
        badge.batch_update(None, Some(Color::BLACK), None, None);
        assert_eq!(count.get(), 1);
        assert_eq!(badge.circle_color(), Color::BLACK);
        assert_eq!(badge.text_color(), Color::WHITE);
        assert_eq!(badge.initials(), "");
    }

    #[test]
    fn font_size_tracks_bounds_not_stored_size() {
        let small = PlaceholderBadgeView::<fn()>::font_size_for(Rect::square(44));
        let large = PlaceholderBadgeView::<fn()>::font_size_for(Rect::square(88));
        assert!((large - 2.0 * small).abs() < 1e-4);
        assert!((small - 44.0 * INITIALS_FONT_RATIO).abs() < 1e-4);
    }

    fn render(badge: &PlaceholderBadgeView<impl RedrawScheduler>) -> Vec<u8> {
        let d = badge.diameter();
        let mut buf = vec![0; (d * d * 4) as usize];
        let mut canvas = Canvas::new(&mut buf, d, d);
        badge.draw(&mut canvas, badge.frame());
        buf
    }

    /// Red is only ever contributed by the text in these tests
    fn has_red(buf: &[u8]) -> bool {
        buf.chunks_exact(4).any(|p| p[2] > 0)
    }

    #[test]
    fn empty_initials_draw_only_the_circle() {
        let (mut badge, _) = counting_badge(44);
        badge.batch_update(
            Some(""),
            Some(Color::rgb(0, 0, 255)),
            Some(Color::rgb(255, 0, 0)),
            None,
        );
        let buf = render(&badge);
        let center = ((22 * 44 + 22) * 4) as usize;
        assert_eq!(&buf[center..center + 4], &[255, 0, 0, 255]);
        assert_eq!(&buf[0..4], &[0, 0, 0, 0]);
        assert!(!has_red(&buf));
    }

    #[test]
    fn initials_are_drawn_when_a_face_is_available() {
        let (mut badge, _) = counting_badge(64);
        badge.batch_update(
            Some("WM"),
            Some(Color::rgb(0, 0, 255)),
            Some(Color::rgb(255, 0, 0)),
            None,
        );
        let buf = render(&badge);
        assert_eq!(has_red(&buf), badge.font().has_face());
    }

    #[test]
    fn initials_are_centered_in_the_frame() {
        let (mut badge, _) = counting_badge(64);
        if !badge.font().has_face() {
            return;
        }
        badge.batch_update(
            Some("HH"),
            Some(Color::rgb(0, 0, 255)),
            Some(Color::rgb(255, 0, 0)),
            None,
        );
        let buf = render(&badge);

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (u32::MAX, u32::MAX, 0, 0);
        for (i, px) in buf.chunks_exact(4).enumerate() {
            if px[2] == 0 {
                continue;
            }
            let (x, y) = (i as u32 % 64, i as u32 / 64);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        assert!(min_x <= max_x && min_y <= max_y, "no ink rendered");

        let ink_cx = (min_x + max_x + 1) as f32 / 2.0;
        let ink_cy = (min_y + max_y + 1) as f32 / 2.0;
        // ascent/descent centering leaves capitals slightly high
        assert!((ink_cx - 32.0).abs() <= 2.0, "ink center x {}", ink_cx);
        assert!((ink_cy - 32.0).abs() <= 3.0, "ink center y {}", ink_cy);
    }

    #[test]
    fn zero_diameter_draws_nothing() {
        let (mut badge, _) = counting_badge(0);
        badge.set_initials("AB");
        assert!(render(&badge).is_empty());
    }
}
