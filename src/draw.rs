// filepath: initials-badge/src/draw.rs
//! Drawing utilities for initials-badge
//!
//! This file contains the canvas the badge paints into: a thin wrapper
//! over a raw premultiplied ARGB8888 buffer with clipped, alpha-blended
//! primitives for filled circles and centered text.

use crate::color::{mul_div255, Color};

/// Rectangle used for layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square rect of `size` at the origin
    pub fn square(size: u32) -> Self {
        Self::new(0, 0, size, size)
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Canvas abstraction over a raw ARGB8888 buffer
pub struct Canvas<'a> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Create a new canvas from a raw buffer
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Overwrite every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        let px = color.to_argb8888(255);
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&px);
        }
    }

    /// Fill the circle inscribed in `area`, anti-aliased at the edge
    pub fn fill_circle(&mut self, area: Rect, color: Color) {
        if area.is_empty() {
            return;
        }
        let (cx, cy) = area.center();
        let radius = area.width.min(area.height) as f32 / 2.0;

        let x_start = area.x.max(0);
        let y_start = area.y.max(0);
        let x_end = (area.x + area.width as i32).min(self.width as i32);
        let y_end = (area.y + area.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let distance = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, (coverage * 255.0).round() as u8);
                }
            }
        }
    }

    /// Draw `text` centered in `area` at `px` pixels using `face`.
    ///
    /// Horizontal centering uses the summed advance widths, vertical
    /// centering uses the face's ascent and descent so that the line box is
    /// centered regardless of which glyphs are drawn.
    pub fn draw_text_centered(
        &mut self,
        face: &fontdue::Font,
        text: &str,
        px: f32,
        area: Rect,
        color: Color,
    ) {
        if text.is_empty() || px <= 0.0 {
            return;
        }

        let glyphs: Vec<(fontdue::Metrics, Vec<u8>)> =
            text.chars().map(|ch| face.rasterize(ch, px)).collect();
        let text_width: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();
        let (ascent, descent) = face
            .horizontal_line_metrics(px)
            .map(|lm| (lm.ascent, lm.descent))
            .unwrap_or((px * 0.8, -px * 0.2));

        let (cx, cy) = area.center();
        let baseline = cy + (ascent + descent) / 2.0;
        let mut pen_x = cx - text_width / 2.0;

        for (metrics, bitmap) in &glyphs {
            let gx = (pen_x + metrics.xmin as f32).round() as i32;
            let gy = (baseline - (metrics.height as i32 + metrics.ymin) as f32).round() as i32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    if coverage > 0 {
                        self.blend_pixel(gx + col as i32, gy + row as i32, color, coverage);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
    }

    /// Read back a pixel as premultiplied `[b, g, r, a]`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) as usize * 4;
        self.buffer
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Source-over blend of `color` scaled by `coverage`
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize * 4;
        let Some(dst) = self.buffer.get_mut(idx..idx + 4) else {
            return;
        };
        let src = color.to_argb8888(coverage);
        let inv = 255 - src[3];
        for i in 0..4 {
            dst[i] = src[i].saturating_add(mul_div255(dst[i], inv));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(size: u32) -> Vec<u8> {
        vec![0; (size * size * 4) as usize]
    }

    #[test]
    fn pixel_outside_canvas_is_none() {
        let mut buf = buffer(4);
        let canvas = Canvas::new(&mut buf, 4, 4);
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.pixel(0, 4), None);
    }

    #[test]
    fn circle_fills_center_and_leaves_corners() {
        let mut buf = buffer(20);
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        let red = Color::rgb(255, 0, 0);
        canvas.fill_circle(Rect::square(20), red);
        assert_eq!(canvas.pixel(10, 10), Some(red.to_argb8888(255)));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(19, 19), Some([0, 0, 0, 0]));
        // edge midpoints lie on the circle
        assert_eq!(canvas.pixel(10, 0).map(|p| p[3] > 0), Some(true));
        assert_eq!(canvas.pixel(0, 10).map(|p| p[3] > 0), Some(true));
    }

    #[test]
    fn circle_in_empty_rect_draws_nothing() {
        let mut buf = buffer(4);
        let mut canvas = Canvas::new(&mut buf, 4, 4);
        canvas.fill_circle(Rect::new(0, 0, 0, 4), Color::WHITE);
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn blending_over_opaque_stays_opaque() {
        let mut buf = buffer(2);
        let mut canvas = Canvas::new(&mut buf, 2, 2);
        canvas.clear(Color::BLACK);
        canvas.blend_pixel(0, 0, Color::WHITE, 128);
        let px = canvas.pixel(0, 0).unwrap();
        assert_eq!(px[3], 255);
        assert!(px[0] > 100 && px[0] < 160);
    }

    #[test]
    fn clear_sets_every_pixel() {
        let mut buf = buffer(3);
        let mut canvas = Canvas::new(&mut buf, 3, 3);
        canvas.clear(Color::LIGHT_GRAY);
        assert!(buf.chunks_exact(4).all(|p| p == [170, 170, 170, 255]));
    }

    #[test]
    fn rect_center() {
        assert_eq!(Rect::new(10, 20, 4, 6).center(), (12.0, 23.0));
    }
}
