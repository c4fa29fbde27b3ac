//! CPU-side face canvas: premultiplied RGBA8 pixels in physical resolution.
//!
//! The face is a handful of text lines over one rounded rectangle, so it is
//! composed here and uploaded as a single texture.

use crate::paint::Color;
use crate::text::{FontId, FontSystem, GlyphCache};

/// Horizontal anchor for [`Canvas::draw_text`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAnchor {
    #[default]
    Left,
    Center,
    Right,
}

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates (and clears) when the size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Raw bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if coverage <= 0.0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color.scaled(coverage).over(*px);
        }
    }

    /// Fills an anti-aliased rounded rectangle (physical pixels).
    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        if w <= 0.0 || h <= 0.0 || color.a <= 0.0 {
            return;
        }
        let (hx, hy) = (w * 0.5, h * 0.5);
        let (cx, cy) = (x + hx, y + hy);
        let r = radius.clamp(0.0, hx.min(hy));

        let x0 = x.floor().max(0.0) as i64;
        let y0 = y.floor().max(0.0) as i64;
        let x1 = ((x + w).ceil() as i64).min(self.width as i64);
        let y1 = ((y + h).ceil() as i64).min(self.height as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                let qx = (px as f32 + 0.5 - cx).abs() - (hx - r);
                let qy = (py as f32 + 0.5 - cy).abs() - (hy - r);
                let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
                let dist = outside + qx.max(qy).min(0.0) - r;
                self.blend(px, py, color, (0.5 - dist).clamp(0.0, 1.0));
            }
        }
    }

    /// Draws one line of text with its top edge at `y` and its anchor at `x`
    /// (physical pixels, `px` pixel size).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        fonts: &FontSystem,
        glyphs: &mut GlyphCache,
        font: FontId,
        text: &str,
        x: f32,
        y: f32,
        px: f32,
        anchor: TextAnchor,
        color: Color,
    ) {
        if text.is_empty() || px <= 0.0 {
            return;
        }

        let left = match anchor {
            TextAnchor::Left => x,
            TextAnchor::Center => x - fonts.measure(text, font, px).width * 0.5,
            TextAnchor::Right => x - fonts.measure(text, font, px).width,
        };

        for placed in fonts.layout(text, font, px) {
            let Some(bitmap) = glyphs.get_or_rasterize(fonts, font, placed.key) else {
                log::warn!("no font for {font:?}, skipping text");
                return;
            };
            let gx = (left + placed.x).round() as i64;
            let gy = (y + placed.y).round() as i64;

            for row in 0..bitmap.height {
                for col in 0..bitmap.width {
                    let cov = bitmap.coverage[row * bitmap.width + col];
                    if cov == 0 {
                        continue;
                    }
                    self.blend(gx + col as i64, gy + row as i64, color, cov as f32 / 255.0);
                }
            }
        }
    }
}
