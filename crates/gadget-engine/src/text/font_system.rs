use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Width and height of laid-out text, in the pixel size it was laid out at.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Positioned glyph produced by [`FontSystem::layout`].
#[derive(Debug, Copy, Clone)]
pub(crate) struct PlacedGlyph {
    pub key: fontdue::layout::GlyphRasterConfig,
    pub x: f32,
    pub y: f32,
}

/// Owns the loaded fonts. Fonts are immutable once loaded.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses a TrueType/OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        if bytes.is_empty() {
            return Err(FontLoadError("empty font data".to_string()));
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Single-line layout at `px` pixels, origin at the top-left of the line.
    pub(crate) fn layout(&self, text: &str, id: FontId, px: f32) -> Vec<PlacedGlyph> {
        let Some(font) = self.get(id) else {
            return Vec::new();
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize())
            .map(|g| PlacedGlyph { key: g.key, x: g.x, y: g.y })
            .collect()
    }

    /// Advance width and line height of `text` at `px` pixels.
    #[must_use]
    pub fn measure(&self, text: &str, id: FontId, px: f32) -> TextExtent {
        let Some(font) = self.get(id) else {
            return TextExtent { width: 0.0, height: px * 1.2 };
        };

        let width = text
            .chars()
            .map(|c| font.metrics(c, px).advance_width)
            .sum::<f32>();
        let height = font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2);

        TextExtent { width, height }
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_do_not_load() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(b"definitely not a font").is_err());
        assert!(fonts.load_font(&[]).is_err());
    }

    #[test]
    fn unknown_font_measures_to_zero_width() {
        let fonts = FontSystem::new();
        let extent = fonts.measure("12:00", FontId(3), 10.0);
        assert_eq!(extent.width, 0.0);
        assert!(fonts.layout("12:00", FontId(3), 10.0).is_empty());
    }
}
