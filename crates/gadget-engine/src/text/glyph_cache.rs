use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;

use super::FontSystem;

/// Coverage bitmap of one rasterized glyph.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// Rasterized glyphs keyed by font, glyph index and pixel size.
///
/// The clock redraws the same few digits every tick, so each glyph is
/// rasterized once and reused for the lifetime of the cache.
#[derive(Default)]
pub struct GlyphCache {
    glyphs: HashMap<GlyphRasterConfig, GlyphBitmap>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the cached bitmap for `key`, rasterizing it on first use.
    /// `None` when the font is unknown.
    pub(crate) fn get_or_rasterize(
        &mut self,
        fonts: &FontSystem,
        font: super::FontId,
        key: GlyphRasterConfig,
    ) -> Option<&GlyphBitmap> {
        if !self.glyphs.contains_key(&key) {
            let face = fonts.get(font)?;
            let (metrics, coverage) = face.rasterize_config(key);
            self.glyphs.insert(
                key,
                GlyphBitmap { width: metrics.width, height: metrics.height, coverage },
            );
        }
        self.glyphs.get(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontId;

    #[test]
    fn unknown_font_rasterizes_nothing() {
        let mut cache = GlyphCache::new();
        let key = GlyphRasterConfig { glyph_index: 1, px: 12.0, font_hash: 0 };
        assert!(cache.get_or_rasterize(&FontSystem::new(), FontId(0), key).is_none());
        assert!(cache.is_empty());
    }
}
