//! Font loading, measurement and glyph rasterization (fontdue).

mod font_system;
mod glyph_cache;

pub use font_system::{FontId, FontLoadError, FontSystem, TextExtent};
pub use glyph_cache::{GlyphBitmap, GlyphCache};
