//! The clock face: a theme plus the live text and visibility of its parts.

use std::collections::HashMap;

use gadget_clock::DisplaySink;
use gadget_engine::paint::Color;
use gadget_engine::render::{Canvas, TextAnchor};
use gadget_engine::text::{FontId, FontSystem, GlyphCache};
use gadget_theme::{Action, Align, Theme};

/// Presentation state fed by the clock core.
///
/// Texts start from each part's static `text`; visibility starts from the
/// part's `visible` flag and is changed only by theme programs.
pub struct Face {
    theme: Theme,
    texts: HashMap<String, String>,
    visible: HashMap<String, bool>,
    dirty: bool,
}

impl Face {
    pub fn new(theme: Theme) -> Self {
        let texts = theme.parts.iter().map(|p| (p.name.clone(), p.text.clone())).collect();
        let visible = theme.parts.iter().map(|p| (p.name.clone(), p.visible)).collect();
        Self { theme, texts, visible, dirty: true }
    }

    /// Logical minimum size hint from the theme.
    pub fn min_size(&self) -> (f32, f32) {
        (self.theme.min_width, self.theme.min_height)
    }

    pub fn text(&self, part: &str) -> Option<&str> {
        self.texts.get(part).map(String::as_str)
    }

    pub fn is_visible(&self, part: &str) -> bool {
        self.visible.get(part).copied().unwrap_or(false)
    }

    /// Returns whether anything changed since the last call, and resets it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Signal of the region under a logical window position.
    pub fn signal_at(&self, x: f32, y: f32) -> Option<&str> {
        self.theme.region_at(x, y).map(|r| r.signal.as_str())
    }

    /// Paints the background and every visible part. `scale` converts the
    /// theme's logical pixels to the canvas' physical ones.
    pub fn paint(
        &self,
        canvas: &mut Canvas,
        fonts: &FontSystem,
        glyphs: &mut GlyphCache,
        font: FontId,
        scale: f32,
    ) {
        canvas.clear();
        canvas.fill_rounded_rect(
            0.0,
            0.0,
            canvas.width() as f32,
            canvas.height() as f32,
            self.theme.corner_radius * scale,
            Color::from_srgb_u8(self.theme.background),
        );

        for part in &self.theme.parts {
            if !self.is_visible(&part.name) {
                continue;
            }
            let Some(text) = self.text(&part.name) else { continue };
            canvas.draw_text(
                fonts,
                glyphs,
                font,
                text,
                part.x * scale,
                part.y * scale,
                part.size * scale,
                anchor(part.align),
                Color::from_srgb_u8(part.color),
            );
        }
    }
}

fn anchor(align: Align) -> TextAnchor {
    match align {
        Align::Start => TextAnchor::Left,
        Align::Center => TextAnchor::Center,
        Align::End => TextAnchor::Right,
    }
}

impl DisplaySink for Face {
    fn set_text(&mut self, part: &str, text: &str) {
        match self.texts.get_mut(part) {
            Some(current) if current == text => {}
            Some(current) => {
                text.clone_into(current);
                self.dirty = true;
            }
            None => log::debug!("theme has no part {part:?}; dropping text"),
        }
    }

    fn emit_signal(&mut self, signal: &str) {
        for program in self.theme.programs_for(signal) {
            let show = program.action == Action::Show;
            if let Some(visible) = self.visible.get_mut(&program.target) {
                if *visible != show {
                    *visible = show;
                    self.dirty = true;
                }
            }
        }
    }
}
