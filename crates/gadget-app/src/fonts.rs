//! Finding the face font on disk.

use std::path::{Path, PathBuf};

use anyhow::Result;
use gadget_engine::text::{FontId, FontSystem};

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/noto",
    "/usr/share/fonts/truetype/noto",
];

const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Paths tried for the theme's `font`, then the usual system sans fonts.
///
/// A relative font name is looked up next to the theme first, then in the
/// system font directories.
pub fn candidates(theme_font: Option<&str>, theme_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(name) = theme_font {
        let name = Path::new(name);
        if name.is_absolute() {
            paths.push(name.to_path_buf());
        } else {
            if let Some(dir) = theme_dir {
                paths.push(dir.join(name));
            }
            paths.extend(FONT_DIRS.iter().map(|dir| Path::new(dir).join(name)));
        }
    }

    for fallback in FALLBACK_FONTS {
        let path = PathBuf::from(fallback);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Loads the first candidate that reads and parses.
pub fn load(fonts: &mut FontSystem, theme_font: Option<&str>, theme_dir: Option<&Path>) -> Result<FontId> {
    let paths = candidates(theme_font, theme_dir);
    for path in &paths {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match fonts.load_font(&bytes) {
            Ok(id) => {
                log::info!("using font {}", path.display());
                return Ok(id);
            }
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }

    let requested = theme_font.unwrap_or("a sans font");
    anyhow::bail!("could not load {requested} (tried {} paths)", paths.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_dir_is_searched_before_system_dirs() {
        let paths = candidates(Some("Face.ttf"), Some(Path::new("/themes")));
        assert_eq!(paths[0], Path::new("/themes/Face.ttf"));
        assert_eq!(paths[1], Path::new("/usr/share/fonts/TTF/Face.ttf"));
        assert_eq!(paths.last().unwrap(), Path::new(FALLBACK_FONTS[4]));
    }

    #[test]
    fn absolute_font_is_tried_alone_before_fallbacks() {
        let paths = candidates(Some("/opt/fonts/Mono.ttf"), Some(Path::new("/themes")));
        assert_eq!(paths[0], Path::new("/opt/fonts/Mono.ttf"));
        assert_eq!(paths.len(), 1 + FALLBACK_FONTS.len());
    }

    #[test]
    fn fallbacks_are_not_repeated() {
        let paths = candidates(Some("DejaVuSans.ttf"), None);
        let dejavu = Path::new("/usr/share/fonts/TTF/DejaVuSans.ttf");
        assert_eq!(paths.iter().filter(|p| p.as_path() == dejavu).count(), 1);
    }

    #[test]
    fn without_theme_font_only_fallbacks_remain() {
        assert_eq!(candidates(None, None).len(), FALLBACK_FONTS.len());
    }

    #[test]
    fn unreadable_fonts_are_an_error() {
        let mut fonts = FontSystem::new();
        let dir = std::env::temp_dir().join(format!("clock-gadget-fonts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Broken.ttf"), b"not a font").unwrap();

        // Fallback system fonts may exist on the host, so only check that a
        // broken theme font is skipped rather than returned.
        if let Ok(id) = load(&mut fonts, Some("Broken.ttf"), Some(&dir)) {
            let extent = fonts.measure("1", id, 10.0);
            assert!(extent.width > 0.0);
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
