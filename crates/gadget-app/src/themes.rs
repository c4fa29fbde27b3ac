//! Locating and loading the face theme.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gadget_theme::Theme;

/// Theme group the gadget renders.
pub const THEME_GROUP: &str = "clock/main";

const THEME_FILE: &str = "default.gtheme";

/// Places searched, in order, when no theme is given on the command line.
///
/// Working-directory paths first (source tree and build tree), then the
/// install prefix next to the executable, then the themes shipped with
/// this crate.
pub fn search_paths(exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("data").join(THEME_FILE),
        PathBuf::from("build/data").join(THEME_FILE),
        PathBuf::from("../data").join(THEME_FILE),
    ];
    if let Some(dir) = exe_dir {
        paths.push(dir.join("../share/clock-gadget/themes").join(THEME_FILE));
    }
    paths.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("themes").join(THEME_FILE));
    paths
}

/// An explicit path is used as-is; otherwise the first existing search path.
pub fn locate(
    explicit: Option<&Path>,
    exe_dir: Option<&Path>,
    exists: impl Fn(&Path) -> bool,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        anyhow::ensure!(exists(path), "theme file {} does not exist", path.display());
        return Ok(path.to_path_buf());
    }

    let candidates = search_paths(exe_dir);
    for path in &candidates {
        log::debug!("looking for theme at {}", path.display());
        if exists(path) {
            return Ok(path.clone());
        }
    }

    let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    anyhow::bail!("could not find {THEME_FILE} (tried {})", tried.join(", "))
}

/// A parsed theme and the file it came from.
#[derive(Debug)]
pub struct LoadedTheme {
    pub theme: Theme,
    pub path: PathBuf,
}

impl LoadedTheme {
    /// Directory relative theme resources (fonts) are resolved against.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

pub fn load(explicit: Option<&Path>) -> Result<LoadedTheme> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let path = locate(explicit, exe_dir.as_deref(), Path::is_file)?;
    log::info!("using theme {}", path.display());

    let src = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read theme {}", path.display()))?;
    let theme = Theme::parse(&src, THEME_GROUP)
        .with_context(|| format!("failed to load theme {}", path.display()))?;

    Ok(LoadedTheme { theme, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_order_puts_working_dir_first() {
        let paths = search_paths(Some(Path::new("/opt/clock/bin")));
        assert_eq!(paths[0], Path::new("data/default.gtheme"));
        assert_eq!(paths[1], Path::new("build/data/default.gtheme"));
        assert_eq!(paths[2], Path::new("../data/default.gtheme"));
        assert_eq!(
            paths[3],
            Path::new("/opt/clock/bin/../share/clock-gadget/themes/default.gtheme")
        );
        assert!(paths[4].ends_with("themes/default.gtheme"));
        assert_eq!(paths.len(), 5);
    }

    #[test]
    fn first_existing_candidate_wins() {
        let found = locate(None, None, |p| p.starts_with("../data")).unwrap();
        assert_eq!(found, Path::new("../data/default.gtheme"));
    }

    #[test]
    fn explicit_path_bypasses_search() {
        let found = locate(Some(Path::new("/x/mine.gtheme")), None, |_| true).unwrap();
        assert_eq!(found, Path::new("/x/mine.gtheme"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(locate(Some(Path::new("/x/mine.gtheme")), None, |_| false).is_err());
    }

    #[test]
    fn nothing_found_is_an_error() {
        let err = locate(None, None, |_| false).unwrap_err();
        assert!(err.to_string().contains("default.gtheme"));
    }

    #[test]
    fn bundled_theme_parses() {
        let src = include_str!("../themes/default.gtheme");
        let theme = Theme::parse(src, THEME_GROUP).unwrap();
        for part in ["time_text", "date_text", "utc_indicator_text"] {
            assert!(theme.part(part).is_some(), "{part}");
        }
        assert_eq!(theme.region_at(290.0, 5.0).unwrap().signal, "close,clicked");
    }
}
