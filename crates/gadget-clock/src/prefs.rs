//! Persisted preferences: date visibility, clock mode and window position.
//!
//! Stored as `{"config": {...}}` JSON under the user's config directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::mode::ClockMode;

/// Current settings record version. Older records may carry `utc_mode`.
pub const SCHEMA_VERSION: u32 = 3;

const APP_DIR: &str = "clock-gadget";
const FILE_NAME: &str = "settings.json";

// ── Preferences ───────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Preferences {
    pub show_date: bool,
    pub clock_mode: ClockMode,
    pub position: Point,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { show_date: true, clock_mode: ClockMode::Local, position: Point::new(0, 0) }
    }
}

// ── On-disk record ────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    config: ConfigRecord,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigRecord {
    #[serde(default = "default_show_date")]
    show_date: bool,
    #[serde(default)]
    clock_mode: i64,
    #[serde(default)]
    win_x: i32,
    #[serde(default)]
    win_y: i32,
    #[serde(default)]
    version: u32,
    #[serde(default, skip_serializing)]
    utc_mode: Option<bool>,
}

fn default_show_date() -> bool {
    true
}

impl ConfigRecord {
    fn from_prefs(prefs: &Preferences) -> Self {
        Self {
            show_date: prefs.show_date,
            clock_mode: i64::from(prefs.clock_mode.index()),
            win_x: prefs.position.x,
            win_y: prefs.position.y,
            version: SCHEMA_VERSION,
            utc_mode: None,
        }
    }

    /// Decodes the record; the flag is `true` when it predates [`SCHEMA_VERSION`].
    fn into_prefs(self) -> (Preferences, bool) {
        let mut clock_mode = u8::try_from(self.clock_mode)
            .map(ClockMode::from_index)
            .unwrap_or_default();

        let outdated = self.version < SCHEMA_VERSION;
        if outdated && self.utc_mode == Some(true) {
            clock_mode = ClockMode::Utc;
        }

        let prefs = Preferences {
            show_date: self.show_date,
            clock_mode,
            position: Point::new(self.win_x, self.win_y),
        };
        (prefs, outdated)
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Format(serde_json::Error),
    /// Neither a config directory nor a home directory could be resolved.
    NoConfigDir,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            SettingsError::Format(e) => write!(f, "malformed settings: {e}"),
            SettingsError::NoConfigDir => write!(f, "no config directory for the current user"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Format(e) => Some(e),
            SettingsError::NoConfigDir => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Format(e)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SettingsError {
    let path = path.to_path_buf();
    move |source| SettingsError::Io { path, source }
}

// ── SettingsStore ─────────────────────────────────────────────────────────

/// Result of reading the settings file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Loaded {
    Missing,
    Found { prefs: Preferences, migrated: bool },
}

/// Reads and writes one settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/clock-gadget/settings.json`, falling back to
    /// `$HOME/.config` when the platform reports no config directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or(SettingsError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn at_default_path() -> Result<Self, SettingsError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Loaded, SettingsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Loaded::Missing),
            Err(source) => return Err(SettingsError::Io { path: self.path.clone(), source }),
        };

        let file: SettingsFile = serde_json::from_str(&contents)?;
        let (prefs, migrated) = file.config.into_prefs();
        Ok(Loaded::Found { prefs, migrated })
    }

    /// Loads the stored preferences. Missing or unreadable settings become
    /// defaults, and defaults or migrated records are written back at once.
    /// Write failures are logged and otherwise ignored.
    pub fn load_or_init(&self) -> Preferences {
        let (prefs, write_back) = match self.read() {
            Ok(Loaded::Found { prefs, migrated }) => {
                debug!("loaded settings from {}", self.path.display());
                if migrated {
                    info!("migrating settings to version {SCHEMA_VERSION}");
                }
                (prefs, migrated)
            }
            Ok(Loaded::Missing) => {
                info!("no settings at {}, using defaults", self.path.display());
                (Preferences::default(), true)
            }
            Err(e) => {
                warn!("ignoring unreadable settings: {e}");
                (Preferences::default(), true)
            }
        };

        if write_back {
            self.save_or_log(&prefs);
        }
        prefs
    }

    /// Overwrites the settings file with `prefs`.
    ///
    /// The parent directory is created as needed; the file is replaced by
    /// renaming a sibling temp file over it.
    pub fn save(&self, prefs: &Preferences) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let json = serde_json::to_string_pretty(&SettingsFile { config: ConfigRecord::from_prefs(prefs) })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;

        debug!("saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn save_or_log(&self, prefs: &Preferences) {
        if let Err(e) = self.save(prefs) {
            error!("could not save settings: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_store() -> SettingsStore {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir()
            .join(format!("clock-gadget-prefs-{}-{n}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        SettingsStore::new(dir.join("nested").join(FILE_NAME))
    }

    fn cleanup(store: &SettingsStore) {
        if let Some(dir) = store.path().parent().and_then(Path::parent) {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = scratch_store();
        let prefs = Preferences {
            show_date: false,
            clock_mode: ClockMode::SwatchInternetTime,
            position: Point::new(-40, 812),
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.read().unwrap(), Loaded::Found { prefs, migrated: false });
        cleanup(&store);
    }

    #[test]
    fn missing_file_writes_defaults() {
        let store = scratch_store();
        assert_eq!(store.read().unwrap(), Loaded::Missing);
        assert_eq!(store.load_or_init(), Preferences::default());
        assert!(store.path().exists());
        cleanup(&store);
    }

    #[test]
    fn corrupt_file_is_replaced_with_defaults() {
        let store = scratch_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.read(), Err(SettingsError::Format(_))));
        assert_eq!(store.load_or_init(), Preferences::default());
        assert!(matches!(store.read().unwrap(), Loaded::Found { migrated: false, .. }));
        cleanup(&store);
    }

    #[test]
    fn legacy_utc_flag_migrates_and_resaves() {
        let store = scratch_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"config":{"show_date":true,"utc_mode":true,"win_x":10,"win_y":20,"version":2}}"#,
        )
        .unwrap();

        let prefs = store.load_or_init();
        assert_eq!(prefs.clock_mode, ClockMode::Utc);
        assert_eq!(prefs.position, Point::new(10, 20));

        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert!(!on_disk.contains("utc_mode"));
        assert!(on_disk.contains(&format!("\"version\": {SCHEMA_VERSION}")));
        cleanup(&store);
    }

    #[test]
    fn current_records_ignore_stray_utc_flag() {
        let store = scratch_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"config":{"clock_mode":0,"utc_mode":true,"version":3}}"#,
        )
        .unwrap();
        let Loaded::Found { prefs, migrated } = store.read().unwrap() else {
            panic!("expected settings");
        };
        assert_eq!(prefs.clock_mode, ClockMode::Local);
        assert!(prefs.show_date);
        assert!(!migrated);
        cleanup(&store);
    }

    #[test]
    fn out_of_range_mode_decodes_as_local() {
        let store = scratch_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"config":{"clock_mode":-4,"version":3}}"#).unwrap();
        let Loaded::Found { prefs, .. } = store.read().unwrap() else {
            panic!("expected settings");
        };
        assert_eq!(prefs.clock_mode, ClockMode::Local);
        cleanup(&store);
    }
}
