//! Clock gadget core: what the face shows, when it changes, how the pointer
//! moves the window and what survives a restart.
//!
//! Nothing here touches a window or the GPU. The presentation side is
//! reached only through [`DisplaySink`].

pub mod display;
pub mod drag;
pub mod geometry;
pub mod mode;
pub mod prefs;
pub mod schedule;
pub mod sink;

pub use display::{format, next_tick_interval, swatch_beats, ClockDisplay, ClockText};
pub use drag::{DragOutcome, DragTracker, Gesture, DRAG_THRESHOLD};
pub use geometry::{clamp_position, Placement, Point, ScreenArea, Size};
pub use mode::{toggle_mode, ClockMode};
pub use prefs::{Loaded, Preferences, SettingsError, SettingsStore};
pub use schedule::{RecomputeScheduler, TickPlan};
pub use sink::{date_visibility_signal, DisplaySink};
