//! Application state and the signal dispatch table.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use gadget_clock::{
    date_visibility_signal, ClockDisplay, DisplaySink, DragOutcome, DragTracker, Gesture, Placement, Point,
    Preferences, SettingsStore,
};

use crate::face::Face;

pub const SIGNAL_CLOSE: &str = "close,clicked";
pub const SIGNAL_DATE_CLICKED: &str = "date,clicked";
pub const SIGNAL_MODE_CLICKED: &str = "mode,clicked";
pub const SIGNAL_MODE_CYCLE: &str = "clock,mode,cycle";

/// One reading of both clocks: the wall clock for text, the monotonic one
/// for the recompute timer.
#[derive(Debug, Copy, Clone)]
pub struct Now {
    pub wall: DateTime<Utc>,
    pub instant: Instant,
}

impl Now {
    pub fn capture() -> Self {
        Self { wall: Utc::now(), instant: Instant::now() }
    }
}

// ── GadgetState ───────────────────────────────────────────────────────────

/// Everything the gadget knows, handed by `&mut` to each handler.
pub struct GadgetState {
    display: ClockDisplay,
    prefs: Preferences,
    store: SettingsStore,
    drag: DragTracker,
    face: Face,
    quit: bool,
    shut_down: bool,
}

impl GadgetState {
    pub fn new(display: ClockDisplay, prefs: Preferences, store: SettingsStore, face: Face) -> Self {
        Self {
            display,
            prefs,
            store,
            drag: DragTracker::new(),
            face,
            quit: false,
            shut_down: false,
        }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn face(&self) -> &Face {
        &self.face
    }

    pub fn face_mut(&mut self) -> &mut Face {
        &mut self.face
    }

    /// Applies the stored date visibility, fills the face and arms the timer.
    pub fn start(&mut self, now: Now) {
        self.face.emit_signal(date_visibility_signal(self.prefs.show_date));
        self.refresh(now);
        self.display.reschedule(now.wall, now.instant);
    }

    pub fn refresh(&mut self, now: Now) {
        self.display.refresh(now.wall, &mut self.face);
    }

    /// Refreshes when the recompute timer expired. Returns whether it did.
    pub fn tick(&mut self, now: Now) -> bool {
        if !self.display.due(now.instant) {
            return false;
        }
        self.refresh(now);
        true
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.display.deadline()
    }

    pub fn toggle_date(&mut self, _now: Now) {
        if self.drag.suppress_click() {
            return;
        }
        self.prefs.show_date = !self.prefs.show_date;
        log::debug!("date {}", if self.prefs.show_date { "shown" } else { "hidden" });
        self.face.emit_signal(date_visibility_signal(self.prefs.show_date));
        self.store.save_or_log(&self.prefs);
    }

    pub fn cycle_mode(&mut self, now: Now) {
        if self.drag.suppress_click() {
            return;
        }
        let mode = self.display.cycle_mode(now.wall, now.instant);
        log::debug!("clock mode is now {mode:?}");
        self.prefs.clock_mode = mode;
        self.refresh(now);
        self.store.save_or_log(&self.prefs);
    }

    pub fn request_close(&mut self, _now: Now) {
        log::info!("close requested");
        self.quit = true;
    }

    pub fn wants_quit(&self) -> bool {
        self.quit
    }

    /// Runs the handler of the region under a logical window position.
    /// Nothing is dispatched when the pointer was not over the window.
    pub fn click(&mut self, table: &SignalTable, at: Option<(f32, f32)>, now: Now) -> bool {
        let Some((x, y)) = at else {
            log::debug!("released outside the window, ignoring click");
            return false;
        };
        match self.face.signal_at(x, y).map(str::to_owned) {
            Some(signal) => table.dispatch(&signal, self, now),
            None => {
                log::debug!("clicked at {}", now.wall.with_timezone(&Local).format("%H:%M:%S"));
                false
            }
        }
    }

    /// Feeds a pointer gesture to the drag tracker and keeps the stored
    /// position in step with the window. The position is saved when the
    /// drag ends.
    pub fn handle_gesture(&mut self, gesture: Gesture, placement: Option<Placement>) -> DragOutcome {
        let outcome = self.drag.handle(gesture, placement);
        match outcome {
            DragOutcome::DragStarted(origin) | DragOutcome::MoveWindow(origin) => {
                self.prefs.position = origin;
            }
            DragOutcome::DragEnded => {
                log::debug!("window moved to {:?}", self.prefs.position);
                self.store.save_or_log(&self.prefs);
            }
            DragOutcome::Nothing | DragOutcome::Click => {}
        }
        outcome
    }

    /// Clamps the restored position once the window's real size is known.
    /// Returns the corrected origin if it had to move; it is saved at once.
    pub fn clamp_startup(&mut self, placement: Placement) -> Option<Point> {
        let clamped = placement.clamp(self.prefs.position);
        if clamped == self.prefs.position {
            return None;
        }
        log::info!("stored position {:?} is off screen, moving to {clamped:?}", self.prefs.position);
        self.prefs.position = clamped;
        self.store.save_or_log(&self.prefs);
        Some(clamped)
    }

    /// Stops the timer and flushes preferences. Runs once.
    pub fn shutdown(&mut self) {
        if std::mem::replace(&mut self.shut_down, true) {
            return;
        }
        self.display.cancel();
        self.store.save_or_log(&self.prefs);
    }
}

// ── SignalTable ───────────────────────────────────────────────────────────

pub type SignalHandler = fn(&mut GadgetState, Now);

/// Maps signal names emitted by theme regions to state handlers.
pub struct SignalTable {
    handlers: HashMap<&'static str, SignalHandler>,
}

impl SignalTable {
    pub fn empty() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Close, date toggle and both mode-cycle signals.
    pub fn standard() -> Self {
        Self::empty()
            .on(SIGNAL_CLOSE, GadgetState::request_close)
            .on(SIGNAL_DATE_CLICKED, GadgetState::toggle_date)
            .on(SIGNAL_MODE_CLICKED, GadgetState::cycle_mode)
            .on(SIGNAL_MODE_CYCLE, GadgetState::cycle_mode)
    }

    pub fn on(mut self, signal: &'static str, handler: SignalHandler) -> Self {
        self.handlers.insert(signal, handler);
        self
    }

    /// Runs the handler for `signal`. Returns `false` when there is none.
    pub fn dispatch(&self, signal: &str, state: &mut GadgetState, now: Now) -> bool {
        match self.handlers.get(signal) {
            Some(handler) => {
                handler(state, now);
                true
            }
            None => {
                log::debug!("no handler for signal {signal:?}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadget_clock::{ClockMode, Loaded, ScreenArea, Size};
    use gadget_theme::Theme;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const THEME: &str = r#"
        Theme "clock/main" {
            Part "time_text"          { x: 10 y: 10 size: 30 }
            Part "date_text"          { x: 10 y: 60 size: 12 }
            Part "utc_indicator_text" { x: 290 y: 100 size: 10 align: end }
            Region "clock" { x: 0 y: 0 width: 300 height: 50 signal: "clock,mode,cycle" }
            Program { on: "date,hide" target: date_text action: hide }
            Program { on: "date,show" target: date_text action: show }
        }
    "#;

    struct Fixture {
        state: GadgetState,
        store: SettingsStore,
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            if let Some(dir) = self.store.path().parent() {
                let _ = std::fs::remove_dir_all(dir);
            }
        }
    }

    fn fixture(prefs: Preferences) -> Fixture {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir()
            .join(format!("clock-gadget-state-{}-{n}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let store = SettingsStore::new(dir.join("settings.json"));

        let face = Face::new(Theme::parse(THEME, "clock/main").unwrap());
        let display = ClockDisplay::new(prefs.clock_mode, false);
        let state = GadgetState::new(display, prefs, store.clone(), face);
        Fixture { state, store }
    }

    fn stored(store: &SettingsStore) -> Preferences {
        match store.read().unwrap() {
            Loaded::Found { prefs, .. } => prefs,
            Loaded::Missing => panic!("nothing saved"),
        }
    }

    fn drag(state: &mut GadgetState, dx: i32) {
        state.handle_gesture(
            Gesture::Press { pointer: Point::new(10, 10), window_origin: Point::new(100, 100) },
            None,
        );
        state.handle_gesture(Gesture::Move { pointer: Point::new(10 + dx, 10), primary_held: true }, None);
    }

    #[test]
    fn start_fills_face_and_arms_timer() {
        let mut f = fixture(Preferences { show_date: false, clock_mode: ClockMode::Utc, ..Default::default() });
        let now = Now::capture();
        f.state.start(now);
        assert_eq!(f.state.face().text("utc_indicator_text"), Some("UTC"));
        assert!(!f.state.face().is_visible("date_text"));
        assert!(f.state.deadline().is_some());
    }

    #[test]
    fn date_toggle_hides_and_saves() {
        let mut f = fixture(Preferences::default());
        let table = SignalTable::standard();
        f.state.start(Now::capture());

        assert!(table.dispatch(SIGNAL_DATE_CLICKED, &mut f.state, Now::capture()));
        assert!(!f.state.prefs().show_date);
        assert!(!f.state.face().is_visible("date_text"));
        assert!(!stored(&f.store).show_date);
    }

    #[test]
    fn both_mode_signals_cycle_and_save() {
        let mut f = fixture(Preferences::default());
        let table = SignalTable::standard();
        f.state.start(Now::capture());

        table.dispatch(SIGNAL_MODE_CYCLE, &mut f.state, Now::capture());
        assert_eq!(f.state.prefs().clock_mode, ClockMode::Utc);
        table.dispatch(SIGNAL_MODE_CLICKED, &mut f.state, Now::capture());
        assert_eq!(f.state.prefs().clock_mode, ClockMode::SwatchInternetTime);
        assert_eq!(f.state.face().text("utc_indicator_text"), Some("Internet Time"));
        assert_eq!(stored(&f.store).clock_mode, ClockMode::SwatchInternetTime);
    }

    #[test]
    fn taps_after_a_drag_are_swallowed() {
        let mut f = fixture(Preferences::default());
        f.state.start(Now::capture());
        drag(&mut f.state, 30);
        assert_eq!(f.state.handle_gesture(Gesture::Release, None), DragOutcome::DragEnded);

        f.state.toggle_date(Now::capture());
        f.state.cycle_mode(Now::capture());
        assert!(f.state.prefs().show_date);
        assert_eq!(f.state.prefs().clock_mode, ClockMode::Local);
    }

    #[test]
    fn drag_end_saves_window_position() {
        let mut f = fixture(Preferences::default());
        drag(&mut f.state, 30);
        assert_eq!(f.state.prefs().position, Point::new(130, 100));
        assert_eq!(f.store.read().unwrap(), Loaded::Missing);

        f.state.handle_gesture(Gesture::Release, None);
        assert_eq!(stored(&f.store).position, Point::new(130, 100));
    }

    #[test]
    fn unknown_signal_is_not_handled() {
        let mut f = fixture(Preferences::default());
        assert!(!SignalTable::standard().dispatch("bogus", &mut f.state, Now::capture()));
        assert!(!SignalTable::empty().dispatch(SIGNAL_CLOSE, &mut f.state, Now::capture()));
        assert!(!f.state.wants_quit());
    }

    #[test]
    fn click_dispatches_the_region_under_the_pointer() {
        let mut f = fixture(Preferences::default());
        let table = SignalTable::standard();
        f.state.start(Now::capture());

        assert!(f.state.click(&table, Some((5.0, 5.0)), Now::capture()));
        assert_eq!(f.state.prefs().clock_mode, ClockMode::Utc);
        assert!(!f.state.click(&table, Some((5.0, 90.0)), Now::capture()));
        assert_eq!(f.state.prefs().clock_mode, ClockMode::Utc);
    }

    #[test]
    fn release_outside_the_window_does_not_click() {
        let mut f = fixture(Preferences::default());
        let table = SignalTable::standard();
        f.state.start(Now::capture());

        f.state.handle_gesture(
            Gesture::Press { pointer: Point::new(1, 1), window_origin: Point::new(100, 100) },
            None,
        );
        assert_eq!(f.state.handle_gesture(Gesture::Release, None), DragOutcome::Click);
        assert!(!f.state.click(&table, None, Now::capture()));
        assert_eq!(f.state.prefs().clock_mode, ClockMode::Local);
    }

    #[test]
    fn focus_loss_mid_drag_saves_and_stops_moving() {
        let mut f = fixture(Preferences::default());
        drag(&mut f.state, 30);
        assert_eq!(f.state.handle_gesture(Gesture::Cancel, None), DragOutcome::DragEnded);
        assert_eq!(stored(&f.store).position, Point::new(130, 100));

        let hover = Gesture::Move { pointer: Point::new(400, 400), primary_held: true };
        assert_eq!(f.state.handle_gesture(hover, None), DragOutcome::Nothing);
        assert_eq!(f.state.prefs().position, Point::new(130, 100));
    }

    #[test]
    fn close_signal_requests_quit() {
        let mut f = fixture(Preferences::default());
        SignalTable::standard().dispatch(SIGNAL_CLOSE, &mut f.state, Now::capture());
        assert!(f.state.wants_quit());
    }

    #[test]
    fn off_screen_position_is_clamped_and_saved() {
        let prefs = Preferences { position: Point::new(-150, 0), ..Default::default() };
        let mut f = fixture(prefs);
        let placement = Placement { window: Size::new(300, 120), screen: ScreenArea::new(0, 0, 1920, 1080) };

        assert_eq!(f.state.clamp_startup(placement), Some(Point::new(-90, 0)));
        assert_eq!(stored(&f.store).position, Point::new(-90, 0));
        assert_eq!(f.state.clamp_startup(placement), None);
    }

    #[test]
    fn tick_refreshes_only_when_due() {
        let mut f = fixture(Preferences::default());
        let now = Now::capture();
        f.state.start(now);
        assert!(!f.state.tick(now));
        let later = Now { wall: now.wall, instant: now.instant + Duration::from_secs(61) };
        assert!(f.state.tick(later));
    }

    #[test]
    fn shutdown_cancels_timer_and_saves_once() {
        let mut f = fixture(Preferences::default());
        f.state.start(Now::capture());
        f.state.shutdown();
        assert_eq!(f.state.deadline(), None);
        assert_eq!(stored(&f.store), Preferences::default());

        std::fs::remove_file(f.store.path()).unwrap();
        f.state.shutdown();
        assert_eq!(f.store.read().unwrap(), Loaded::Missing);
    }
}
