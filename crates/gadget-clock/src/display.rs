//! Clock display engine.
//!
//! Turns a timestamp and a [`ClockMode`] into the three texts the face shows,
//! and decides when they have to be recomputed.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Timelike, Utc};

use crate::mode::ClockMode;
use crate::schedule::{RecomputeScheduler, TickPlan};
use crate::sink::{DisplaySink, DATE_TEXT, INDICATOR_TEXT, TIME_TEXT};

const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Seconds per Swatch beat (86400 / 1000).
const SECONDS_PER_BEAT: f64 = 86.4;

/// Everything the face needs for one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockText {
    pub time: String,
    pub date: String,
    pub indicator: &'static str,
}

/// Formats `now` for `mode`.
///
/// Internet Time ignores `show_seconds` and always dates itself with the
/// local calendar day.
pub fn format(now: DateTime<Utc>, mode: ClockMode, show_seconds: bool) -> ClockText {
    let time_format = if show_seconds { TIME_FORMAT_SECONDS } else { TIME_FORMAT };

    match mode {
        ClockMode::Local => {
            let local = now.with_timezone(&Local);
            ClockText {
                time: local.format(time_format).to_string(),
                date: local.format(DATE_FORMAT).to_string(),
                indicator: mode.indicator(),
            }
        }
        ClockMode::Utc => ClockText {
            time: now.format(time_format).to_string(),
            date: now.format(DATE_FORMAT).to_string(),
            indicator: mode.indicator(),
        },
        ClockMode::SwatchInternetTime => ClockText {
            time: format_beats(swatch_beats(&now)),
            date: now.with_timezone(&Local).format(DATE_FORMAT).to_string(),
            indicator: mode.indicator(),
        },
    }
}

/// Swatch Internet Time in beats, `[0, 1000)`.
///
/// Biel Mean Time is UTC+1 without daylight saving; the hour wraps at 24.
pub fn swatch_beats<T: Timelike>(utc: &T) -> f64 {
    let bmt_hour = (utc.hour() + 1) % 24;
    let seconds = bmt_hour * 3600 + utc.minute() * 60 + utc.second();
    seconds as f64 / SECONDS_PER_BEAT
}

/// `@BBB.FF`, zero padded.
pub fn format_beats(beats: f64) -> String {
    format!("@{beats:06.2}")
}

/// Delay until the display has to be recomputed.
///
/// Every second when seconds are shown or in Internet Time, otherwise the
/// time left until the next minute boundary.
pub fn next_tick_interval<T: Timelike>(now: &T, show_seconds: bool, mode: ClockMode) -> Duration {
    if show_seconds || mode.ticks_every_second() {
        Duration::from_secs(1)
    } else {
        Duration::from_secs(60 - u64::from(now.second().min(59)))
    }
}

/// Full recompute plan: the first delay plus the steady cadence after it.
pub fn tick_plan<T: Timelike>(now: &T, show_seconds: bool, mode: ClockMode) -> TickPlan {
    if show_seconds || mode.ticks_every_second() {
        TickPlan::every_second()
    } else {
        TickPlan::minute_aligned(next_tick_interval(now, show_seconds, mode))
    }
}

// ── ClockDisplay ──────────────────────────────────────────────────────────

/// The running display: active mode, seconds setting and the recompute timer.
///
/// Mode and seconds changes reschedule immediately.
#[derive(Debug)]
pub struct ClockDisplay {
    mode: ClockMode,
    show_seconds: bool,
    scheduler: RecomputeScheduler,
}

impl ClockDisplay {
    pub fn new(mode: ClockMode, show_seconds: bool) -> Self {
        Self { mode, show_seconds, scheduler: RecomputeScheduler::new() }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn show_seconds(&self) -> bool {
        self.show_seconds
    }

    /// Formats `wall` and pushes the three texts into `sink`.
    pub fn refresh(&self, wall: DateTime<Utc>, sink: &mut dyn DisplaySink) -> ClockText {
        let text = format(wall, self.mode, self.show_seconds);
        sink.set_text(TIME_TEXT, &text.time);
        sink.set_text(DATE_TEXT, &text.date);
        sink.set_text(INDICATOR_TEXT, text.indicator);
        text
    }

    /// Arms the recompute timer for the current settings.
    pub fn reschedule(&mut self, wall: DateTime<Utc>, now: Instant) {
        let plan = tick_plan(&wall, self.show_seconds, self.mode);
        log::debug!("recompute in {:?}, then every {:?}", plan.first, plan.every);
        self.scheduler.reschedule(now, plan);
    }

    pub fn set_mode(&mut self, mode: ClockMode, wall: DateTime<Utc>, now: Instant) {
        self.mode = mode;
        self.reschedule(wall, now);
    }

    /// Advances to the next mode and returns it.
    pub fn cycle_mode(&mut self, wall: DateTime<Utc>, now: Instant) -> ClockMode {
        self.set_mode(self.mode.next(), wall, now);
        self.mode
    }

    pub fn set_show_seconds(&mut self, show_seconds: bool, wall: DateTime<Utc>, now: Instant) {
        self.show_seconds = show_seconds;
        self.reschedule(wall, now);
    }

    /// `true` when the timer expired; the caller then refreshes.
    pub fn due(&mut self, now: Instant) -> bool {
        self.scheduler.fire_if_due(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    pub fn cancel(&mut self) {
        self.scheduler.cancel();
    }
}
