//! Contract between the clock core and whatever presents it.
//!
//! The core only ever pushes: three named text values and two visibility
//! signals. It never reads presentation state back.

/// Part receiving the `HH:MM[:SS]` or `@BBB.FF` text.
pub const TIME_TEXT: &str = "time_text";
/// Part receiving the long-form date.
pub const DATE_TEXT: &str = "date_text";
/// Part receiving the mode indicator ("", "UTC", "Internet Time").
pub const INDICATOR_TEXT: &str = "utc_indicator_text";

pub const SIGNAL_DATE_SHOW: &str = "date,show";
pub const SIGNAL_DATE_HIDE: &str = "date,hide";

/// Presentation layer fed by the clock core.
pub trait DisplaySink {
    /// Replaces the text of a named part.
    fn set_text(&mut self, part: &str, text: &str);

    /// Emits a named signal (e.g. [`SIGNAL_DATE_SHOW`]).
    fn emit_signal(&mut self, signal: &str);
}

/// Signal matching a date visibility flag.
pub fn date_visibility_signal(show_date: bool) -> &'static str {
    if show_date { SIGNAL_DATE_SHOW } else { SIGNAL_DATE_HIDE }
}

/// A sink that records everything it receives. Used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub texts: std::collections::HashMap<String, String>,
    pub signals: Vec<String>,
}

#[cfg(test)]
impl DisplaySink for RecordingSink {
    fn set_text(&mut self, part: &str, text: &str) {
        self.texts.insert(part.to_string(), text.to_string());
    }

    fn emit_signal(&mut self, signal: &str) {
        self.signals.push(signal.to_string());
    }
}
