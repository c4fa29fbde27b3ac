/// Which clock the gadget shows.
///
/// Persisted as a small integer (see [`ClockMode::index`]); cycling wraps
/// back to `Local` after the last variant.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ClockMode {
    #[default]
    Local,
    Utc,
    SwatchInternetTime,
}

impl ClockMode {
    pub const ALL: [ClockMode; 3] = [ClockMode::Local, ClockMode::Utc, ClockMode::SwatchInternetTime];

    /// The mode after `self` in cycle order.
    pub fn next(self) -> Self {
        match self {
            ClockMode::Local => ClockMode::Utc,
            ClockMode::Utc => ClockMode::SwatchInternetTime,
            ClockMode::SwatchInternetTime => ClockMode::Local,
        }
    }

    /// Stored representation: 0, 1 or 2.
    pub fn index(self) -> u8 {
        match self {
            ClockMode::Local => 0,
            ClockMode::Utc => 1,
            ClockMode::SwatchInternetTime => 2,
        }
    }

    /// Decodes a stored value. Out-of-range values fall back to `Local`.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => ClockMode::Utc,
            2 => ClockMode::SwatchInternetTime,
            _ => ClockMode::Local,
        }
    }

    /// Text for the mode indicator part.
    pub fn indicator(self) -> &'static str {
        match self {
            ClockMode::Local => "",
            ClockMode::Utc => "UTC",
            ClockMode::SwatchInternetTime => "Internet Time",
        }
    }

    /// Whether the display must be recomputed every second regardless of
    /// the seconds setting.
    pub fn ticks_every_second(self) -> bool {
        matches!(self, ClockMode::SwatchInternetTime)
    }
}

/// Advances to the next mode: Local → UTC → Internet Time → Local.
pub fn toggle_mode(current: ClockMode) -> ClockMode {
    current.next()
}
