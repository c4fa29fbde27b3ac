//! Command-line arguments.

use std::path::PathBuf;

use argh::FromArgs;

#[derive(FromArgs, Debug, Clone, Default, PartialEq)]
/// A small desktop clock.
///
/// Click the time to switch between local time, UTC and Internet Time;
/// click the date to hide or show it; drag anywhere to move the clock.
pub struct Args {
    #[argh(switch)]
    /// print debug logging
    pub debug: bool,

    #[argh(switch)]
    /// open a normal bordered window instead of a desktop gadget
    pub normal: bool,

    #[argh(switch)]
    /// show seconds
    pub seconds: bool,

    #[argh(option)]
    /// theme file to load instead of searching the default locations
    pub theme: Option<PathBuf>,
}
