use std::time::Instant;

use super::ctx::{FrameCtx, WindowCtx};
use crate::input::InputEvent;

/// Returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`Runtime`](crate::window::Runtime).
///
/// The runtime sleeps until input arrives or [`App::next_deadline`] passes;
/// frames are only drawn after [`WindowCtx::request_redraw`].
pub trait App {
    /// Once, after the window and its GPU surface exist.
    fn on_start(&mut self, window: &WindowCtx<'_>) -> AppControl {
        let _ = window;
        AppControl::Continue
    }

    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl;

    /// The window manager asked to close the window.
    fn on_close_requested(&mut self, window: &WindowCtx<'_>) -> AppControl {
        let _ = window;
        AppControl::Exit
    }

    /// Earliest instant the app wants [`App::on_wake`] to run.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    fn on_wake(&mut self, window: &WindowCtx<'_>, now: Instant) -> AppControl {
        let _ = (window, now);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Exactly once on every exit path, while the window still exists
    /// (`None` if it was never created).
    fn on_shutdown(&mut self, window: Option<&WindowCtx<'_>>);
}
