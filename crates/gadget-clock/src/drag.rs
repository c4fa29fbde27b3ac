//! Click-vs-drag disambiguation for one press/move/release cycle.

use crate::geometry::{Placement, Point};

/// Pointer travel, in pixels, after which a press becomes a drag.
pub const DRAG_THRESHOLD: i32 = 5;

const DRAG_THRESHOLD_SQ: i64 = (DRAG_THRESHOLD as i64) * (DRAG_THRESHOLD as i64);

/// Primary-button pointer input, in screen coordinates.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Gesture {
    Press { pointer: Point, window_origin: Point },
    Move { pointer: Point, primary_held: bool },
    Release,
    /// The press ended without a release reaching the window (focus lost).
    Cancel,
}

/// What the caller has to do after feeding a [`Gesture`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DragOutcome {
    Nothing,
    /// Threshold crossed: capture the pointer and move the window.
    DragStarted(Point),
    MoveWindow(Point),
    /// Release after a drag: drop the pointer capture. No click fires.
    DragEnded,
    /// Release without crossing the threshold.
    Click,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Phase {
    Idle,
    Dragging,
}

#[derive(Debug, Copy, Clone)]
struct Press {
    pointer: Point,
    window_origin: Point,
}

/// Idle/Dragging state machine scoped to one press-release cycle.
///
/// `suppress_click` latches once the threshold is crossed and is only
/// cleared by the next press, so tap handlers that run after the release
/// still see it.
#[derive(Debug, Clone)]
pub struct DragTracker {
    press: Option<Press>,
    phase: Phase,
    suppress_click: bool,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self { press: None, phase: Phase::Idle, suppress_click: false }
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress_click(&self) -> bool {
        self.suppress_click
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Single transition function. `placement`, when known, clamps the
    /// window origins produced while dragging.
    pub fn handle(&mut self, gesture: Gesture, placement: Option<Placement>) -> DragOutcome {
        match gesture {
            Gesture::Press { pointer, window_origin } => {
                self.press = Some(Press { pointer, window_origin });
                self.phase = Phase::Idle;
                self.suppress_click = false;
                DragOutcome::Nothing
            }

            Gesture::Move { pointer, primary_held } => {
                let Some(press) = self.press else {
                    return DragOutcome::Nothing;
                };
                if !primary_held {
                    return DragOutcome::Nothing;
                }

                let target = press.window_origin + (pointer - press.pointer);
                let target = match placement {
                    Some(p) => p.clamp(target),
                    None => target,
                };

                match self.phase {
                    Phase::Idle if pointer.distance_sq(press.pointer) > DRAG_THRESHOLD_SQ => {
                        self.phase = Phase::Dragging;
                        self.suppress_click = true;
                        DragOutcome::DragStarted(target)
                    }
                    Phase::Idle => DragOutcome::Nothing,
                    Phase::Dragging => DragOutcome::MoveWindow(target),
                }
            }

            Gesture::Release => {
                let Some(_) = self.press.take() else {
                    return DragOutcome::Nothing;
                };
                match std::mem::replace(&mut self.phase, Phase::Idle) {
                    Phase::Dragging => DragOutcome::DragEnded,
                    Phase::Idle => DragOutcome::Click,
                }
            }

            Gesture::Cancel => {
                self.press = None;
                match std::mem::replace(&mut self.phase, Phase::Idle) {
                    Phase::Dragging => DragOutcome::DragEnded,
                    Phase::Idle => DragOutcome::Nothing,
                }
            }
        }
    }
}
