//! The clock as an engine [`App`].

use std::time::Instant;

use chrono::Utc;
use gadget_clock::{DragOutcome, Gesture, Placement, Point, ScreenArea, Size};
use gadget_engine::core::{App, AppControl, FrameCtx, MonitorArea, WindowCtx};
use gadget_engine::input::{ButtonState, InputEvent, MouseButton, PointerPos};
use gadget_engine::paint::Color;
use gadget_engine::render::{Canvas, FaceRenderer};
use gadget_engine::text::{FontId, FontSystem, GlyphCache};

use crate::state::{GadgetState, Now, SignalTable};

pub struct ClockGadget {
    state: GadgetState,
    signals: SignalTable,

    fonts: FontSystem,
    font: FontId,
    glyphs: GlyphCache,
    canvas: Canvas,
    renderer: FaceRenderer,

    primary_down: bool,
    reported_no_screen_pos: bool,
}

impl ClockGadget {
    pub fn new(state: GadgetState, fonts: FontSystem, font: FontId) -> Self {
        Self {
            state,
            signals: SignalTable::standard(),
            fonts,
            font,
            glyphs: GlyphCache::new(),
            canvas: Canvas::new(1, 1),
            renderer: FaceRenderer::new(),
            primary_down: false,
            reported_no_screen_pos: false,
        }
    }

    /// Pointer in desktop coordinates, or window-relative physical pixels
    /// where the platform hides window positions.
    fn screen_point(&mut self, pos: &PointerPos, scale: f64) -> Point {
        if pos.screen.is_none() && !self.reported_no_screen_pos {
            self.reported_no_screen_pos = true;
            log::debug!("no desktop pointer position, dragging in window coordinates");
        }
        screen_point(pos, scale)
    }

    fn press(&mut self, ctx: &WindowCtx<'_>, pos: &PointerPos) -> AppControl {
        self.primary_down = true;
        let window_origin = ctx
            .outer_position()
            .map(|(x, y)| Point::new(x, y))
            .unwrap_or(self.state.prefs().position);
        let pointer = self.screen_point(pos, ctx.scale_factor());
        let outcome = self.state.handle_gesture(Gesture::Press { pointer, window_origin }, placement(ctx));
        self.apply(ctx, outcome, Some(pos))
    }

    /// `pos` is where the pointer is over the window, if it is.
    fn apply(&mut self, ctx: &WindowCtx<'_>, outcome: DragOutcome, pos: Option<&PointerPos>) -> AppControl {
        match outcome {
            DragOutcome::Nothing => {}
            DragOutcome::DragStarted(origin) => {
                ctx.grab_pointer(true);
                ctx.set_outer_position(origin.x, origin.y);
            }
            DragOutcome::MoveWindow(origin) => ctx.set_outer_position(origin.x, origin.y),
            DragOutcome::DragEnded => ctx.grab_pointer(false),
            DragOutcome::Click => return self.click(ctx, pos),
        }
        AppControl::Continue
    }

    fn click(&mut self, ctx: &WindowCtx<'_>, pos: Option<&PointerPos>) -> AppControl {
        self.state.click(&self.signals, pos.map(|p| (p.x, p.y)), Now::capture());

        if self.state.wants_quit() {
            return AppControl::Exit;
        }
        self.redraw_if_dirty(ctx);
        AppControl::Continue
    }

    fn redraw_if_dirty(&mut self, ctx: &WindowCtx<'_>) {
        if self.state.face_mut().take_dirty() {
            ctx.request_redraw();
        }
    }
}

impl App for ClockGadget {
    fn on_start(&mut self, window: &WindowCtx<'_>) -> AppControl {
        self.state.start(Now::capture());

        match placement(window) {
            Some(placement) => {
                if let Some(origin) = self.state.clamp_startup(placement) {
                    window.set_outer_position(origin.x, origin.y);
                }
            }
            None => log::debug!("screen geometry unknown, keeping stored position"),
        }
        AppControl::Continue
    }

    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Pressed, pos } => {
                match pos {
                    Some(pos) => self.press(window, pos),
                    None => AppControl::Continue,
                }
            }
            InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Released, pos } => {
                self.primary_down = false;
                let outcome = self.state.handle_gesture(Gesture::Release, None);
                self.apply(window, outcome, pos.as_ref())
            }
            InputEvent::PointerMoved(pos) if self.primary_down => {
                let pointer = self.screen_point(pos, window.scale_factor());
                let gesture = Gesture::Move { pointer, primary_held: true };
                let outcome = self.state.handle_gesture(gesture, placement(window));
                self.apply(window, outcome, Some(pos))
            }
            InputEvent::Focused(false) => {
                self.primary_down = false;
                let outcome = self.state.handle_gesture(Gesture::Cancel, None);
                self.apply(window, outcome, None)
            }
            _ => AppControl::Continue,
        }
    }

    fn on_close_requested(&mut self, _window: &WindowCtx<'_>) -> AppControl {
        log::info!("window closed");
        AppControl::Exit
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.state.deadline()
    }

    fn on_wake(&mut self, window: &WindowCtx<'_>, now: Instant) -> AppControl {
        if self.state.tick(Now { wall: Utc::now(), instant: now }) {
            self.redraw_if_dirty(window);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (width, height) = ctx.physical_size();
        let scale = ctx.window.scale_factor() as f32;

        self.canvas.resize(width.max(1), height.max(1));
        self.state.face().paint(&mut self.canvas, &self.fonts, &mut self.glyphs, self.font, scale);

        let (renderer, canvas) = (&mut self.renderer, &self.canvas);
        ctx.render(Color::transparent(), |rctx, target| renderer.render(rctx, target, canvas))
    }

    fn on_shutdown(&mut self, _window: Option<&WindowCtx<'_>>) {
        self.state.shutdown();
        log::debug!("clock stopped");
    }
}

fn screen_point(pos: &PointerPos, scale: f64) -> Point {
    match pos.screen {
        Some((x, y)) => Point::new(x, y),
        None => Point::new(
            (f64::from(pos.x) * scale).round() as i32,
            (f64::from(pos.y) * scale).round() as i32,
        ),
    }
}

fn placement(window: &WindowCtx<'_>) -> Option<Placement> {
    let monitor = window.monitor_area()?;
    let (width, height) = window.outer_size();
    Some(placement_on(monitor, width, height))
}

fn placement_on(monitor: MonitorArea, width: u32, height: u32) -> Placement {
    Placement {
        window: Size::new(width, height),
        screen: ScreenArea::new(monitor.x, monitor.y, monitor.width, monitor.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_position_is_used_when_known() {
        let pos = PointerPos { x: 5.0, y: 6.0, screen: Some((1205, 806)) };
        assert_eq!(screen_point(&pos, 2.0), Point::new(1205, 806));
    }

    #[test]
    fn window_position_is_scaled_to_physical() {
        let pos = PointerPos { x: 5.25, y: 6.0, screen: None };
        assert_eq!(screen_point(&pos, 2.0), Point::new(11, 12));
    }

    #[test]
    fn placement_wraps_monitor_and_window() {
        let monitor = MonitorArea { x: 1920, y: 0, width: 1280, height: 1024 };
        let placement = placement_on(monitor, 300, 120);
        assert_eq!(placement.clamp(Point::new(0, 0)), Point::new(1920 - 90, 0));
    }
}
