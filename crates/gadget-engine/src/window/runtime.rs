use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{ButtonState, InputEvent, InputState, MouseButton, PointerPos};

/// How the window presents itself to the window manager.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WindowMode {
    /// Decorated, opaque application window.
    Normal,
    /// Borderless, transparent, kept below other windows.
    #[default]
    Gadget,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub min_size: Option<LogicalSize<f64>>,
    /// Outer position to open at; the window manager decides when `None`.
    pub position: Option<PhysicalPosition<i32>>,
    pub mode: WindowMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gadget".to_string(),
            initial_size: LogicalSize::new(300.0, 120.0),
            min_size: None,
            position: None,
            mode: WindowMode::Gadget,
        }
    }
}

impl RuntimeConfig {
    fn window_attributes(&self) -> WindowAttributes {
        let mut attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size);

        if let Some(min) = self.min_size {
            attrs = attrs.with_min_inner_size(min);
        }
        if let Some(pos) = self.position {
            attrs = attrs.with_position(pos);
        }

        match self.mode {
            WindowMode::Normal => attrs,
            WindowMode::Gadget => attrs
                .with_decorations(false)
                .with_transparent(true)
                .with_resizable(false)
                .with_window_level(WindowLevel::AlwaysOnBottom),
        }
    }
}

/// Events injected into the loop from outside it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum RuntimeEvent {
    Quit,
}

/// Asks a running [`Runtime`] to shut down. Safe to call from any thread,
/// e.g. a signal handler.
#[derive(Clone)]
pub struct QuitHandle(EventLoopProxy<RuntimeEvent>);

impl QuitHandle {
    pub fn request_quit(&self) {
        if self.0.send_event(RuntimeEvent::Quit).is_err() {
            log::debug!("quit requested after the event loop closed");
        }
    }
}

/// Owns the event loop. Create it first so a [`QuitHandle`] can be handed
/// out before [`Runtime::run`] blocks.
pub struct Runtime {
    event_loop: EventLoop<RuntimeEvent>,
}

impl Runtime {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        Ok(Self { event_loop })
    }

    pub fn quit_handle(&self) -> QuitHandle {
        QuitHandle(self.event_loop.create_proxy())
    }

    /// Opens the window and blocks until the app exits.
    pub fn run<A>(self, config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let mut state = RuntimeState::new(config, gpu_init, app);

        self.event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    shut_down: bool,
    error: Option<anyhow::Error>,
}

impl<A: App> RuntimeState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self { config, gpu_init, app, window: None, shut_down: false, error: None }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(self.config.window_attributes())
            .context("failed to create window")?;
        log::debug!("created {:?} window {:?}", self.config.mode, window.id());

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            input: InputState::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.window = Some(entry);
        Ok(())
    }

    /// Runs a callback that only needs the window handle.
    fn with_ctx(&mut self, f: impl FnOnce(&mut A, &WindowCtx<'_>) -> AppControl) -> AppControl {
        let (app, window) = (&mut self.app, &self.window);
        let Some(entry) = window else {
            return AppControl::Continue;
        };
        entry.with_window(|w| f(app, &WindowCtx { id: w.id(), window: w }))
    }

    fn apply(&mut self, control: AppControl, event_loop: &ActiveEventLoop) {
        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }

    /// App teardown first, then the window and its surface.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.shut_down {
            self.shut_down = true;
            let (app, window) = (&mut self.app, &self.window);
            match window {
                Some(entry) => entry.with_window(|w| {
                    app.on_shutdown(Some(&WindowCtx { id: w.id(), window: w }));
                }),
                None => app.on_shutdown(None),
            }
            self.window = None;
            log::debug!("runtime shut down");
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.shutdown(event_loop);
    }
}

impl<A: App> ApplicationHandler<RuntimeEvent> for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.shut_down {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        let control = self.with_ctx(|app, ctx| {
            let control = app.on_start(ctx);
            ctx.request_redraw();
            control
        });
        self.apply(control, event_loop);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Quit => {
                log::info!("quit requested");
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.shut_down {
            return;
        }

        let control = match &event {
            WindowEvent::CloseRequested => self.with_ctx(|app, ctx| app.on_close_requested(ctx)),

            WindowEvent::Resized(size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*size));
                    entry.with_window(|w| w.request_redraw());
                }
                AppControl::Continue
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(size));
                    entry.with_window(|w| w.request_redraw());
                }
                AppControl::Continue
            }

            WindowEvent::RedrawRequested => {
                let (app, window) = (&mut self.app, &mut self.window);
                match window {
                    Some(entry) => entry.with_mut(|fields| {
                        let mut ctx = FrameCtx {
                            window: WindowCtx { id: fields.window.id(), window: fields.window },
                            gpu: fields.gpu,
                        };
                        app.on_frame(&mut ctx)
                    }),
                    None => AppControl::Continue,
                }
            }

            other => {
                let (app, window) = (&mut self.app, &mut self.window);
                match window {
                    Some(entry) => entry.with_mut(|fields| {
                        let Some(ev) = translate_input_event(fields.window, fields.input, other) else {
                            return AppControl::Continue;
                        };
                        fields.input.apply_event(&ev);
                        let ctx = WindowCtx { id: fields.window.id(), window: fields.window };
                        app.on_input(&ctx, &ev)
                    }),
                    None => AppControl::Continue,
                }
            }
        };

        self.apply(control, event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shut_down {
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        if self.app.next_deadline().is_some_and(|d| d <= now) {
            let control = self.with_ctx(|app, ctx| app.on_wake(ctx, now));
            self.apply(control, event_loop);
            if self.shut_down {
                return;
            }
        }

        match self.app.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}

fn translate_input_event(window: &Window, input: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f64>(window.scale_factor());
            // Window-relative physical position plus the window origin.
            let screen = window.inner_position().ok().map(|origin| {
                (origin.x + position.x.round() as i32, origin.y + position.y.round() as i32)
            });
            Some(InputEvent::PointerMoved(PointerPos {
                x: logical.x as f32,
                y: logical.y as f32,
                screen,
            }))
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let state = match state {
                ElementState::Pressed => ButtonState::Pressed,
                ElementState::Released => ButtonState::Released,
            };
            Some(InputEvent::PointerButton {
                button: map_mouse_button(*button),
                state,
                pos: input.pointer,
            })
        }

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),
        _ => None,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
