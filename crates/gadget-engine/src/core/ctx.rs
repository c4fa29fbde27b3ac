use winit::dpi::PhysicalPosition;
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// Rectangle of a monitor on the virtual desktop, physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MonitorArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Window handle passed to app callbacks.
///
/// Queries that the platform cannot answer return `None` and leave a debug
/// line in the log.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Outer size including decorations, physical pixels.
    pub fn outer_size(&self) -> (u32, u32) {
        let size = self.window.outer_size();
        (size.width, size.height)
    }

    pub fn outer_position(&self) -> Option<(i32, i32)> {
        match self.window.outer_position() {
            Ok(p) => Some((p.x, p.y)),
            Err(e) => {
                log::debug!("window position unavailable: {e}");
                None
            }
        }
    }

    pub fn set_outer_position(&self, x: i32, y: i32) {
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    /// The monitor the window is on, falling back to the primary monitor.
    pub fn monitor_area(&self) -> Option<MonitorArea> {
        let monitor = self
            .window
            .current_monitor()
            .or_else(|| self.window.primary_monitor());
        let Some(monitor) = monitor else {
            log::debug!("no monitor information for window {:?}", self.id);
            return None;
        };
        let pos = monitor.position();
        let size = monitor.size();
        Some(MonitorArea { x: pos.x, y: pos.y, width: size.width, height: size.height })
    }

    /// Confines the pointer to the window while `grab` is set.
    pub fn grab_pointer(&self, grab: bool) {
        let mode = if grab { CursorGrabMode::Confined } else { CursorGrabMode::None };
        if let Err(e) = self.window.set_cursor_grab(mode) {
            log::debug!("pointer grab ({mode:?}) not available: {e}");
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Drawable size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.gpu.size();
        (size.width, size.height)
    }

    /// Clears the surface to `clear`, runs `draw`, and presents.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    SurfaceErrorAction::Reconfigure => {
                        self.window.request_redraw();
                        AppControl::Continue
                    }
                    SurfaceErrorAction::SkipFrame => AppControl::Continue,
                };
            }
        };

        {
            let _clear = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gadget clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }
}
