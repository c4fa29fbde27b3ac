//! Gadget engine crate.
//!
//! Platform and GPU runtime for small always-on desktop gadgets: one winit
//! window, pointer input, a CPU-composed face and a single textured pass to
//! put it on screen.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod window;
