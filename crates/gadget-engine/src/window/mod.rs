//! Event loop and the gadget window.

mod runtime;

pub use runtime::{QuitHandle, Runtime, RuntimeConfig, WindowMode};
