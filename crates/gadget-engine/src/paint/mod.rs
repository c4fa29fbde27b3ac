//! Color representation shared by the canvas and the GPU passes.

pub mod color;

pub use color::Color;
