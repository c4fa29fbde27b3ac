//! Face rendering.
//!
//! The face is composed on the CPU ([`Canvas`]) in physical pixels and
//! presented by [`FaceRenderer`] as one textured pass.

mod canvas;
mod ctx;
mod face;

pub use canvas::{Canvas, TextAnchor};
pub use ctx::{RenderCtx, RenderTarget};
pub use face::FaceRenderer;
