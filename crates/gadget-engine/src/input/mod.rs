//! Pointer input, translated from winit into window-relative logical
//! coordinates plus an optional screen position.

mod state;
mod types;

pub use state::InputState;
pub use types::{ButtonState, InputEvent, MouseButton, PointerPos};
