/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Pointer location.
///
/// `x`/`y` are logical pixels relative to the window's top-left corner.
/// `screen` is the physical desktop position, when the platform exposes the
/// window position (it does not on Wayland).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
    pub screen: Option<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerPos),
    /// Carries the last pointer position inside the window, `None` once the
    /// pointer has left it.
    PointerButton {
        button: MouseButton,
        state: ButtonState,
        pos: Option<PointerPos>,
    },
    PointerLeft,
    Focused(bool),
}
