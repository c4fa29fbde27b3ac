use super::types::{InputEvent, PointerPos};

/// Pointer state of the gadget window, as seen by the runtime.
#[derive(Debug, Default)]
pub struct InputState {
    /// Last pointer position inside the window.
    pub pointer: Option<PointerPos>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved(pos) => self.pointer = Some(*pos),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerButton { .. } | InputEvent::Focused(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonState, MouseButton};

    #[test]
    fn pointer_position_follows_moves() {
        let mut s = InputState::default();
        let pos = PointerPos { x: 3.0, y: 4.0, screen: Some((103, 204)) };
        s.apply_event(&InputEvent::PointerMoved(pos));
        assert_eq!(s.pointer, Some(pos));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer, None);
    }

    #[test]
    fn buttons_and_focus_keep_the_pointer() {
        let mut s = InputState::default();
        let pos = PointerPos { x: 1.0, y: 2.0, screen: None };
        s.apply_event(&InputEvent::PointerMoved(pos));
        s.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            pos: Some(pos),
        });
        s.apply_event(&InputEvent::Focused(false));
        assert_eq!(s.pointer, Some(pos));
    }
}
