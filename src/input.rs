use egui::{Context, Pos2, Rect};

use crate::state::{EditorState, SessionResult};

/// Pointer events in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { position: Pos2 },
    /// Pointer moved while the primary button is held
    PointerMove { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            InputEvent::PointerDown { position }
            | InputEvent::PointerMove { position }
            | InputEvent::PointerUp { position } => *position,
        }
    }

    /// Forwards the event to the session's input surface.
    pub fn dispatch(&self, state: &mut EditorState) -> SessionResult<Vec<usize>> {
        let Pos2 { x, y } = self.position();
        match self {
            InputEvent::PointerDown { .. } => state.pointer_press(x, y),
            InputEvent::PointerMove { .. } => state.pointer_move(x, y),
            InputEvent::PointerUp { .. } => state.pointer_release(x, y),
        }
    }
}

/// Converts raw egui pointer input into canvas-local [`InputEvent`]s
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    pressed_on_canvas: bool,
    accepts_press: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            pressed_on_canvas: false,
            accepts_press: true,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Whether a press may start a stroke this frame. Cleared while another
    /// widget or window covers the canvas.
    pub fn set_accepts_press(&mut self, accepts: bool) {
        self.accepts_press = accepts;
    }

    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let (pos, pressed, released, down) = ctx.input(|input| {
            (
                input.pointer.interact_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.primary_down(),
            )
        });
        self.translate(pos, pressed, released, down)
    }

    /// Core of [`InputHandler::process_input`], separated from egui state.
    ///
    /// A stroke only starts when the press lands on the canvas; moves and the
    /// release are reported for that stroke even if the pointer leaves. A
    /// release seen without a pointer position, or a button found up without
    /// a release, ends the stroke at the last known position.
    pub fn translate(
        &mut self,
        pos: Option<Pos2>,
        pressed: bool,
        released: bool,
        down: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let ends_stroke = released || (!down && !pressed);

        let Some(pos) = pos else {
            if ends_stroke {
                events.extend(self.end_stroke(None));
            }
            return events;
        };
        let position = self.to_canvas(pos);

        if pressed && self.accepts_press && self.canvas_rect.contains(pos) {
            self.pressed_on_canvas = true;
            events.push(InputEvent::PointerDown { position });
        } else if down && self.pressed_on_canvas && Some(pos) != self.last_pointer_pos {
            events.push(InputEvent::PointerMove { position });
        }

        if ends_stroke {
            events.extend(self.end_stroke(Some(pos)));
        }

        self.last_pointer_pos = Some(pos);
        events
    }

    fn end_stroke(&mut self, pos: Option<Pos2>) -> Option<InputEvent> {
        if !self.pressed_on_canvas {
            return None;
        }
        self.pressed_on_canvas = false;
        let pos = pos.or(self.last_pointer_pos)?;
        Some(InputEvent::PointerUp {
            position: self.to_canvas(pos),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(64.0, 64.0)))
    }

    #[test]
    fn test_translates_to_canvas_space() {
        let mut input = handler();
        let events = input.translate(Some(pos2(110.0, 60.0)), true, false, true);
        assert_eq!(events, vec![InputEvent::PointerDown { position: pos2(10.0, 10.0) }]);
    }

    #[test]
    fn test_full_stroke() {
        let mut input = handler();
        input.translate(Some(pos2(110.0, 60.0)), true, false, true);
        let moved = input.translate(Some(pos2(120.0, 60.0)), false, false, true);
        assert_eq!(moved, vec![InputEvent::PointerMove { position: pos2(20.0, 10.0) }]);

        // No duplicate move while the pointer rests.
        assert!(input.translate(Some(pos2(120.0, 60.0)), false, false, true).is_empty());

        let up = input.translate(Some(pos2(120.0, 60.0)), false, true, false);
        assert_eq!(up, vec![InputEvent::PointerUp { position: pos2(20.0, 10.0) }]);
    }

    #[test]
    fn test_press_outside_canvas_starts_nothing() {
        let mut input = handler();
        assert!(input.translate(Some(pos2(10.0, 10.0)), true, false, true).is_empty());
        assert!(input.translate(Some(pos2(110.0, 60.0)), false, false, true).is_empty());
        assert!(input.translate(Some(pos2(110.0, 60.0)), false, true, false).is_empty());
    }

    #[test]
    fn test_release_outside_window_ends_stroke() {
        let mut input = handler();
        input.translate(Some(pos2(110.0, 60.0)), true, false, true);
        input.translate(Some(pos2(130.0, 60.0)), false, false, true);

        // Pointer has left the window when the button comes up.
        let up = input.translate(None, false, true, false);
        assert_eq!(up, vec![InputEvent::PointerUp { position: pos2(30.0, 10.0) }]);
        assert!(input.translate(None, false, true, false).is_empty());
    }

    #[test]
    fn test_missed_release_ends_stroke() {
        let mut input = handler();
        input.translate(Some(pos2(110.0, 60.0)), true, false, true);
        let up = input.translate(Some(pos2(140.0, 60.0)), false, false, false);
        assert_eq!(up, vec![InputEvent::PointerUp { position: pos2(40.0, 10.0) }]);
    }

    #[test]
    fn test_press_ignored_while_covered() {
        let mut input = handler();
        input.set_accepts_press(false);
        assert!(input.translate(Some(pos2(110.0, 60.0)), true, false, true).is_empty());
        assert!(input.translate(Some(pos2(120.0, 60.0)), false, false, true).is_empty());
        assert!(input.translate(Some(pos2(120.0, 60.0)), false, true, false).is_empty());

        input.set_accepts_press(true);
        let events = input.translate(Some(pos2(110.0, 60.0)), true, false, true);
        assert_eq!(events, vec![InputEvent::PointerDown { position: pos2(10.0, 10.0) }]);
    }

    #[test]
    fn test_click_in_one_frame() {
        let mut input = handler();
        let events = input.translate(Some(pos2(101.0, 51.0)), true, true, false);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { position: pos2(1.0, 1.0) },
                InputEvent::PointerUp { position: pos2(1.0, 1.0) },
            ]
        );
    }
}
