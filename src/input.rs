use crate::point::PointerSample;
use egui::{Context, Pos2, Rect};

/// Pointer events delivered to the pad, in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed over the surface
    Down { sample: PointerSample },
    /// Pointer moved over the surface
    Move {
        sample: PointerSample,
        primary_held: bool,
    },
    /// Primary button released over the surface
    Up { sample: PointerSample },
    /// Pointer entered the surface
    Enter {
        sample: PointerSample,
        primary_held: bool,
    },
    /// Pointer left the surface
    Leave { sample: PointerSample },
}

impl PointerEvent {
    pub fn sample(&self) -> PointerSample {
        match self {
            Self::Down { sample }
            | Self::Move { sample, .. }
            | Self::Up { sample }
            | Self::Enter { sample, .. }
            | Self::Leave { sample } => *sample,
        }
    }
}

/// Pointer state for a single frame, as read from egui
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub pos: Option<Pos2>,
    pub primary_pressed: bool,
    pub primary_released: bool,
    pub primary_down: bool,
    /// Force of the latest touch event, if the device reports one
    pub force: Option<f32>,
}

impl PointerFrame {
    /// Read the current frame's pointer state from egui
    pub fn from_egui(ctx: &Context) -> Self {
        ctx.input(|i| {
            let force = i.events.iter().rev().find_map(|event| match event {
                egui::Event::Touch { force, .. } => *force,
                _ => None,
            });
            Self {
                pos: i.pointer.latest_pos(),
                primary_pressed: i.pointer.primary_pressed(),
                primary_released: i.pointer.primary_released(),
                primary_down: i.pointer.primary_down(),
                force,
            }
        })
    }
}

/// Handles converting raw egui input into pointer events for one surface
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's egui input against the surface's on-screen rect
    pub fn process_input(&mut self, ctx: &Context, surface_rect: Rect) -> Vec<PointerEvent> {
        self.translate(PointerFrame::from_egui(ctx), surface_rect)
    }

    /// Turn one frame of pointer state into events
    pub fn translate(&mut self, frame: PointerFrame, surface_rect: Rect) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let make_sample = |pos: Pos2| PointerSample {
            client: pos,
            pressure: frame.force,
        };

        let inside = frame.pos.is_some_and(|pos| surface_rect.contains(pos));

        match frame.pos {
            Some(pos) if inside => {
                if !self.inside {
                    // A press this frame is reported as Down, not as a held enter
                    events.push(PointerEvent::Enter {
                        sample: make_sample(pos),
                        primary_held: frame.primary_down && !frame.primary_pressed,
                    });
                }
                if frame.primary_pressed {
                    events.push(PointerEvent::Down {
                        sample: make_sample(pos),
                    });
                }
                if Some(pos) != self.last_pointer_pos {
                    events.push(PointerEvent::Move {
                        sample: make_sample(pos),
                        primary_held: frame.primary_down,
                    });
                }
                if frame.primary_released {
                    events.push(PointerEvent::Up {
                        sample: make_sample(pos),
                    });
                }
            }
            _ => {
                if self.inside {
                    let last = frame.pos.or(self.last_pointer_pos).unwrap_or(Pos2::ZERO);
                    events.push(PointerEvent::Leave {
                        sample: make_sample(last),
                    });
                }
            }
        }

        self.inside = inside;
        self.last_pointer_pos = frame.pos;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn rect() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0))
    }

    #[test]
    fn test_enter_then_press() {
        let mut handler = InputHandler::new();
        let events = handler.translate(
            PointerFrame {
                pos: Some(pos2(10.0, 10.0)),
                primary_pressed: true,
                primary_down: true,
                ..Default::default()
            },
            rect(),
        );
        assert!(matches!(
            events[0],
            PointerEvent::Enter {
                primary_held: false,
                ..
            }
        ));
        assert!(matches!(events[1], PointerEvent::Down { .. }));
    }

    #[test]
    fn test_enter_with_button_held() {
        let mut handler = InputHandler::new();
        let events = handler.translate(
            PointerFrame {
                pos: Some(pos2(10.0, 10.0)),
                primary_down: true,
                ..Default::default()
            },
            rect(),
        );
        assert!(matches!(
            events[0],
            PointerEvent::Enter {
                primary_held: true,
                ..
            }
        ));
    }

    #[test]
    fn test_move_only_when_position_changes() {
        let mut handler = InputHandler::new();
        let frame = PointerFrame {
            pos: Some(pos2(10.0, 10.0)),
            primary_down: true,
            ..Default::default()
        };
        handler.translate(frame, rect());
        assert!(handler.translate(frame, rect()).is_empty());

        let events = handler.translate(
            PointerFrame {
                pos: Some(pos2(20.0, 10.0)),
                ..frame
            },
            rect(),
        );
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], PointerEvent::Move { primary_held: true, .. }));
    }

    #[test]
    fn test_leaving_rect_emits_leave() {
        let mut handler = InputHandler::new();
        handler.translate(
            PointerFrame {
                pos: Some(pos2(50.0, 50.0)),
                ..Default::default()
            },
            rect(),
        );
        let events = handler.translate(
            PointerFrame {
                pos: Some(pos2(150.0, 50.0)),
                ..Default::default()
            },
            rect(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sample().client, pos2(150.0, 50.0));
        assert!(matches!(events[0], PointerEvent::Leave { .. }));
    }

    #[test]
    fn test_touch_force_becomes_pressure() {
        let mut handler = InputHandler::new();
        let events = handler.translate(
            PointerFrame {
                pos: Some(pos2(10.0, 10.0)),
                primary_pressed: true,
                primary_down: true,
                force: Some(0.7),
                ..Default::default()
            },
            rect(),
        );
        assert!(events.iter().all(|e| e.sample().pressure == Some(0.7)));
    }
}
