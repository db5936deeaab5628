use crate::widget::host::PointerEvent;
use egui::{Context, Pos2};

/// Turns egui's per-frame pointer state into widget events.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last_pos: Option<Pos2>,
    hovering: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `anchor_hovered` is whether the pointer is over the button's anchor this frame.
    pub fn collect(&mut self, ctx: &Context, anchor_hovered: bool) -> Vec<PointerEvent> {
        let (pos, screen) = ctx.input(|i| (i.pointer.latest_pos(), i.screen_rect()));
        let mut events = Vec::new();

        // 1. Movement anywhere in the window
        if let Some(pos) = pos
            && self.last_pos != Some(pos)
        {
            events.push(PointerEvent::MouseMove {
                client_x: pos.x - screen.min.x,
                client_y: pos.y - screen.min.y,
                window_width: screen.width(),
                window_height: screen.height(),
            });
            self.last_pos = Some(pos);
        }

        // 2. Enter/leave edges on the anchor
        if anchor_hovered != self.hovering {
            self.hovering = anchor_hovered;
            events.push(if anchor_hovered {
                PointerEvent::Enter
            } else {
                PointerEvent::Leave
            });
        }

        events
    }
}
