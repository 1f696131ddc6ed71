//! Input tracker: turns raw pointer movement into target-angle deltas
//! and resolves the rest angle when a drag ends.

use super::{
    ARC_SIZE, Carousel, DRAG_SLACK, ESCAPE_THRESHOLD, MOUSE_DRAG_DIVISOR, TOUCH_DRAG_DIVISOR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    fn drag_divisor(self) -> f64 {
        match self {
            Self::Mouse => MOUSE_DRAG_DIVISOR,
            Self::Touch => TOUCH_DRAG_DIVISOR,
        }
    }
}

/// Ephemeral per-drag state, created on pointer-down and torn down on
/// pointer-up. Only the last horizontal position is needed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragSession {
    last_x: f64,
    kind: PointerKind,
}

impl Carousel {
    /// Begin a drag session at horizontal position `x`.
    pub fn pointer_down(&mut self, x: f64, kind: PointerKind) {
        self.drag = Some(DragSession { last_x: x, kind });
        self.fire_pointer_down();
    }

    /// Feed a pointer position while dragging. No-op outside a session.
    pub fn pointer_move(&mut self, x: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let movement = x - drag.last_x;
        drag.last_x = x;
        let delta = movement / drag.kind.drag_divisor();
        self.nudge_target(delta);
    }

    /// End the drag: snap to the nearest card rest angle, or fire the
    /// escape gesture when the user dragged past the first card.
    pub fn pointer_up(&mut self) {
        if self.drag.take().is_none() {
            return;
        }

        let step = self.state.step_angle();
        let target = self.state.target;
        let max = step * (self.state.len - 1) as f64;

        if target > 0.0 {
            // Dragged before the start. A clear pull past the first card
            // hands control to the previous page section; either way the
            // ring snaps back to card 0.
            if self.state.active == 0 && target > ESCAPE_THRESHOLD {
                self.fire_swap_right();
            }
            self.nudge_target(-target);
        } else if -target > max {
            self.nudge_target(-target - max);
        } else {
            // Snap to whichever multiple of the step is closer.
            let rem = target % step;
            let outward = step - rem.abs();
            let sign = target.signum();
            let correction = if outward <= step / 2.0 { outward } else { rem };
            self.nudge_target(correction * sign);
        }
    }

    /// Add a delta to the target angle, clamp it into the drag band, and
    /// make sure the integrator is running.
    fn nudge_target(&mut self, delta: f64) {
        let next = (self.state.target + delta).clamp(-ARC_SIZE + DRAG_SLACK, DRAG_SLACK);
        self.state.target = next;
        self.request_motion();
    }
}
