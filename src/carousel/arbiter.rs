//! Boundary arbiter: decides, per wheel event, whether the carousel or
//! the surrounding page owns the scroll, and applies the clamped step
//! when the carousel takes it.

use super::{BOUNDARY_TOLERANCE, Carousel, TERMINAL_SNAP_TOLERANCE, WHEEL_LOCK};
use crate::carousel::CarouselState;
use std::time::Instant;

impl Carousel {
    /// Feed one wheel event. Returns `true` when the carousel consumed
    /// it and the caller must suppress the native page scroll, `false`
    /// when the page should scroll normally.
    ///
    /// Ownership is re-evaluated on every event from the live position,
    /// never from a one-shot flag, so the page is released exactly at
    /// the extremes and recaptured as soon as the ring moves off them.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let forward = delta_y > 0.0;
        let backward = delta_y < 0.0;
        if !forward && !backward {
            return false;
        }

        let len = self.state.len;
        let step = self.state.step_angle();
        let terminal = self.state.terminal_angle();
        let committed = self.state.committed;

        // At the first card, resting near 0: scrolling further back
        // belongs to the page.
        if backward && self.state.active == 0 && committed >= -step / 4.0 {
            return false;
        }

        // At the last card, resting on the terminal angle: scrolling
        // further forward belongs to the page. The tolerance means the
        // card must actually have settled before the page takes over.
        if forward
            && self.state.active == len - 1
            && (committed - terminal).abs() <= BOUNDARY_TOLERANCE
        {
            return false;
        }

        // The carousel owns the event from here on, even while the
        // wheel lock swallows it.
        if self.wheel_locked() {
            return true;
        }
        self.wheel_locked_until = Some(Instant::now() + WHEEL_LOCK);

        let requested = self.state.target + if forward { -step } else { step };
        let clamped = requested.clamp(terminal, 0.0);
        let next_index = CarouselState::angle_to_index(clamped, len);

        // Landing on the last card: pin the target to the exact terminal
        // angle so the next forward event passes the release check above.
        if forward
            && next_index == len - 1
            && (clamped - terminal).abs() <= TERMINAL_SNAP_TOLERANCE
        {
            self.state.target = terminal;
            self.request_motion();
            return true;
        }

        // Scrolling back onto card 1 reads as a return-to-start escape.
        if backward && next_index == 1 {
            self.fire_swap_right();
            return true;
        }

        self.state.target = clamped;
        self.request_motion();
        true
    }

    fn wheel_locked(&self) -> bool {
        self.wheel_locked_until
            .is_some_and(|until| Instant::now() < until)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;

    /// Place the carousel at a known committed/target angle without
    /// animating through the intermediate positions.
    fn pin(h: &mut Harness, angle: f64) {
        h.carousel.state.committed = angle;
        h.carousel.state.target = angle;
        h.carousel.state.active =
            super::CarouselState::angle_to_index(angle, h.carousel.item_count());
    }

    #[test]
    fn backward_wheel_at_rest_on_first_card_is_released() {
        let mut h = Harness::new(3);
        assert!(!h.carousel.wheel(-120.0));
        assert_eq!(h.carousel.state.target, 0.0);
    }

    #[test]
    fn forward_wheel_on_first_card_is_captured() {
        let mut h = Harness::new(3);
        assert!(h.carousel.wheel(120.0));
        assert_eq!(h.carousel.state.target, -50.0);
        h.settle();
        assert_eq!(h.carousel.active_index(), 1);
    }

    #[test]
    fn forward_wheel_at_the_exact_terminal_angle_is_released() {
        let mut h = Harness::new(3);
        pin(&mut h, -100.0);
        assert!(!h.carousel.wheel(120.0));
    }

    #[test]
    fn forward_wheel_short_of_terminal_is_captured_and_pins_terminal() {
        let mut h = Harness::new(3);
        pin(&mut h, -90.0);
        assert!(h.carousel.wheel(120.0));
        assert_eq!(h.carousel.state.target, -100.0);
        h.settle();
        assert!((h.carousel.snapshot().rotation - -100.0).abs() < 0.1);
    }

    #[test]
    fn wheel_lock_swallows_the_second_event() {
        let mut h = Harness::new(5);
        assert!(h.carousel.wheel(120.0));
        let after_first = h.carousel.state.target;
        // still captured, but no further rotation inside the cooldown
        assert!(h.carousel.wheel(120.0));
        assert_eq!(h.carousel.state.target, after_first);
        assert_eq!(after_first, -30.0);
    }

    #[test]
    fn backward_wheel_onto_card_one_escapes_instead_of_animating() {
        let mut h = Harness::new(3);
        pin(&mut h, -100.0);
        assert!(h.carousel.wheel(-120.0));
        assert_eq!(h.swaps.get(), 1);
        assert_eq!(h.carousel.state.target, -100.0);
    }

    #[test]
    fn backward_wheel_off_card_one_returns_to_start() {
        let mut h = Harness::new(3);
        pin(&mut h, -50.0);
        assert!(h.carousel.wheel(-120.0));
        assert_eq!(h.swaps.get(), 0);
        assert_eq!(h.carousel.state.target, 0.0);
    }

    #[test]
    fn zero_delta_is_ignored() {
        let mut h = Harness::new(3);
        assert!(!h.carousel.wheel(0.0));
        assert_eq!(h.carousel.state.target, 0.0);
    }

    #[test]
    fn single_card_releases_both_directions() {
        let mut h = Harness::new(1);
        assert!(!h.carousel.wheel(-120.0));
        assert!(!h.carousel.wheel(120.0));
    }
}
