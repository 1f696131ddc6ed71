//! Motion integrator: drives the committed angle toward the target with
//! an exponential approach and derives the active card each frame.

use super::{Carousel, EDGE_TOLERANCE, LERP_FACTOR, SETTLE_EPSILON};
use crate::carousel::CarouselState;

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Carousel {
    /// Advance the animation by one frame. Returns `true` while another
    /// frame is needed; the scheduler is asked for it before returning.
    pub fn tick(&mut self) -> bool {
        let next = lerp(self.state.committed, self.state.target, LERP_FACTOR);
        let moving = (next - self.state.committed).abs() > SETTLE_EPSILON;

        if moving {
            self.state.committed = next;
            self.clock.request_tick();
        } else {
            self.state.animating = false;
        }

        let index = CarouselState::angle_to_index(next, self.state.len);
        if index != self.state.active {
            self.state.active = index;
            self.fire_select(index);
        }

        let terminal = self.state.terminal_angle();
        self.can_scroll_up = index == 0 && next >= -EDGE_TOLERANCE;
        self.can_scroll_down =
            index == self.state.len - 1 && next <= terminal + EDGE_TOLERANCE;

        moving
    }

    /// Force the ring to a card, bypassing drag and wheel arbitration.
    /// Out-of-range indices are not validated; callers pass valid ones.
    pub fn scroll_to(&mut self, index: usize) {
        self.state.target = self.state.angle_for(index);
        self.request_motion();
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn approach_strictly_shrinks_and_settles_within_forty_frames() {
        let mut h = Harness::new(3);
        h.carousel.state.target = -50.0;
        h.carousel.request_motion();

        let mut distance = 50.0;
        let mut frames = 0;
        while h.carousel.tick() {
            let now = (h.carousel.state.committed - h.carousel.state.target).abs();
            assert!(now < distance, "distance grew at frame {frames}");
            distance = now;
            frames += 1;
            assert!(frames <= 40, "did not settle in 40 frames");
        }
        assert!(distance <= SETTLE_EPSILON * 5.0);
        assert!(!h.carousel.is_animating());
    }

    #[test]
    fn scroll_to_lands_on_the_requested_card() {
        let mut h = Harness::new(4);
        h.carousel.scroll_to(2);
        h.settle();

        assert_eq!(h.carousel.active_index(), 2);
        let selections = h.selections.borrow();
        assert_eq!(selections.iter().filter(|&&i| i == 2).count(), 1);
        assert_eq!(selections.last(), Some(&2));
    }

    #[test]
    fn one_animation_loop_at_a_time() {
        let mut h = Harness::new(4);
        h.carousel.scroll_to(1);
        h.carousel.scroll_to(2);
        // the second request rides on the loop the first one started
        assert_eq!(h.clock.requests.get(), 1);
        h.settle();
        assert_eq!(h.carousel.active_index(), 2);
    }

    #[test]
    fn settled_tick_does_not_reschedule() {
        let mut h = Harness::new(3);
        assert!(!h.carousel.tick());
        assert_eq!(h.clock.requests.get(), 0);
    }

    #[test]
    fn escape_affordances_track_the_extremes() {
        let mut h = Harness::new(3);
        h.carousel.tick();
        let frame = h.carousel.snapshot();
        assert!(frame.can_scroll_up);
        assert!(!frame.can_scroll_down);

        h.carousel.scroll_to(2);
        h.settle();
        let frame = h.carousel.snapshot();
        assert!(!frame.can_scroll_up);
        assert!(frame.can_scroll_down);
    }

    #[test]
    fn select_fires_once_per_index_change() {
        let mut h = Harness::new(3);
        h.carousel.scroll_to(2);
        h.settle();
        // passes through card 1 exactly once on the way to card 2
        assert_eq!(*h.selections.borrow(), vec![1, 2]);
    }

    fn lerp_chain(mut from: f64, to: f64, steps: usize) -> f64 {
        for _ in 0..steps {
            from = lerp(from, to, LERP_FACTOR);
        }
        from
    }

    #[test]
    fn lerp_never_overshoots() {
        assert!(lerp_chain(0.0, -50.0, 200) >= -50.0);
        assert!(lerp_chain(-50.0, 0.0, 200) <= 0.0);
    }
}
