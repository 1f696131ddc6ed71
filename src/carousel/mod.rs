use std::time::{Duration, Instant};

pub mod arbiter;
pub mod input;
pub mod motion;
pub mod state;

pub use input::PointerKind;
pub use state::{CarouselError, CarouselState, FrameSnapshot};

/// Total angular sweep (degrees) the full card sequence spans,
/// independent of how many cards there are.
pub const ARC_SIZE: f64 = 150.0;
/// Pixels of mouse movement per degree of rotation.
pub const MOUSE_DRAG_DIVISOR: f64 = 30.0;
/// Pixels of touch movement per degree of rotation. Touch drags cover
/// shorter distances, so touch is deliberately more sensitive.
pub const TOUCH_DRAG_DIVISOR: f64 = 10.0;
/// Exponential approach factor applied to the committed angle each frame.
pub const LERP_FACTOR: f64 = 0.2;
/// Animation settles once committed and target are this close.
pub const SETTLE_EPSILON: f64 = 0.01;
/// Overshoot band permitted at both extremes while a drag is active.
pub const DRAG_SLACK: f64 = 3.0;
/// Released drags past the first card beyond this angle count as an
/// escape gesture rather than a snap-back.
pub const ESCAPE_THRESHOLD: f64 = 2.0;
/// How close to an extreme the committed angle must be before a wheel
/// event at that extreme is released to the page.
pub const BOUNDARY_TOLERANCE: f64 = 2.0;
/// A wheel step landing this close to the terminal angle snaps onto it.
pub const TERMINAL_SNAP_TOLERANCE: f64 = 1.0;
/// Tolerance for the up/down escape affordance flags.
pub const EDGE_TOLERANCE: f64 = 2.0;
/// Cooldown after an accepted wheel step during which further wheel
/// events are swallowed, so one physical scroll moves one card.
pub const WHEEL_LOCK: Duration = Duration::from_millis(100);

/// Frame source injected at construction. The GTK shell backs this with
/// the widget frame clock; tests pump [`Carousel::tick`] directly.
pub trait FrameScheduler {
    /// Ask for one call to [`Carousel::tick`] on the next frame.
    fn request_tick(&self);
    /// Drop any pending frame request.
    fn cancel(&self);
}

/// Collaborator callbacks. All optional; fired synchronously from the
/// engine methods that cause them.
#[derive(Default)]
pub struct CarouselHooks {
    pub on_select: Option<Box<dyn FnMut(usize)>>,
    pub on_swap_right: Option<Box<dyn FnMut()>>,
    pub on_pointer_down: Option<Box<dyn FnMut()>>,
}

impl CarouselHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_select(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn on_swap_right(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_swap_right = Some(Box::new(f));
        self
    }

    pub fn on_pointer_down(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_pointer_down = Some(Box::new(f));
        self
    }
}

/// The carousel interaction engine: maps one-dimensional drag/wheel
/// input onto a rotation angle, animates toward it, derives the active
/// card, and decides per wheel event whether the widget or the
/// surrounding page owns the scroll.
pub struct Carousel {
    pub(crate) state: CarouselState,
    pub(crate) drag: Option<input::DragSession>,
    pub(crate) wheel_locked_until: Option<Instant>,
    pub(crate) hooks: CarouselHooks,
    pub(crate) clock: Box<dyn FrameScheduler>,
    pub(crate) can_scroll_up: bool,
    pub(crate) can_scroll_down: bool,
}

impl Carousel {
    pub fn new(
        item_count: usize,
        hooks: CarouselHooks,
        clock: Box<dyn FrameScheduler>,
    ) -> Result<Self, CarouselError> {
        Ok(Self {
            state: CarouselState::new(item_count)?,
            drag: None,
            wheel_locked_until: None,
            hooks,
            clock,
            can_scroll_up: false,
            can_scroll_down: false,
        })
    }

    pub fn item_count(&self) -> usize {
        self.state.len
    }

    pub fn active_index(&self) -> usize {
        self.state.active
    }

    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    /// What the render layer needs to paint one frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            rotation: self.state.committed,
            active: self.state.active,
            can_scroll_up: self.can_scroll_up,
            can_scroll_down: self.can_scroll_down,
        }
    }

    /// Replace the card count, resetting both angles to the first card.
    /// Any in-flight drag session is dropped.
    pub fn set_item_count(&mut self, item_count: usize) -> Result<(), CarouselError> {
        self.state = CarouselState::new(item_count)?;
        self.drag = None;
        self.can_scroll_up = false;
        self.can_scroll_down = false;
        Ok(())
    }

    /// Unconditional shutdown: cancels the pending frame request and
    /// tears down any drag session. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.drag = None;
        self.state.animating = false;
        self.clock.cancel();
    }

    pub(crate) fn request_motion(&mut self) {
        if self.state.animating {
            return;
        }
        self.state.animating = true;
        self.clock.request_tick();
    }

    pub(crate) fn fire_select(&mut self, index: usize) {
        if let Some(cb) = self.hooks.on_select.as_mut() {
            cb(index);
        }
    }

    pub(crate) fn fire_swap_right(&mut self) {
        if let Some(cb) = self.hooks.on_swap_right.as_mut() {
            cb();
        }
    }

    pub(crate) fn fire_pointer_down(&mut self) {
        if let Some(cb) = self.hooks.on_pointer_down.as_mut() {
            cb();
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.clock.cancel();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Scheduler stub: counts requests, never ticks by itself.
    #[derive(Default)]
    pub struct ManualClock {
        pub requests: Cell<usize>,
        pub cancels: Cell<usize>,
    }

    impl FrameScheduler for Rc<ManualClock> {
        fn request_tick(&self) {
            self.requests.set(self.requests.get() + 1);
        }

        fn cancel(&self) {
            self.cancels.set(self.cancels.get() + 1);
        }
    }

    pub struct Harness {
        pub carousel: Carousel,
        pub clock: Rc<ManualClock>,
        pub selections: Rc<RefCell<Vec<usize>>>,
        pub swaps: Rc<Cell<usize>>,
    }

    impl Harness {
        pub fn new(item_count: usize) -> Self {
            let clock = Rc::new(ManualClock::default());
            let selections: Rc<RefCell<Vec<usize>>> = Rc::default();
            let swaps: Rc<Cell<usize>> = Rc::default();

            let hooks = CarouselHooks::new()
                .on_select({
                    let selections = selections.clone();
                    move |i| selections.borrow_mut().push(i)
                })
                .on_swap_right({
                    let swaps = swaps.clone();
                    move || swaps.set(swaps.get() + 1)
                });

            let carousel = Carousel::new(item_count, hooks, Box::new(clock.clone()))
                .expect("valid item count");

            Self {
                carousel,
                clock,
                selections,
                swaps,
            }
        }

        /// Run the animation loop to completion, as the frame clock would.
        pub fn settle(&mut self) {
            let mut frames = 0;
            while self.carousel.tick() {
                frames += 1;
                assert!(frames < 1000, "animation failed to settle");
            }
        }
    }

    #[test]
    fn zero_items_is_rejected() {
        let clock = Rc::new(ManualClock::default());
        let result = Carousel::new(0, CarouselHooks::new(), Box::new(clock));
        assert!(matches!(result, Err(CarouselError::InvalidItemCount(0))));
    }

    #[test]
    fn item_count_change_resets_to_first_card() {
        let mut h = Harness::new(4);
        h.carousel.scroll_to(3);
        h.settle();
        assert_eq!(h.carousel.active_index(), 3);

        h.carousel.set_item_count(6).expect("valid item count");
        assert_eq!(h.carousel.active_index(), 0);
        assert_eq!(h.carousel.snapshot().rotation, 0.0);
        assert_eq!(h.carousel.item_count(), 6);
    }

    #[test]
    fn teardown_cancels_pending_frames_and_drag() {
        let mut h = Harness::new(3);
        h.carousel.pointer_down(100.0, PointerKind::Mouse);
        h.carousel.scroll_to(1);
        h.carousel.teardown();

        assert!(!h.carousel.is_animating());
        assert!(h.carousel.drag.is_none());
        assert!(h.clock.cancels.get() >= 1);
    }
}
