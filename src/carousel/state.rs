use super::ARC_SIZE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("carousel requires at least one item, got {0}")]
    InvalidItemCount(usize),
}

/// Owned rotation state for one carousel instance.
///
/// Angles are degrees. Card 0 rests at 0; advancing rotates negative, so
/// the legal range runs from 0 down to the terminal angle of the last
/// card, with a small slack band permitted during drags.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    /// The currently rendered rotation.
    pub(crate) committed: f64,
    /// The rotation the integrator is animating toward.
    pub(crate) target: f64,
    /// Card currently in front, derived from the committed angle.
    pub(crate) active: usize,
    pub(crate) len: usize,
    pub(crate) animating: bool,
}

impl CarouselState {
    pub fn new(len: usize) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::InvalidItemCount(0));
        }
        Ok(Self {
            committed: 0.0,
            target: 0.0,
            active: 0,
            len,
            animating: false,
        })
    }

    /// Angular distance between adjacent cards.
    pub fn step_angle(&self) -> f64 {
        ARC_SIZE / self.len as f64
    }

    /// Resting angle of the last card. Equals 0 for a single card.
    pub fn terminal_angle(&self) -> f64 {
        -(self.len as f64 - 1.0) * self.step_angle()
    }

    /// Resting angle that puts `index` in front.
    pub fn angle_for(&self, index: usize) -> f64 {
        -self.step_angle() * index as f64
    }

    /// Which card an angle puts in front. Floored modulo keeps the
    /// result in `[0, len)` for any finite input, negative included.
    pub fn angle_to_index(angle: f64, len: usize) -> usize {
        let raw = (-angle / ARC_SIZE * len as f64).round() as i64;
        raw.rem_euclid(len as i64) as usize
    }
}

/// Per-frame hand-off to the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSnapshot {
    /// Rotation to apply to the card ring, degrees.
    pub rotation: f64,
    pub active: usize,
    /// The first card is in front and close enough to its rest angle
    /// that an upward escape is available.
    pub can_scroll_up: bool,
    /// Same for the last card and a downward escape.
    pub can_scroll_down: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angle_is_first_card() {
        for len in 1..=12 {
            assert_eq!(CarouselState::angle_to_index(0.0, len), 0);
        }
    }

    #[test]
    fn rest_angles_round_trip() {
        for len in 1..=12 {
            let state = CarouselState::new(len).expect("non-zero len");
            for index in 0..len {
                let angle = state.angle_for(index);
                assert_eq!(CarouselState::angle_to_index(angle, len), index);
            }
        }
    }

    #[test]
    fn index_is_always_in_range() {
        let angles = [
            -1000.0, -151.0, -150.0, -149.9, -75.3, -0.0001, 0.0, 0.0001, 3.0, 150.0, 1000.0,
        ];
        for len in 1..=9 {
            for angle in angles {
                let index = CarouselState::angle_to_index(angle, len);
                assert!(index < len, "angle {angle} len {len} gave {index}");
            }
        }
    }

    #[test]
    fn positive_angles_wrap_without_going_negative() {
        // round(-3/150 * 5) == 0, a positive overshoot stays on card 0
        assert_eq!(CarouselState::angle_to_index(3.0, 5), 0);
        // a full positive step wraps to the far end via floored modulo
        assert_eq!(CarouselState::angle_to_index(30.0, 5), 4);
    }

    #[test]
    fn terminal_angle_matches_last_rest_angle() {
        for len in 1..=8 {
            let state = CarouselState::new(len).expect("non-zero len");
            assert_eq!(state.terminal_angle(), state.angle_for(len - 1));
        }
    }
}
