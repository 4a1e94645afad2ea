//! Card flip state machine.
//!
//! A card moves `FaceDown → Revealing → FaceUp`, back through `Hiding` when
//! a pair fails, and ends in the absorbing `Matched` state.
//!
//! Animation is modelled as state + elapsed time only. Renderers sample
//! [`FlipAnimation::progress`] or [`FlipAnimation::rotation_degrees`]; the
//! card itself never touches pixels.

use serde::{Deserialize, Serialize};

use crate::core::FaceId;

/// Coarse card state as seen by the presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    FaceDown,
    /// Turning towards face-up.
    Revealing,
    FaceUp,
    /// Turning back towards face-down.
    Hiding,
    Matched,
}

/// An in-progress flip.
///
/// The visible face swaps at the midpoint; the animation ends after the full
/// duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlipAnimation {
    to_face_up: bool,
    elapsed: f32,
    duration: f32,
    swapped: bool,
}

impl FlipAnimation {
    fn new(to_face_up: bool, duration: f32) -> Self {
        Self {
            to_face_up,
            elapsed: 0.0,
            duration,
            swapped: false,
        }
    }

    /// Direction of the flip.
    #[must_use]
    pub fn to_face_up(&self) -> bool {
        self.to_face_up
    }

    /// Fraction of the animation completed, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Whether the visible face has already swapped.
    #[must_use]
    pub fn has_swapped(&self) -> bool {
        self.swapped
    }

    /// Rotation about the vertical axis for the current frame.
    ///
    /// First half 0° to 90°, second half 90° to 180°. Negative when hiding.
    #[must_use]
    pub fn rotation_degrees(&self) -> f32 {
        let angle = self.progress() * 180.0;
        if self.to_face_up {
            angle
        } else {
            -angle
        }
    }

    fn advance(&mut self, dt: f32) -> FlipStep {
        self.elapsed += dt.max(0.0);

        let half = self.duration / 2.0;
        let swapped_now = !self.swapped && self.elapsed >= half;
        if swapped_now {
            self.swapped = true;
        }
        let finished = self.elapsed >= self.duration;

        match (swapped_now, finished) {
            (true, true) => FlipStep::SwappedAndFinished,
            (true, false) => FlipStep::FaceSwapped,
            (false, true) => FlipStep::Finished,
            (false, false) => FlipStep::Turning,
        }
    }
}

/// What happened to a card during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipStep {
    /// Not animating.
    Idle,
    /// Animating, nothing visible changed state.
    Turning,
    /// The midpoint was crossed; the other face now shows.
    FaceSwapped,
    /// The animation completed.
    Finished,
    /// Midpoint and end both crossed in one tick.
    SwappedAndFinished,
}

impl FlipStep {
    /// Whether the visible face changed this tick.
    #[must_use]
    pub fn swapped(self) -> bool {
        matches!(self, FlipStep::FaceSwapped | FlipStep::SwappedAndFinished)
    }

    /// Whether the animation ended this tick.
    #[must_use]
    pub fn finished(self) -> bool {
        matches!(self, FlipStep::Finished | FlipStep::SwappedAndFinished)
    }
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    face: FaceId,
    face_up: bool,
    matched: bool,
    animation: Option<FlipAnimation>,
}

impl Card {
    /// A face-down card showing `face` once revealed.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self {
            face,
            face_up: false,
            matched: false,
            animation: None,
        }
    }

    #[must_use]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Whether the front is currently showing.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The running flip, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&FlipAnimation> {
        self.animation.as_ref()
    }

    /// Current state. `Matched` takes priority over an in-flight reveal: a
    /// pair is matched on the second click, while its cards are still turning.
    #[must_use]
    pub fn state(&self) -> CardState {
        if self.matched {
            return CardState::Matched;
        }
        match (&self.animation, self.face_up) {
            (Some(anim), _) if anim.to_face_up => CardState::Revealing,
            (Some(_), _) => CardState::Hiding,
            (None, true) => CardState::FaceUp,
            (None, false) => CardState::FaceDown,
        }
    }

    /// Start turning face-up.
    ///
    /// Returns `false` without doing anything if the card is matched,
    /// already face-up, or mid-animation.
    pub fn request_flip(&mut self, duration: f32) -> bool {
        if self.matched || self.face_up || self.animation.is_some() {
            return false;
        }
        self.animation = Some(FlipAnimation::new(true, duration));
        true
    }

    /// Start turning back face-down.
    ///
    /// Only a face-up, unmatched, idle card turns back; anything else is
    /// left alone.
    pub fn reset_flip_animated(&mut self, duration: f32) -> bool {
        if !self.face_up || self.matched || self.animation.is_some() {
            return false;
        }
        self.animation = Some(FlipAnimation::new(false, duration));
        true
    }

    /// Lock the card as part of a found pair. Irreversible.
    pub fn mark_matched(&mut self) {
        self.matched = true;
    }

    /// Advance the running animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> FlipStep {
        let Some(animation) = self.animation.as_mut() else {
            return FlipStep::Idle;
        };

        let step = animation.advance(dt);
        if step.swapped() {
            self.face_up = animation.to_face_up;
        }
        if step.finished() {
            self.animation = None;
        }
        step
    }
}
