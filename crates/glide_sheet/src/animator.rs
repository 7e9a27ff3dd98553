//! Offset animation
//!
//! [`OffsetAnimator`] owns the sheet's vertical translation and the spring
//! that moves it between the two named rest positions. `Visible` resolves
//! to offset 0, `Hidden` to the measured sheet height.

use glide_animation::{Spring, SpringConfig};
use serde::{Deserialize, Serialize};

/// Named animation targets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Fully open, offset 0
    Visible,
    /// Fully closed, offset = sheet height
    #[default]
    Hidden,
}

impl Visibility {
    /// Resolve to a concrete offset for a sheet of `height`
    pub fn resolve(self, height: f32) -> f32 {
        match self {
            Visibility::Visible => 0.0,
            Visibility::Hidden => height,
        }
    }
}

/// Progress notifications emitted by [`OffsetAnimator::tick`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorEvent {
    /// Interpolated offset for this frame
    Frame(f32),
    /// The animation came to rest at this offset
    Settled(f32),
}

/// Spring-driven controller for the sheet offset
#[derive(Clone, Debug)]
pub struct OffsetAnimator {
    spring: Spring,
    target: Visibility,
    height: f32,
    animating: bool,
}

impl OffsetAnimator {
    /// Create an animator resting hidden; place it with [`jump_to`](Self::jump_to)
    pub fn new(config: SpringConfig, height: f32) -> Self {
        Self {
            spring: Spring::new(config, Visibility::Hidden.resolve(height)),
            target: Visibility::Hidden,
            height,
            animating: false,
        }
    }

    /// Current offset, clamped so overshoot never travels past the hidden position
    pub fn offset(&self) -> f32 {
        self.spring.value().min(self.height.max(0.0))
    }

    pub fn target(&self) -> Visibility {
        self.target
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn velocity(&self) -> f32 {
        self.spring.velocity()
    }

    /// Whether an animation is in flight and has not yet settled
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Start or redirect an animation toward `target`.
    ///
    /// An in-flight animation continues from its current offset and velocity.
    pub fn drive_to(&mut self, target: Visibility) {
        self.target = target;
        self.spring.set_target(target.resolve(self.height));
        self.animating = true;
    }

    /// Rest at `target` immediately, without animating
    pub fn jump_to(&mut self, target: Visibility) {
        self.target = target;
        self.spring.snap_to(target.resolve(self.height));
        self.animating = false;
    }

    /// Place the sheet directly (pointer-driven), cancelling any animation
    pub fn set_offset(&mut self, offset: f32) {
        self.spring.set_value(offset);
        self.animating = false;
    }

    /// Advance the animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Option<AnimatorEvent> {
        if !self.animating {
            return None;
        }

        self.spring.step(dt);

        if self.spring.is_settled() {
            self.animating = false;
            let rest = self.target.resolve(self.height);
            self.spring.snap_to(rest);
            tracing::trace!("offset settled at {rest}");
            return Some(AnimatorEvent::Settled(rest));
        }

        let offset = self.offset();
        tracing::trace!("offset frame {offset:.2}");
        Some(AnimatorEvent::Frame(offset))
    }

    /// Record a new sheet height without moving the sheet
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Follow a new sheet height.
    ///
    /// A sheet resting hidden stays flush with the new height; one moving
    /// toward hidden is redirected to it.
    pub fn retarget_height(&mut self, height: f32) {
        self.height = height;
        if self.target != Visibility::Hidden {
            return;
        }

        if self.animating {
            self.spring.set_target(height);
        } else {
            self.spring.snap_to(height);
        }
    }

    /// Openness in [0, 1]: 1 when fully visible, 0 when fully hidden
    pub fn progress(&self) -> f32 {
        if !(self.height.is_finite() && self.height > 0.0) {
            return match self.target {
                Visibility::Visible => 1.0,
                Visibility::Hidden => 0.0,
            };
        }
        (1.0 - self.offset() / self.height).clamp(0.0, 1.0)
    }

}
