//! Spring physics
//!
//! A damped harmonic oscillator integrated with fourth-order Runge-Kutta:
//!
//!   a = (-stiffness * (x - target) - damping * v) / mass
//!
//! Springs are interruptible: [`Spring::set_target`] keeps the current value
//! and velocity, so redirecting an animation mid-flight never snaps.
//!
//! A spring is considered settled once both the distance to its target and
//! its speed fall below small thresholds. At that point the value is snapped
//! exactly onto the target so callers can compare against it.

use serde::{Deserialize, Serialize};

/// Largest frame delta integrated in one call. Longer gaps (a stalled frame,
/// a backgrounded window) are truncated instead of integrated.
const MAX_FRAME_DT: f32 = 0.1;

/// Integration substep. Frames are split so stiff springs stay stable.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Distance to target below which the spring may settle
const REST_DISTANCE: f32 = 0.1;

/// Speed below which the spring may settle
const REST_VELOCITY: f32 = 0.5;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Fast and nearly critically damped
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Quick with a small overshoot
    pub const fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    /// Slow and soft
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible oscillation before settling
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Bottom sheet slide: mildly elastic, settles in well under a second
    pub const fn sheet() -> Self {
        Self::new(180.0, 18.0, 1.0)
    }

    /// Damping ratio (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::sheet()
    }
}

/// A single animated scalar driven by spring physics
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            settled: true,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Redirect the spring. Value and velocity carry over.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.settled = self.value == target && self.velocity == 0.0;
    }

    /// Move the value directly (e.g. while a pointer holds it), dropping velocity
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
        self.settled = self.value == self.target;
    }

    /// Jump to `value` and rest there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.settled = true;
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.settled || dt.is_nan() || dt <= 0.0 {
            return;
        }

        let mut remaining = dt.min(MAX_FRAME_DT);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.integrate(h);
            remaining -= h;
        }

        if !self.value.is_finite() || !self.velocity.is_finite() {
            // Degenerate parameters blew the integration up; land on target
            tracing::warn!(
                "spring diverged (stiffness={}, damping={}, mass={}), snapping to target",
                self.config.stiffness,
                self.config.damping,
                self.config.mass
            );
            self.snap_to(self.target);
            return;
        }

        if (self.value - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    /// One RK4 step of size `h`
    fn integrate(&mut self, h: f32) {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        let target = self.target;
        let mass = if mass > 0.0 { mass } else { 1.0 };
        let accel = |x: f32, v: f32| (-stiffness * (x - target) - damping * v) / mass;

        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = accel(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = accel(x + 0.5 * h * k1x, v + 0.5 * h * k1v);

        let k3x = v + 0.5 * h * k2v;
        let k3v = accel(x + 0.5 * h * k2x, v + 0.5 * h * k2v);

        let k4x = v + h * k3v;
        let k4v = accel(x + h * k3x, v + h * k3v);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}
