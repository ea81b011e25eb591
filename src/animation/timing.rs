//! Timing functions (easing curves) for animations.
//!
//! - [`TimingFunction::Linear`] - Constant speed (no easing)
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow
//! - [`TimingFunction::EaseInOut`] - Slow start and end, fast middle
//! - [`TimingFunction::Spring`] - Physics-based spring, driven by real time
//!
//! ```ignore
//! DrawerConfig::new(120.0, 480.0)
//!     .transition(Transition::new(250.0, TimingFunction::EaseOut))
//! ```

use super::spring::SpringConfig;

/// Timing function that controls the animation curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts fast, ends slow
    EaseOut,
    /// Starts slow, speeds up, then slows down
    EaseInOut,
    /// Spring physics simulation (can overshoot)
    Spring(SpringConfig),
}

impl TimingFunction {
    /// Evaluate the curve at normalized time `t` (0.0 to 1.0).
    ///
    /// Springs are stepped with real elapsed time by `AnimationState`, so
    /// they return `t` here.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            TimingFunction::Spring(_) => t,
        }
    }

    pub fn spring_config(&self) -> Option<&SpringConfig> {
        match self {
            TimingFunction::Spring(config) => Some(config),
            _ => None,
        }
    }
}
