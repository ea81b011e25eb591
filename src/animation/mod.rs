mod animatable;
mod spring;
mod state;
mod timing;

pub use animatable::Animatable;
pub use spring::{SpringConfig, SpringState};
pub use state::{AdvanceResult, AnimationState};
pub use timing::TimingFunction;

/// Configuration for how a property should animate when it changes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration of the animation in milliseconds (ignored by springs)
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Create a spring-based transition with the given configuration
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            duration_ms: 1000.0,
            timing: TimingFunction::Spring(config),
            delay_ms: 0.0,
        }
    }

    /// The quick, tracking spring used for drag-driven motion
    pub fn interactive() -> Self {
        Self::spring(SpringConfig::INTERACTIVE)
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::interactive()
    }
}
