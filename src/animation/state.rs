use std::time::Instant;

use super::{Animatable, SpringConfig, SpringState, Transition};

/// Springs closer than this to their target (in progress units) snap onto it
const SETTLE_THRESHOLD: f32 = 0.005;

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running, in its delay, or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// Animation state for one animatable property.
///
/// Time is passed in explicitly (`*_at` methods) so a frame loop can advance
/// every animation against the same timestamp.
pub struct AnimationState<T: Animatable> {
    current: T,
    target: T,
    start: T,
    /// 0.0 when (re)started, 1.0 once finished
    progress: f32,
    start_time: Instant,
    transition: Transition,
    spring_state: Option<SpringState>,
    /// Whether a first real value has been applied
    initialized: bool,
}

impl<T: Animatable> AnimationState<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        let spring_state = transition
            .timing
            .spring_config()
            .map(|_| SpringState::new());
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            progress: 1.0,
            start_time: Instant::now(),
            transition,
            spring_state,
            initialized: false,
        }
    }

    /// Start animating to a new target value from now
    pub fn animate_to(&mut self, new_target: T) {
        self.animate_to_at(new_target, Instant::now());
    }

    /// Start animating to a new target value from `now`.
    ///
    /// Retargeting a running spring keeps its current velocity, so a target
    /// that moves every frame (a drag) produces continuous motion.
    pub fn animate_to_at(&mut self, new_target: T, now: Instant) {
        if new_target == self.target {
            return;
        }

        let velocity = self.velocity();
        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = now;

        if self.spring_state.is_some() {
            let normalized = match (velocity, T::span(&self.start, &self.target)) {
                (Some(v), Some(span)) if span.abs() > 1e-3 => v / span,
                _ => 0.0,
            };
            self.spring_state = Some(SpringState::with_velocity(normalized));
        }
    }

    /// Velocity in value units per second, if a spring is in motion
    pub fn velocity(&self) -> Option<f32> {
        if !self.is_animating() {
            return None;
        }
        let spring = self.spring_state.as_ref()?;
        T::span(&self.start, &self.target).map(|span| spring.velocity * span)
    }

    /// Advance to `now` and report whether the value changed
    pub fn advance_at(&mut self, now: Instant) -> AdvanceResult<T> {
        if !self.is_animating() {
            return AdvanceResult::NoChange;
        }

        let elapsed_ms = now.saturating_duration_since(self.start_time).as_secs_f32() * 1000.0
            - self.transition.delay_ms;
        if elapsed_ms <= 0.0 {
            return AdvanceResult::NoChange;
        }

        let (eased_t, finished) = match self.spring_state.as_mut() {
            Some(spring) => {
                let config = self
                    .transition
                    .timing
                    .spring_config()
                    .copied()
                    .unwrap_or(SpringConfig::DEFAULT);
                let position = spring.step(elapsed_ms / 1000.0, &config);
                (position, spring.is_settled(SETTLE_THRESHOLD))
            }
            None => {
                let t = (elapsed_ms / self.transition.duration_ms.max(f32::EPSILON)).min(1.0);
                (self.transition.timing.evaluate(t), t >= 1.0)
            }
        };

        let new_value = if finished {
            self.progress = 1.0;
            self.target.clone()
        } else {
            self.progress = 0.5;
            T::lerp(&self.start, &self.target, eased_t)
        };

        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Set value immediately without animation (first layout, for example)
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.progress = 1.0;
        self.initialized = true;
        if let Some(spring) = self.spring_state.as_mut() {
            *spring = SpringState::new();
        }
    }

    /// Check if animation has never been initialized (first layout)
    pub fn is_initial(&self) -> bool {
        !self.initialized
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::TimingFunction;

    fn run_frames(state: &mut AnimationState<f32>, start: Instant, frames: u64) {
        for i in 1..=frames {
            state.advance_at(start + Duration::from_millis(i * 16));
        }
    }

    #[test]
    fn test_animation_state_new() {
        let state = AnimationState::new(0.0f32, Transition::new(300.0, TimingFunction::Linear));

        assert_eq!(*state.current(), 0.0);
        assert_eq!(*state.target(), 0.0);
        assert!(!state.is_animating());
        assert!(state.is_initial());
    }

    #[test]
    fn test_linear_animation_reaches_target() {
        let mut state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        let start = Instant::now();
        state.animate_to_at(100.0, start);

        let halfway = state.advance_at(start + Duration::from_millis(50));
        assert!(halfway.is_changed());
        assert!((*state.current() - 50.0).abs() < 1e-3);

        state.advance_at(start + Duration::from_millis(150));
        assert_eq!(*state.current(), 100.0);
        assert!(!state.is_animating());
        assert_eq!(
            state.advance_at(start + Duration::from_millis(200)),
            AdvanceResult::NoChange
        );
    }

    #[test]
    fn test_delay_holds_value() {
        let transition = Transition::new(100.0, TimingFunction::Linear).delay(50.0);
        let mut state = AnimationState::new(0.0f32, transition);
        let start = Instant::now();
        state.animate_to_at(10.0, start);

        assert_eq!(
            state.advance_at(start + Duration::from_millis(30)),
            AdvanceResult::NoChange
        );
        assert!(state.is_animating());
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut state = AnimationState::new(0.0f32, Transition::new(300.0, TimingFunction::Linear));
        let start = Instant::now();
        state.animate_to_at(100.0, start);
        state.animate_to_at(100.0, start + Duration::from_millis(100));
        assert_eq!(state.start_time, start);
    }

    #[test]
    fn test_spring_settles_exactly_on_target() {
        let mut state = AnimationState::new(400.0f32, Transition::interactive());
        let start = Instant::now();
        state.animate_to_at(0.0, start);
        run_frames(&mut state, start, 60);

        assert_eq!(*state.current(), 0.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_retarget_keeps_spring_velocity() {
        let mut state = AnimationState::new(0.0f32, Transition::interactive());
        let start = Instant::now();
        state.animate_to_at(100.0, start);
        run_frames(&mut state, start, 3);

        let before = state.velocity().expect("spring should be moving");
        assert!(before > 0.0);

        let retarget_at = start + Duration::from_millis(48);
        state.animate_to_at(200.0, retarget_at);
        let after = state.velocity().expect("spring should still be moving");
        assert!((after - before).abs() < 1e-2 * before.abs());
    }

    #[test]
    fn test_set_immediate() {
        let mut state = AnimationState::new(0.0f32, Transition::new(300.0, TimingFunction::Linear));
        state.animate_to(100.0);
        state.set_immediate(50.0);

        assert_eq!(*state.current(), 50.0);
        assert_eq!(*state.target(), 50.0);
        assert!(!state.is_animating());
        assert!(!state.is_initial());
    }
}
