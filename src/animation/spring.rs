/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

impl SpringConfig {
    /// Default spring with pleasant overshoot
    pub const DEFAULT: Self = Self {
        mass: 1.0,
        stiffness: 180.0,
        damping: 11.0,
    };

    /// Short, nearly critically damped spring for content that follows a
    /// finger. Equivalent to `from_response(0.15, 0.86)`.
    pub const INTERACTIVE: Self = Self {
        mass: 1.0,
        stiffness: 1754.6,
        damping: 72.05,
    };

    /// Build a spring from a response time (seconds per oscillation, ignoring
    /// damping) and a damping fraction (1.0 = critically damped).
    pub fn from_response(response: f32, damping_fraction: f32) -> Self {
        let response = response.max(1e-3);
        let omega = std::f32::consts::TAU / response;
        Self {
            mass: 1.0,
            stiffness: omega * omega,
            damping: 2.0 * damping_fraction * omega,
        }
    }
}

/// Never integrate more than this per frame, a stalled frame just slows the motion
const MAX_FRAME_SECS: f32 = 0.033;
/// Stiff springs need small steps to stay stable with semi-implicit Euler
const SUBSTEP_SECS: f32 = 1.0 / 240.0;

/// State for spring physics simulation
#[derive(Clone, Debug)]
pub struct SpringState {
    /// Current position (0.0 = start, 1.0 = target)
    pub position: f32,
    /// Current velocity, in progress units per second
    pub velocity: f32,
    /// Last evaluation time
    pub last_t: f32,
}

impl SpringState {
    /// Create a new spring state at rest at position 0.0
    pub fn new() -> Self {
        Self::with_velocity(0.0)
    }

    /// Start at position 0.0 already moving, used when a running animation
    /// is retargeted so the motion stays continuous.
    pub fn with_velocity(velocity: f32) -> Self {
        Self {
            position: 0.0,
            velocity,
            last_t: 0.0,
        }
    }

    /// Step the simulation to `elapsed_secs` since the animation started.
    /// Returns the current position, which can overshoot 1.0.
    pub fn step(&mut self, elapsed_secs: f32, config: &SpringConfig) -> f32 {
        let dt = (elapsed_secs - self.last_t).max(0.0);
        self.last_t = elapsed_secs;

        if dt < 1e-6 {
            return self.position;
        }

        let mut remaining = dt.min(MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_SECS);
            self.integrate(h, config);
            remaining -= h;
        }

        self.position
    }

    fn integrate(&mut self, dt: f32, config: &SpringConfig) {
        let displacement = self.position - 1.0;
        let force = -config.stiffness * displacement - config.damping * self.velocity;
        let acceleration = force / config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Check if the spring has settled (position near target, velocity near zero)
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - 1.0).abs() < threshold && self.velocity.abs() < threshold
    }
}

impl Default for SpringState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulate(config: &SpringConfig, frames: usize) -> (SpringState, f32) {
        let mut state = SpringState::new();
        let mut max_position: f32 = 0.0;
        for i in 1..=frames {
            let pos = state.step(i as f32 / 60.0, config);
            max_position = max_position.max(pos);
        }
        (state, max_position)
    }

    #[test]
    fn test_default_spring_reaches_target() {
        let (state, _) = simulate(&SpringConfig::DEFAULT, 120);
        assert!(
            (state.position - 1.0).abs() < 0.1,
            "Spring should settle near target, got {}",
            state.position
        );
    }

    #[test]
    fn test_default_spring_overshoots() {
        let (_, max_position) = simulate(&SpringConfig::DEFAULT, 120);
        assert!(max_position > 1.0, "max was {}", max_position);
    }

    #[test]
    fn test_interactive_spring_settles_quickly() {
        let (state, max_position) = simulate(&SpringConfig::INTERACTIVE, 30);
        assert!(state.is_settled(0.01), "state after 0.5s: {:?}", state);
        assert!(max_position < 1.02, "overshoot too large: {}", max_position);
    }

    #[test]
    fn test_from_response_matches_interactive_preset() {
        let derived = SpringConfig::from_response(0.15, 0.86);
        let preset = SpringConfig::INTERACTIVE;
        assert!((derived.stiffness - preset.stiffness).abs() < 1.0);
        assert!((derived.damping - preset.damping).abs() < 0.1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut state = SpringState::new();
        let config = SpringConfig::DEFAULT;
        let mut reference = SpringState::new();

        state.step(1.0, &config);
        reference.step(MAX_FRAME_SECS, &config);
        assert_eq!(state.position, reference.position);
    }
}
