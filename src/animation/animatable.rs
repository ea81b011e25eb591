/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// Linear interpolation between two values.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`; t may leave [0, 1] on overshoot
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;

    /// Signed scalar distance from `from` to `to`, used to carry spring
    /// velocity across a retarget. Types without a meaningful distance return None.
    fn span(from: &Self, to: &Self) -> Option<f32> {
        let _ = (from, to);
        None
    }
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }

    fn span(from: &Self, to: &Self) -> Option<f32> {
        Some(to - from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
        // Overshoot
        assert_eq!(f32::lerp(&0.0, &10.0, 1.5), 15.0);
    }

    #[test]
    fn test_f32_span_is_signed() {
        assert_eq!(f32::span(&400.0, &0.0), Some(-400.0));
    }
}
