use thiserror::Error;

use crate::animation::Transition;
use crate::widgets::{Color, Padding};

/// Fraction of the expanded height a drag must exceed to flip the drawer
pub const DEFAULT_SNAP_RATIO: f32 = 0.25;
/// Pointer travel before a press turns into a drag
pub const DEFAULT_DRAG_START_DISTANCE: f32 = 10.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawerError {
    #[error("collapsed height {min} is larger than expanded height {max}")]
    InvalidHeights { min: f32, max: f32 },
    #[error("expanded height must be positive, got {0}")]
    NonPositiveMaxHeight(f32),
    #[error("{name} must not be negative, got {value}")]
    NegativeDimension { name: &'static str, value: f32 },
    #[error("{name} must be a finite number")]
    NonFinite { name: &'static str },
    #[error("snap ratio must be in (0, 1], got {0}")]
    InvalidSnapRatio(f32),
}

pub type Result<T> = std::result::Result<T, DrawerError>;

fn check_dimension(name: &'static str, value: f32) -> Result<f32> {
    if !value.is_finite() {
        return Err(DrawerError::NonFinite { name });
    }
    if value < 0.0 {
        return Err(DrawerError::NegativeDimension { name, value });
    }
    Ok(value)
}

/// Collapsed and expanded heights. Fixed for the lifetime of a drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerGeometry {
    min_height: f32,
    max_height: f32,
}

impl DrawerGeometry {
    pub fn new(min_height: f32, max_height: f32) -> Result<Self> {
        let min_height = check_dimension("min_height", min_height)?;
        let max_height = check_dimension("max_height", max_height)?;
        if max_height <= 0.0 {
            return Err(DrawerError::NonPositiveMaxHeight(max_height));
        }
        if min_height > max_height {
            return Err(DrawerError::InvalidHeights {
                min: min_height,
                max: max_height,
            });
        }
        Ok(Self {
            min_height,
            max_height,
        })
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// How far the panel moves between its two resting positions
    pub fn travel(&self) -> f32 {
        self.max_height - self.min_height
    }
}

/// Pass-through presentation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerStyle {
    pub shadow_color: Color,
    pub shadow_radius: f32,
    pub corner_radius: f32,
    pub background: Color,
    pub indicator_color: Color,
    pub indicator_width: f32,
    pub indicator_height: f32,
    pub indicator_radius: f32,
    pub indicator_padding: Padding,
}

impl Default for DrawerStyle {
    fn default() -> Self {
        Self {
            shadow_color: Color::TRANSPARENT,
            shadow_radius: 5.0,
            corner_radius: 30.0,
            background: Color::from_hex(0xF2F2F7),
            indicator_color: Color::from_hex(0x3C3C43).with_alpha(0.6),
            indicator_width: 60.0,
            indicator_height: 6.0,
            indicator_radius: 16.0,
            indicator_padding: Padding::all(16.0),
        }
    }
}

impl DrawerStyle {
    /// Height taken by the indicator row above the content
    pub fn header_height(&self) -> f32 {
        self.indicator_height + self.indicator_padding.vertical()
    }

    fn validate(&self) -> Result<()> {
        check_dimension("shadow_radius", self.shadow_radius)?;
        check_dimension("corner_radius", self.corner_radius)?;
        check_dimension("indicator_width", self.indicator_width)?;
        check_dimension("indicator_height", self.indicator_height)?;
        check_dimension("indicator_radius", self.indicator_radius)?;
        let padding = self.indicator_padding;
        for value in [padding.top, padding.right, padding.bottom, padding.left] {
            check_dimension("indicator_padding", value)?;
        }
        Ok(())
    }
}

/// Everything needed to build a drawer, with builder-style setters.
///
/// ```ignore
/// let config = DrawerConfig::new(120.0, 480.0)
///     .shadow_color(Color::BLACK.with_alpha(0.2))
///     .corner_radius(24.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerConfig {
    pub min_height: f32,
    pub max_height: f32,
    pub style: DrawerStyle,
    pub snap_ratio: f32,
    pub drag_start_distance: f32,
    pub transition: Transition,
}

impl DrawerConfig {
    pub fn new(min_height: f32, max_height: f32) -> Self {
        Self {
            min_height,
            max_height,
            style: DrawerStyle::default(),
            snap_ratio: DEFAULT_SNAP_RATIO,
            drag_start_distance: DEFAULT_DRAG_START_DISTANCE,
            transition: Transition::interactive(),
        }
    }

    pub fn shadow_color(mut self, color: Color) -> Self {
        self.style.shadow_color = color;
        self
    }

    pub fn shadow_radius(mut self, radius: f32) -> Self {
        self.style.shadow_radius = radius;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.style.corner_radius = radius;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.style.background = color;
        self
    }

    pub fn indicator_color(mut self, color: Color) -> Self {
        self.style.indicator_color = color;
        self
    }

    pub fn style(mut self, style: DrawerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn snap_ratio(mut self, ratio: f32) -> Self {
        self.snap_ratio = ratio;
        self
    }

    pub fn drag_start_distance(mut self, distance: f32) -> Self {
        self.drag_start_distance = distance;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Validated heights
    pub fn geometry(&self) -> Result<DrawerGeometry> {
        DrawerGeometry::new(self.min_height, self.max_height)
    }

    pub fn validate(&self) -> Result<DrawerGeometry> {
        let geometry = self.geometry()?;
        if !(self.snap_ratio > 0.0 && self.snap_ratio <= 1.0) {
            return Err(DrawerError::InvalidSnapRatio(self.snap_ratio));
        }
        check_dimension("drag_start_distance", self.drag_start_distance)?;
        self.style.validate()?;

        let snap_distance = geometry.max_height() * self.snap_ratio;
        if snap_distance < self.drag_start_distance {
            log::warn!(
                "snap distance {:.1} is below the drag start distance {:.1}; every drag will toggle",
                snap_distance,
                self.drag_start_distance
            );
        }
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_travel() {
        let geometry = DrawerGeometry::new(100.0, 500.0).unwrap();
        assert_eq!(geometry.travel(), 400.0);
    }

    #[test]
    fn test_equal_heights_are_allowed() {
        let geometry = DrawerGeometry::new(200.0, 200.0).unwrap();
        assert_eq!(geometry.travel(), 0.0);
    }

    #[test]
    fn test_inverted_heights_are_rejected() {
        assert_eq!(
            DrawerGeometry::new(500.0, 100.0),
            Err(DrawerError::InvalidHeights {
                min: 500.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn test_bad_dimensions_are_rejected() {
        assert!(matches!(
            DrawerGeometry::new(-1.0, 100.0),
            Err(DrawerError::NegativeDimension { name: "min_height", .. })
        ));
        assert_eq!(
            DrawerGeometry::new(0.0, 0.0),
            Err(DrawerError::NonPositiveMaxHeight(0.0))
        );
        assert_eq!(
            DrawerGeometry::new(0.0, f32::NAN),
            Err(DrawerError::NonFinite { name: "max_height" })
        );
    }

    #[test]
    fn test_defaults() {
        let config = DrawerConfig::new(100.0, 500.0);
        assert_eq!(config.style.shadow_color, Color::TRANSPARENT);
        assert_eq!(config.style.shadow_radius, 5.0);
        assert_eq!(config.style.corner_radius, 30.0);
        assert_eq!(config.snap_ratio, 0.25);
        assert_eq!(config.style.header_height(), 38.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_snap_ratio_bounds() {
        let config = DrawerConfig::new(100.0, 500.0);
        assert_eq!(
            config.clone().snap_ratio(0.0).validate(),
            Err(DrawerError::InvalidSnapRatio(0.0))
        );
        assert!(config.clone().snap_ratio(1.0).validate().is_ok());
        assert!(config.snap_ratio(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_negative_style_is_rejected() {
        let result = DrawerConfig::new(100.0, 500.0)
            .corner_radius(-4.0)
            .validate();
        assert!(matches!(
            result,
            Err(DrawerError::NegativeDimension { name: "corner_radius", .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = DrawerGeometry::new(300.0, 200.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "collapsed height 300 is larger than expanded height 200"
        );
    }
}
