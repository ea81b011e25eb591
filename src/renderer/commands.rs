//! Draw command definitions for the recorded display list.

use crate::widgets::{Color, Rect};

/// Drop shadow behind a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in logical pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in logical pixels
    pub blur: f32,
    /// Spread amount in logical pixels (expands shadow)
    pub spread: f32,
    /// Shadow color
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: (f32, f32), blur: f32, spread: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            spread,
            color,
        }
    }

    /// Centered shadow with no spread
    pub fn around(blur: f32, color: Color) -> Self {
        Self::new((0.0, 0.0), blur, 0.0, color)
    }
}

/// Per-corner radii, clockwise from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Round only the top edge, square bottom.
    pub const fn top(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: 0.0,
            bottom_left: 0.0,
        }
    }
}

/// A single draw operation, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rounded rectangle with an optional shadow behind it
    RoundedRect {
        rect: Rect,
        color: Color,
        radii: CornerRadii,
        shadow: Option<Shadow>,
    },
    /// Clip everything until the matching `PopClip` to a rounded rectangle
    PushClip { rect: Rect, radii: CornerRadii },
    PopClip,
}

impl DrawCommand {
    pub fn rounded_rect(rect: Rect, color: Color, radii: CornerRadii) -> Self {
        Self::RoundedRect {
            rect,
            color,
            radii,
            shadow: None,
        }
    }

    /// Bounds of the command, if it has any
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::RoundedRect { rect, .. } | Self::PushClip { rect, .. } => Some(*rect),
            Self::PopClip => None,
        }
    }
}
