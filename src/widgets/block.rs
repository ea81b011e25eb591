use crate::layout::{Constraints, Size};
use crate::renderer::{CornerRadii, PaintContext};

use super::{Color, Rect, Widget};

/// A filled box with a preferred height that stretches to the offered width.
///
/// Useful as drawer content placeholder and in tests.
pub struct Block {
    height: f32,
    color: Color,
    radius: f32,
    size: Size,
}

pub fn block(height: f32, color: Color) -> Block {
    Block {
        height,
        color,
        radius: 0.0,
        size: Size::zero(),
    }
}

impl Block {
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl Widget for Block {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            constraints.min_width
        };
        self.size = constraints.constrain(Size::new(width, self.height));
        self.size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.draw_rounded_rect(
            Rect::from_size(self.size),
            self.color,
            CornerRadii::all(self.radius),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;

    #[test]
    fn test_block_fills_width_and_clamps_height() {
        let mut content = block(300.0, Color::WHITE);
        let size = content.layout(Constraints::loose(Size::new(390.0, 200.0)));
        assert_eq!(size, Size::new(390.0, 200.0));
    }

    #[test]
    fn test_block_paints_at_origin() {
        let mut content = block(40.0, Color::BLACK).corner_radius(4.0);
        content.layout(Constraints::loose(Size::new(100.0, 100.0)));

        let mut ctx = PaintContext::new();
        content.paint(&mut ctx);
        assert_eq!(
            ctx.commands(),
            &[DrawCommand::rounded_rect(
                Rect::new(0.0, 0.0, 100.0, 40.0),
                Color::BLACK,
                CornerRadii::all(4.0)
            )]
        );
    }
}
