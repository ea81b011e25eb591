//! Display-list recording.
//!
//! Widgets paint into a [`PaintContext`], which records [`DrawCommand`]s in
//! surface coordinates. Rasterizing the list is the job of whatever backend
//! the host plugs in.

pub mod commands;

pub use commands::{CornerRadii, DrawCommand, Shadow};

use crate::widgets::{Color, Rect};

#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
    /// Accumulated translations, the last entry is the active origin
    origin_stack: Vec<(f32, f32)>,
    clip_depth: usize,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the recorded commands for reuse, keeping allocations
    pub fn clear(&mut self) {
        self.commands.clear();
        self.origin_stack.clear();
        self.clip_depth = 0;
    }

    fn origin(&self) -> (f32, f32) {
        self.origin_stack.last().copied().unwrap_or((0.0, 0.0))
    }

    fn to_surface(&self, rect: Rect) -> Rect {
        let (dx, dy) = self.origin();
        rect.offset(dx, dy)
    }

    /// Move the local origin by (dx, dy) until the matching `pop_translation`
    pub fn push_translation(&mut self, dx: f32, dy: f32) {
        let (x, y) = self.origin();
        self.origin_stack.push((x + dx, y + dy));
    }

    pub fn pop_translation(&mut self) {
        self.origin_stack.pop();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rounded_rect(rect, color, CornerRadii::default());
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radii: CornerRadii) {
        let rect = self.to_surface(rect);
        self.commands.push(DrawCommand::rounded_rect(rect, color, radii));
    }

    pub fn draw_rounded_rect_with_shadow(
        &mut self,
        rect: Rect,
        color: Color,
        radii: CornerRadii,
        shadow: Shadow,
    ) {
        let rect = self.to_surface(rect);
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            color,
            radii,
            shadow: Some(shadow),
        });
    }

    pub fn push_clip(&mut self, rect: Rect, radii: CornerRadii) {
        let rect = self.to_surface(rect);
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip { rect, radii });
    }

    pub fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            log::warn!("pop_clip without a matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.origin_stack.clear();
        self.clip_depth = 0;
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translations_compose() {
        let mut ctx = PaintContext::new();
        ctx.push_translation(10.0, 20.0);
        ctx.push_translation(5.0, 5.0);
        ctx.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        ctx.pop_translation();
        ctx.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        ctx.pop_translation();

        let rects: Vec<_> = ctx.commands().iter().filter_map(DrawCommand::rect).collect();
        assert_eq!(rects[0], Rect::new(15.0, 25.0, 4.0, 4.0));
        assert_eq!(rects[1], Rect::new(10.0, 20.0, 4.0, 4.0));
    }

    #[test]
    fn test_unbalanced_pop_clip_is_ignored() {
        let mut ctx = PaintContext::new();
        ctx.pop_clip();
        assert!(ctx.commands().is_empty());

        ctx.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0), CornerRadii::top(8.0));
        ctx.pop_clip();
        assert_eq!(ctx.commands().len(), 2);
        assert_eq!(ctx.commands()[1], DrawCommand::PopClip);
    }

    #[test]
    fn test_shadow_is_recorded() {
        let mut ctx = PaintContext::new();
        let shadow = Shadow::around(5.0, Color::BLACK);
        ctx.draw_rounded_rect_with_shadow(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::WHITE,
            CornerRadii::all(2.0),
            shadow,
        );
        assert!(matches!(
            &ctx.take_commands()[0],
            DrawCommand::RoundedRect { shadow: Some(s), .. } if *s == shadow
        ));
        assert!(ctx.commands().is_empty());
    }
}
