//! Bottom-anchored drawer that snaps between a collapsed and an expanded height.
//!
//! The pieces:
//! - [`DrawerController`] turns the shared open flag into a resting offset and
//!   applies the snap rule when a drag ends.
//! - [`GestureTracker`] holds the live drag translation for the duration of
//!   one drag and nothing longer.
//! - [`ToggleDrawer`] wires pointer events into both, animates the panel
//!   offset and paints the panel, the indicator and one of two content widgets.
//!
//! ```ignore
//! let is_open = create_signal(false);
//! let drawer = toggle_drawer(
//!     DrawerConfig::new(120.0, 480.0).shadow_color(Color::BLACK.with_alpha(0.2)),
//!     is_open.clone(),
//!     block(400.0, Color::WHITE),
//!     block(60.0, Color::WHITE),
//! )?;
//!
//! // Elsewhere, a button can open it; the drawer animates the same way a drag would.
//! is_open.set(true);
//! ```

pub mod config;
pub mod controller;
pub mod gesture;

use std::time::Instant;

pub use config::{DrawerConfig, DrawerError, DrawerGeometry, DrawerStyle, Result};
pub use controller::{resting_offset, snap_decision, snap_distance, DrawerController};
pub use gesture::{DragSession, GestureTracker};

use crate::animation::AnimationState;
use crate::layout::{Constraints, Size};
use crate::reactive::{create_effect, request_layout, request_paint, Effect, Signal};
use crate::renderer::{CornerRadii, PaintContext, Shadow};
use crate::widgets::{Event, EventResponse, MouseButton, Rect, Widget};

pub struct ToggleDrawer<L, S> {
    controller: DrawerController,
    tracker: GestureTracker,
    style: DrawerStyle,
    offset: AnimationState<f32>,
    large: L,
    small: S,
    viewport: Size,
    /// Open flag the visible content was last laid out for
    laid_out_open: Option<bool>,
    /// Re-queues layout when the open flag changes on this thread
    _state_watch: Effect,
}

/// Build a drawer. Fails if the configuration is inconsistent.
pub fn toggle_drawer<L: Widget, S: Widget>(
    config: DrawerConfig,
    is_open: Signal<bool>,
    large: L,
    small: S,
) -> Result<ToggleDrawer<L, S>> {
    let geometry = config.validate()?;
    let controller =
        DrawerController::new(is_open.clone(), geometry).with_snap_ratio(config.snap_ratio);

    let state_watch = create_effect(move || {
        let open = is_open.get();
        log::debug!("drawer is {}", if open { "open" } else { "closed" });
        request_layout();
    });

    let offset = AnimationState::new(controller.resting_offset(), config.transition);

    Ok(ToggleDrawer {
        tracker: GestureTracker::new(config.drag_start_distance),
        controller,
        style: config.style,
        offset,
        large,
        small,
        viewport: Size::new(0.0, geometry.max_height()),
        laid_out_open: None,
        _state_watch: state_watch,
    })
}

impl<L: Widget, S: Widget> ToggleDrawer<L, S> {
    pub fn controller(&self) -> &DrawerController {
        &self.controller
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn style(&self) -> &DrawerStyle {
        &self.style
    }

    pub fn large(&self) -> &L {
        &self.large
    }

    pub fn small(&self) -> &S {
        &self.small
    }

    /// Where the panel is heading: resting offset plus the live drag,
    /// never above the fully expanded position.
    pub fn target_offset(&self) -> f32 {
        (self.controller.resting_offset() + self.tracker.live_translation()).max(0.0)
    }

    /// The animated offset as painted
    pub fn current_offset(&self) -> f32 {
        self.offset.current().max(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    /// Panel bounds in the drawer's coordinates at the current offset
    pub fn panel_rect(&self) -> Rect {
        let max_height = self.controller.geometry().max_height();
        Rect::new(
            0.0,
            self.viewport.height - max_height + self.current_offset(),
            self.viewport.width,
            max_height,
        )
    }

    fn indicator_rect(&self, panel: Rect) -> Rect {
        let style = &self.style;
        Rect::new(
            (panel.width - style.indicator_width) / 2.0,
            panel.y + style.indicator_padding.top,
            style.indicator_width,
            style.indicator_height,
        )
    }

    /// Top-left corner of the content box
    fn content_origin(&self) -> (f32, f32) {
        let panel = self.panel_rect();
        (0.0, panel.y + self.style.header_height())
    }

    fn forward_to_content(&mut self, event: &Event) -> EventResponse {
        let (x, y) = self.content_origin();
        let local = event.translated(-x, -y);
        if self.controller.is_open() {
            self.large.event(&local)
        } else {
            self.small.event(&local)
        }
    }
}

impl<L: Widget, S: Widget> Widget for ToggleDrawer<L, S> {
    fn advance_animations(&mut self, now: Instant) -> bool {
        // Writes from other threads never reach the effect, catch them here
        let open = self.controller.is_open();
        if self.laid_out_open != Some(open) {
            request_layout();
        }

        let target = self.target_offset();
        let offset_animating = if self.offset.is_initial() {
            self.offset.set_immediate(target);
            false
        } else {
            self.offset.animate_to_at(target, now);
            if self.offset.advance_at(now).is_changed() {
                request_paint();
            }
            self.offset.is_animating()
        };

        let content_animating = if open {
            self.large.advance_animations(now)
        } else {
            self.small.advance_animations(now)
        };
        offset_animating || content_animating
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let max_height = self.controller.geometry().max_height();
        self.viewport = constraints.biggest_or(Size::new(0.0, max_height));

        let content_box = Size::new(
            self.viewport.width,
            (max_height - self.style.header_height()).max(0.0),
        );
        let content_constraints = Constraints::loose(content_box);
        let open = self.controller.is_open();
        self.laid_out_open = Some(open);
        if open {
            self.large.layout(content_constraints);
        } else {
            self.small.layout(content_constraints);
        }
        self.viewport
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let style = &self.style;
        let panel = self.panel_rect();
        let radii = CornerRadii::top(style.corner_radius);

        ctx.draw_rounded_rect_with_shadow(
            panel,
            style.background,
            radii,
            Shadow::around(style.shadow_radius, style.shadow_color),
        );
        ctx.push_clip(panel, radii);
        ctx.draw_rounded_rect(
            self.indicator_rect(panel),
            style.indicator_color,
            CornerRadii::all(style.indicator_radius),
        );

        let (x, y) = self.content_origin();
        ctx.push_translation(x, y);
        if self.controller.is_open() {
            self.large.paint(ctx);
        } else {
            self.small.paint(ctx);
        }
        ctx.pop_translation();
        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        let engaged = self.tracker.is_engaged();
        match *event {
            // One gesture at a time
            Event::MouseDown { .. } if engaged => EventResponse::Handled,
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                if !self.panel_rect().contains(x, y) {
                    return EventResponse::Ignored;
                }
                if self.forward_to_content(event) == EventResponse::Handled {
                    return EventResponse::Handled;
                }
                self.tracker.begin(y);
                EventResponse::Handled
            }
            Event::MouseMove { y, .. } if engaged => {
                if self.tracker.on_pointer_move(y).is_some() {
                    request_paint();
                }
                EventResponse::Handled
            }
            Event::MouseUp {
                y,
                button: MouseButton::Left,
                ..
            } if engaged => {
                let was_dragging = self.tracker.is_dragging();
                self.tracker.release(y, &self.controller);
                if was_dragging {
                    request_paint();
                }
                EventResponse::Handled
            }
            Event::MouseLeave if engaged => {
                self.tracker.cancel(&self.controller);
                request_paint();
                EventResponse::Handled
            }
            _ => self.forward_to_content(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{create_signal, take_change_flags, ChangeFlags};
    use crate::widgets::{block, Color};

    fn drawer(open: bool) -> ToggleDrawer<crate::widgets::Block, crate::widgets::Block> {
        let mut drawer = toggle_drawer(
            DrawerConfig::new(100.0, 500.0),
            create_signal(open),
            block(400.0, Color::WHITE),
            block(40.0, Color::BLACK),
        )
        .unwrap();
        drawer.layout(Constraints::tight(Size::new(390.0, 800.0)));
        drawer.advance_animations(Instant::now());
        drawer
    }

    #[test]
    fn test_first_frame_snaps_to_resting_offset() {
        let closed = drawer(false);
        assert_eq!(closed.current_offset(), 400.0);
        assert!(!closed.is_animating());
        assert_eq!(closed.panel_rect(), Rect::new(0.0, 700.0, 390.0, 500.0));

        let open = drawer(true);
        assert_eq!(open.panel_rect().y, 300.0);
    }

    #[test]
    fn test_target_is_clamped_while_dragging_up() {
        let mut open = drawer(true);
        open.event(&Event::MouseDown {
            x: 195.0,
            y: 320.0,
            button: MouseButton::Left,
        });
        open.event(&Event::MouseMove { x: 195.0, y: 200.0 });
        assert_eq!(open.tracker().live_translation(), -120.0);
        assert_eq!(open.target_offset(), 0.0);
    }

    #[test]
    fn test_layout_sizes_visible_content_only() {
        let closed = drawer(false);
        assert_eq!(closed.small().size(), Size::new(390.0, 40.0));
        assert_eq!(closed.large().size(), Size::zero());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let result = toggle_drawer(
            DrawerConfig::new(600.0, 500.0),
            create_signal(false),
            block(1.0, Color::WHITE),
            block(1.0, Color::WHITE),
        );
        assert!(matches!(result, Err(DrawerError::InvalidHeights { .. })));
    }

    #[test]
    fn test_open_panel_bottom_meets_viewport_bottom() {
        let open = drawer(true);
        assert_eq!(open.panel_rect().bottom(), 800.0);
    }

    #[test]
    fn test_stale_layout_is_requested_on_next_frame() {
        let mut closed = drawer(false);
        take_change_flags();

        closed.advance_animations(Instant::now());
        assert!(!take_change_flags().contains(ChangeFlags::NEEDS_LAYOUT));

        closed.laid_out_open = Some(true);
        closed.advance_animations(Instant::now());
        assert!(take_change_flags().contains(ChangeFlags::NEEDS_LAYOUT));
    }

    #[test]
    fn test_press_outside_panel_is_ignored() {
        let mut closed = drawer(false);
        let response = closed.event(&Event::MouseDown {
            x: 195.0,
            y: 300.0,
            button: MouseButton::Left,
        });
        assert_eq!(response, EventResponse::Ignored);
        assert!(!closed.tracker().is_engaged());
    }
}
