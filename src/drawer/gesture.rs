//! Drag tracking.
//!
//! The live translation exists only inside a [`DragSession`]. When no drag
//! is active there is no session, so the translation reads as exactly zero.

use super::controller::DrawerController;

/// One drag, from activation to release or cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    origin: f32,
    translation: f32,
}

impl DragSession {
    pub fn origin(&self) -> f32 {
        self.origin
    }

    /// Cumulative vertical translation since the gesture started
    pub fn translation(&self) -> f32 {
        self.translation
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    /// Pointer is down but has not moved far enough to count as a drag
    Pressed { origin: f32 },
    Dragging(DragSession),
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    drag_start_distance: f32,
    state: GestureState,
}

impl GestureTracker {
    pub fn new(drag_start_distance: f32) -> Self {
        Self {
            drag_start_distance,
            state: GestureState::Idle,
        }
    }

    /// Arm a press at pointer position `y`. Ignored while a gesture is in progress.
    pub fn begin(&mut self, y: f32) {
        if self.state == GestureState::Idle {
            self.state = GestureState::Pressed { origin: y };
        }
    }

    /// Feed a pointer position. Returns the live translation once dragging.
    pub fn on_pointer_move(&mut self, y: f32) -> Option<f32> {
        let origin = match self.state {
            GestureState::Idle => return None,
            GestureState::Pressed { origin } => {
                if (y - origin).abs() < self.drag_start_distance {
                    return None;
                }
                origin
            }
            GestureState::Dragging(session) => session.origin,
        };
        self.on_drag_update(y - origin);
        Some(y - origin)
    }

    /// Record the cumulative translation of the current drag, replacing the
    /// previous value. Starts a session if none is active.
    pub fn on_drag_update(&mut self, translation: f32) {
        let origin = match self.state {
            GestureState::Dragging(session) => session.origin,
            GestureState::Pressed { origin } => origin,
            GestureState::Idle => 0.0,
        };
        self.state = GestureState::Dragging(DragSession {
            origin,
            translation,
        });
        log::trace!("drag translation {:.1}", translation);
    }

    /// Finish the drag with its final translation and hand it to the
    /// controller. The session is gone afterwards, whatever the outcome.
    pub fn on_drag_end(
        &mut self,
        translation: f32,
        controller: &DrawerController,
    ) -> Option<bool> {
        self.state = GestureState::Idle;
        controller.evaluate_drag_end(translation)
    }

    /// Pointer released at `y`. A press that never became a drag is a tap
    /// and is dropped without touching the state.
    pub fn release(&mut self, y: f32, controller: &DrawerController) -> Option<bool> {
        match self.state {
            GestureState::Dragging(session) => self.on_drag_end(y - session.origin, controller),
            GestureState::Pressed { .. } | GestureState::Idle => {
                self.state = GestureState::Idle;
                None
            }
        }
    }

    /// The gesture was interrupted. An active drag ends where it last was.
    pub fn cancel(&mut self, controller: &DrawerController) -> Option<bool> {
        match self.state {
            GestureState::Dragging(session) => {
                log::debug!("drag cancelled at {:.1}", session.translation);
                self.on_drag_end(session.translation, controller)
            }
            GestureState::Pressed { .. } | GestureState::Idle => {
                self.state = GestureState::Idle;
                None
            }
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Current drag translation, or zero when no drag is active
    pub fn live_translation(&self) -> f32 {
        self.session().map_or(0.0, DragSession::translation)
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// True from press until release or cancel
    pub fn is_engaged(&self) -> bool {
        self.state != GestureState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::config::DrawerGeometry;
    use crate::reactive::create_signal;

    fn controller(open: bool) -> DrawerController {
        DrawerController::new(
            create_signal(open),
            DrawerGeometry::new(100.0, 500.0).unwrap(),
        )
    }

    #[test]
    fn test_update_overwrites_instead_of_accumulating() {
        let mut tracker = GestureTracker::new(10.0);
        tracker.on_drag_update(30.0);
        tracker.on_drag_update(80.0);
        assert_eq!(tracker.live_translation(), 80.0);
    }

    #[test]
    fn test_end_resets_translation_on_every_outcome() {
        let drawer = controller(false);
        let mut tracker = GestureTracker::new(10.0);

        tracker.on_drag_update(-60.0);
        assert_eq!(tracker.on_drag_end(-60.0, &drawer), None);
        assert_eq!(tracker.live_translation(), 0.0);

        tracker.on_drag_update(-200.0);
        assert_eq!(tracker.on_drag_end(-200.0, &drawer), Some(true));
        assert_eq!(tracker.live_translation(), 0.0);
        assert!(!tracker.is_engaged());
    }

    #[test]
    fn test_press_needs_minimum_travel() {
        let mut tracker = GestureTracker::new(10.0);
        tracker.begin(400.0);
        assert_eq!(tracker.on_pointer_move(405.0), None);
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.live_translation(), 0.0);

        assert_eq!(tracker.on_pointer_move(390.0), Some(-10.0));
        assert!(tracker.is_dragging());
        assert_eq!(tracker.on_pointer_move(250.0), Some(-150.0));
        assert_eq!(tracker.live_translation(), -150.0);
    }

    #[test]
    fn test_tap_does_not_evaluate() {
        let drawer = controller(false);
        let mut tracker = GestureTracker::new(10.0);
        tracker.begin(400.0);
        assert_eq!(tracker.release(402.0, &drawer), None);
        assert!(!drawer.is_open());
        assert!(!tracker.is_engaged());
    }

    #[test]
    fn test_release_uses_total_translation() {
        let drawer = controller(false);
        let mut tracker = GestureTracker::new(10.0);
        tracker.begin(450.0);
        tracker.on_pointer_move(300.0);
        assert_eq!(tracker.release(250.0, &drawer), Some(true));
        assert!(drawer.is_open());
    }

    #[test]
    fn test_cancel_ends_with_last_translation() {
        let drawer = controller(true);
        let mut tracker = GestureTracker::new(10.0);
        tracker.begin(100.0);
        tracker.on_pointer_move(300.0);

        assert_eq!(tracker.cancel(&drawer), Some(false));
        assert!(!drawer.is_open());
        assert_eq!(tracker.live_translation(), 0.0);
        assert_eq!(tracker.cancel(&drawer), None);
    }

    #[test]
    fn test_second_press_is_ignored_mid_drag() {
        let mut tracker = GestureTracker::new(0.0);
        tracker.begin(100.0);
        tracker.on_pointer_move(150.0);
        tracker.begin(10.0);
        assert_eq!(tracker.session().map(DragSession::origin), Some(100.0));
    }
}
