//! Open/closed state and the snap rule.
//!
//! Offsets are measured downward from the fully expanded position: `0` means
//! the whole panel is visible, `max_height - min_height` means only the
//! collapsed strip is.

use crate::reactive::Signal;

use super::config::{DrawerGeometry, DEFAULT_SNAP_RATIO};

/// Resting offset for a given state.
pub fn resting_offset(is_open: bool, max_height: f32, min_height: f32) -> f32 {
    if is_open {
        0.0
    } else {
        max_height - min_height
    }
}

/// Distance a drag must exceed before it flips the drawer.
pub fn snap_distance(max_height: f32, snap_ratio: f32) -> f32 {
    max_height * snap_ratio
}

/// Decide what a finished drag of `translation` does.
///
/// `None` means the drag was too short (or not a number) and the drawer
/// springs back. Otherwise an upward drag opens and a downward one closes.
/// Only the displacement counts; velocity plays no part.
pub fn snap_decision(translation: f32, max_height: f32, snap_ratio: f32) -> Option<bool> {
    if !translation.is_finite() || translation.abs() <= snap_distance(max_height, snap_ratio) {
        return None;
    }
    Some(translation < 0.0)
}

/// Owns the geometry and a handle to the host's open flag.
///
/// The flag is shared: the controller reads and writes the same cell the
/// host holds, so a host-side `set` and a gesture end go down one path.
#[derive(Clone)]
pub struct DrawerController {
    is_open: Signal<bool>,
    geometry: DrawerGeometry,
    snap_ratio: f32,
}

impl DrawerController {
    pub fn new(is_open: Signal<bool>, geometry: DrawerGeometry) -> Self {
        Self {
            is_open,
            geometry,
            snap_ratio: DEFAULT_SNAP_RATIO,
        }
    }

    /// Override the snap ratio. Callers validate it through `DrawerConfig`.
    pub fn with_snap_ratio(mut self, snap_ratio: f32) -> Self {
        self.snap_ratio = snap_ratio;
        self
    }

    pub fn geometry(&self) -> DrawerGeometry {
        self.geometry
    }

    pub fn state(&self) -> &Signal<bool> {
        &self.is_open
    }

    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    pub fn set_open(&self, open: bool) {
        self.is_open.set(open);
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        self.is_open.update(|open| *open = !*open);
    }

    pub fn resting_offset(&self) -> f32 {
        resting_offset(
            self.is_open(),
            self.geometry.max_height(),
            self.geometry.min_height(),
        )
    }

    pub fn snap_distance(&self) -> f32 {
        snap_distance(self.geometry.max_height(), self.snap_ratio)
    }

    /// Apply the snap rule to a finished drag and write the result.
    ///
    /// Returns the decided state, which may equal the current one (a downward
    /// drag on a closed drawer); writing an unchanged value does not notify.
    pub fn evaluate_drag_end(&self, translation: f32) -> Option<bool> {
        let decision = snap_decision(translation, self.geometry.max_height(), self.snap_ratio);
        match decision {
            Some(open) => {
                log::debug!(
                    "drag of {:.1} passed snap distance {:.1}, drawer {}",
                    translation,
                    self.snap_distance(),
                    if open { "open" } else { "closed" }
                );
                self.is_open.set(open);
            }
            None => log::debug!(
                "drag of {:.1} within snap distance {:.1}, springing back",
                translation,
                self.snap_distance()
            ),
        }
        decision
    }
}
