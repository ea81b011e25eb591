//! A reactive bottom drawer widget.
//!
//! The drawer sits at the bottom of its surface and toggles between a
//! collapsed and an expanded height. Drags move it live and snap it open or
//! closed on release; the host can also flip the shared open flag directly.
//! Both paths end in the same spring animation.
//!
//! The widget records a display list ([`renderer::PaintContext`]) instead of
//! drawing; a host loop drives it once per frame:
//!
//! ```ignore
//! for event in pending_events {
//!     drawer.event(&event);
//! }
//! let animating = drawer.advance_animations(Instant::now());
//! if take_change_flags().contains(ChangeFlags::NEEDS_LAYOUT) {
//!     drawer.layout(Constraints::tight(surface_size));
//! }
//! drawer.paint(&mut ctx);
//! ```

pub mod animation;
pub mod drawer;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

pub mod prelude {
    pub use crate::animation::{SpringConfig, TimingFunction, Transition};
    pub use crate::drawer::{
        toggle_drawer, DrawerConfig, DrawerController, DrawerError, DrawerGeometry, DrawerStyle,
        GestureTracker, ToggleDrawer,
    };
    pub use crate::layout::{Constraints, Size};
    pub use crate::reactive::{
        batch, create_effect, create_signal, take_change_flags, take_frame_request, ChangeFlags,
        Effect, ReadSignal, Signal, WriteSignal,
    };
    pub use crate::renderer::{CornerRadii, DrawCommand, PaintContext, Shadow};
    pub use crate::widgets::{
        block, Block, Color, Event, EventResponse, MouseButton, Padding, Rect, Widget,
    };
}
