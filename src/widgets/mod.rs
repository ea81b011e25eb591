pub mod block;
pub mod widget;

pub use block::{block, Block};
pub use widget::{Color, Event, EventResponse, MouseButton, Padding, Rect, Widget};
