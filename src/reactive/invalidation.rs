use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

use bitflags::bitflags;

bitflags! {
    /// What the host loop has to redo before presenting the next frame
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Sizes or visible children may have changed
        const NEEDS_LAYOUT = 0b01;
        /// Only the appearance changed
        const NEEDS_PAINT  = 0b10;
    }
}

/// Set from any thread, drained by the frame loop.
static FRAME_REQUESTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static CHANGE_FLAGS: Cell<ChangeFlags> =
        const { Cell::new(ChangeFlags::NEEDS_LAYOUT.union(ChangeFlags::NEEDS_PAINT)) };
}

/// Ask the host for another frame.
pub fn request_frame() {
    FRAME_REQUESTED.store(true, Ordering::Release);
}

/// Returns whether a frame was requested since the last call, and clears it.
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.swap(false, Ordering::AcqRel)
}

/// Mark that layout (and therefore paint) must run again.
pub fn request_layout() {
    CHANGE_FLAGS.with(|flags| {
        flags.set(flags.get() | ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT)
    });
    request_frame();
}

/// Mark that the next frame needs painting without a new layout.
pub fn request_paint() {
    CHANGE_FLAGS.with(|flags| flags.set(flags.get() | ChangeFlags::NEEDS_PAINT));
    request_frame();
}

/// Current flags for this thread, without clearing them.
pub fn change_flags() -> ChangeFlags {
    CHANGE_FLAGS.with(Cell::get)
}

/// Drain the flags for this thread.
pub fn take_change_flags() -> ChangeFlags {
    CHANGE_FLAGS.with(|flags| flags.replace(ChangeFlags::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_thread_starts_dirty() {
        let flags = std::thread::spawn(change_flags)
            .join()
            .expect("flag thread panicked");
        assert!(flags.contains(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT));
    }

    #[test]
    fn test_paint_request_does_not_imply_layout() {
        take_change_flags();
        request_paint();
        let flags = take_change_flags();
        assert!(flags.contains(ChangeFlags::NEEDS_PAINT));
        assert!(!flags.contains(ChangeFlags::NEEDS_LAYOUT));
        assert!(take_change_flags().is_empty());
    }

    #[test]
    fn test_layout_request_implies_paint_and_frame() {
        take_change_flags();
        request_layout();
        assert_eq!(
            take_change_flags(),
            ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT
        );
        assert!(take_frame_request());
    }
}
