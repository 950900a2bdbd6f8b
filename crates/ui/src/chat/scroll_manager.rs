use gpui::{Bounds, Pixels, point, px};
use gpui_component::VirtualListScrollHandle;

/// Distance from the tail within which the list keeps tracking new rows.
const STICK_RESUME_THRESHOLD: Pixels = px(24.);

/// Keeps the virtual message list pinned to its newest row.
///
/// Whenever a row is added the view requests a scroll to the bottom; between
/// additions the list stays pinned only while the user is already near the
/// tail, so reading back through history is not interrupted.
pub struct ScrollManager {
    scroll_handle: VirtualListScrollHandle,
    pending_scroll_to_bottom: bool,
    stick_to_bottom: bool,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: VirtualListScrollHandle::new(),
            pending_scroll_to_bottom: true,
            stick_to_bottom: true,
        }
    }

    pub fn handle(&self) -> &VirtualListScrollHandle {
        &self.scroll_handle
    }

    pub fn bounds(&self) -> Bounds<Pixels> {
        self.scroll_handle.bounds()
    }

    /// Requests a jump to the newest row on the next render pass.
    pub fn request_scroll_to_bottom(&mut self) {
        self.pending_scroll_to_bottom = true;
        self.stick_to_bottom = true;
    }

    /// Applies any requested or sticky scroll. Called once per render pass.
    pub fn apply_pending_scroll(&mut self) {
        if !self.pending_scroll_to_bottom {
            self.stick_to_bottom = self.is_near_bottom();
        }
        if !self.pending_scroll_to_bottom && !self.stick_to_bottom {
            return;
        }

        let max_offset = self.scroll_handle.max_offset().height;
        let target_y = if max_offset > Pixels::ZERO {
            -max_offset
        } else {
            Pixels::ZERO
        };
        let current_x = self.scroll_handle.offset().x;
        self.scroll_handle.set_offset(point(current_x, target_y));
        self.pending_scroll_to_bottom = false;
    }

    fn is_near_bottom(&self) -> bool {
        let max_offset = self.scroll_handle.max_offset().height;
        if max_offset <= Pixels::ZERO {
            return true;
        }

        // GPUI scroll offsets grow negative toward the tail, so `offset + max`
        // approaches zero at the bottom.
        let offset = self.scroll_handle.offset().y;
        (offset + max_offset).abs() <= STICK_RESUME_THRESHOLD
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}
