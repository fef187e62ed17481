//! Coalesces bursts of scroll events into one run per animation frame.

use pagetoc_traits::FrameScheduler;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A single coalescing slot.
///
/// While a frame is pending, further requests are dropped rather than
/// queued. The work itself runs inside the frame, so it observes the page
/// as it is then, not as it was when the first event arrived.
pub struct FrameThrottle {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<bool>>,
}

impl FrameThrottle {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(false)),
        }
    }

    /// Schedules `work` for the next frame. Returns `false` if a frame was
    /// already pending and the request was dropped.
    pub fn schedule(&self, work: impl FnOnce() + 'static) -> bool {
        if self.pending.get() {
            return false;
        }
        self.pending.set(true);

        let pending = Rc::clone(&self.pending);
        self.scheduler.request_frame(Box::new(move || {
            work();
            pending.set(false);
        }));
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

impl fmt::Debug for FrameThrottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameThrottle")
            .field("scheduler", &self.scheduler.name())
            .field("pending", &self.pending.get())
            .finish()
    }
}
