//! FrameScheduler trait for animation-frame callbacks.
//!
//! Scroll events arrive far more often than the page repaints. Work that
//! reacts to them is deferred to the next animation frame through this
//! trait, which lets tests step frames by hand instead of waiting on a
//! browser frame loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

/// A one-shot unit of work for the next frame.
pub type FrameTask = Box<dyn FnOnce()>;

/// Queues tasks to run on the next animation frame.
pub trait FrameScheduler {
    fn request_frame(&self, task: FrameTask);

    /// Returns a human-readable name for this scheduler (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A scheduler whose frames are advanced explicitly.
///
/// Tasks queued while a frame is running are held for the following frame,
/// which is how a browser treats `requestAnimationFrame` calls made from
/// inside a frame callback.
#[derive(Default)]
pub struct ManualFrameScheduler {
    queue: RefCell<VecDeque<FrameTask>>,
    frames: Cell<usize>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame and returns how many tasks it executed.
    pub fn run_frame(&self) -> usize {
        let tasks = std::mem::take(&mut *self.queue.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        self.frames.set(self.frames.get() + 1);
        count
    }

    /// Number of tasks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of frames run so far.
    pub fn frames_run(&self) -> usize {
        self.frames.get()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, task: FrameTask) {
        self.queue.borrow_mut().push_back(task);
    }

    fn name(&self) -> &'static str {
        "ManualFrameScheduler"
    }
}

impl fmt::Debug for ManualFrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualFrameScheduler")
            .field("pending", &self.pending())
            .field("frames", &self.frames.get())
            .finish()
    }
}
