//! `FrameScheduler` backed by `requestAnimationFrame`.

use pagetoc_traits::{FrameScheduler, FrameTask};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

#[derive(Debug, Clone)]
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, task: FrameTask) {
        let slot = Rc::new(RefCell::new(Some(task)));

        let queued = Rc::clone(&slot);
        let callback = Closure::once_into_js(move || {
            if let Some(task) = queued.borrow_mut().take() {
                task();
            }
        });

        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            // Without a frame the throttle would stay pending forever.
            log::warn!("requestAnimationFrame failed, running now: {:?}", err);
            let task = slot.borrow_mut().take();
            if let Some(task) = task {
                task();
            }
        }
    }

    fn name(&self) -> &'static str {
        "RafScheduler"
    }
}
