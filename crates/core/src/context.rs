//! The rendering context shared by all components.

use crate::config::CompiledConfig;
use pagetoc_traits::{Dom, FrameScheduler};
use std::fmt;
use std::rc::Rc;

/// The page, the frame scheduler, and the active configuration.
///
/// Passed explicitly into every component instead of reaching for browser
/// globals; cloning is cheap and shares the same page.
pub struct RenderContext<D: Dom> {
    dom: Rc<D>,
    scheduler: Rc<dyn FrameScheduler>,
    config: Rc<CompiledConfig>,
}

impl<D: Dom> RenderContext<D> {
    pub fn new(dom: Rc<D>, scheduler: Rc<dyn FrameScheduler>, config: CompiledConfig) -> Self {
        Self {
            dom,
            scheduler,
            config: Rc::new(config),
        }
    }

    pub fn dom(&self) -> &Rc<D> {
        &self.dom
    }

    pub fn scheduler(&self) -> &Rc<dyn FrameScheduler> {
        &self.scheduler
    }

    pub fn config(&self) -> &CompiledConfig {
        &self.config
    }
}

impl<D: Dom> Clone for RenderContext<D> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            scheduler: Rc::clone(&self.scheduler),
            config: Rc::clone(&self.config),
        }
    }
}

impl<D: Dom> fmt::Debug for RenderContext<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("dom", &self.dom.name())
            .field("scheduler", &self.scheduler.name())
            .field("config", &self.config)
            .finish()
    }
}
