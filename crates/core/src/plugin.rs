//! Lifecycle hooks and the process-wide plugin list.

use crate::context::RenderContext;
use crate::panel::{PanelController, PanelOutcome};
use pagetoc_traits::Dom;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type HookFn = Box<dyn Fn()>;

/// The two hook slots a host invokes.
///
/// `mounted` runs once, after the page scaffold is in the document.
/// `done_each` runs after every content swap.
#[derive(Default)]
pub struct Hook {
    mounted: Vec<HookFn>,
    done_each: Vec<HookFn>,
}

impl Hook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&mut self, callback: impl Fn() + 'static) {
        self.mounted.push(Box::new(callback));
    }

    pub fn done_each(&mut self, callback: impl Fn() + 'static) {
        self.done_each.push(Box::new(callback));
    }

    pub fn run_mounted(&self) {
        for callback in &self.mounted {
            callback();
        }
    }

    pub fn run_done_each(&self) {
        for callback in &self.done_each {
            callback();
        }
    }

    /// Takes the collected callbacks, leaving the hook empty.
    pub fn take(&mut self) -> (Vec<Box<dyn Fn()>>, Vec<Box<dyn Fn()>>) {
        (
            std::mem::take(&mut self.mounted),
            std::mem::take(&mut self.done_each),
        )
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("mounted", &self.mounted.len())
            .field("done_each", &self.done_each.len())
            .finish()
    }
}

/// A plugin installs its callbacks into a hook.
pub type Plugin = Rc<dyn Fn(&mut Hook)>;

/// An append-only list of plugins.
///
/// Registering never disturbs entries that are already there; `apply` calls
/// plugins in registration order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: RefCell<Vec<Plugin>>,
}

thread_local! {
    static GLOBAL_REGISTRY: PluginRegistry = PluginRegistry::new();
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the process-wide registry.
    pub fn with_global<R>(f: impl FnOnce(&PluginRegistry) -> R) -> R {
        GLOBAL_REGISTRY.with(f)
    }

    pub fn register(&self, plugin: Plugin) {
        self.plugins.borrow_mut().push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.borrow().is_empty()
    }

    /// Installs every registered plugin into `hook`.
    pub fn apply(&self, hook: &mut Hook) {
        // Snapshot: a plugin may register further plugins while installing.
        let plugins: Vec<Plugin> = self.plugins.borrow().clone();
        for plugin in plugins {
            plugin(hook);
        }
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.len())
            .finish()
    }
}

/// The ToC widget as a plugin.
pub struct TocPlugin<D: Dom> {
    panel: Rc<PanelController<D>>,
}

impl<D: Dom + 'static> TocPlugin<D> {
    pub fn new(ctx: RenderContext<D>) -> Self {
        Self {
            panel: Rc::new(PanelController::new(ctx)),
        }
    }

    pub fn panel(&self) -> &Rc<PanelController<D>> {
        &self.panel
    }

    /// Wires the panel into `hook`: `mounted` installs the back-to-top
    /// control, `done_each` rebuilds the panel.
    pub fn install(&self, hook: &mut Hook) {
        let panel = Rc::clone(&self.panel);
        hook.mounted(move || {
            panel.mount();
        });

        let panel = Rc::clone(&self.panel);
        hook.done_each(move || {
            if panel.render() == PanelOutcome::Skipped {
                log::debug!("ToC render skipped");
            }
        });
    }

    pub fn into_plugin(self) -> Plugin {
        Rc::new(move |hook: &mut Hook| self.install(hook))
    }
}

impl<D: Dom> fmt::Debug for TocPlugin<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TocPlugin").field("panel", &self.panel).finish()
    }
}
