//! # pagetoc
//!
//! A table-of-contents sidebar for single-page documentation sites.
//!
//! On every page render the widget collects the headings of the main
//! content, renders them as a nested list of `lv<N>` entries inside a
//! collapsible panel, and keeps the entry of the heading in view marked
//! `active` while the reader scrolls. A back-to-top control appears once
//! the page is scrolled far enough.
//!
//! ## Crates
//!
//! - [`traits`]: the `Dom` and `FrameScheduler` abstractions and their
//!   in-memory implementations
//! - [`core`]: builder, tracker, panel controller and lifecycle hooks
//! - `pagetoc-wasm`: the browser implementation, built separately for
//!   `wasm32-unknown-unknown`
//!
//! ## Example
//!
//! ```
//! use pagetoc::{Hook, InMemoryDom, ManualFrameScheduler, RenderContext, TocConfig, TocPlugin};
//! use std::rc::Rc;
//!
//! let dom = Rc::new(InMemoryDom::from_html(
//!     r#"<main><section class="content"><article id="main">
//!        <h2>Install</h2><h2>Usage</h2></article></section></main>"#,
//! ));
//! let ctx = RenderContext::new(
//!     dom.clone(),
//!     Rc::new(ManualFrameScheduler::new()),
//!     TocConfig::default().compile().unwrap(),
//! );
//!
//! let mut hook = Hook::new();
//! TocPlugin::new(ctx).install(&mut hook);
//! hook.run_mounted();
//! hook.run_done_each();
//!
//! use pagetoc::Dom;
//! assert_eq!(dom.query_all(".page_toc > div").len(), 2);
//! ```

pub use pagetoc_core as core;
pub use pagetoc_traits as traits;

pub use pagetoc_core::{
    CompiledConfig, FrameThrottle, Heading, HeadingDescriptor, Hook, PanelController,
    PanelOutcome, Plugin, PluginRegistry, RenderContext, ScrollTracker, TocConfig, TocError,
    TocMarkup, TocPlugin, build_toc, page_toc, select_active,
};
pub use pagetoc_traits::{
    Dom, DomError, DomEvent, EventFlow, EventHandler, EventKind, FrameScheduler, FrameTask,
    InMemoryDom, ListenTarget, ManualFrameScheduler, NodeId, Rect, Subscription, Viewport,
};

/// Builds a context over `dom` and wires the widget into a fresh hook,
/// reading the options from the JSON form of `window.$docsify.toc`.
///
/// Invalid `ignoreHeaders` patterns are matched literally.
pub fn hook_from_json<D: Dom + 'static>(
    dom: std::rc::Rc<D>,
    scheduler: std::rc::Rc<dyn FrameScheduler>,
    options: &str,
) -> Result<(Hook, std::rc::Rc<PanelController<D>>), TocError> {
    let config = TocConfig::from_json(options)?;
    let ctx = RenderContext::new(dom, scheduler, config.compile_lenient());
    let plugin = TocPlugin::new(ctx);

    let mut hook = Hook::new();
    plugin.install(&mut hook);
    log::debug!("ToC hook ready: {:?}", hook);
    Ok((hook, std::rc::Rc::clone(plugin.panel())))
}
