//! # pagetoc-core
//!
//! Platform-agnostic core of the page table-of-contents sidebar.
//!
//! - **config**: host options and their compiled form
//! - **heading**: heading descriptors read from the page
//! - **builder**: the ToC markup for a page
//! - **tracker**: which entry is active for the current scroll position
//! - **panel**: the panel wrapper and the back-to-top control
//! - **plugin**: lifecycle hooks and the plugin registry
//!
//! ## Design Principle
//!
//! Nothing here touches a browser global. Components receive a
//! [`RenderContext`] holding a [`Dom`] implementation and a
//! [`FrameScheduler`], so the whole widget runs against
//! [`InMemoryDom`] and [`ManualFrameScheduler`] in tests.

pub use pagetoc_traits as traits;

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod heading;
pub mod panel;
pub mod plugin;
pub mod throttle;
pub mod tracker;

pub use builder::{TocMarkup, build_toc, page_toc};
pub use config::{CompiledConfig, TocConfig};
pub use context::RenderContext;
pub use error::TocError;
pub use heading::{Heading, HeadingDescriptor};
pub use panel::{PanelController, PanelOutcome};
pub use plugin::{Hook, Plugin, PluginRegistry, TocPlugin};
pub use throttle::FrameThrottle;
pub use tracker::{ScrollTracker, select_active};

pub use traits::{
    Dom, DomEvent, EventFlow, EventKind, FrameScheduler, InMemoryDom, ListenTarget,
    ManualFrameScheduler, Rect, Subscription, Viewport,
};
