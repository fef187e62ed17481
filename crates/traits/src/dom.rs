//! Dom trait for abstracting document access.
//!
//! The widget never touches a browser global directly. Every read and write
//! of the page goes through this trait, so the same logic runs against the
//! real document (`WebDom` in `pagetoc-wasm`) and against [`InMemoryDom`]
//! in tests.
//!
//! [`InMemoryDom`]: crate::memory::InMemoryDom

use std::fmt::Debug;
use std::rc::Rc;
use thiserror::Error;

/// Error type for selector parsing.
///
/// It never reaches the widget's callers: `Dom` operations degrade to
/// no-ops and implementations log the error instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Vertical placement of an element, relative to the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Scroll geometry of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Current scroll offset of the scrolling element.
    pub scroll_top: f64,
    /// Height of the visible window.
    pub viewport_height: f64,
    /// Full layout height of the scrolling element.
    pub document_height: f64,
}

impl Viewport {
    /// Remaining scrollable distance below the current position.
    pub fn distance_to_bottom(&self) -> f64 {
        self.document_height - self.viewport_height - self.scroll_top
    }
}

/// Event types the widget listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Click,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Click => "click",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<E> {
    Window,
    Document,
    Element(E),
}

/// What a handler wants to happen after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    /// Stop propagation to ancestor and document listeners.
    Stop,
}

/// An event as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent<E> {
    pub kind: EventKind,
    /// The element the event originated from, if any.
    pub target: Option<E>,
}

impl<E> DomEvent<E> {
    pub fn new(kind: EventKind, target: Option<E>) -> Self {
        Self { kind, target }
    }
}

pub type EventHandler<E> = Rc<dyn Fn(&DomEvent<E>) -> EventFlow>;

/// Handle for an attached listener.
///
/// Returned by [`Dom::listen`] and consumed by [`Dom::unlisten`]. The handle
/// is deliberately not `Clone`: whoever holds it owns the binding.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping a subscription leaks the listener; pass it to Dom::unlisten"]
pub struct Subscription(u64);

impl Subscription {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A trait for reading and mutating the rendered page.
///
/// All operations run on the UI thread and never fail from the caller's
/// point of view: an implementation that hits a platform error logs it and
/// carries on.
///
/// # Implementations
///
/// - `WebDom` (in `pagetoc-wasm`): backed by `web-sys`
/// - [`InMemoryDom`](crate::memory::InMemoryDom): `scraper` document for tests
pub trait Dom {
    /// Handle to an element of this document.
    type Element: Clone + PartialEq + Debug;

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// All descendants of `scope` in document order matching `selector`.
    fn query_all_within(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    fn tag_name(&self, element: &Self::Element) -> String;

    fn inner_html(&self, element: &Self::Element) -> String;

    /// Visible text of the element and its descendants.
    fn inner_text(&self, element: &Self::Element) -> String;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Creates a detached element. Returns `None` if the platform refuses.
    fn create_element(&self, tag: &str) -> Option<Self::Element>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Replaces the element's children with the parsed `html`.
    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn append_child(&self, parent: &Self::Element, child: &Self::Element);

    /// Inserts `child` before the first element child of `parent`.
    fn prepend_child(&self, parent: &Self::Element, child: &Self::Element);

    /// Detaches the element from the document.
    fn remove(&self, element: &Self::Element);

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    fn toggle_class(&self, element: &Self::Element, class: &str);

    /// Shows (`display: block`) or hides (`display: none`) the element.
    fn set_display(&self, element: &Self::Element, visible: bool);

    fn viewport(&self) -> Viewport;

    /// Smooth-scrolls the page to its top.
    fn scroll_to_top(&self);

    /// Scrolls the element into view inside its scrollable container,
    /// aligning to the nearest edge. The page itself is not scrolled.
    fn scroll_into_view_nearest(&self, element: &Self::Element);

    fn listen(
        &self,
        target: ListenTarget<Self::Element>,
        kind: EventKind,
        handler: EventHandler<Self::Element>,
    ) -> Subscription;

    /// Detaches a listener. Unknown subscriptions are ignored.
    fn unlisten(&self, subscription: Subscription);

    /// Returns a human-readable name for this implementation (for logging/debugging).
    fn name(&self) -> &'static str;
}
