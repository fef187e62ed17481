//! Panel Controller: owns the ToC panel and the back-to-top control.
//!
//! Every listener the controller attaches is held as a [`Subscription`] and
//! disposed explicitly. Handlers only keep weak references to the page and
//! the tracker, so the document never keeps the controller alive.

use crate::builder::page_toc;
use crate::config::BACK_TO_TOP_OFFSET;
use crate::context::RenderContext;
use crate::tracker::ScrollTracker;
use pagetoc_traits::{Dom, DomEvent, EventFlow, EventKind, ListenTarget, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Outer layout element that receives the controls.
pub const MAIN_CONTAINER_SELECTOR: &str = "main";
/// Present once the host has mounted its scaffold.
pub const CONTENT_SELECTOR: &str = ".content";

pub const WRAPPER_CLASS: &str = "toc-wrapper";
pub const WRAPPER_SELECTOR: &str = ".toc-wrapper";
pub const ICON_CLASS: &str = "toc-icon";
pub const NAV_CLASS: &str = "docs-toc-nav";
pub const NAV_SELECTOR: &str = ".docs-toc-nav";
/// Class toggled on the wrapper to show the navigation panel.
pub const OPEN_CLASS: &str = "open";

pub const BACK_TO_TOP_ID: &str = "docs-gotop";

const BACK_TO_TOP_TITLE: &str = "Back to top";
const BACK_TO_TOP_ICON: &str = "<i class='fas fa-arrow-up'></i>";
const ICON_TITLE: &str = "Table of Contents";
const ICON_MARKUP: &str = r#"<i class="fa-solid fa-table"></i>"#;

/// What a render did to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The page has too few headings; any existing panel was removed.
    Hidden,
    /// The panel shows this many entries.
    Shown(usize),
    /// The main container is missing; nothing was touched.
    Skipped,
}

struct PanelState<E> {
    back_to_top: Option<E>,
    back_to_top_subscriptions: Vec<Subscription>,
    wrapper: Option<E>,
    wrapper_subscriptions: Vec<Subscription>,
    tracker_subscription: Option<Subscription>,
}

impl<E> Default for PanelState<E> {
    fn default() -> Self {
        Self {
            back_to_top: None,
            back_to_top_subscriptions: Vec::new(),
            wrapper: None,
            wrapper_subscriptions: Vec::new(),
            tracker_subscription: None,
        }
    }
}

pub struct PanelController<D: Dom> {
    ctx: RenderContext<D>,
    tracker: Rc<ScrollTracker<D>>,
    state: RefCell<PanelState<D::Element>>,
}

impl<D: Dom + 'static> PanelController<D> {
    pub fn new(ctx: RenderContext<D>) -> Self {
        let tracker = Rc::new(ScrollTracker::new(ctx.clone()));
        Self {
            ctx,
            tracker,
            state: RefCell::new(PanelState::default()),
        }
    }

    pub fn tracker(&self) -> &Rc<ScrollTracker<D>> {
        &self.tracker
    }

    /// Installs the back-to-top control. Returns `true` if it was inserted.
    ///
    /// The control is prepended into `main`, hidden, shown by a window scroll
    /// listener past [`BACK_TO_TOP_OFFSET`]. Clicking it scrolls to the top
    /// and stops the click there.
    pub fn mount(&self) -> bool {
        if self.state.borrow().back_to_top.is_some() {
            log::debug!("Back-to-top control already mounted");
            return false;
        }

        let dom = self.ctx.dom();
        let Some(main) = dom.query(MAIN_CONTAINER_SELECTOR) else {
            log::debug!("No {} element; back-to-top control skipped", MAIN_CONTAINER_SELECTOR);
            return false;
        };
        if dom.query(CONTENT_SELECTOR).is_none() {
            log::debug!("No {} element; back-to-top control skipped", CONTENT_SELECTOR);
            return false;
        }
        let Some(button) = dom.create_element("span") else {
            return false;
        };

        dom.set_inner_html(&button, BACK_TO_TOP_ICON);
        dom.set_attribute(&button, "id", BACK_TO_TOP_ID);
        dom.set_attribute(&button, "title", BACK_TO_TOP_TITLE);
        dom.set_display(&button, false);
        dom.prepend_child(&main, &button);

        let page = Rc::downgrade(dom);
        let click = dom.listen(
            ListenTarget::Element(button.clone()),
            EventKind::Click,
            Rc::new(move |_: &DomEvent<D::Element>| {
                if let Some(dom) = page.upgrade() {
                    dom.scroll_to_top();
                }
                EventFlow::Stop
            }),
        );

        let page = Rc::downgrade(dom);
        let control = button.clone();
        let scroll = dom.listen(
            ListenTarget::Window,
            EventKind::Scroll,
            Rc::new(move |_: &DomEvent<D::Element>| {
                if let Some(dom) = page.upgrade() {
                    dom.set_display(&control, dom.viewport().scroll_top > BACK_TO_TOP_OFFSET);
                }
                EventFlow::Continue
            }),
        );

        let mut state = self.state.borrow_mut();
        state.back_to_top = Some(button);
        state.back_to_top_subscriptions = vec![click, scroll];
        log::debug!("Back-to-top control mounted");
        true
    }

    /// Rebuilds the panel for the page currently in the main content.
    pub fn render(&self) -> PanelOutcome {
        let Some(toc) = page_toc(&self.ctx) else {
            self.remove_panel();
            return PanelOutcome::Hidden;
        };

        let Some(nav) = self.ensure_wrapper() else {
            return PanelOutcome::Skipped;
        };
        self.ctx.dom().set_inner_html(&nav, toc.html());

        self.tracker.update();
        self.bind_tracker();

        log::debug!("ToC panel rendered with {} entries", toc.entries());
        PanelOutcome::Shown(toc.entries())
    }

    /// Removes every control and detaches every listener.
    pub fn teardown(&self) {
        self.remove_panel();

        let dom = self.ctx.dom();
        let mut state = self.state.borrow_mut();
        if let Some(button) = state.back_to_top.take() {
            dom.remove(&button);
        }
        for subscription in state.back_to_top_subscriptions.drain(..) {
            dom.unlisten(subscription);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().back_to_top.is_some()
    }

    pub fn wrapper(&self) -> Option<D::Element> {
        self.state.borrow().wrapper.clone()
    }

    /// Whether the tracker's scroll listener is attached.
    pub fn is_tracking(&self) -> bool {
        self.state.borrow().tracker_subscription.is_some()
    }

    /// The navigation panel of the live wrapper, creating the wrapper first
    /// if needed.
    fn ensure_wrapper(&self) -> Option<D::Element> {
        let dom = self.ctx.dom();
        let live = self
            .state
            .borrow()
            .wrapper
            .clone()
            .filter(|wrapper| dom.query(WRAPPER_SELECTOR).as_ref() == Some(wrapper));

        let wrapper = match live {
            Some(wrapper) => wrapper,
            None => self.create_wrapper()?,
        };
        dom.query_all_within(&wrapper, NAV_SELECTOR).into_iter().next()
    }

    fn create_wrapper(&self) -> Option<D::Element> {
        let dom = self.ctx.dom();
        let Some(main) = dom.query(MAIN_CONTAINER_SELECTOR) else {
            log::debug!("No {} element; ToC panel skipped", MAIN_CONTAINER_SELECTOR);
            return None;
        };

        // A detached or foreign wrapper must not linger next to ours.
        self.remove_panel();

        let wrapper = dom.create_element("div")?;
        let icon = dom.create_element("div")?;
        let nav = dom.create_element("aside")?;

        dom.add_class(&wrapper, WRAPPER_CLASS);
        dom.add_class(&icon, ICON_CLASS);
        dom.set_attribute(&icon, "title", ICON_TITLE);
        dom.set_attribute(&icon, "tabindex", "0");
        dom.set_attribute(&icon, "role", "button");
        dom.set_inner_html(&icon, ICON_MARKUP);
        dom.add_class(&nav, NAV_CLASS);

        dom.append_child(&wrapper, &icon);
        dom.append_child(&wrapper, &nav);
        dom.prepend_child(&main, &wrapper);

        let page = Rc::downgrade(dom);
        let panel = wrapper.clone();
        let toggle = dom.listen(
            ListenTarget::Element(icon),
            EventKind::Click,
            Rc::new(move |_: &DomEvent<D::Element>| {
                if let Some(dom) = page.upgrade() {
                    dom.toggle_class(&panel, OPEN_CLASS);
                }
                EventFlow::Continue
            }),
        );

        let page = Rc::downgrade(dom);
        let panel = wrapper.clone();
        let outside = dom.listen(
            ListenTarget::Document,
            EventKind::Click,
            Rc::new(move |event: &DomEvent<D::Element>| {
                if let Some(dom) = page.upgrade() {
                    let inside = event
                        .target
                        .as_ref()
                        .is_some_and(|target| dom.contains(&panel, target));
                    if !inside {
                        dom.remove_class(&panel, OPEN_CLASS);
                    }
                }
                EventFlow::Continue
            }),
        );

        let mut state = self.state.borrow_mut();
        state.wrapper = Some(wrapper.clone());
        state.wrapper_subscriptions = vec![toggle, outside];
        log::debug!("ToC panel created");
        Some(wrapper)
    }

    fn remove_panel(&self) {
        let dom = self.ctx.dom();
        let mut state = self.state.borrow_mut();

        if let Some(wrapper) = state.wrapper.take() {
            dom.remove(&wrapper);
        }
        for wrapper in dom.query_all(WRAPPER_SELECTOR) {
            dom.remove(&wrapper);
        }
        for subscription in state.wrapper_subscriptions.drain(..) {
            dom.unlisten(subscription);
        }
        if let Some(subscription) = state.tracker_subscription.take() {
            dom.unlisten(subscription);
        }
    }

    /// Replaces the tracker's scroll listener with a fresh one.
    fn bind_tracker(&self) {
        let dom = self.ctx.dom();
        let mut state = self.state.borrow_mut();
        if let Some(stale) = state.tracker_subscription.take() {
            dom.unlisten(stale);
        }

        let tracker: Weak<ScrollTracker<D>> = Rc::downgrade(&self.tracker);
        state.tracker_subscription = Some(dom.listen(
            ListenTarget::Document,
            EventKind::Scroll,
            Rc::new(move |_: &DomEvent<D::Element>| {
                if let Some(tracker) = tracker.upgrade() {
                    tracker.on_scroll();
                }
                EventFlow::Continue
            }),
        ));
    }
}

impl<D: Dom> fmt::Debug for PanelController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("PanelController")
            .field("ctx", &self.ctx)
            .field("mounted", &state.back_to_top.is_some())
            .field("wrapper", &state.wrapper)
            .field("tracking", &state.tracker_subscription.is_some())
            .finish()
    }
}
