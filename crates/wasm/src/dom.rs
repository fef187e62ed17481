//! `Dom` backed by the browser document.

use pagetoc_traits::{
    Dom, DomEvent, EventFlow, EventHandler, EventKind, ListenTarget, Rect, Subscription, Viewport,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, Node, NodeList, ScrollBehavior,
    ScrollToOptions, Window,
};

struct Binding {
    target: EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
}

/// The live page.
///
/// Platform errors are logged and turned into no-ops. Listener closures are
/// owned here until unlistened; dropping a `WebDom` detaches them all.
pub struct WebDom {
    window: Window,
    document: Document,
    bindings: RefCell<HashMap<u64, Binding>>,
    next_binding: Cell<u64>,
}

impl WebDom {
    /// The current window's document, or `None` outside a browser.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::with_window(window, document))
    }

    pub fn with_window(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            bindings: RefCell::new(HashMap::new()),
            next_binding: Cell::new(1),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Closest ancestor whose content overflows it, stopping before the
    /// page's own scrolling elements.
    fn scroll_container(&self, element: &Element) -> Option<Element> {
        let root = self.document.document_element();
        let body: Option<Element> = self.document.body().map(Into::into);
        let mut current = element.parent_element();
        while let Some(candidate) = current {
            if Some(&candidate) == root.as_ref() || Some(&candidate) == body.as_ref() {
                return None;
            }
            if candidate.scroll_height() > candidate.client_height() {
                return Some(candidate);
            }
            current = candidate.parent_element();
        }
        None
    }

    /// Number of listeners currently attached through this document.
    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    fn scrolling_element(&self) -> Option<Element> {
        self.document
            .scrolling_element()
            .or_else(|| self.document.body().map(Into::into))
    }

    fn event_target(&self, target: ListenTarget<Element>) -> EventTarget {
        match target {
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Element(element) => element.into(),
        }
    }

    fn detach(binding: &Binding) {
        if let Err(err) = binding.target.remove_event_listener_with_callback(
            binding.kind.as_str(),
            binding.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("Failed to remove {} listener: {:?}", binding.kind.as_str(), err);
        }
    }
}

fn elements(list: Result<NodeList, wasm_bindgen::JsValue>, selector: &str) -> Vec<Element> {
    let list = match list {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Invalid selector '{}': {:?}", selector, err);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .unwrap_or_else(|err| {
                log::warn!("Invalid selector '{}': {:?}", selector, err);
                None
            })
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector), selector)
    }

    fn query_all_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        elements(scope.query_selector_all(selector), selector)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn inner_text(&self, element: &Element) -> String {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => element.text_content().unwrap_or_default(),
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.top(), rect.height())
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document
            .create_element(tag)
            .map_err(|err| log::warn!("Failed to create <{}>: {:?}", tag, err))
            .ok()
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            log::warn!("Failed to set attribute '{}': {:?}", name, err);
        }
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log::warn!("Failed to append <{}>: {:?}", child.tag_name(), err);
        }
    }

    fn prepend_child(&self, parent: &Element, child: &Element) {
        let first = parent.first_element_child();
        if let Err(err) = parent.insert_before(child, first.as_deref()) {
            log::warn!("Failed to prepend <{}>: {:?}", child.tag_name(), err);
        }
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().add_1(class) {
            log::warn!("Failed to add class '{}': {:?}", class, err);
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().remove_1(class) {
            log::warn!("Failed to remove class '{}': {:?}", class, err);
        }
    }

    fn toggle_class(&self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().toggle(class) {
            log::warn!("Failed to toggle class '{}': {:?}", class, err);
        }
    }

    fn set_display(&self, element: &Element, visible: bool) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let value = if visible { "block" } else { "none" };
        if let Err(err) = html.style().set_property("display", value) {
            log::warn!("Failed to set display: {:?}", err);
        }
    }

    fn viewport(&self) -> Viewport {
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0);

        let Some(scrolling) = self.scrolling_element() else {
            return Viewport {
                scroll_top: 0.0,
                viewport_height,
                document_height: viewport_height,
            };
        };
        let document_height = match scrolling.dyn_ref::<HtmlElement>() {
            Some(html) => f64::from(html.offset_height()),
            None => f64::from(scrolling.scroll_height()),
        };

        Viewport {
            scroll_top: f64::from(scrolling.scroll_top()),
            viewport_height,
            document_height,
        }
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    /// Adjusts only the nearest scrollable ancestor below `<body>`; the
    /// page itself never moves.
    fn scroll_into_view_nearest(&self, element: &Element) {
        let Some(container) = self.scroll_container(element) else {
            return;
        };
        let item = element.get_bounding_client_rect();
        let frame = container.get_bounding_client_rect();

        let delta = if item.top() < frame.top() {
            item.top() - frame.top()
        } else if item.bottom() > frame.bottom() {
            (item.bottom() - frame.bottom()).min(item.top() - frame.top())
        } else {
            return;
        };
        let scroll_top = container.scroll_top() as f64 + delta;
        container.set_scroll_top(scroll_top.round() as i32);
    }

    fn listen(
        &self,
        target: ListenTarget<Element>,
        kind: EventKind,
        handler: EventHandler<Element>,
    ) -> Subscription {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let origin = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            if handler(&DomEvent::new(kind, origin)) == EventFlow::Stop {
                event.stop_propagation();
            }
        }) as Box<dyn FnMut(Event)>);

        let target = self.event_target(target);
        if let Err(err) =
            target.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to add {} listener: {:?}", kind.as_str(), err);
        }

        let id = self.next_binding.get();
        self.next_binding.set(id + 1);
        self.bindings.borrow_mut().insert(
            id,
            Binding {
                target,
                kind,
                closure,
            },
        );
        Subscription::new(id)
    }

    fn unlisten(&self, subscription: Subscription) {
        let binding = self.bindings.borrow_mut().remove(&subscription.id());
        if let Some(binding) = binding {
            Self::detach(&binding);
        }
    }

    fn name(&self) -> &'static str {
        "WebDom"
    }
}

impl Drop for WebDom {
    fn drop(&mut self) {
        for (_, binding) in self.bindings.get_mut().drain() {
            Self::detach(&binding);
        }
    }
}

impl fmt::Debug for WebDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebDom")
            .field("bindings", &self.bindings.borrow().len())
            .finish()
    }
}
