//! An in-memory document.
//!
//! `InMemoryDom` keeps a `scraper` HTML tree and simulates just enough of a
//! browser for the widget: selector queries, markup parsing, class state,
//! per-element layout boxes, a scrollable viewport, and event dispatch with
//! click bubbling. Layout is never computed; tests place elements with
//! [`InMemoryDom::set_layout`].
//!
//! Detached elements stay in the tree's storage, so handles to removed
//! elements remain valid and simply report as not attached.

mod markup;

use crate::dom::{
    Dom, DomError, DomEvent, EventFlow, EventHandler, EventKind, ListenTarget, Rect, Subscription,
    Viewport,
};
use markup::{attributes_of, element_node, graft, parse_fragment};
use scraper::{ElementRef, Html, Node, Selector};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Handle to an element of an [`InMemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(ego_tree::NodeId);

struct Listener {
    id: u64,
    target: ListenTarget<NodeId>,
    kind: EventKind,
    handler: EventHandler<NodeId>,
}

/// A `scraper`-backed document for tests and headless use.
pub struct InMemoryDom {
    html: RefCell<Html>,
    /// Boxes in document coordinates.
    layout: RefCell<HashMap<NodeId, Rect>>,
    hidden: RefCell<HashSet<NodeId>>,
    listeners: RefCell<Vec<Listener>>,
    next_listener: Cell<u64>,
    viewport: Cell<Viewport>,
    scrolled_into_view: RefCell<Vec<NodeId>>,
}

impl Default for InMemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDom {
    /// Creates an empty document with an 800px viewport.
    pub fn new() -> Self {
        Self::from_html("")
    }

    /// Creates a document whose body is the given markup.
    ///
    /// Markup is parsed the way a browser parses it, so this never fails:
    /// malformed input is recovered and the recoveries are logged at debug.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        for error in &document.errors {
            log::debug!("Markup recovered: {}", error);
        }
        Self {
            html: RefCell::new(document),
            layout: RefCell::new(HashMap::new()),
            hidden: RefCell::new(HashSet::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            viewport: Cell::new(Viewport {
                scroll_top: 0.0,
                viewport_height: 800.0,
                document_height: 800.0,
            }),
            scrolled_into_view: RefCell::new(Vec::new()),
        }
    }

    /// Places an element at `top` (document coordinates) with the given height.
    pub fn set_layout(&self, element: &NodeId, top: f64, height: f64) {
        self.layout
            .borrow_mut()
            .insert(*element, Rect::new(top, height));
    }

    /// Sets the window height and the full document height.
    pub fn set_viewport(&self, viewport_height: f64, document_height: f64) {
        let mut viewport = self.viewport.get();
        viewport.viewport_height = viewport_height;
        viewport.document_height = document_height;
        self.viewport.set(viewport);
    }

    /// Scrolls the page and dispatches `scroll` to document and window listeners.
    ///
    /// The offset is clamped to the scrollable range, like a browser does.
    pub fn scroll_to(&self, y: f64) {
        let mut viewport = self.viewport.get();
        let max = (viewport.document_height - viewport.viewport_height).max(0.0);
        viewport.scroll_top = y.clamp(0.0, max);
        self.viewport.set(viewport);

        self.dispatch(
            vec![ListenTarget::Document, ListenTarget::Window],
            DomEvent::new(EventKind::Scroll, None),
        );
    }

    /// Clicks an element: `click` bubbles from the element through its
    /// ancestors to the document and window.
    pub fn click(&self, element: &NodeId) {
        let mut path: Vec<ListenTarget<NodeId>> = self
            .ancestors_inclusive(element)
            .into_iter()
            .map(ListenTarget::Element)
            .collect();
        path.push(ListenTarget::Document);
        path.push(ListenTarget::Window);

        self.dispatch(path, DomEvent::new(EventKind::Click, Some(*element)));
    }

    pub fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.with_element(element, |el| el.value().attr(name).map(str::to_string))
            .flatten()
    }

    pub fn is_displayed(&self, element: &NodeId) -> bool {
        !self.hidden.borrow().contains(element)
    }

    /// Whether the element is reachable from the document root.
    pub fn is_attached(&self, element: &NodeId) -> bool {
        let html = self.html.borrow();
        let root = html.tree.root().id();
        html.tree
            .get(element.0)
            .is_some_and(|node| node.ancestors().any(|ancestor| ancestor.id() == root))
    }

    /// Number of live listeners of `kind` on `target`.
    pub fn listener_count(&self, target: &ListenTarget<NodeId>, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind && &l.target == target)
            .count()
    }

    /// Elements passed to `scroll_into_view_nearest`, oldest first.
    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.scrolled_into_view.borrow().clone()
    }

    fn with_element<R>(&self, element: &NodeId, f: impl FnOnce(ElementRef<'_>) -> R) -> Option<R> {
        let html = self.html.borrow();
        html.tree.get(element.0).and_then(ElementRef::wrap).map(f)
    }

    /// The element followed by its ancestor elements.
    fn ancestors_inclusive(&self, element: &NodeId) -> Vec<NodeId> {
        let html = self.html.borrow();
        let Some(node) = html.tree.get(element.0) else {
            return Vec::new();
        };
        std::iter::once(node)
            .chain(node.ancestors())
            .filter(|n| n.value().is_element())
            .map(|n| NodeId(n.id()))
            .collect()
    }

    fn parse_selector(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                let err = DomError::InvalidSelector {
                    selector: selector.to_string(),
                    message: err.to_string(),
                };
                log::warn!("{}", err);
                None
            }
        }
    }

    /// Descendants of `scope` in document order that match `selector`.
    fn select(&self, scope: ego_tree::NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Self::parse_selector(selector) else {
            return Vec::new();
        };
        let html = self.html.borrow();
        let Some(scope) = html.tree.get(scope) else {
            return Vec::new();
        };
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .map(|element| NodeId(element.id()))
            .collect()
    }

    /// Rebuilds the element with an updated attribute list.
    fn update_attributes(&self, element: &NodeId, update: impl FnOnce(&mut Vec<(String, String)>)) {
        let mut html = self.html.borrow_mut();
        let Some(mut node) = html.tree.get_mut(element.0) else {
            return;
        };
        let value = node.value();
        let Node::Element(current) = &*value else {
            return;
        };
        let tag = current.name().to_string();
        let mut attributes = attributes_of(value);
        update(&mut attributes);

        match element_node(&tag, &attributes) {
            Some(rebuilt) => *value = rebuilt,
            None => log::warn!("Could not rebuild <{}> with new attributes", tag),
        }
    }

    fn update_classes(&self, element: &NodeId, update: impl FnOnce(&mut Vec<String>)) {
        self.update_attributes(element, |attributes| {
            let mut classes: Vec<String> = attributes
                .iter()
                .find(|(name, _)| name == "class")
                .map(|(_, value)| value.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
            update(&mut classes);
            set_attribute_in(attributes, "class", classes.join(" "));
        });
    }

    fn detach(&self, element: &NodeId) {
        let mut html = self.html.borrow_mut();
        if element.0 == html.tree.root().id() {
            return;
        }
        if let Some(mut node) = html.tree.get_mut(element.0) {
            node.detach();
        }
    }

    /// Whether `child` may be inserted under `parent` without a cycle.
    fn can_insert(&self, parent: &NodeId, child: &NodeId) -> bool {
        let valid = {
            let html = self.html.borrow();
            html.tree.get(child.0).is_some()
                && html
                    .tree
                    .get(parent.0)
                    .is_some_and(|node| node.value().is_element())
        };
        valid && !self.contains(child, parent)
    }

    fn dispatch(&self, path: Vec<ListenTarget<NodeId>>, event: DomEvent<NodeId>) {
        for target in path {
            // Snapshot so handlers may listen/unlisten while running.
            let handlers: Vec<EventHandler<NodeId>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| l.kind == event.kind && l.target == target)
                .map(|l| Rc::clone(&l.handler))
                .collect();

            let mut stopped = false;
            for handler in handlers {
                if handler(&event) == EventFlow::Stop {
                    stopped = true;
                }
            }
            if stopped {
                return;
            }
        }
    }
}

fn set_attribute_in(attributes: &mut Vec<(String, String)>, name: &str, value: String) {
    match attributes.iter_mut().find(|(key, _)| key == name) {
        Some((_, existing)) => *existing = value,
        None => attributes.push((name.to_string(), value)),
    }
}

impl Dom for InMemoryDom {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let root = self.html.borrow().tree.root().id();
        self.select(root, selector)
    }

    fn query_all_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(scope.0, selector)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let html = self.html.borrow();
        html.tree.get(node.0).is_some_and(|node| {
            node.id() == ancestor.0 || node.ancestors().any(|a| a.id() == ancestor.0)
        })
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.with_element(element, |el| el.value().name().to_ascii_uppercase())
            .unwrap_or_default()
    }

    fn inner_html(&self, element: &NodeId) -> String {
        self.with_element(element, |el| el.inner_html())
            .unwrap_or_default()
    }

    fn inner_text(&self, element: &NodeId) -> String {
        self.with_element(element, |el| el.text().collect::<String>())
            .unwrap_or_default()
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.with_element(element, |el| el.value().classes().any(|c| c == class))
            .unwrap_or(false)
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        let scroll_top = self.viewport.get().scroll_top;
        self.layout
            .borrow()
            .get(element)
            .map(|layout| Rect::new(layout.top - scroll_top, layout.height))
            .unwrap_or_default()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let node = element_node(&tag.to_ascii_lowercase(), &[])?;
        let mut html = self.html.borrow_mut();
        Some(NodeId(html.tree.orphan(node).id()))
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        self.update_attributes(element, |attributes| {
            set_attribute_in(attributes, &name, value.to_string());
        });
    }

    fn set_inner_html(&self, element: &NodeId, markup: &str) {
        let fragment = parse_fragment(markup);
        let mut html = self.html.borrow_mut();

        let old: Vec<ego_tree::NodeId> = match html.tree.get(element.0) {
            Some(node) if node.value().is_element() => node.children().map(|c| c.id()).collect(),
            _ => return,
        };
        for id in old {
            if let Some(mut child) = html.tree.get_mut(id) {
                child.detach();
            }
        }
        graft(&mut html.tree, element.0, *fragment.root_element());
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        if !self.can_insert(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(mut parent) = self.html.borrow_mut().tree.get_mut(parent.0) {
            parent.append_id(child.0);
        }
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) {
        if !self.can_insert(parent, child) {
            return;
        }
        self.detach(child);

        let mut html = self.html.borrow_mut();
        let first = html.tree.get(parent.0).and_then(|node| {
            node.children()
                .find(|c| c.value().is_element())
                .map(|c| c.id())
        });
        match first {
            Some(first) => {
                if let Some(mut first) = html.tree.get_mut(first) {
                    first.insert_id_before(child.0);
                }
            }
            None => {
                if let Some(mut parent) = html.tree.get_mut(parent.0) {
                    parent.append_id(child.0);
                }
            }
        }
    }

    fn remove(&self, element: &NodeId) {
        self.detach(element);
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        self.update_classes(element, |classes| {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        self.update_classes(element, |classes| classes.retain(|c| c != class));
    }

    fn toggle_class(&self, element: &NodeId, class: &str) {
        self.update_classes(element, |classes| {
            if classes.iter().any(|c| c == class) {
                classes.retain(|c| c != class);
            } else {
                classes.push(class.to_string());
            }
        });
    }

    fn set_display(&self, element: &NodeId, visible: bool) {
        let mut hidden = self.hidden.borrow_mut();
        if visible {
            hidden.remove(element);
        } else {
            hidden.insert(*element);
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn scroll_to_top(&self) {
        self.scroll_to(0.0);
    }

    fn scroll_into_view_nearest(&self, element: &NodeId) {
        self.scrolled_into_view.borrow_mut().push(*element);
    }

    fn listen(
        &self,
        target: ListenTarget<NodeId>,
        kind: EventKind,
        handler: EventHandler<NodeId>,
    ) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            target,
            kind,
            handler,
        });
        Subscription::new(id)
    }

    fn unlisten(&self, subscription: Subscription) {
        self.listeners
            .borrow_mut()
            .retain(|l| l.id != subscription.id());
    }

    fn name(&self) -> &'static str {
        "InMemoryDom"
    }
}

impl fmt::Debug for InMemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements = self
            .html
            .borrow()
            .tree
            .root()
            .descendants()
            .filter(|n| n.value().is_element())
            .count();
        f.debug_struct("InMemoryDom")
            .field("elements", &elements)
            .field("listeners", &self.listeners.borrow().len())
            .field("viewport", &self.viewport.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<main><section id="main" class="markdown-section"><h1>Intro</h1><p>text</p><h2 id="setup">Setup <code>cargo</code></h2><div class="note"><h3>Nested</h3></div></section></main><div class="content"></div>"#;

    fn page() -> InMemoryDom {
        InMemoryDom::from_html(PAGE)
    }

    #[test]
    fn test_from_html_and_query() {
        let dom = page();
        let headings = dom.query_all("#main h1, #main h2, #main h3");
        assert_eq!(headings.len(), 3);
        assert_eq!(dom.tag_name(&headings[0]), "H1");
        assert_eq!(dom.tag_name(&headings[2]), "H3");
    }

    #[test]
    fn test_query_respects_document_order_across_groups() {
        let dom = page();
        let headings = dom.query_all("h3, h1");
        let tags: Vec<String> = headings.iter().map(|h| dom.tag_name(h)).collect();
        assert_eq!(tags, vec!["H1", "H3"]);
    }

    #[test]
    fn test_child_combinator() {
        let dom = page();
        assert_eq!(dom.query_all("#main > h3").len(), 0);
        assert_eq!(dom.query_all(".note > h3").len(), 1);
        assert_eq!(dom.query_all("main > section > h2").len(), 1);
    }

    #[test]
    fn test_query_all_within_scope() {
        let dom = page();
        let note = dom.query(".note").unwrap();
        let inner = dom.query_all_within(&note, "h1, h3");
        assert_eq!(inner.len(), 1);
        assert_eq!(dom.inner_text(&inner[0]), "Nested");
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let dom = page();
        assert!(dom.query_all("h2[").is_empty());
        assert!(dom.query_all(":::").is_empty());
        assert!(dom.query("").is_none());
    }

    #[test]
    fn test_inner_html_and_text() {
        let dom = page();
        let h2 = dom.query("#setup").unwrap();
        assert_eq!(dom.inner_html(&h2), "Setup <code>cargo</code>");
        assert_eq!(dom.inner_text(&h2), "Setup cargo");
    }

    #[test]
    fn test_set_inner_html_replaces_children() {
        let dom = page();
        let content = dom.query(".content").unwrap();
        dom.set_inner_html(&content, r#"<div class="page_toc"><div class="lv1">A</div></div>"#);
        assert_eq!(dom.query_all(".page_toc > div").len(), 1);

        dom.set_inner_html(
            &content,
            r#"<div class="page_toc"><div class="lv1">A</div><div class="lv2">B</div></div>"#,
        );
        assert_eq!(dom.query_all(".page_toc > div").len(), 2);
        assert_eq!(dom.query_all(".page_toc").len(), 1);
    }

    #[test]
    fn test_create_prepend_and_remove() {
        let dom = page();
        let main = dom.query("main").unwrap();
        let span = dom.create_element("span").unwrap();
        dom.set_attribute(&span, "id", "docs-gotop");

        assert!(!dom.is_attached(&span));
        dom.prepend_child(&main, &span);
        assert!(dom.is_attached(&span));
        assert_eq!(dom.query("main > *"), Some(span));

        dom.remove(&span);
        assert!(!dom.is_attached(&span));
        assert!(dom.query("#docs-gotop").is_none());
    }

    #[test]
    fn test_append_child_moves_element() {
        let dom = page();
        let note = dom.query(".note").unwrap();
        let content = dom.query(".content").unwrap();
        dom.append_child(&content, &note);
        assert!(dom.contains(&content, &note));
        assert_eq!(dom.query_all("#main h3").len(), 0);
    }

    #[test]
    fn test_class_operations() {
        let dom = page();
        let note = dom.query(".note").unwrap();

        dom.add_class(&note, "open");
        dom.add_class(&note, "open");
        assert_eq!(dom.attribute(&note, "class").as_deref(), Some("note open"));

        dom.toggle_class(&note, "open");
        assert!(!dom.has_class(&note, "open"));
        dom.toggle_class(&note, "open");
        assert!(dom.has_class(&note, "open"));

        dom.remove_class(&note, "open");
        assert_eq!(dom.attribute(&note, "class").as_deref(), Some("note"));
    }

    #[test]
    fn test_contains() {
        let dom = page();
        let main = dom.query("main").unwrap();
        let h3 = dom.query("h3").unwrap();
        let content = dom.query(".content").unwrap();
        assert!(dom.contains(&main, &h3));
        assert!(dom.contains(&main, &main));
        assert!(!dom.contains(&content, &h3));
    }

    #[test]
    fn test_bounding_rect_follows_scroll() {
        let dom = page();
        dom.set_viewport(500.0, 2000.0);
        let h2 = dom.query("h2").unwrap();
        dom.set_layout(&h2, 900.0, 40.0);

        assert_eq!(dom.bounding_rect(&h2), Rect::new(900.0, 40.0));
        dom.scroll_to(600.0);
        assert_eq!(dom.bounding_rect(&h2), Rect::new(300.0, 40.0));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let dom = page();
        dom.set_viewport(500.0, 2000.0);
        dom.scroll_to(5000.0);
        assert_eq!(dom.viewport().scroll_top, 1500.0);
        dom.scroll_to(-10.0);
        assert_eq!(dom.viewport().scroll_top, 0.0);
    }

    #[test]
    fn test_scroll_dispatch_and_unlisten() {
        let dom = page();
        dom.set_viewport(500.0, 2000.0);
        let hits = Rc::new(Cell::new(0));

        let sub = {
            let hits = Rc::clone(&hits);
            dom.listen(
                ListenTarget::Document,
                EventKind::Scroll,
                Rc::new(move |_: &DomEvent<NodeId>| {
                    hits.set(hits.get() + 1);
                    EventFlow::Continue
                }),
            )
        };
        assert_eq!(dom.listener_count(&ListenTarget::Document, EventKind::Scroll), 1);

        dom.scroll_to(100.0);
        dom.scroll_to(200.0);
        assert_eq!(hits.get(), 2);

        dom.unlisten(sub);
        dom.scroll_to(300.0);
        assert_eq!(hits.get(), 2);
        assert_eq!(dom.listener_count(&ListenTarget::Document, EventKind::Scroll), 0);
    }

    #[test]
    fn test_click_bubbles_to_document() {
        let dom = page();
        let h3 = dom.query("h3").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for (name, target) in [
            ("note", ListenTarget::Element(dom.query(".note").unwrap())),
            ("document", ListenTarget::Document),
        ] {
            let seen = Rc::clone(&seen);
            let _ = dom.listen(
                target,
                EventKind::Click,
                Rc::new(move |event: &DomEvent<NodeId>| {
                    seen.borrow_mut().push((name, event.target));
                    EventFlow::Continue
                }),
            );
        }

        dom.click(&h3);
        assert_eq!(*seen.borrow(), vec![("note", Some(h3)), ("document", Some(h3))]);
    }

    #[test]
    fn test_stop_propagation() {
        let dom = page();
        let h3 = dom.query("h3").unwrap();
        let document_hits = Rc::new(Cell::new(0));

        let _ = dom.listen(
            ListenTarget::Element(h3),
            EventKind::Click,
            Rc::new(|_: &DomEvent<NodeId>| EventFlow::Stop),
        );
        {
            let document_hits = Rc::clone(&document_hits);
            let _ = dom.listen(
                ListenTarget::Document,
                EventKind::Click,
                Rc::new(move |_: &DomEvent<NodeId>| {
                    document_hits.set(document_hits.get() + 1);
                    EventFlow::Continue
                }),
            );
        }

        dom.click(&h3);
        assert_eq!(document_hits.get(), 0);
    }

    #[test]
    fn test_display_and_scroll_into_view_log() {
        let dom = page();
        let h1 = dom.query("h1").unwrap();
        assert!(dom.is_displayed(&h1));
        dom.set_display(&h1, false);
        assert!(!dom.is_displayed(&h1));

        dom.scroll_into_view_nearest(&h1);
        assert_eq!(dom.scrolled_into_view(), vec![h1]);
    }

    #[test]
    fn test_attribute_selectors() {
        let dom = page();
        assert_eq!(dom.query_all("h2[id]").len(), 1);
        assert_eq!(dom.query_all("[class~=note] h3").len(), 1);
    }

    #[test]
    fn test_entities_are_decoded_in_text() {
        let dom = InMemoryDom::from_html(r#"<section id="main"><h2>Q&amp;A</h2></section>"#);
        let h2 = dom.query("#main h2").unwrap();
        assert_eq!(dom.inner_text(&h2), "Q&A");
        assert_eq!(dom.inner_html(&h2), "Q&amp;A");
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let dom = InMemoryDom::from_html(
            r#"<section id="main"><div><b>x</i>y</b></div><h2>After</h2></section>"#,
        );
        assert_eq!(dom.query_all("#main > h2").len(), 1);
        let div = dom.query("#main > div").unwrap();
        assert_eq!(dom.inner_html(&div), "<b>xy</b>");
    }

    #[test]
    fn test_void_elements_do_not_swallow_siblings() {
        let dom = InMemoryDom::from_html("<p id=\"a\">one<br>two</p><p>three</p>");
        assert_eq!(dom.query_all("p").len(), 2);
        let first = dom.query("#a").unwrap();
        assert_eq!(dom.inner_text(&first), "onetwo");
    }

    #[test]
    fn test_replaced_children_are_detached() {
        let dom = page();
        let content = dom.query(".content").unwrap();
        dom.set_inner_html(&content, "<p>old</p>");
        let old = dom.query(".content > p").unwrap();

        dom.set_inner_html(&content, "<p>new</p>");
        assert!(!dom.is_attached(&old));
        let paragraphs = dom.query_all(".content > p");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(dom.inner_text(&paragraphs[0]), "new");
    }

    #[test]
    fn test_insert_rejects_cycles() {
        let dom = page();
        let main = dom.query("main").unwrap();
        let note = dom.query(".note").unwrap();
        dom.append_child(&note, &main);
        dom.prepend_child(&main, &main);
        assert!(dom.is_attached(&main));
        assert!(dom.contains(&main, &note));
    }

    #[test]
    fn test_attribute_order_is_kept_on_update() {
        let dom = page();
        let h2 = dom.query("#setup").unwrap();
        dom.add_class(&h2, "active");
        dom.set_attribute(&h2, "id", "install");
        assert_eq!(dom.attribute(&h2, "id").as_deref(), Some("install"));
        assert_eq!(dom.query("#install.active"), Some(h2));
        assert_eq!(dom.inner_html(&h2), "Setup <code>cargo</code>");
    }
}
