//! Markup helpers for the in-memory document.
//!
//! Parsing goes through html5ever (via `scraper`), so fragments get the same
//! tree a browser builds: stray end tags are dropped, void elements close
//! themselves, and entity references are decoded into text.

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{ElementRef, Html, Node};

/// Parses a fragment in a `<body>` context.
pub(crate) fn parse_fragment(html: &str) -> Html {
    let fragment = Html::parse_fragment(html);
    for error in &fragment.errors {
        log::debug!("Markup recovered: {}", error);
    }
    fragment
}

/// Copies the children of `source` (from another tree) under `parent`.
pub(crate) fn graft(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) {
    for child in source.children() {
        let id = tree.orphan(child.value().clone()).id();
        if let Some(mut parent) = tree.get_mut(parent) {
            parent.append_id(id);
        }
        graft(tree, id, child);
    }
}

/// Escapes a value for use inside a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn is_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Builds a standalone element node with the given attributes, in order.
///
/// Returns `None` for names the parser would not produce an element for in
/// a body context (table parts, `html`, invalid names).
pub(crate) fn element_node(tag: &str, attributes: &[(String, String)]) -> Option<Node> {
    if !is_tag_name(tag) {
        return None;
    }
    let mut markup = format!("<{}", tag);
    for (name, value) in attributes {
        markup.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    markup.push_str(&format!("></{}>", tag));

    let fragment = Html::parse_fragment(&markup);
    fragment
        .root_element()
        .children()
        .find_map(ElementRef::wrap)
        .filter(|element| element.value().name().eq_ignore_ascii_case(tag))
        .map(|element| Node::Element(element.value().clone()))
}

/// Attributes of an element node, in document order.
pub(crate) fn attributes_of(node: &Node) -> Vec<(String, String)> {
    match node {
        Node::Element(element) => element
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_keeps_attribute_order() {
        let node = element_node(
            "span",
            &[
                ("id".to_string(), "docs-gotop".to_string()),
                ("title".to_string(), "Back to top".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            attributes_of(&node),
            vec![
                ("id".to_string(), "docs-gotop".to_string()),
                ("title".to_string(), "Back to top".to_string()),
            ]
        );
    }

    #[test]
    fn test_element_node_round_trips_special_characters() {
        let value = r#"say "hi" & leave"#.to_string();
        let node = element_node("div", &[("title".to_string(), value.clone())]).unwrap();
        assert_eq!(attributes_of(&node), vec![("title".to_string(), value)]);
    }

    #[test]
    fn test_element_node_rejects_bad_names() {
        assert!(element_node("", &[]).is_none());
        assert!(element_node("div onclick", &[]).is_none());
        assert!(element_node("1up", &[]).is_none());
        assert!(element_node("td", &[]).is_none());
    }

    #[test]
    fn test_graft_copies_whole_fragment() {
        let fragment = parse_fragment("<p>one<br>two</p><p>three</p>");
        let mut tree = Tree::new(Node::Document);
        let root = tree.root().id();
        graft(&mut tree, root, *fragment.root_element());

        let paragraphs: Vec<_> = tree.root().children().collect();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].children().count(), 3);
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
    }
}
