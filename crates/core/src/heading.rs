//! Heading descriptors, read fresh from the page on every render.

use crate::context::RenderContext;
use pagetoc_traits::Dom;

/// Selector of the element whose descendants are scanned for headings.
pub const MAIN_SELECTOR: &str = "#main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingDescriptor {
    /// Level derived from the tag name, `None` for non-heading tags.
    pub level: Option<u8>,
    /// Inner markup, embedded verbatim into the ToC entry.
    pub html: String,
    /// Visible text, used for ignore-pattern matching.
    pub text: String,
}

impl HeadingDescriptor {
    pub fn new(level: Option<u8>, html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            html: html.into(),
            text: text.into(),
        }
    }

    pub fn read<D: Dom>(dom: &D, element: &D::Element) -> Self {
        Self {
            level: level_from_tag(&dom.tag_name(element)),
            html: dom.inner_html(element),
            text: dom.inner_text(element),
        }
    }
}

/// Heading level of a tag name: `"H2"` and `"h2"` give `Some(2)`.
pub fn level_from_tag(tag: &str) -> Option<u8> {
    let digits = tag.strip_prefix(['h', 'H'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A heading element together with its descriptor.
#[derive(Debug, Clone)]
pub struct Heading<E> {
    pub element: E,
    pub descriptor: HeadingDescriptor,
}

/// All elements matching the configured target inside the main content,
/// in document order. Empty when the main content is missing.
pub fn collect_headings<D: Dom>(ctx: &RenderContext<D>) -> Vec<Heading<D::Element>> {
    let dom = ctx.dom();
    let Some(main) = dom.query(MAIN_SELECTOR) else {
        log::debug!("No {} element; no headings collected", MAIN_SELECTOR);
        return Vec::new();
    };

    dom.query_all_within(&main, ctx.config().target())
        .into_iter()
        .map(|element| {
            let descriptor = HeadingDescriptor::read(dom.as_ref(), &element);
            Heading {
                element,
                descriptor,
            }
        })
        .collect()
}

/// The headings that produce ToC entries, in entry order.
pub fn included_headings<D: Dom>(ctx: &RenderContext<D>) -> Vec<Heading<D::Element>> {
    collect_headings(ctx)
        .into_iter()
        .filter(|heading| ctx.config().includes(&heading.descriptor))
        .collect()
}
