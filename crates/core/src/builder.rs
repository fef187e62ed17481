//! ToC Builder: turns the page's headings into the ToC markup.

use crate::config::CompiledConfig;
use crate::context::RenderContext;
use crate::heading::{HeadingDescriptor, collect_headings};
use pagetoc_traits::Dom;

/// Class of the element wrapping all entries.
pub const TOC_ROOT_CLASS: &str = "page_toc";

/// Selector for the rendered entries, in entry order.
pub const TOC_ENTRY_SELECTOR: &str = ".page_toc > div";

/// Rendered ToC markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocMarkup {
    html: String,
    entries: usize,
}

impl TocMarkup {
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of `lv<N>` entries in the markup.
    pub fn entries(&self) -> usize {
        self.entries
    }
}

/// A single entry block, or `None` when the level is out of range.
pub fn render_entry(level: u8, html: &str, config: &CompiledConfig) -> Option<String> {
    if !config.level_in_range(level) {
        return None;
    }
    Some(format!(r#"<div class="lv{}">{}</div>"#, level, html))
}

/// Builds the ToC for the given headings.
///
/// Returns `None` unless strictly more than `noTocIfHeadingsFoundIs`
/// entries are produced.
pub fn build_toc<'a>(
    headings: impl IntoIterator<Item = &'a HeadingDescriptor>,
    config: &CompiledConfig,
) -> Option<TocMarkup> {
    let entries: Vec<String> = headings
        .into_iter()
        .filter(|heading| !config.is_ignored(&heading.text))
        .filter_map(|heading| {
            heading
                .level
                .and_then(|level| render_entry(level, &heading.html, config))
        })
        .collect();

    if entries.len() <= config.min_headings() {
        log::debug!(
            "{} ToC entries, need more than {}; no ToC",
            entries.len(),
            config.min_headings()
        );
        return None;
    }

    let mut html = format!(r#"<div class="{}">"#, TOC_ROOT_CLASS);
    for entry in &entries {
        html.push_str(entry);
    }
    html.push_str("</div>");

    Some(TocMarkup {
        html,
        entries: entries.len(),
    })
}

/// Builds the ToC for the headings currently in the main content.
pub fn page_toc<D: Dom>(ctx: &RenderContext<D>) -> Option<TocMarkup> {
    let descriptors: Vec<HeadingDescriptor> = collect_headings(ctx)
        .into_iter()
        .map(|heading| heading.descriptor)
        .collect();
    build_toc(&descriptors, ctx.config())
}
