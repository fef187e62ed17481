//! Scroll Tracker: keeps the ToC entry of the heading in view highlighted.

use crate::builder::TOC_ENTRY_SELECTOR;
use crate::config::BOTTOM_THRESHOLD;
use crate::context::RenderContext;
use crate::heading::included_headings;
use crate::throttle::FrameThrottle;
use pagetoc_traits::{Dom, Rect, Viewport};
use std::fmt;
use std::rc::Rc;

/// Class marking the highlighted entry.
pub const ACTIVE_CLASS: &str = "active";

/// Whether a heading intersects the viewport vertically.
pub fn is_visible(rect: &Rect, viewport: &Viewport) -> bool {
    rect.top <= viewport.viewport_height && rect.bottom() > 0.0
}

/// Indexes of visible headings, in document order.
pub fn visible_indexes(rects: &[Rect], viewport: &Viewport) -> Vec<usize> {
    rects
        .iter()
        .enumerate()
        .filter(|(_, rect)| is_visible(rect, viewport))
        .map(|(index, _)| index)
        .collect()
}

/// Picks the heading whose entry should be active.
///
/// At the very top of the page the first heading wins regardless of
/// geometry. Near the bottom the selection collapses to the first visible
/// heading, the same one chosen anywhere else on the page. Returns `None`
/// when nothing is visible, in which case the previous highlight stays.
pub fn select_active(rects: &[Rect], viewport: &Viewport) -> Option<usize> {
    if rects.is_empty() {
        return None;
    }

    let mut visible = visible_indexes(rects, viewport);

    if viewport.scroll_top == 0.0 {
        visible = vec![0];
    } else if viewport.distance_to_bottom() < BOTTOM_THRESHOLD && !visible.is_empty() {
        visible.truncate(1);
    }

    visible.first().copied()
}

/// Recomputes the active entry on scroll.
pub struct ScrollTracker<D: Dom> {
    ctx: RenderContext<D>,
    throttle: FrameThrottle,
}

impl<D: Dom + 'static> ScrollTracker<D> {
    pub fn new(ctx: RenderContext<D>) -> Self {
        let throttle = FrameThrottle::new(Rc::clone(ctx.scheduler()));
        Self { ctx, throttle }
    }

    /// Recomputes and applies the active entry now. Returns its index.
    pub fn update(&self) -> Option<usize> {
        let dom = self.ctx.dom();
        let rects: Vec<Rect> = included_headings(&self.ctx)
            .iter()
            .map(|heading| dom.bounding_rect(&heading.element))
            .collect();
        let viewport = dom.viewport();

        let active = select_active(&rects, &viewport)?;
        log::trace!(
            "Active ToC entry {} of {} at scroll offset {}",
            active,
            rects.len(),
            viewport.scroll_top
        );

        for (index, entry) in dom.query_all(TOC_ENTRY_SELECTOR).iter().enumerate() {
            if index == active {
                dom.add_class(entry, ACTIVE_CLASS);
                dom.scroll_into_view_nearest(entry);
            } else {
                dom.remove_class(entry, ACTIVE_CLASS);
            }
        }
        Some(active)
    }

    /// Schedules an update for the next animation frame. Returns `false`
    /// if one is already pending.
    pub fn on_scroll(self: &Rc<Self>) -> bool {
        let tracker = Rc::downgrade(self);
        self.throttle.schedule(move || {
            if let Some(tracker) = tracker.upgrade() {
                tracker.update();
            }
        })
    }

    pub fn is_pending(&self) -> bool {
        self.throttle.is_pending()
    }
}

impl<D: Dom> fmt::Debug for ScrollTracker<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("ctx", &self.ctx)
            .field("throttle", &self.throttle)
            .finish()
    }
}
