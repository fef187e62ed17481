mod common;

use common::fixtures::{GUIDE, STUB};
use common::{Harness, TestResult};
use pagetoc::{Dom, Rect, Viewport, select_active};

// Guide, Install, Linux, macOS, Usage, Flags, Changelog.
const GUIDE_TOPS: [f64; 7] = [0.0, 200.0, 700.0, 1200.0, 1800.0, 3500.0, 3800.0];

fn guide() -> Result<Harness, Box<dyn std::error::Error>> {
    let harness = Harness::new("{}")?;
    harness.navigate(GUIDE);
    harness.layout_headings(&GUIDE_TOPS);
    Ok(harness)
}

#[test]
fn test_first_entry_active_after_render() -> TestResult {
    let harness = guide()?;
    assert_eq!(harness.active(), vec!["Install"]);
    Ok(())
}

#[test]
fn test_top_of_page_forces_first_entry() -> TestResult {
    let harness = Harness::new("{}")?;
    harness.navigate(GUIDE);
    // Nothing is inside the viewport at offset 0.
    harness.layout_headings(&[900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0]);

    harness.scroll_and_frame(1250.0);
    assert_eq!(harness.active(), vec!["Usage"]);

    harness.scroll_and_frame(0.0);
    assert_eq!(harness.active(), vec!["Install"]);
    Ok(())
}

#[test]
fn test_first_visible_heading_wins() -> TestResult {
    let harness = guide()?;

    harness.scroll_and_frame(1000.0);
    assert_eq!(harness.active(), vec!["macOS"]);

    harness.scroll_and_frame(1700.0);
    assert_eq!(harness.active(), vec!["Usage"]);
    Ok(())
}

#[test]
fn test_bottom_of_page_keeps_first_visible() -> TestResult {
    let harness = guide()?;

    // Offset 3400 is the end of the page; Flags and Changelog are both in view.
    harness.scroll_and_frame(3400.0);
    assert_eq!(harness.dom.viewport().distance_to_bottom(), 0.0);
    assert_eq!(harness.active(), vec!["Flags"]);
    Ok(())
}

#[test]
fn test_gap_between_headings_keeps_previous_entry() -> TestResult {
    let harness = guide()?;
    harness.scroll_and_frame(1000.0);
    assert_eq!(harness.active(), vec!["macOS"]);

    // Between Usage (1800) and Flags (3500) nothing is in view.
    harness.scroll_and_frame(2500.0);
    assert_eq!(harness.active(), vec!["macOS"]);
    Ok(())
}

#[test]
fn test_burst_of_scroll_events_runs_one_frame() -> TestResult {
    let harness = guide()?;
    let before = harness.scheduler.frames_run();

    for y in [100.0, 400.0, 800.0, 1000.0] {
        harness.dom.scroll_to(y);
    }
    assert_eq!(harness.scheduler.pending(), 1);

    harness.scheduler.run_frame();
    assert_eq!(harness.scheduler.frames_run(), before + 1);
    // The frame sees the last offset, not the first.
    assert_eq!(harness.active(), vec!["macOS"]);
    Ok(())
}

#[test]
fn test_repeated_renders_do_not_stack_listeners() -> TestResult {
    let harness = guide()?;
    harness.hook.run_done_each();
    harness.hook.run_done_each();

    harness.dom.scroll_to(1000.0);
    assert_eq!(harness.scheduler.pending(), 1);
    assert_eq!(harness.scheduler.run_frame(), 1);
    assert_eq!(harness.scheduler.pending(), 0);
    Ok(())
}

#[test]
fn test_no_tracking_after_panel_removed() -> TestResult {
    let harness = guide()?;
    harness.navigate(STUB);

    harness.dom.scroll_to(500.0);
    assert_eq!(harness.scheduler.pending(), 0);
    assert!(!harness.panel.is_tracking());
    Ok(())
}

#[test]
fn test_active_entry_scrolled_into_panel_view() -> TestResult {
    let harness = guide()?;
    harness.scroll_and_frame(1000.0);

    let entries = harness.entries();
    assert_eq!(harness.dom.scrolled_into_view().last(), Some(&entries[2]));
    Ok(())
}

#[test]
fn test_ignored_headings_keep_entries_aligned() -> TestResult {
    let harness = Harness::new(r#"{"ignoreHeaders": ["^Linux$"]}"#)?;
    harness.navigate(GUIDE);
    harness.layout_headings(&GUIDE_TOPS);

    // Linux is skipped, so macOS is the second entry.
    harness.scroll_and_frame(1000.0);
    assert_eq!(harness.active(), vec!["macOS"]);
    assert_eq!(harness.entries().len(), 5);

    // Only the ignored Linux heading is in view: nothing changes.
    harness.scroll_and_frame(300.0);
    assert_eq!(harness.active(), vec!["macOS"]);
    Ok(())
}

#[test]
fn test_back_to_top_follows_window_scroll() -> TestResult {
    let harness = guide()?;
    let button = harness.dom.query("#docs-gotop").ok_or("back-to-top control missing")?;

    harness.dom.scroll_to(250.0);
    assert!(!harness.dom.is_displayed(&button));
    harness.dom.scroll_to(1200.0);
    assert!(harness.dom.is_displayed(&button));

    harness.dom.click(&button);
    assert_eq!(harness.dom.viewport().scroll_top, 0.0);
    assert!(!harness.dom.is_displayed(&button));

    harness.scheduler.run_frame();
    assert_eq!(harness.active(), vec!["Install"]);
    Ok(())
}

#[test]
fn test_select_active_matches_live_tracking() {
    let viewport = Viewport {
        scroll_top: 1000.0,
        viewport_height: 600.0,
        document_height: 4000.0,
    };
    let rects: Vec<Rect> = GUIDE_TOPS[1..]
        .iter()
        .map(|top| Rect::new(top - viewport.scroll_top, 40.0))
        .collect();
    assert_eq!(select_active(&rects, &viewport), Some(2));
}
