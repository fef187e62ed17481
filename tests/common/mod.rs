pub mod fixtures;

use pagetoc::{Dom, Hook, InMemoryDom, ManualFrameScheduler, NodeId, PanelController};
use std::rc::Rc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A page with the widget wired into a hook, driven by hand.
pub struct Harness {
    pub dom: Rc<InMemoryDom>,
    pub scheduler: Rc<ManualFrameScheduler>,
    pub hook: Hook,
    pub panel: Rc<PanelController<InMemoryDom>>,
}

impl Harness {
    /// The host scaffold with the given options (JSON), already mounted.
    pub fn new(options: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let _ = env_logger::builder().is_test(true).try_init();

        let dom = Rc::new(InMemoryDom::from_html(fixtures::SCAFFOLD));
        dom.set_viewport(600.0, 4000.0);
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let (hook, panel) = pagetoc::hook_from_json(dom.clone(), scheduler.clone(), options)?;
        hook.run_mounted();

        Ok(Self {
            dom,
            scheduler,
            hook,
            panel,
        })
    }

    /// Swaps the article content and runs the render hook, like a route change.
    pub fn navigate(&self, article: &str) {
        let main = self.dom.query("#main").expect("scaffold has #main");
        self.dom.set_inner_html(&main, article);
        self.hook.run_done_each();
    }

    /// Places every heading inside the article, in document order.
    pub fn layout_headings(&self, tops: &[f64]) {
        let headings = self.dom.query_all("#main h1, #main h2, #main h3, #main h4, #main h5, #main h6");
        for (heading, top) in headings.iter().zip(tops) {
            self.dom.set_layout(heading, *top, 40.0);
        }
    }

    pub fn entries(&self) -> Vec<NodeId> {
        self.dom.query_all(".page_toc > div")
    }

    /// Texts of entries marked active.
    pub fn active(&self) -> Vec<String> {
        self.dom
            .query_all(".page_toc > div.active")
            .iter()
            .map(|entry| self.dom.inner_text(entry))
            .collect()
    }

    /// Scrolls and lets one frame run.
    pub fn scroll_and_frame(&self, y: f64) {
        self.dom.scroll_to(y);
        self.scheduler.run_frame();
    }
}
