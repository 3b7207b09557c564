use shared::{
    config::TrackerConfig,
    domain::{NavLink, SectionGeometry, SectionId},
    error::EngineError,
    protocol::{NavigationSnapshot, ScrollRequest},
};
use tracing::debug;

use crate::tracker::SectionTracker;

/// Navigation bar state: active link, "scrolled" styling flag and the mobile
/// menu. Owns the [`SectionTracker`] for its links.
#[derive(Debug, Clone)]
pub struct NavigationBar {
    links: Vec<NavLink>,
    tracker: SectionTracker,
    scrolled_offset: f64,
    is_scrolled: bool,
    menu_open: bool,
}

impl NavigationBar {
    pub fn new(links: Vec<NavLink>, config: &TrackerConfig) -> Result<Self, EngineError> {
        let tracker = SectionTracker::new(links.iter().map(|link| link.id.clone()), config)?;
        Ok(Self {
            links,
            tracker,
            scrolled_offset: config.scrolled_offset,
            is_scrolled: false,
            menu_open: false,
        })
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    pub fn active(&self) -> &SectionId {
        self.tracker.active()
    }

    pub fn is_active(&self, id: &SectionId) -> bool {
        self.tracker.active() == id
    }

    pub fn is_scrolled(&self) -> bool {
        self.is_scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Applies a scroll event. Returns whether anything visible changed.
    pub fn on_scroll(&mut self, scroll_y: f64, frame: &[SectionGeometry]) -> bool {
        let was_scrolled = self.is_scrolled;
        self.is_scrolled = scroll_y > self.scrolled_offset;
        let outcome = self.tracker.on_scroll_tick(frame);
        outcome.changed || was_scrolled != self.is_scrolled
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Requests a smooth scroll to `id` and closes the mobile menu.
    ///
    /// Unknown ids produce no request and leave the menu untouched. The active
    /// link is not changed here; it follows once scroll frames arrive.
    pub fn scroll_to(&mut self, id: &SectionId) -> Option<ScrollRequest> {
        if self.tracker.order_index(id).is_none() {
            debug!(section = %id, "scroll requested for unknown section");
            return None;
        }
        self.menu_open = false;
        Some(ScrollRequest {
            target: id.clone(),
            smooth: true,
        })
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            active: self.tracker.active().clone(),
            is_scrolled: self.is_scrolled,
            menu_open: self.menu_open,
        }
    }
}
