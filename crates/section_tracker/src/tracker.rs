use shared::{
    config::TrackerConfig,
    domain::{SectionGeometry, SectionId},
    error::EngineError,
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub active: SectionId,
    pub changed: bool,
}

/// Maps scroll frames onto exactly one active section.
///
/// The known ids and their order are fixed at construction. The active id
/// starts at the first section and only ever moves to another known id.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    sections: Vec<SectionId>,
    activation_threshold: f64,
    active: usize,
}

impl SectionTracker {
    pub fn new(
        sections: impl IntoIterator<Item = SectionId>,
        config: &TrackerConfig,
    ) -> Result<Self, EngineError> {
        let mut ordered: Vec<SectionId> = Vec::new();
        for id in sections {
            if ordered.contains(&id) {
                return Err(EngineError::DuplicateSection(id));
            }
            ordered.push(id);
        }
        if ordered.is_empty() {
            return Err(EngineError::NoSections);
        }

        Ok(Self {
            sections: ordered,
            activation_threshold: config.activation_threshold,
            active: 0,
        })
    }

    pub fn active(&self) -> &SectionId {
        &self.sections[self.active]
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn activation_threshold(&self) -> f64 {
        self.activation_threshold
    }

    pub fn order_index(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|known| known == id)
    }

    /// Applies one scroll frame.
    ///
    /// Known sections are scanned from the last in navigation order to the
    /// first, each looked up in the frame; the first whose top has crossed the
    /// activation threshold wins. The order of entries inside the frame does
    /// not matter. Sections absent from the frame, or listed more than once,
    /// are skipped. Frames with no qualifying section leave the active id
    /// untouched.
    pub fn on_scroll_tick(&mut self, frame: &[SectionGeometry]) -> ScrollOutcome {
        let previous = self.active;

        for geometry in frame {
            if self.order_index(&geometry.id).is_none() {
                debug!(section = %geometry.id, "ignoring unknown section in scroll frame");
            }
        }

        for (index, id) in self.sections.iter().enumerate().rev() {
            let mut matching = frame.iter().filter(|geometry| &geometry.id == id);
            let Some(geometry) = matching.next() else {
                continue;
            };
            if matching.next().is_some() {
                debug!(section = %id, "ignoring section listed twice in scroll frame");
                continue;
            }
            if geometry.has_crossed(self.activation_threshold) {
                self.active = index;
                break;
            }
        }

        let changed = self.active != previous;
        if changed {
            debug!(
                from = %self.sections[previous],
                to = %self.sections[self.active],
                "active section changed"
            );
        }

        ScrollOutcome {
            active: self.active().clone(),
            changed,
        }
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
