use serde::{Deserialize, Serialize};

use crate::{
    domain::{Direction, SectionGeometry, SectionId},
    error::ErrorReport,
};

/// Raw events a page host feeds into the engines, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Scroll {
        #[serde(default)]
        scroll_y: f64,
        #[serde(default)]
        sections: Vec<SectionGeometry>,
    },
    PointerEnter,
    PointerLeave,
    NextClicked,
    PrevClicked,
    DotClicked {
        index: usize,
    },
    NavClicked {
        section: SectionId,
    },
    MenuToggled,
    Elapsed {
        ms: u64,
    },
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub active: SectionId,
    pub is_scrolled: bool,
    pub menu_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub current_index: usize,
    pub slide_count: usize,
    pub direction: Direction,
    pub is_paused: bool,
    pub is_running: bool,
}

/// Host instruction to bring a section into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub target: SectionId,
    pub smooth: bool,
}

/// State handed to render listeners after an event changed something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RenderUpdate {
    Navigation(NavigationSnapshot),
    Carousel(CarouselSnapshot),
    ScrollRequested(ScrollRequest),
    Rejected(ErrorReport),
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
