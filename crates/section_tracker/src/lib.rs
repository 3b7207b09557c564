//! Scroll-driven active-section tracking and the navigation bar state built on it.

mod nav_bar;
mod tracker;

pub use nav_bar::NavigationBar;
pub use tracker::{ScrollOutcome, SectionTracker};
