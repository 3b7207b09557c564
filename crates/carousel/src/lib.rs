//! Timed slide carousel: autoplay, hover pause, manual navigation and
//! direction-aware transitions over a fixed circular slide sequence.

mod engine;
mod timer;

pub use engine::CarouselEngine;
pub use timer::{ManualTimer, Timer, TimerId};
