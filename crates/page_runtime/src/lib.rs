//! Hosts for the page engines: a deterministic single-threaded session on a
//! virtual clock, and tokio actors that give each engine one owning task.

pub mod actor;
pub mod session;
pub mod tokio_timer;

pub use actor::{spawn_carousel, spawn_navigation, CarouselHandle, NavigationHandle};
pub use session::PageSession;
pub use tokio_timer::TokioTimer;
