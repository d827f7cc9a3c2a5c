//! Ambient page effects
//!
//! Independent of each other and of the disclosures; each one owns its
//! elements and reacts to window-level events.

mod header;
mod preloader;
mod scroll_spy;
mod smooth_scroll;

pub use header::HeaderEffect;
pub use preloader::{Preloader, PreloaderPhase};
pub use scroll_spy::ScrollSpy;
pub use smooth_scroll::{SmoothScroll, in_page_target};
