//! Landing Page Core Library
//!
//! The behavior layer of the marketing page, independent of any browser
//! binding:
//! - Focus utilities (focusable elements, Tab trap)
//! - Disclosure controller (mobile navigation and modal dialogs)
//! - Contact form validation and submission cycle
//! - Ambient effects (scroll-spy, smooth scrolling, header class, preloader)
//!
//! The document is reached only through the [`Dom`] trait and the form relay
//! only through [`FormRelay`](landing_relay::FormRelay). Controllers return
//! [`Effect`]s (prevent default, start a timer, send the form) for the host to
//! carry out, which keeps every state machine testable with virtual time.

pub mod config;
pub mod error;
pub mod services;
pub mod timer;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use config::SiteConfig;
pub use error::{CoreError, CoreResult};
pub use timer::TimerQueue;
pub use traits::Dom;
pub use types::{DisclosureId, Effect, Key, KeyPress, SubmissionState, TimerId, UiState};
