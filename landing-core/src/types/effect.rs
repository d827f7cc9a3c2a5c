//! Instructions handed back to the host

use std::time::Duration;

use landing_relay::FormSubmission;

use super::DisclosureId;

/// Something the host must do after an event has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Suppress the browser's default action for the current event
    PreventDefault,
    /// Fire `timer` back into the page after `after`
    StartTimer { timer: TimerId, after: Duration },
    /// POST the form to the relay and report the outcome back
    SendForm(FormSubmission),
}

/// Timers the page schedules.
///
/// Disclosure timers carry the generation they were started in; a completion
/// whose generation no longer matches the region's is stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Entrance transition finished: add the visible class
    DisclosureEntrance { region: DisclosureId, generation: u64 },
    /// Exit transition finished: apply `hidden`
    DisclosureHide { region: DisclosureId, generation: u64 },
    /// Page load never arrived, fade the preloader anyway
    PreloaderFallback,
    /// Fade finished, detach the preloader
    PreloaderRemove,
}
