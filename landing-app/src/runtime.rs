//! Effect runtime for native hosts and tests
//!
//! Carries out the [`Effect`]s a [`Page`] returns: timers go into a
//! [`TimerQueue`] driven by virtual time, form submissions are queued and
//! sent through a [`FormRelay`] when [`Runtime::flush`] is awaited.

use std::time::Duration;

use landing_core::types::{Effect, FormSubmission, SubmissionState};
use landing_core::{Dom, TimerQueue};
use landing_relay::FormRelay;

use crate::event::PageEvent;
use crate::page::Page;

pub struct Runtime<D: Dom, R: FormRelay> {
    page: Page<D>,
    relay: R,
    timers: TimerQueue,
    outbox: Vec<FormSubmission>,
}

impl<D: Dom, R: FormRelay> Runtime<D, R> {
    pub fn new(page: Page<D>, relay: R) -> Self {
        Self {
            page,
            relay,
            timers: TimerQueue::new(),
            outbox: Vec::new(),
        }
    }

    /// Run the page's start-up effects.
    pub fn start(&mut self) {
        let effects = self.page.start();
        self.apply(effects);
    }

    /// Dispatch one event. Returns `true` when the event's default action
    /// was prevented.
    pub fn dispatch(&mut self, event: PageEvent<D::Element>) -> bool {
        let effects = self.page.dispatch(event);
        self.apply(effects)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> bool {
        let mut prevented = false;
        for effect in effects {
            match effect {
                Effect::PreventDefault => prevented = true,
                Effect::StartTimer { timer, after } => self.timers.schedule(timer, after),
                Effect::SendForm(submission) => self.outbox.push(submission),
            }
        }
        prevented
    }

    /// Submissions waiting for [`flush`](Self::flush).
    pub fn pending_submissions(&self) -> &[FormSubmission] {
        &self.outbox
    }

    /// Send every queued submission and report each outcome to the page.
    pub async fn flush(&mut self) -> Vec<SubmissionState> {
        let mut states = Vec::new();
        for submission in std::mem::take(&mut self.outbox) {
            log::debug!("[runtime] Sending {} field(s) to {}", submission.fields.len(), submission.endpoint);
            let outcome = self.relay.submit(&submission).await;
            states.push(self.page.submission_finished(&outcome));
        }
        states
    }

    /// Move virtual time forward by `by`, firing due timers in order,
    /// including timers scheduled by the ones that fire.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.timers.now() + by;
        while let Some(timer) = self.timers.pop_due(deadline) {
            self.dispatch(PageEvent::Timer(timer));
        }
        self.timers.settle(deadline);
    }

    // === Accessors ===

    pub fn page(&self) -> &Page<D> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<D> {
        &mut self.page
    }

    pub fn dom(&self) -> &D {
        self.page.dom()
    }

    pub fn dom_mut(&mut self) -> &mut D {
        self.page.dom_mut()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }
}
