//! The page: every controller plus the shared UI state

use landing_core::Dom;
use landing_core::services::{
    ContactForm, Disclosure, HeaderEffect, Preloader, ScrollSpy, SmoothScroll,
};
use landing_core::types::{Effect, SubmissionState, UiState};
use landing_relay::{RelayResponse, RelayResult};

use crate::event::{EventKind, PageEvent, Subscription, handle_event};
use crate::update::update;

/// A modal dialog and the elements that open it.
#[derive(Debug, Clone)]
pub struct ModalBinding<E> {
    pub(crate) name: String,
    pub(crate) disclosure: Disclosure<E>,
    pub(crate) triggers: Vec<E>,
}

impl<E> ModalBinding<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn disclosure(&self) -> &Disclosure<E> {
        &self.disclosure
    }

    pub fn triggers(&self) -> &[E] {
        &self.triggers
    }
}

/// The wired page, built once by [`PageBuilder`](crate::PageBuilder).
///
/// Owns the document handle, the [`UiState`], and one controller per module.
/// A module whose root element was missing at build time is `None` and all
/// its events are ignored.
pub struct Page<D: Dom> {
    pub(crate) dom: D,
    pub(crate) ui: UiState,
    pub(crate) nav: Option<Disclosure<D::Element>>,
    pub(crate) modals: Vec<ModalBinding<D::Element>>,
    pub(crate) form: Option<ContactForm<D::Element>>,
    pub(crate) scroll_spy: Option<ScrollSpy<D::Element>>,
    pub(crate) smooth_scroll: SmoothScroll<D::Element>,
    pub(crate) header: Option<HeaderEffect<D::Element>>,
    pub(crate) preloader: Option<Preloader<D::Element>>,
}

impl<D: Dom> Page<D> {
    /// Initial effects and state sync: arms the preloader fallback and
    /// applies header and scroll-spy state for the current scroll offset.
    pub fn start(&mut self) -> Vec<Effect> {
        if let Some(header) = self.header.as_mut() {
            header.on_scroll(&mut self.dom);
        }
        if let Some(spy) = self.scroll_spy.as_mut() {
            spy.on_scroll(&mut self.dom);
        }
        self.preloader
            .as_ref()
            .map(|preloader| preloader.start())
            .unwrap_or_default()
    }

    /// Handle one event: translate it into a message, apply it, and return
    /// what the host must do next.
    pub fn dispatch(&mut self, event: PageEvent<D::Element>) -> Vec<Effect> {
        let msg = handle_event(&event, self);
        log::trace!("[page] {event:?} -> {msg:?}");
        update(self, msg)
    }

    /// Report the relay's answer to a `SendForm` effect.
    pub fn submission_finished(&mut self, outcome: &RelayResult<RelayResponse>) -> SubmissionState {
        match self.form.as_mut() {
            Some(form) => form.finish_submission(&mut self.dom, &mut self.ui, outcome),
            None => {
                self.ui.is_submitting = false;
                SubmissionState::Idle
            }
        }
    }

    /// Listeners the host must bind, one entry per (source, event type).
    ///
    /// - disclosures: document `click` (delegated) and `keydown`
    /// - nav: window `resize`
    /// - form: `submit`, `focusout`, `input` on the form
    /// - header and scroll-spy: window `scroll`
    /// - smooth scroll: document `click`
    /// - preloader: window `load`
    pub fn subscriptions(&self) -> Vec<Subscription<D::Element>> {
        let mut subs = Vec::new();
        let mut add = |sub: Subscription<D::Element>| {
            if !subs.contains(&sub) {
                subs.push(sub);
            }
        };

        if self.nav.is_some() || !self.modals.is_empty() {
            add(Subscription::document(EventKind::Click));
            add(Subscription::document(EventKind::KeyDown));
        }
        if self.nav.is_some() {
            add(Subscription::window(EventKind::Resize));
        }
        if let Some(form) = &self.form {
            for kind in [EventKind::Submit, EventKind::FocusOut, EventKind::Input] {
                add(Subscription::element(form.form().clone(), kind));
            }
        }
        if self.header.is_some() || self.scroll_spy.is_some() {
            add(Subscription::window(EventKind::Scroll));
        }
        add(Subscription::document(EventKind::Click));
        if self.preloader.is_some() {
            add(Subscription::window(EventKind::Load));
        }
        subs
    }

    // === Accessors ===

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn nav(&self) -> Option<&Disclosure<D::Element>> {
        self.nav.as_ref()
    }

    pub fn modals(&self) -> &[ModalBinding<D::Element>] {
        &self.modals
    }

    pub fn modal(&self, name: &str) -> Option<&Disclosure<D::Element>> {
        self.modals
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.disclosure)
    }

    pub fn form(&self) -> Option<&ContactForm<D::Element>> {
        self.form.as_ref()
    }

    pub fn scroll_spy(&self) -> Option<&ScrollSpy<D::Element>> {
        self.scroll_spy.as_ref()
    }

    pub fn header(&self) -> Option<&HeaderEffect<D::Element>> {
        self.header.as_ref()
    }

    pub fn preloader(&self) -> Option<&Preloader<D::Element>> {
        self.preloader.as_ref()
    }
}
