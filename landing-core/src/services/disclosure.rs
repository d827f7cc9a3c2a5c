//! Disclosure controller
//!
//! One state machine for every dismissible region on the page: the mobile
//! navigation panel and each modal dialog.
//!
//! ```text
//!  Closed ──open──▶ Opening ──entrance timer──▶ Open
//!    ▲                 │                          │
//!    │               close                      close
//!    │                 ▼                          │
//!    └──hide timer── Closing ◀────────────────────┘
//! ```
//!
//! Every transition bumps `generation`. Timers carry the generation they were
//! started in, so a hide timer from an earlier close cannot hide a region that
//! has been reopened since.

use std::time::Duration;

use crate::config::SiteConfig;
use crate::services::focus::{focus_first_within, focus_is_within, trap_focus};
use crate::traits::Dom;
use crate::types::{DisclosureId, Effect, Key, KeyPress, TimerId, UiState};

/// Lifecycle phase of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    /// Open class applied, waiting for the entrance timer to add the visible class
    Opening,
    Open,
    /// Modal only: closed for assistive tech, still painted while it fades out
    Closing,
}

/// Class names and timings a region needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DisclosureSettings {
    pub open_class: String,
    pub visible_class: String,
    /// Body class toggled while open; `None` leaves scrolling alone
    pub scroll_lock_class: Option<String>,
    pub entrance_delay: Duration,
    /// Delay before `hidden` is applied on close; `None` hides at once
    pub exit_duration: Option<Duration>,
    /// Viewport width at which the region is dismissed; `None` ignores resizes
    pub desktop_breakpoint: Option<f64>,
}

impl DisclosureSettings {
    pub fn nav(config: &SiteConfig) -> Self {
        Self {
            open_class: config.open_class.clone(),
            visible_class: config.visible_class.clone(),
            scroll_lock_class: None,
            entrance_delay: config.entrance_delay(),
            exit_duration: None,
            desktop_breakpoint: Some(config.desktop_breakpoint),
        }
    }

    pub fn modal(config: &SiteConfig) -> Self {
        Self {
            open_class: config.open_class.clone(),
            visible_class: config.visible_class.clone(),
            scroll_lock_class: Some(config.scroll_lock_class.clone()),
            entrance_delay: config.entrance_delay(),
            exit_duration: Some(config.modal_exit()),
            desktop_breakpoint: None,
        }
    }
}

/// A bound disclosure region.
#[derive(Debug, Clone)]
pub struct Disclosure<E> {
    id: DisclosureId,
    /// Nav toggle; modals have several openers and record whichever was used
    trigger: Option<E>,
    container: E,
    close_controls: Vec<E>,
    last_focused: Option<E>,
    phase: Phase,
    generation: u64,
    settings: DisclosureSettings,
}

impl<E: Clone + PartialEq + std::fmt::Debug> Disclosure<E> {
    /// Mobile navigation: toggled by `trigger`, dismissed by outside clicks and
    /// by growing past the desktop breakpoint.
    pub fn nav(trigger: E, container: E, settings: DisclosureSettings) -> Self {
        Self {
            id: DisclosureId::Nav,
            trigger: Some(trigger),
            container,
            close_controls: Vec::new(),
            last_focused: None,
            phase: Phase::Closed,
            generation: 0,
            settings,
        }
    }

    /// Modal dialog `name`, dismissed only through `close_controls` and Escape.
    pub fn modal(
        name: impl Into<String>,
        container: E,
        close_controls: Vec<E>,
        settings: DisclosureSettings,
    ) -> Self {
        Self {
            id: DisclosureId::Modal(name.into()),
            trigger: None,
            container,
            close_controls,
            last_focused: None,
            phase: Phase::Closed,
            generation: 0,
            settings,
        }
    }

    pub fn id(&self) -> &DisclosureId {
        &self.id
    }

    pub fn container(&self) -> &E {
        &self.container
    }

    pub fn trigger(&self) -> Option<&E> {
        self.trigger.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Element focus returns to on close.
    pub fn last_focused(&self) -> Option<&E> {
        self.last_focused.as_ref()
    }

    /// `Opening` and `Open` both count as open.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Open)
    }

    /// Sync the closed-state ARIA attributes on page start.
    pub fn bind<D: Dom<Element = E>>(&self, dom: &mut D) {
        if let Some(trigger) = &self.trigger {
            dom.set_attribute(trigger, "aria-expanded", "false");
        }
        if self.id.is_modal() {
            dom.set_attribute(&self.container, "aria-hidden", "true");
            dom.set_attribute(&self.container, "hidden", "");
        }
        log::debug!("[disclosure] {} bound", self.id);
    }

    /// Open the region.
    ///
    /// Reopening an open region re-applies its attributes and keeps the
    /// original opener as the focus-return target.
    pub fn open<D: Dom<Element = E>>(&mut self, dom: &mut D, ui: &mut UiState) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.is_open() {
            self.last_focused = dom.active_element();
            self.generation += 1;
            self.phase = Phase::Opening;
            effects.push(Effect::StartTimer {
                timer: TimerId::DisclosureEntrance {
                    region: self.id.clone(),
                    generation: self.generation,
                },
                after: self.settings.entrance_delay,
            });
            log::debug!("[disclosure] {} opening (generation {})", self.id, self.generation);
        }

        dom.set_attribute(&self.container, "aria-hidden", "false");
        if self.id.is_modal() {
            dom.set_attribute(&self.container, "aria-modal", "true");
        }
        if let Some(trigger) = &self.trigger {
            dom.set_attribute(trigger, "aria-expanded", "true");
        }
        dom.remove_attribute(&self.container, "hidden");
        dom.add_class(&self.container, &self.settings.open_class);
        if self.phase == Phase::Open {
            dom.add_class(&self.container, &self.settings.visible_class);
        }
        if let (Some(lock), Some(body)) = (&self.settings.scroll_lock_class, dom.body()) {
            dom.add_class(&body, lock);
        }
        if !focus_is_within(dom, &self.container) {
            focus_first_within(dom, &self.container);
        }

        ui.open_disclosure = Some(self.id.clone());
        effects
    }

    /// Close the region. No-op unless it is open.
    pub fn close<D: Dom<Element = E>>(&mut self, dom: &mut D, ui: &mut UiState) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        self.generation += 1;

        if self.id.is_modal() {
            dom.set_attribute(&self.container, "aria-hidden", "true");
            dom.remove_attribute(&self.container, "aria-modal");
        } else {
            // the panel stays visible at desktop widths; CSS hides it by the open class
            dom.remove_attribute(&self.container, "aria-hidden");
        }
        if let Some(trigger) = &self.trigger {
            dom.set_attribute(trigger, "aria-expanded", "false");
        }
        dom.remove_class(&self.container, &self.settings.open_class);
        dom.remove_class(&self.container, &self.settings.visible_class);
        if let (Some(lock), Some(body)) = (&self.settings.scroll_lock_class, dom.body()) {
            dom.remove_class(&body, lock);
        }

        if let Some(previous) = self.last_focused.take() {
            if dom.is_connected(&previous) {
                dom.focus(&previous);
            } else {
                log::debug!("[disclosure] {} opener left the document, focus not restored", self.id);
            }
        }

        if ui.is_open(&self.id) {
            ui.open_disclosure = None;
        }

        match self.settings.exit_duration {
            Some(after) => {
                self.phase = Phase::Closing;
                log::debug!("[disclosure] {} closing (generation {})", self.id, self.generation);
                vec![Effect::StartTimer {
                    timer: TimerId::DisclosureHide {
                        region: self.id.clone(),
                        generation: self.generation,
                    },
                    after,
                }]
            }
            None => {
                self.phase = Phase::Closed;
                log::debug!("[disclosure] {} closed", self.id);
                Vec::new()
            }
        }
    }

    pub fn toggle<D: Dom<Element = E>>(&mut self, dom: &mut D, ui: &mut UiState) -> Vec<Effect> {
        if self.is_open() {
            self.close(dom, ui)
        } else {
            self.open(dom, ui)
        }
    }

    /// Apply a transition timer. Returns `true` when the timer belonged to this
    /// region and was current.
    pub fn on_timer<D: Dom<Element = E>>(&mut self, dom: &mut D, timer: &TimerId) -> bool {
        match timer {
            TimerId::DisclosureEntrance { region, generation }
                if *region == self.id
                    && *generation == self.generation
                    && self.phase == Phase::Opening =>
            {
                dom.add_class(&self.container, &self.settings.visible_class);
                self.phase = Phase::Open;
                log::debug!("[disclosure] {} open", self.id);
                true
            }
            TimerId::DisclosureHide { region, generation }
                if *region == self.id
                    && *generation == self.generation
                    && self.phase == Phase::Closing =>
            {
                dom.set_attribute(&self.container, "hidden", "");
                self.phase = Phase::Closed;
                log::debug!("[disclosure] {} closed", self.id);
                true
            }
            TimerId::DisclosureEntrance { region, .. } | TimerId::DisclosureHide { region, .. }
                if *region == self.id =>
            {
                log::debug!("[disclosure] {} ignoring stale {timer:?}", self.id);
                false
            }
            _ => false,
        }
    }

    /// Keydown while this region is open: Escape closes, Tab is trapped.
    pub fn handle_key<D: Dom<Element = E>>(
        &mut self,
        dom: &mut D,
        ui: &mut UiState,
        key: &KeyPress,
    ) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        match key.key {
            Key::Escape => self.close(dom, ui),
            Key::Tab if trap_focus(dom, &self.container, key) => vec![Effect::PreventDefault],
            _ => Vec::new(),
        }
    }

    /// `target` is inside one of this region's close controls.
    pub fn is_close_control<D: Dom<Element = E>>(&self, dom: &D, target: &E) -> bool {
        self.close_controls
            .iter()
            .any(|control| dom.contains(control, target))
    }

    /// `target` is inside the region or its trigger.
    pub fn owns<D: Dom<Element = E>>(&self, dom: &D, target: &E) -> bool {
        dom.contains(&self.container, target)
            || self
                .trigger
                .as_ref()
                .is_some_and(|trigger| dom.contains(trigger, target))
    }

    /// Document click: close when the click landed outside region and trigger.
    ///
    /// Only regions with a trigger (the nav) dismiss on outside clicks; modals
    /// rely on their close controls and backdrop.
    pub fn handle_outside_click<D: Dom<Element = E>>(
        &mut self,
        dom: &mut D,
        ui: &mut UiState,
        target: &E,
    ) -> Vec<Effect> {
        if self.trigger.is_none() || !self.is_open() || self.owns(dom, target) {
            return Vec::new();
        }
        log::debug!("[disclosure] {} outside click", self.id);
        self.close(dom, ui)
    }

    /// Window resize: close once the viewport reaches the desktop breakpoint.
    pub fn handle_resize<D: Dom<Element = E>>(&mut self, dom: &mut D, ui: &mut UiState) -> Vec<Effect> {
        let Some(breakpoint) = self.settings.desktop_breakpoint else {
            return Vec::new();
        };
        if self.is_open() && dom.viewport().width >= breakpoint {
            log::debug!("[disclosure] {} dismissed by resize", self.id);
            return self.close(dom, ui);
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LandingPage, NodeId, TestDom};

    fn nav(page: &LandingPage) -> Disclosure<NodeId> {
        Disclosure::nav(
            page.nav_toggle,
            page.nav_menu,
            DisclosureSettings::nav(&SiteConfig::default()),
        )
    }

    fn pricing(page: &LandingPage) -> Disclosure<NodeId> {
        Disclosure::modal(
            "pricing",
            page.pricing_modal,
            vec![page.pricing_backdrop, page.pricing_close],
            DisclosureSettings::modal(&SiteConfig::default()),
        )
    }

    fn timers(effects: &[Effect]) -> Vec<TimerId> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::StartTimer { timer, .. } => Some(timer.clone()),
                _ => None,
            })
            .collect()
    }

    fn setup() -> (TestDom, LandingPage, UiState) {
        let (mut dom, page) = LandingPage::build();
        dom.set_viewport_size(600.0, 800.0);
        (dom, page, UiState::default())
    }

    #[test]
    fn open_then_close_restores_the_exact_opener() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        modal.bind(&mut dom);
        dom.focus(&page.pricing_trigger);

        modal.open(&mut dom, &mut ui);
        assert!(modal.is_open());
        assert_eq!(modal.last_focused(), Some(&page.pricing_trigger));
        assert_eq!(dom.focused(), Some(page.pricing_close));

        modal.close(&mut dom, &mut ui);
        assert_eq!(dom.focused(), Some(page.pricing_trigger));
        assert_eq!(modal.last_focused(), None);
    }

    #[test]
    fn modal_open_syncs_aria_classes_and_scroll_lock() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        modal.bind(&mut dom);

        let effects = modal.open(&mut dom, &mut ui);
        assert_eq!(dom.attr(page.pricing_modal, "aria-hidden"), Some("false"));
        assert_eq!(dom.attr(page.pricing_modal, "aria-modal"), Some("true"));
        assert_eq!(dom.attr(page.pricing_modal, "hidden"), None);
        assert!(dom.class(page.pricing_modal, "open"));
        assert!(!dom.class(page.pricing_modal, "visible"));
        assert!(dom.class(dom.body_id(), "modal-open"));
        assert_eq!(ui.open_disclosure, Some(DisclosureId::Modal("pricing".into())));
        assert_eq!(modal.phase(), Phase::Opening);

        assert_eq!(
            effects,
            vec![Effect::StartTimer {
                timer: TimerId::DisclosureEntrance {
                    region: DisclosureId::Modal("pricing".into()),
                    generation: 1,
                },
                after: Duration::from_millis(10),
            }]
        );
        assert!(modal.on_timer(&mut dom, &timers(&effects)[0]));
        assert!(dom.class(page.pricing_modal, "visible"));
        assert_eq!(modal.phase(), Phase::Open);
    }

    #[test]
    fn modal_close_delays_hidden_until_exit_timer() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        let opened = modal.open(&mut dom, &mut ui);
        modal.on_timer(&mut dom, &timers(&opened)[0]);

        let effects = modal.close(&mut dom, &mut ui);
        assert!(!modal.is_open());
        assert_eq!(modal.phase(), Phase::Closing);
        assert_eq!(dom.attr(page.pricing_modal, "aria-hidden"), Some("true"));
        assert_eq!(dom.attr(page.pricing_modal, "aria-modal"), None);
        assert!(!dom.class(page.pricing_modal, "open"));
        assert!(!dom.class(page.pricing_modal, "visible"));
        assert!(!dom.class(dom.body_id(), "modal-open"));
        assert_eq!(dom.attr(page.pricing_modal, "hidden"), None);
        assert_eq!(ui.open_disclosure, None);

        let hide = timers(&effects);
        assert_eq!(
            effects,
            vec![Effect::StartTimer {
                timer: hide[0].clone(),
                after: Duration::from_millis(250),
            }]
        );
        assert!(modal.on_timer(&mut dom, &hide[0]));
        assert_eq!(dom.attr(page.pricing_modal, "hidden"), Some(""));
        assert_eq!(modal.phase(), Phase::Closed);
    }

    #[test]
    fn reopening_during_exit_cancels_the_pending_hide() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        modal.open(&mut dom, &mut ui);
        let closing = modal.close(&mut dom, &mut ui);
        let reopened = modal.open(&mut dom, &mut ui);

        assert!(!modal.on_timer(&mut dom, &timers(&closing)[0]));
        assert_eq!(dom.attr(page.pricing_modal, "hidden"), None);
        assert!(modal.is_open());

        assert!(modal.on_timer(&mut dom, &timers(&reopened)[0]));
        assert_eq!(modal.phase(), Phase::Open);
    }

    #[test]
    fn closing_before_entrance_ignores_the_entrance_timer() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        let opened = modal.open(&mut dom, &mut ui);
        modal.close(&mut dom, &mut ui);

        assert!(!modal.on_timer(&mut dom, &timers(&opened)[0]));
        assert!(!dom.class(page.pricing_modal, "visible"));
        assert_eq!(modal.phase(), Phase::Closing);
    }

    #[test]
    fn nav_toggle_flips_aria_expanded_and_closes_immediately() {
        let (mut dom, page, mut ui) = setup();
        let mut nav = nav(&page);
        nav.bind(&mut dom);
        dom.focus(&page.nav_toggle);

        nav.toggle(&mut dom, &mut ui);
        assert_eq!(dom.attr(page.nav_toggle, "aria-expanded"), Some("true"));
        assert_eq!(dom.attr(page.nav_menu, "aria-modal"), None);
        assert!(!dom.class(dom.body_id(), "modal-open"));
        assert_eq!(dom.focused(), Some(page.nav_links[0]));
        assert!(ui.is_open(&DisclosureId::Nav));

        let effects = nav.toggle(&mut dom, &mut ui);
        assert!(effects.is_empty());
        assert_eq!(dom.attr(page.nav_toggle, "aria-expanded"), Some("false"));
        assert_eq!(dom.attr(page.nav_menu, "hidden"), None);
        assert_eq!(dom.attr(page.nav_menu, "aria-hidden"), None);
        assert!(!dom.class(page.nav_menu, "open"));
        assert_eq!(nav.phase(), Phase::Closed);
        assert_eq!(dom.focused(), Some(page.nav_toggle));
        assert_eq!(ui.open_disclosure, None);
    }

    #[test]
    fn reopen_keeps_original_opener_and_close_when_closed_is_a_no_op() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        assert!(modal.close(&mut dom, &mut ui).is_empty());
        assert_eq!(modal.generation(), 0);

        dom.focus(&page.pricing_trigger);
        modal.open(&mut dom, &mut ui);
        dom.focus(&page.pricing_choose);
        let again = modal.open(&mut dom, &mut ui);

        assert!(again.is_empty());
        assert_eq!(modal.generation(), 1);
        assert_eq!(modal.last_focused(), Some(&page.pricing_trigger));
        assert_eq!(dom.focused(), Some(page.pricing_choose));

        modal.close(&mut dom, &mut ui);
        assert_eq!(dom.focused(), Some(page.pricing_trigger));
        let generation = modal.generation();
        assert!(modal.close(&mut dom, &mut ui).is_empty());
        assert_eq!(modal.generation(), generation);
    }

    #[test]
    fn escape_closes_and_tab_is_trapped() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        modal.open(&mut dom, &mut ui);

        dom.focus(&page.pricing_choose);
        assert_eq!(
            modal.handle_key(&mut dom, &mut ui, &KeyPress::tab()),
            vec![Effect::PreventDefault]
        );
        assert_eq!(dom.focused(), Some(page.pricing_close));
        assert!(modal.handle_key(&mut dom, &mut ui, &KeyPress::tab()).is_empty());

        modal.handle_key(&mut dom, &mut ui, &KeyPress::escape());
        assert!(!modal.is_open());
    }

    #[test]
    fn opener_removed_while_open_is_not_refocused() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        dom.focus(&page.footer_link);
        modal.open(&mut dom, &mut ui);
        dom.remove(&page.footer_link);

        modal.close(&mut dom, &mut ui);
        assert_eq!(dom.focused(), Some(page.pricing_close));
        assert_eq!(modal.last_focused(), None);
    }

    #[test]
    fn nav_dismissal_by_outside_click_and_resize() {
        let (mut dom, page, mut ui) = setup();
        let mut nav = nav(&page);

        nav.open(&mut dom, &mut ui);
        assert!(nav.handle_outside_click(&mut dom, &mut ui, &page.nav_links[1]).is_empty());
        assert!(nav.is_open());
        nav.handle_outside_click(&mut dom, &mut ui, &page.nav_toggle);
        assert!(nav.is_open());
        nav.handle_outside_click(&mut dom, &mut ui, &page.sections[2]);
        assert!(!nav.is_open());

        nav.open(&mut dom, &mut ui);
        nav.handle_resize(&mut dom, &mut ui);
        assert!(nav.is_open());
        dom.set_viewport_size(1024.0, 800.0);
        nav.handle_resize(&mut dom, &mut ui);
        assert!(!nav.is_open());
    }

    #[test]
    fn modal_ignores_outside_clicks_but_knows_its_close_controls() {
        let (mut dom, page, mut ui) = setup();
        let mut modal = pricing(&page);
        modal.open(&mut dom, &mut ui);

        modal.handle_outside_click(&mut dom, &mut ui, &page.sections[0]);
        modal.handle_resize(&mut dom, &mut ui);
        assert!(modal.is_open());

        assert!(modal.is_close_control(&dom, &page.pricing_backdrop));
        assert!(modal.is_close_control(&dom, &page.pricing_close));
        assert!(!modal.is_close_control(&dom, &page.pricing_choose));
    }
}
