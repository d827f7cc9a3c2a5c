//! Event 层：宿主事件 → 页面消息
//!
//! The host forwards raw DOM events as [`PageEvent`]s; [`handle_event`] reads
//! the page (never mutates it) and decides which [`PageMessage`] they mean.
//! The update layer then applies the message.

use landing_core::Dom;
use landing_core::types::{KeyPress, TimerId};

use crate::message::{AmbientMessage, DisclosureMessage, FormMessage, PageMessage};
use crate::page::Page;

/// A DOM event, already reduced to what the page needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
    /// `click` anywhere in the document
    Click { target: E },
    /// `keydown` on the document
    KeyDown(KeyPress),
    /// `submit` on the contact form
    Submit,
    /// `focusout` inside the contact form
    FocusOut { target: E },
    /// `input` inside the contact form
    Input { target: E },
    /// Window `scroll`
    Scroll,
    /// Window `resize`
    Resize,
    /// Window `load`
    Load,
    /// A timer started through `Effect::StartTimer` fired
    Timer(TimerId),
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource<E> {
    Window,
    Document,
    Element(E),
}

/// DOM event types the page listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Submit,
    FocusOut,
    Input,
    Scroll,
    Resize,
    Load,
}

impl EventKind {
    /// DOM event type string
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
            Self::FocusOut => "focusout",
            Self::Input => "input",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Load => "load",
        }
    }

    /// Listener should be registered as passive.
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Scroll | Self::Resize)
    }
}

/// One listener the host must bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription<E> {
    pub source: EventSource<E>,
    pub kind: EventKind,
}

impl<E> Subscription<E> {
    pub fn window(kind: EventKind) -> Self {
        Self {
            source: EventSource::Window,
            kind,
        }
    }

    pub fn document(kind: EventKind) -> Self {
        Self {
            source: EventSource::Document,
            kind,
        }
    }

    pub fn element(element: E, kind: EventKind) -> Self {
        Self {
            source: EventSource::Element(element),
            kind,
        }
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event<D: Dom>(event: &PageEvent<D::Element>, page: &Page<D>) -> PageMessage<D::Element> {
    match event {
        PageEvent::Click { target } => handle_click(target, page),
        // 只有在有弹层打开时才处理键盘
        PageEvent::KeyDown(key) if page.ui.open_disclosure.is_some() => {
            PageMessage::Disclosure(DisclosureMessage::Key(*key))
        }
        PageEvent::KeyDown(_) => PageMessage::Noop,
        PageEvent::Submit => PageMessage::Form(FormMessage::Submit),
        PageEvent::FocusOut { target } => PageMessage::Form(FormMessage::Blur(target.clone())),
        PageEvent::Input { target } => PageMessage::Form(FormMessage::Input(target.clone())),
        PageEvent::Scroll => PageMessage::Ambient(AmbientMessage::Scrolled),
        PageEvent::Resize => PageMessage::Disclosure(DisclosureMessage::Resized),
        PageEvent::Load => PageMessage::Ambient(AmbientMessage::Loaded),
        PageEvent::Timer(timer) => PageMessage::Timer(timer.clone()),
    }
}

/// Clicks are delegated from the document; the first matching rule wins.
///
/// 1. close control of the open modal
/// 2. modal trigger
/// 3. nav toggle
/// 4. in-page link with an existing target
/// 5. anything else, while the nav is open, is an outside click
fn handle_click<D: Dom>(target: &D::Element, page: &Page<D>) -> PageMessage<D::Element> {
    let dom = &page.dom;

    if page
        .modals
        .iter()
        .any(|m| m.disclosure.is_open() && m.disclosure.is_close_control(dom, target))
    {
        return PageMessage::Disclosure(DisclosureMessage::CloseModal);
    }

    if let Some(modal) = page
        .modals
        .iter()
        .find(|m| m.triggers.iter().any(|t| dom.contains(t, target)))
    {
        return PageMessage::Disclosure(DisclosureMessage::OpenModal(modal.name.clone()));
    }

    if let Some(nav) = &page.nav
        && nav.trigger().is_some_and(|t| dom.contains(t, target))
    {
        return PageMessage::Disclosure(DisclosureMessage::ToggleNav);
    }

    if let Some((_, section)) = page.smooth_scroll.link_for(dom, target) {
        return PageMessage::Ambient(AmbientMessage::ScrollTo { section });
    }

    if page.nav.as_ref().is_some_and(|nav| nav.is_open()) {
        return PageMessage::Disclosure(DisclosureMessage::OutsideClick(target.clone()));
    }

    PageMessage::Noop
}

#[cfg(test)]
mod tests {
    use landing_core::test_utils::{LandingPage, NodeId, TestDom};

    use super::*;
    use crate::PageBuilder;

    fn page() -> (Page<TestDom>, LandingPage) {
        let (dom, handles) = LandingPage::build();
        (PageBuilder::new(dom).build().unwrap(), handles)
    }

    fn click(page: &Page<TestDom>, target: NodeId) -> PageMessage<NodeId> {
        handle_event(&PageEvent::Click { target }, page)
    }

    #[test]
    fn dom_names_and_passive_listeners() {
        assert_eq!(EventKind::KeyDown.dom_name(), "keydown");
        assert_eq!(EventKind::FocusOut.dom_name(), "focusout");
        assert!(EventKind::Scroll.is_passive());
        assert!(!EventKind::Click.is_passive());
    }

    #[test]
    fn clicks_route_by_target() {
        let (page, h) = page();

        assert_eq!(
            click(&page, h.pricing_trigger),
            PageMessage::Disclosure(DisclosureMessage::OpenModal("pricing".to_string()))
        );
        assert_eq!(
            click(&page, h.nav_toggle),
            PageMessage::Disclosure(DisclosureMessage::ToggleNav)
        );
        assert_eq!(
            click(&page, h.hero_cta),
            PageMessage::Ambient(AmbientMessage::ScrollTo { section: h.sections[3] })
        );
        assert_eq!(click(&page, h.footer_link), PageMessage::Noop);
        // close controls only count while their modal is open
        assert_eq!(click(&page, h.pricing_close), PageMessage::Noop);
    }

    #[test]
    fn keys_only_matter_while_something_is_open() {
        let (page, _) = page();
        assert_eq!(
            handle_event(&PageEvent::KeyDown(KeyPress::escape()), &page),
            PageMessage::Noop
        );
    }
}
