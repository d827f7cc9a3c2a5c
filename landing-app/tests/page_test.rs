#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Page wiring: discovery, subscriptions, ambient effects.

mod common;

use std::time::Duration;

use common::{MockRelay, runtime};
use landing_app::{EventKind, EventSource, PageBuilder, PageEvent, Runtime, Subscription};
use landing_core::error::CoreError;
use landing_core::services::PreloaderPhase;
use landing_core::test_utils::{LandingPage, TestDom};
use landing_core::{Dom, SiteConfig};

#[test]
fn discovers_every_module_of_the_stock_page() {
    let (dom, h) = LandingPage::build();
    let page = PageBuilder::new(dom).build().unwrap();

    assert_eq!(page.nav().unwrap().container(), &h.nav_menu);
    assert_eq!(page.modals().len(), 1);
    let pricing = &page.modals()[0];
    assert_eq!(pricing.name(), "pricing");
    assert_eq!(pricing.triggers(), &[h.nav_pricing_trigger, h.pricing_trigger]);
    assert_eq!(pricing.disclosure().container(), &h.pricing_modal);

    let form = page.form().unwrap().elements();
    assert_eq!(form.fields.len(), 5);
    assert_eq!(form.submit_control, Some(h.submit));
    assert_eq!(form.failure, Some(h.failure));
    assert_eq!(form.fields[1].error, Some(h.email_error));

    assert!(page.scroll_spy().is_some());
    assert!(page.header().is_some());
    assert!(page.preloader().is_some());
    assert_eq!(page.dom().attr(h.pricing_modal, "aria-hidden"), Some("true"));
}

#[test]
fn subscriptions_cover_each_module_once() {
    let (dom, h) = LandingPage::build();
    let page = PageBuilder::new(dom).build().unwrap();

    assert_eq!(
        page.subscriptions(),
        vec![
            Subscription::document(EventKind::Click),
            Subscription::document(EventKind::KeyDown),
            Subscription::window(EventKind::Resize),
            Subscription::element(h.form, EventKind::Submit),
            Subscription::element(h.form, EventKind::FocusOut),
            Subscription::element(h.form, EventKind::Input),
            Subscription::window(EventKind::Scroll),
            Subscription::window(EventKind::Load),
        ]
    );
}

#[test]
fn a_bare_document_still_builds() {
    let page = PageBuilder::new(TestDom::new()).build().unwrap();

    assert!(page.nav().is_none());
    assert!(page.modals().is_empty());
    assert!(page.form().is_none());
    assert!(page.scroll_spy().is_none());
    assert!(page.header().is_none());
    assert!(page.preloader().is_none());
    assert_eq!(page.subscriptions(), vec![Subscription::document(EventKind::Click)]);

    let mut rt = Runtime::new(page, MockRelay::new());
    rt.start();
    assert!(!rt.dispatch(PageEvent::Submit));
    assert!(!rt.dispatch(PageEvent::Scroll));
    assert!(!rt.dispatch(PageEvent::Load));
    assert!(rt.timers().is_empty());
}

#[test]
fn missing_form_disables_only_the_form() {
    let (dom, h) = LandingPage::build();
    let config = SiteConfig {
        form_id: "quote-form".to_string(),
        ..SiteConfig::default()
    };
    let page = PageBuilder::new(dom).config(config).build().unwrap();

    assert!(page.form().is_none());
    assert!(page.nav().is_some());
    assert!(
        !page
            .subscriptions()
            .iter()
            .any(|s| s.source == EventSource::Element(h.form))
    );
}

#[test]
fn missing_body_is_an_error() {
    struct Detached(TestDom);

    impl Dom for Detached {
        type Element = <TestDom as Dom>::Element;

        fn element_by_id(&self, id: &str) -> Option<Self::Element> {
            self.0.element_by_id(id)
        }
        fn body(&self) -> Option<Self::Element> {
            None
        }
        fn descendants(&self, root: &Self::Element) -> Vec<Self::Element> {
            self.0.descendants(root)
        }
        fn parent(&self, element: &Self::Element) -> Option<Self::Element> {
            self.0.parent(element)
        }
        fn tag_name(&self, element: &Self::Element) -> String {
            self.0.tag_name(element)
        }
        fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
            self.0.attribute(element, name)
        }
        fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str) {
            self.0.set_attribute(element, name, value);
        }
        fn remove_attribute(&mut self, element: &Self::Element, name: &str) {
            self.0.remove_attribute(element, name);
        }
        fn has_class(&self, element: &Self::Element, class: &str) -> bool {
            self.0.has_class(element, class)
        }
        fn add_class(&mut self, element: &Self::Element, class: &str) {
            self.0.add_class(element, class);
        }
        fn remove_class(&mut self, element: &Self::Element, class: &str) {
            self.0.remove_class(element, class);
        }
        fn bounding_rect(&self, element: &Self::Element) -> landing_core::types::Rect {
            self.0.bounding_rect(element)
        }
        fn viewport(&self) -> landing_core::types::Viewport {
            self.0.viewport()
        }
        fn scroll_to(&mut self, top: f64) {
            self.0.scroll_to(top);
        }
        fn is_connected(&self, element: &Self::Element) -> bool {
            self.0.is_connected(element)
        }
        fn remove(&mut self, element: &Self::Element) {
            self.0.remove(element);
        }
        fn active_element(&self) -> Option<Self::Element> {
            self.0.active_element()
        }
        fn focus(&mut self, element: &Self::Element) {
            self.0.focus(element);
        }
        fn value(&self, element: &Self::Element) -> String {
            self.0.value(element)
        }
        fn set_value(&mut self, element: &Self::Element, value: &str) {
            self.0.set_value(element, value);
        }
        fn set_text(&mut self, element: &Self::Element, text: &str) {
            self.0.set_text(element, text);
        }
    }

    let err = PageBuilder::new(Detached(TestDom::new())).build().err().unwrap();
    assert!(matches!(err, CoreError::MissingElement(ref what) if what == "body"));
}

#[test]
fn in_page_link_scrolls_below_the_header_and_focuses_the_section() {
    let (mut rt, h) = runtime(MockRelay::new());

    assert!(rt.dispatch(PageEvent::Click { target: h.nav_links[1] }));
    // about starts at 1200; minus the 80px header and 20px margin
    assert!((rt.dom().scroll_y() - 1100.0).abs() < f64::EPSILON);
    assert_eq!(rt.dom().focused(), Some(h.sections[2]));
    assert_eq!(rt.dom().attr(h.sections[2], "tabindex"), Some("-1"));
}

#[test]
fn nav_link_click_closes_the_nav_then_scrolls() {
    let (mut rt, h) = runtime(MockRelay::new());
    rt.dom_mut().focus(&h.nav_toggle);
    rt.dispatch(PageEvent::Click { target: h.nav_toggle });

    assert!(rt.dispatch(PageEvent::Click { target: h.nav_links[2] }));
    assert!(!rt.page().nav().unwrap().is_open());
    assert!((rt.dom().scroll_y() - 1700.0).abs() < f64::EPSILON);
    assert_eq!(rt.dom().focused(), Some(h.sections[3]));
}

#[test]
fn external_links_keep_their_default_action() {
    let (mut rt, h) = runtime(MockRelay::new());

    assert!(!rt.dispatch(PageEvent::Click { target: h.footer_link }));
    assert!(rt.dom().scroll_y().abs() < f64::EPSILON);
}

#[test]
fn header_class_follows_the_scroll_threshold() {
    let (mut rt, h) = runtime(MockRelay::new());
    assert!(!rt.dom().class(h.header, "scrolled"));

    rt.dom_mut().set_scroll_y(150.0);
    rt.dispatch(PageEvent::Scroll);
    assert!(rt.dom().class(h.header, "scrolled"));

    rt.dom_mut().set_scroll_y(100.0);
    rt.dispatch(PageEvent::Scroll);
    assert!(!rt.dom().class(h.header, "scrolled"));
}

#[test]
fn scroll_spy_highlights_the_section_in_the_band() {
    let (mut rt, h) = runtime(MockRelay::new());
    assert_eq!(rt.page().scroll_spy().unwrap().active_link(), None);

    rt.dom_mut().set_scroll_y(500.0);
    rt.dispatch(PageEvent::Scroll);
    assert!(rt.dom().class(h.nav_links[0], "active"));
    assert_eq!(rt.dom().attr(h.nav_links[0], "aria-current"), Some("true"));

    rt.dom_mut().set_scroll_y(1100.0);
    rt.dispatch(PageEvent::Scroll);
    assert_eq!(rt.page().scroll_spy().unwrap().active_link(), Some(&h.nav_links[1]));
    assert!(!rt.dom().class(h.nav_links[0], "active"));
    assert_eq!(rt.dom().attr(h.nav_links[0], "aria-current"), None);
}

#[test]
fn preloader_fades_on_load_and_is_removed() {
    let (mut rt, h) = runtime(MockRelay::new());

    rt.dispatch(PageEvent::Load);
    assert!(rt.dom().class(h.preloader, "fade-out"));
    assert_eq!(rt.page().preloader().unwrap().phase(), PreloaderPhase::Fading);

    rt.advance(Duration::from_millis(500));
    assert!(!rt.dom().is_connected(&h.preloader));

    rt.advance(Duration::from_secs(3));
    assert_eq!(rt.page().preloader().unwrap().phase(), PreloaderPhase::Removed);
    assert!(rt.timers().is_empty());
}

#[test]
fn preloader_fallback_fires_without_a_load_event() {
    let (mut rt, h) = runtime(MockRelay::new());

    rt.advance(Duration::from_millis(2999));
    assert!(!rt.dom().class(h.preloader, "fade-out"));

    rt.advance(Duration::from_millis(1));
    assert!(rt.dom().class(h.preloader, "fade-out"));
    assert!(rt.dom().is_connected(&h.preloader));

    rt.advance(Duration::from_millis(500));
    assert!(!rt.dom().is_connected(&h.preloader));
}
