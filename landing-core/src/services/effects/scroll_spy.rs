//! Scroll-spy: highlight the nav link of the section under the viewport band

use crate::traits::Dom;

/// Pairs of (nav link, section), sections in document order.
///
/// A section is current when its box overlaps the band between `band_top`
/// and `1 - band_bottom` of the viewport height (the default 0.2 / 0.7 is an
/// observer root margin of `-20% 0px -70% 0px`).
#[derive(Debug, Clone)]
pub struct ScrollSpy<E> {
    entries: Vec<(E, E)>,
    active: Option<usize>,
    active_class: String,
    band_top: f64,
    band_bottom: f64,
}

impl<E: Clone + PartialEq> ScrollSpy<E> {
    pub fn new(entries: Vec<(E, E)>, active_class: impl Into<String>, band_top: f64, band_bottom: f64) -> Self {
        Self {
            entries,
            active: None,
            active_class: active_class.into(),
            band_top,
            band_bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highlighted link.
    pub fn active_link(&self) -> Option<&E> {
        self.active.map(|i| &self.entries[i].0)
    }

    /// Re-evaluate after a scroll. Returns `true` when the highlight moved.
    ///
    /// With no section in the band the previous highlight stays.
    pub fn on_scroll<D: Dom<Element = E>>(&mut self, dom: &mut D) -> bool {
        let height = dom.viewport().height;
        let from = height * self.band_top;
        let to = height * (1.0 - self.band_bottom);

        let Some(hit) = self
            .entries
            .iter()
            .position(|(_, section)| dom.bounding_rect(section).intersects_band(from, to))
        else {
            return false;
        };
        if self.active == Some(hit) {
            return false;
        }

        for (i, (link, _)) in self.entries.iter().enumerate() {
            if i == hit {
                dom.add_class(link, &self.active_class);
                dom.set_attribute(link, "aria-current", "true");
            } else {
                dom.remove_class(link, &self.active_class);
                dom.remove_attribute(link, "aria-current");
            }
        }
        self.active = Some(hit);
        log::debug!("[scroll-spy] active link #{hit}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LandingPage, NodeId, TestDom};

    /// services/about/contact links paired with their sections.
    fn spy(page: &LandingPage) -> ScrollSpy<NodeId> {
        let entries = page
            .nav_links
            .iter()
            .copied()
            .zip(page.sections[1..].iter().copied())
            .collect();
        ScrollSpy::new(entries, "active", 0.2, 0.7)
    }

    fn highlighted(dom: &TestDom, page: &LandingPage) -> Vec<bool> {
        page.nav_links
            .iter()
            .map(|l| dom.class(*l, "active") && dom.attr(*l, "aria-current") == Some("true"))
            .collect()
    }

    #[test]
    fn follows_the_section_in_the_band() {
        let (mut dom, page) = LandingPage::build();
        let mut spy = spy(&page);

        // band is 160..240; hero covers it at the top, and hero has no link
        assert!(!spy.on_scroll(&mut dom));
        assert_eq!(spy.active_link(), None);

        dom.set_scroll_y(500.0);
        assert!(spy.on_scroll(&mut dom));
        assert_eq!(highlighted(&dom, &page), vec![true, false, false]);

        dom.set_scroll_y(1100.0);
        assert!(spy.on_scroll(&mut dom));
        assert_eq!(highlighted(&dom, &page), vec![false, true, false]);
        assert!(!spy.on_scroll(&mut dom));

        dom.set_scroll_y(1700.0);
        spy.on_scroll(&mut dom);
        assert_eq!(spy.active_link(), Some(&page.nav_links[2]));
        assert_eq!(highlighted(&dom, &page), vec![false, false, true]);
    }

    #[test]
    fn keeps_previous_highlight_when_nothing_is_in_the_band() {
        let (mut dom, page) = LandingPage::build();
        let mut spy = spy(&page);
        dom.set_scroll_y(500.0);
        spy.on_scroll(&mut dom);

        dom.set_scroll_y(5000.0);
        assert!(!spy.on_scroll(&mut dom));
        assert_eq!(highlighted(&dom, &page), vec![true, false, false]);
    }

    #[test]
    fn first_intersecting_section_wins() {
        let (mut dom, page) = LandingPage::build();
        let mut spy = spy(&page);
        // services ends inside the band and about starts inside it
        dom.set_scroll_y(1000.0);
        spy.on_scroll(&mut dom);
        assert_eq!(spy.active_link(), Some(&page.nav_links[0]));
    }
}
