//! In-page anchor scrolling that accounts for the fixed header

use crate::traits::Dom;

/// Target element of an in-page link (`href="#id"`), if it exists.
pub fn in_page_target<D: Dom>(dom: &D, anchor: &D::Element) -> Option<D::Element> {
    let href = dom.attribute(anchor, "href")?;
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    dom.element_by_id(id)
}

#[derive(Debug, Clone)]
pub struct SmoothScroll<E> {
    header: Option<E>,
    margin: f64,
}

impl<E: Clone + PartialEq> SmoothScroll<E> {
    pub fn new(header: Option<E>, margin: f64) -> Self {
        Self { header, margin }
    }

    /// The in-page link `target` sits in, with the section it points to.
    pub fn link_for<D: Dom<Element = E>>(&self, dom: &D, target: &E) -> Option<(E, E)> {
        let anchor = dom.closest(target, &|el| {
            dom.tag_name(el) == "a" && dom.attribute(el, "href").is_some_and(|h| h.starts_with('#'))
        })?;
        let section = in_page_target(dom, &anchor)?;
        Some((anchor, section))
    }

    /// Scroll `section` to just below the header and move focus to it.
    ///
    /// Returns the scroll offset used.
    pub fn scroll_to<D: Dom<Element = E>>(&self, dom: &mut D, section: &E) -> f64 {
        let header_height = self
            .header
            .as_ref()
            .map_or(0.0, |h| dom.bounding_rect(h).height);
        let top = (dom.bounding_rect(section).top + dom.viewport().scroll_y - header_height - self.margin).max(0.0);
        dom.scroll_to(top);

        if !dom.has_attribute(section, "tabindex") {
            dom.set_attribute(section, "tabindex", "-1");
        }
        dom.focus(section);
        log::debug!("[smooth-scroll] to {top}px");
        top
    }
}
