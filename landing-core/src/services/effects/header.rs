//! Header "scrolled" class

use crate::traits::Dom;

/// Adds a class to the header once the page is scrolled past a threshold.
#[derive(Debug, Clone)]
pub struct HeaderEffect<E> {
    header: E,
    class: String,
    threshold: f64,
    scrolled: bool,
}

impl<E: Clone> HeaderEffect<E> {
    pub fn new(header: E, class: impl Into<String>, threshold: f64) -> Self {
        Self {
            header,
            class: class.into(),
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Re-check the scroll offset. Returns `true` when the class changed.
    pub fn on_scroll<D: Dom<Element = E>>(&mut self, dom: &mut D) -> bool {
        let scrolled = dom.viewport().scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        dom.toggle_class(&self.header, &self.class, scrolled);
        true
    }
}
