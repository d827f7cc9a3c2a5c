//! DOM 抽象 Trait

use std::fmt::Debug;

use crate::types::{Rect, Viewport};

/// The slice of the document the behavior layer reads and mutates.
///
/// 平台实现:
/// - Browser: `WebDom` (`web-sys`, in `landing-web`)
/// - Tests: `TestDom` (in-memory tree, `test-utils` feature)
///
/// Element handles are cheap clones that compare by identity. Mutations that
/// the browser can reject (an invalid attribute name, a detached node) are
/// logged by the implementation and otherwise ignored; nothing here returns an
/// error because no caller could do anything useful with it.
pub trait Dom {
    /// Handle to one element node
    type Element: Clone + PartialEq + Debug;

    // === Lookup ===

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn body(&self) -> Option<Self::Element>;

    /// All element descendants of `root` (excluding `root`), in document order.
    fn descendants(&self, root: &Self::Element) -> Vec<Self::Element>;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Lower-case tag name (`"button"`, `"a"`, ...)
    fn tag_name(&self, element: &Self::Element) -> String;

    // === Attributes & classes ===

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    /// Add or remove `class` depending on `on`.
    fn toggle_class(&mut self, element: &Self::Element, class: &str, on: bool) {
        if on {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }

    // === Layout ===

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn viewport(&self) -> Viewport;

    /// Scroll the window so that its vertical offset becomes `top`.
    fn scroll_to(&mut self, top: f64);

    // === Tree membership ===

    /// Still attached to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;

    /// `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool {
        let mut current = Some(node.clone());
        while let Some(element) = current {
            if element == *ancestor {
                return true;
            }
            current = self.parent(&element);
        }
        false
    }

    /// Nearest inclusive ancestor of `element` matching `predicate`.
    fn closest(
        &self,
        element: &Self::Element,
        predicate: &dyn Fn(&Self::Element) -> bool,
    ) -> Option<Self::Element> {
        let mut current = Some(element.clone());
        while let Some(candidate) = current {
            if predicate(&candidate) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }

    /// Detach `element` from the document.
    fn remove(&mut self, element: &Self::Element);

    // === Focus ===

    fn active_element(&self) -> Option<Self::Element>;

    fn focus(&mut self, element: &Self::Element);

    // === Form controls & text ===

    /// Current value of an `input`, `select` or `textarea`; empty otherwise.
    fn value(&self, element: &Self::Element) -> String;

    fn set_value(&mut self, element: &Self::Element, value: &str);

    fn set_text(&mut self, element: &Self::Element, text: &str);
}
