//! Focus utilities
//!
//! Everything here reads the live tree on every call. Regions change between
//! keystrokes (a form reveals its error text, a menu grows a link) and a stale
//! list would let Tab escape.

use crate::traits::Dom;
use crate::types::{Key, KeyPress};

/// Matches the interactive-element predicate, ignoring visibility.
pub fn is_interactive<D: Dom>(dom: &D, element: &D::Element) -> bool {
    if let Some(tabindex) = dom.attribute(element, "tabindex") {
        return tabindex.trim() != "-1";
    }
    match dom.tag_name(element).as_str() {
        "a" | "area" => dom.has_attribute(element, "href"),
        "button" | "select" | "textarea" => !dom.has_attribute(element, "disabled"),
        "input" => {
            !dom.has_attribute(element, "disabled")
                && dom
                    .attribute(element, "type")
                    .is_none_or(|t| !t.eq_ignore_ascii_case("hidden"))
        }
        _ => false,
    }
}

/// Rendered with a non-empty box and not marked `hidden`.
pub fn is_visible<D: Dom>(dom: &D, element: &D::Element) -> bool {
    !dom.has_attribute(element, "hidden") && dom.bounding_rect(element).is_rendered()
}

/// Visible, focusable descendants of `container` in document order.
pub fn focusable_elements<D: Dom>(dom: &D, container: &D::Element) -> Vec<D::Element> {
    dom.descendants(container)
        .into_iter()
        .filter(|el| is_interactive(dom, el) && is_visible(dom, el))
        .collect()
}

/// Keep Tab inside `container`.
///
/// Returns `true` when focus was wrapped and the keypress's default action
/// must be suppressed. Only the two edges act; every other keypress is left
/// to the browser.
pub fn trap_focus<D: Dom>(dom: &mut D, container: &D::Element, key: &KeyPress) -> bool {
    if key.key != Key::Tab {
        return false;
    }
    let focusable = focusable_elements(dom, container);
    let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
        return false;
    };
    let active = dom.active_element();

    if key.shift && active.as_ref() == Some(first) {
        let last = last.clone();
        dom.focus(&last);
        true
    } else if !key.shift && active.as_ref() == Some(last) {
        let first = first.clone();
        dom.focus(&first);
        true
    } else {
        false
    }
}

/// Focus the first focusable descendant, or the container itself.
///
/// A container without its own `tabindex` gets `tabindex="-1"` so it can take
/// programmatic focus.
pub fn focus_first_within<D: Dom>(dom: &mut D, container: &D::Element) {
    if let Some(first) = focusable_elements(dom, container).into_iter().next() {
        dom.focus(&first);
        return;
    }
    if !dom.has_attribute(container, "tabindex") {
        dom.set_attribute(container, "tabindex", "-1");
    }
    dom.focus(container);
}

/// Focus is on `container` or inside it.
pub fn focus_is_within<D: Dom>(dom: &D, container: &D::Element) -> bool {
    dom.active_element()
        .is_some_and(|active| dom.contains(container, &active))
}
