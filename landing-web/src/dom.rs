//! `web-sys` implementation of [`Dom`]

use landing_core::Dom;
use landing_core::types::{Rect, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Node, ScrollBehavior, ScrollToOptions, Window,
};

/// The live browser document.
///
/// DOM calls that can throw (attribute writes on detached nodes, class
/// tokens with whitespace) are ignored, the same way a script would swallow
/// them.
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// The current window and document, if running in a page.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn descendants(&self, root: &Element) -> Vec<Element> {
        let Ok(list) = root.query_selector_all("*") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn has_attribute(&self, element: &Element, name: &str) -> bool {
        element.has_attribute(name)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn toggle_class(&mut self, element: &Element, class: &str, on: bool) {
        let _ = element.class_list().toggle_with_force(class, on);
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.top(), rect.height(), rect.width())
    }

    fn viewport(&self) -> Viewport {
        let px = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default()
        };
        Viewport {
            width: px(self.window.inner_width()),
            height: px(self.window.inner_height()),
            scroll_y: self.window.scroll_y().unwrap_or_default(),
        }
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }

    fn remove(&mut self, element: &Element) {
        element.remove();
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&mut self, element: &Element) {
        if let Some(el) = element.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            element.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&mut self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.set_value(value);
        }
    }

    fn set_text(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }
}
