//! 测试辅助模块
//!
//! 提供内存 DOM 实现 `TestDom` 和一个按默认配置搭好的落地页 `LandingPage`。
//! 其他 crate 通过 `test-utils` feature 使用。

use std::collections::BTreeMap;

use crate::traits::Dom;
use crate::types::{Rect, Viewport};

/// Handle to a node of a [`TestDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Document coordinates, or viewport coordinates when `fixed`
    layout: Rect,
    fixed: bool,
    value: String,
    text: String,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            parent,
            children: Vec::new(),
            layout: Rect::new(0.0, 20.0, 100.0),
            fixed: false,
            value: String::new(),
            text: String::new(),
        }
    }
}

/// In-memory document.
///
/// Layout is static: each node has a rectangle in document coordinates that
/// [`Dom::bounding_rect`] shifts by the scroll offset. Nodes under a `hidden`
/// ancestor, or detached, report an empty rectangle like a browser would.
#[derive(Debug, Clone)]
pub struct TestDom {
    nodes: Vec<Node>,
    document: NodeId,
    body: NodeId,
    focused: Option<NodeId>,
    focus_history: Vec<NodeId>,
    viewport: Viewport,
}

impl Default for TestDom {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDom {
    #[must_use]
    pub fn new() -> Self {
        let mut html = Node::new("html", None);
        html.layout = Rect::new(0.0, 800.0, 1280.0);
        let mut body = Node::new("body", Some(NodeId(0)));
        body.layout = Rect::new(0.0, 800.0, 1280.0);
        html.children.push(NodeId(1));
        Self {
            nodes: vec![html, body],
            document: NodeId(0),
            body: NodeId(1),
            focused: None,
            focus_history: Vec::new(),
            viewport: Viewport {
                width: 1280.0,
                height: 800.0,
                scroll_y: 0.0,
            },
        }
    }

    pub fn body_id(&self) -> NodeId {
        self.body
    }

    /// Append a new element under `parent`.
    ///
    /// A `class` attribute fills the class list; a `value` attribute also sets
    /// the control's initial value.
    pub fn append(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(tag, Some(parent));
        for (name, value) in attrs {
            match *name {
                "class" => node.classes = value.split_whitespace().map(str::to_string).collect(),
                "value" => {
                    node.value = (*value).to_string();
                    node.attributes.insert((*name).to_string(), (*value).to_string());
                }
                _ => {
                    node.attributes.insert((*name).to_string(), (*value).to_string());
                }
            }
        }
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set a node's rectangle in document coordinates.
    pub fn set_layout(&mut self, id: NodeId, rect: Rect) {
        self.nodes[id.0].layout = rect;
        self.nodes[id.0].fixed = false;
    }

    /// Pin a node to the viewport (`position: fixed`).
    pub fn set_fixed(&mut self, id: NodeId, rect: Rect) {
        self.nodes[id.0].layout = rect;
        self.nodes[id.0].fixed = true;
    }

    /// Give a node no box at all (`display: none`).
    pub fn collapse(&mut self, id: NodeId) {
        self.nodes[id.0].layout = Rect::default();
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    pub fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        &self.nodes[id.0].classes
    }

    pub fn class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    /// The focused node, `None` when focus is on the body.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|id| self.is_connected(id))
    }

    /// Every node that received focus, oldest first.
    pub fn focus_history(&self) -> &[NodeId] {
        &self.focus_history
    }

    /// Type into a control, replacing its value.
    pub fn type_value(&mut self, id: NodeId, value: &str) {
        self.nodes[id.0].value = value.to_string();
    }

    fn under_hidden(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.nodes[node.0].attributes.contains_key("hidden") {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    fn collect_descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[root.0].children {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }
}

impl Dom for TestDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(&self.document)
            .into_iter()
            .find(|node| self.attr(*node, "id") == Some(id))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn descendants(&self, root: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(*root, &mut out);
        out
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.nodes[element.0].parent
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.nodes[element.0].tag.clone()
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let node = &self.nodes[element.0];
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        let node = &mut self.nodes[element.0];
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: &NodeId, name: &str) {
        let node = &mut self.nodes[element.0];
        if name == "class" {
            node.classes.clear();
        } else {
            node.attributes.remove(name);
        }
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.class(*element, class)
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        let classes = &mut self.nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        self.nodes[element.0].classes.retain(|c| c != class);
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        if !self.is_connected(element) || self.under_hidden(*element) {
            return Rect::default();
        }
        let node = &self.nodes[element.0];
        if node.fixed {
            node.layout
        } else {
            Rect {
                top: node.layout.top - self.viewport.scroll_y,
                ..node.layout
            }
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, top: f64) {
        self.viewport.scroll_y = top;
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        let mut current = Some(*element);
        while let Some(node) = current {
            if node == self.document {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    fn remove(&mut self, element: &NodeId) {
        if let Some(parent) = self.nodes[element.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| c != element);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        Some(self.focused().unwrap_or(self.body))
    }

    fn focus(&mut self, element: &NodeId) {
        if self.is_connected(element) {
            self.focused = Some(*element);
            self.focus_history.push(*element);
        }
    }

    fn value(&self, element: &NodeId) -> String {
        self.nodes[element.0].value.clone()
    }

    fn set_value(&mut self, element: &NodeId, value: &str) {
        self.nodes[element.0].value = value.to_string();
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        self.nodes[element.0].text = text.to_string();
    }
}

/// Handles into the stock landing page built by [`LandingPage::build`].
///
/// The markup follows the default [`SiteConfig`](crate::SiteConfig) ids:
/// a fixed 80px header holding the nav toggle and menu, four 600px+ sections,
/// the contact form with every field, error element and status region, and a
/// `pricing` modal with a backdrop.
#[derive(Debug, Clone)]
pub struct LandingPage {
    pub preloader: NodeId,
    pub header: NodeId,
    pub nav_toggle: NodeId,
    pub nav_menu: NodeId,
    /// In-page links inside the menu: services, about, contact
    pub nav_links: Vec<NodeId>,
    pub nav_pricing_trigger: NodeId,
    /// Sections in document order: hero, services, about, contact
    pub sections: Vec<NodeId>,
    pub hero_cta: NodeId,
    pub pricing_trigger: NodeId,
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub business_type: NodeId,
    pub website: NodeId,
    pub message: NodeId,
    pub subject: NodeId,
    pub name_error: NodeId,
    pub email_error: NodeId,
    pub business_type_error: NodeId,
    pub website_error: NodeId,
    pub message_error: NodeId,
    pub submit: NodeId,
    pub loading: NodeId,
    pub success: NodeId,
    pub failure: NodeId,
    pub pricing_modal: NodeId,
    pub pricing_backdrop: NodeId,
    pub pricing_close: NodeId,
    pub pricing_plans_link: NodeId,
    pub pricing_choose: NodeId,
    pub footer_link: NodeId,
}

impl LandingPage {
    /// Form action used by the fixture.
    pub const ENDPOINT: &'static str = "https://relay.test/f/landing";

    #[must_use]
    pub fn build() -> (TestDom, Self) {
        let mut dom = TestDom::new();
        let body = dom.body_id();

        let preloader = dom.append(body, "div", &[("id", "preloader")]);
        dom.set_fixed(preloader, Rect::new(0.0, 800.0, 1280.0));

        let header = dom.append(body, "header", &[("id", "site-header")]);
        dom.set_fixed(header, Rect::new(0.0, 80.0, 1280.0));
        let nav_toggle = dom.append(
            header,
            "button",
            &[
                ("id", "nav-toggle"),
                ("aria-controls", "nav-menu"),
                ("aria-expanded", "false"),
            ],
        );
        dom.set_fixed(nav_toggle, Rect::new(20.0, 40.0, 40.0));
        let nav_menu = dom.append(header, "nav", &[("id", "nav-menu")]);
        dom.set_fixed(nav_menu, Rect::new(80.0, 300.0, 1280.0));
        let mut nav_links = Vec::new();
        for (i, target) in ["#services", "#about", "#contact"].into_iter().enumerate() {
            let link = dom.append(nav_menu, "a", &[("href", target), ("class", "nav-link")]);
            dom.set_fixed(link, Rect::new(90.0 + 40.0 * i as f64, 30.0, 200.0));
            nav_links.push(link);
        }
        let nav_pricing_trigger =
            dom.append(nav_menu, "button", &[("data-modal-target", "pricing")]);
        dom.set_fixed(nav_pricing_trigger, Rect::new(220.0, 30.0, 200.0));

        let main = dom.append(body, "main", &[]);
        dom.set_layout(main, Rect::new(0.0, 2600.0, 1280.0));
        let mut sections = Vec::new();
        for (i, (id, height)) in [("hero", 600.0), ("services", 600.0), ("about", 600.0), ("contact", 800.0)]
            .into_iter()
            .enumerate()
        {
            let section = dom.append(main, "section", &[("id", id)]);
            dom.set_layout(section, Rect::new(600.0 * i as f64, height, 1280.0));
            sections.push(section);
        }

        let hero_cta = dom.append(sections[0], "a", &[("href", "#contact"), ("class", "btn")]);
        let pricing_trigger = dom.append(
            sections[0],
            "button",
            &[("data-modal-target", "pricing"), ("class", "btn")],
        );

        let form = dom.append(
            sections[3],
            "form",
            &[("id", "contact-form"), ("action", Self::ENDPOINT), ("method", "POST")],
        );
        let name = dom.append(form, "input", &[("type", "text"), ("name", "name"), ("id", "name")]);
        let name_error = dom.append(form, "span", &[("id", "name-error"), ("hidden", "")]);
        let email = dom.append(form, "input", &[("type", "email"), ("name", "email"), ("id", "email")]);
        let email_error = dom.append(form, "span", &[("id", "email-error"), ("hidden", "")]);
        let business_type = dom.append(form, "select", &[("name", "businessType"), ("id", "businessType")]);
        dom.append(business_type, "option", &[("value", "")]);
        dom.append(business_type, "option", &[("value", "agency")]);
        let business_type_error =
            dom.append(form, "span", &[("id", "businessType-error"), ("hidden", "")]);
        let website = dom.append(form, "input", &[("type", "url"), ("name", "website"), ("id", "website")]);
        let website_error = dom.append(form, "span", &[("id", "website-error"), ("hidden", "")]);
        let message = dom.append(form, "textarea", &[("name", "message"), ("id", "message")]);
        let message_error = dom.append(form, "span", &[("id", "message-error"), ("hidden", "")]);
        let subject = dom.append(
            form,
            "input",
            &[("type", "hidden"), ("name", "_subject"), ("value", "New enquiry")],
        );
        let submit = dom.append(form, "button", &[("type", "submit")]);
        let loading = dom.append(form, "div", &[("id", "form-loading"), ("hidden", "")]);
        let success = dom.append(form, "div", &[("id", "form-success"), ("hidden", "")]);
        let failure = dom.append(form, "div", &[("id", "form-error"), ("hidden", "")]);

        let footer = dom.append(body, "footer", &[]);
        let footer_link = dom.append(footer, "a", &[("href", "https://example.com/privacy")]);

        let pricing_modal = dom.append(
            body,
            "div",
            &[
                ("id", "pricing-modal"),
                ("role", "dialog"),
                ("aria-hidden", "true"),
                ("hidden", ""),
            ],
        );
        dom.set_fixed(pricing_modal, Rect::new(0.0, 800.0, 1280.0));
        let pricing_backdrop = dom.append(
            pricing_modal,
            "div",
            &[("class", "modal-backdrop"), ("data-close-modal", "")],
        );
        dom.set_fixed(pricing_backdrop, Rect::new(0.0, 800.0, 1280.0));
        let dialog = dom.append(pricing_modal, "div", &[("class", "modal-dialog")]);
        dom.set_fixed(dialog, Rect::new(100.0, 500.0, 600.0));
        let pricing_close = dom.append(dialog, "button", &[("data-close-modal", ""), ("aria-label", "Close")]);
        let pricing_plans_link = dom.append(dialog, "a", &[("href", "https://example.com/plans")]);
        let pricing_choose = dom.append(dialog, "button", &[("type", "button")]);
        for control in [pricing_close, pricing_plans_link, pricing_choose] {
            dom.set_fixed(control, Rect::new(120.0, 30.0, 120.0));
        }

        let page = Self {
            preloader,
            header,
            nav_toggle,
            nav_menu,
            nav_links,
            nav_pricing_trigger,
            sections,
            hero_cta,
            pricing_trigger,
            form,
            name,
            email,
            business_type,
            website,
            message,
            subject,
            name_error,
            email_error,
            business_type_error,
            website_error,
            message_error,
            submit,
            loading,
            success,
            failure,
            pricing_modal,
            pricing_backdrop,
            pricing_close,
            pricing_plans_link,
            pricing_choose,
            footer_link,
        };
        (dom, page)
    }

    /// Fill every field with values that pass validation.
    pub fn fill_valid(&self, dom: &mut TestDom) {
        dom.type_value(self.name, "Ada Lovelace");
        dom.type_value(self.email, "ada@example.com");
        dom.type_value(self.business_type, "agency");
        dom.type_value(self.website, "https://ada.example.com");
        dom.type_value(self.message, "We would like a quote.");
    }
}
