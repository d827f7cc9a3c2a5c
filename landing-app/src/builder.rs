//! Element discovery and wiring
//!
//! All DOM queries happen here, once. Each controller receives only the
//! handles it works on; a module whose root element is missing is left
//! disabled and the rest of the page still works.

use landing_core::error::{CoreError, CoreResult};
use landing_core::services::effects::in_page_target;
use landing_core::services::{
    ContactForm, Disclosure, DisclosureSettings, FieldElements, FormElements, FormSettings,
    HeaderEffect, Preloader, ScrollSpy, SmoothScroll,
};
use landing_core::types::{FieldName, UiState};
use landing_core::{Dom, SiteConfig};

use crate::page::{ModalBinding, Page};

/// Builder for [`Page`].
///
/// # Required
/// - `dom`: the document handle; it must have a `<body>`
///
/// # Optional
/// - `config`: defaults to [`SiteConfig::default`]
pub struct PageBuilder<D: Dom> {
    dom: D,
    config: SiteConfig,
}

impl<D: Dom> PageBuilder<D> {
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            config: SiteConfig::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Discover every module's elements, bind the disclosures, and return the
    /// page.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingElement` if the document has no `<body>`.
    pub fn build(self) -> CoreResult<Page<D>> {
        let Self { mut dom, config } = self;
        let body = dom
            .body()
            .ok_or_else(|| CoreError::MissingElement("body".to_string()))?;

        let nav = discover_nav(&dom, &config);
        let modals = discover_modals(&dom, &config, &body);
        let form = discover_form(&dom, &config);
        let scroll_spy = nav
            .as_ref()
            .and_then(|nav| discover_scroll_spy(&dom, &config, nav.container(), &body));

        let header_el = dom.element_by_id(&config.header_id);
        if header_el.is_none() {
            log::warn!("[page] #{} not found, header effect disabled", config.header_id);
        }
        let header = header_el.clone().map(|el| {
            HeaderEffect::new(el, config.scrolled_class.clone(), config.header_scroll_threshold)
        });
        let smooth_scroll = SmoothScroll::new(header_el, config.scroll_margin);

        let preloader = dom.element_by_id(&config.preloader_id).map(|el| {
            Preloader::new(
                el,
                config.fade_class.clone(),
                config.preloader_fallback(),
                config.preloader_fade(),
            )
        });
        if preloader.is_none() {
            log::debug!("[page] #{} not found, no preloader", config.preloader_id);
        }

        if let Some(nav) = &nav {
            nav.bind(&mut dom);
        }
        for modal in &modals {
            modal.disclosure.bind(&mut dom);
        }

        log::info!(
            "[page] Ready: nav={}, modals=[{}], form={}, scroll-spy={}, header={}, preloader={}",
            nav.is_some(),
            modals
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            form.is_some(),
            scroll_spy.is_some(),
            header.is_some(),
            preloader.is_some(),
        );

        Ok(Page {
            dom,
            ui: UiState::default(),
            nav,
            modals,
            form,
            scroll_spy,
            smooth_scroll,
            header,
            preloader,
        })
    }
}

fn discover_nav<D: Dom>(dom: &D, config: &SiteConfig) -> Option<Disclosure<D::Element>> {
    let toggle = dom.element_by_id(&config.nav_toggle_id);
    let menu = dom.element_by_id(&config.nav_menu_id);
    match (toggle, menu) {
        (Some(toggle), Some(menu)) => Some(Disclosure::nav(
            toggle,
            menu,
            DisclosureSettings::nav(config),
        )),
        (toggle, _) => {
            let missing = if toggle.is_none() {
                &config.nav_toggle_id
            } else {
                &config.nav_menu_id
            };
            log::warn!("[page] #{missing} not found, mobile navigation disabled");
            None
        }
    }
}

/// Group openers by the modal they name, in first-seen order.
fn discover_modals<D: Dom>(
    dom: &D,
    config: &SiteConfig,
    body: &D::Element,
) -> Vec<ModalBinding<D::Element>> {
    let mut groups: Vec<(String, Vec<D::Element>)> = Vec::new();
    for el in dom.descendants(body) {
        let Some(name) = dom.attribute(&el, &config.modal_trigger_attr) else {
            continue;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, triggers)) => triggers.push(el),
            None => groups.push((name, vec![el])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(name, triggers)| {
            let container_id = config.modal_container_id(&name);
            let Some(container) = dom.element_by_id(&container_id) else {
                log::warn!("[page] #{container_id} not found, modal '{name}' disabled");
                return None;
            };
            let close_controls = dom
                .descendants(&container)
                .into_iter()
                .filter(|el| dom.has_attribute(el, &config.modal_close_attr))
                .collect();
            Some(ModalBinding {
                disclosure: Disclosure::modal(
                    name.clone(),
                    container,
                    close_controls,
                    DisclosureSettings::modal(config),
                ),
                name,
                triggers,
            })
        })
        .collect()
}

fn discover_form<D: Dom>(dom: &D, config: &SiteConfig) -> Option<ContactForm<D::Element>> {
    let Some(form) = dom.element_by_id(&config.form_id) else {
        log::warn!("[page] #{} not found, contact form disabled", config.form_id);
        return None;
    };
    let controls = dom.descendants(&form);

    let fields = FieldName::ALL
        .iter()
        .filter_map(|&name| {
            let input = controls.iter().find(|el| {
                matches!(dom.tag_name(el).as_str(), "input" | "select" | "textarea")
                    && dom.attribute(el, "name").as_deref() == Some(name.as_str())
            });
            let Some(input) = input else {
                log::warn!("[page] Field '{name}' not found in #{}", config.form_id);
                return None;
            };
            Some(FieldElements {
                name,
                input: input.clone(),
                error: dom.element_by_id(&config.error_element_id(name.as_str())),
            })
        })
        .collect();

    let submit_control = controls
        .iter()
        .find(|el| {
            let kind = dom.attribute(el, "type").map(|t| t.to_ascii_lowercase());
            match dom.tag_name(el).as_str() {
                "button" => kind.is_none_or(|t| t == "submit"),
                "input" => kind.as_deref() == Some("submit"),
                _ => false,
            }
        })
        .cloned();

    Some(ContactForm::new(
        FormElements {
            form,
            fields,
            submit_control,
            loading: dom.element_by_id(&config.form_loading_id),
            success: dom.element_by_id(&config.form_success_id),
            failure: dom.element_by_id(&config.form_error_id),
        },
        FormSettings::from_config(config),
    ))
}

/// In-page links of the nav menu, one per section, ordered by where the
/// section sits in the document.
fn discover_scroll_spy<D: Dom>(
    dom: &D,
    config: &SiteConfig,
    menu: &D::Element,
    body: &D::Element,
) -> Option<ScrollSpy<D::Element>> {
    let mut entries: Vec<(D::Element, D::Element)> = Vec::new();
    for link in dom.descendants(menu) {
        if dom.tag_name(&link) != "a" {
            continue;
        }
        let Some(section) = in_page_target(dom, &link) else {
            continue;
        };
        if !entries.iter().any(|(_, s)| *s == section) {
            entries.push((link, section));
        }
    }
    if entries.is_empty() {
        log::debug!("[page] No in-page links in the menu, scroll-spy disabled");
        return None;
    }

    let order = dom.descendants(body);
    entries.sort_by_key(|(_, section)| order.iter().position(|el| el == section));
    Some(ScrollSpy::new(
        entries,
        config.active_class.clone(),
        config.spy_band_top,
        config.spy_band_bottom,
    ))
}
