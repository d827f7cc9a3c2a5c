//! 弹层更新
//!
//! Navigation and modals are mutually exclusive: opening one closes whatever
//! else is open first, so at most one region holds focus and `open_disclosure`
//! always names the region that is actually open.

use landing_core::types::Effect;
use landing_core::Dom;

use crate::message::DisclosureMessage;
use crate::page::Page;

pub(super) fn update<D: Dom>(page: &mut Page<D>, msg: DisclosureMessage<D::Element>) -> Vec<Effect> {
    match msg {
        DisclosureMessage::ToggleNav => {
            let mut effects = Vec::new();
            let Some(nav_open) = page.nav.as_ref().map(|nav| nav.is_open()) else {
                return effects;
            };
            if !nav_open {
                effects.extend(close_modals(page, None));
            }
            if let Some(nav) = page.nav.as_mut() {
                effects.extend(nav.toggle(&mut page.dom, &mut page.ui));
            }
            effects
        }

        DisclosureMessage::OutsideClick(target) => match page.nav.as_mut() {
            Some(nav) => nav.handle_outside_click(&mut page.dom, &mut page.ui, &target),
            None => Vec::new(),
        },

        DisclosureMessage::OpenModal(name) => {
            if !page.modals.iter().any(|m| m.name == name) {
                log::warn!("[page] No modal named '{name}'");
                return Vec::new();
            }
            // 打开链接类触发器时不应跳转
            let mut effects = vec![Effect::PreventDefault];
            effects.extend(close_nav(page));
            effects.extend(close_modals(page, Some(name.as_str())));
            if let Some(modal) = page.modals.iter_mut().find(|m| m.name == name) {
                effects.extend(modal.disclosure.open(&mut page.dom, &mut page.ui));
            }
            effects
        }

        DisclosureMessage::CloseModal => close_modals(page, None),

        DisclosureMessage::Key(key) => {
            let mut effects = Vec::new();
            if let Some(nav) = page.nav.as_mut().filter(|nav| nav.is_open()) {
                effects.extend(nav.handle_key(&mut page.dom, &mut page.ui, &key));
            }
            for modal in page.modals.iter_mut().filter(|m| m.disclosure.is_open()) {
                effects.extend(modal.disclosure.handle_key(&mut page.dom, &mut page.ui, &key));
            }
            effects
        }

        DisclosureMessage::Resized => match page.nav.as_mut() {
            Some(nav) => nav.handle_resize(&mut page.dom, &mut page.ui),
            None => Vec::new(),
        },
    }
}

/// Close the nav if it is open.
pub(super) fn close_nav<D: Dom>(page: &mut Page<D>) -> Vec<Effect> {
    match page.nav.as_mut() {
        Some(nav) => nav.close(&mut page.dom, &mut page.ui),
        None => Vec::new(),
    }
}

/// Close every open modal except `keep`.
pub(super) fn close_modals<D: Dom>(page: &mut Page<D>, keep: Option<&str>) -> Vec<Effect> {
    let mut effects = Vec::new();
    for modal in &mut page.modals {
        if keep != Some(modal.name.as_str()) {
            effects.extend(modal.disclosure.close(&mut page.dom, &mut page.ui));
        }
    }
    effects
}
