//! Update 层：状态更新逻辑
//!
//! 唯一可以修改页面状态的地方。每条消息对应一次状态变更，
//! 返回宿主需要执行的 Effect 列表。
//!
//! 模块结构：
//!     disclosure.rs       导航菜单与弹窗（含互斥规则）
//!     form.rs             联系表单
//!     ambient.rs          滚动、加载等页面效果

mod ambient;
mod disclosure;
mod form;

use landing_core::types::{DisclosureId, Effect, TimerId};
use landing_core::Dom;

use crate::message::PageMessage;
use crate::page::Page;

/// 主更新函数
pub fn update<D: Dom>(page: &mut Page<D>, msg: PageMessage<D::Element>) -> Vec<Effect> {
    match msg {
        PageMessage::Disclosure(msg) => disclosure::update(page, msg),
        PageMessage::Form(msg) => form::update(page, msg),
        PageMessage::Ambient(msg) => ambient::update(page, msg),
        PageMessage::Timer(timer) => on_timer(page, &timer),
        PageMessage::Noop => Vec::new(),
    }
}

/// Route a fired timer to the controller that started it.
fn on_timer<D: Dom>(page: &mut Page<D>, timer: &TimerId) -> Vec<Effect> {
    match timer {
        TimerId::DisclosureEntrance { region, .. } | TimerId::DisclosureHide { region, .. } => {
            match region {
                DisclosureId::Nav => {
                    if let Some(nav) = page.nav.as_mut() {
                        nav.on_timer(&mut page.dom, timer);
                    }
                }
                DisclosureId::Modal(name) => {
                    if let Some(modal) = page.modals.iter_mut().find(|m| m.name == *name) {
                        modal.disclosure.on_timer(&mut page.dom, timer);
                    }
                }
            }
            Vec::new()
        }
        TimerId::PreloaderFallback | TimerId::PreloaderRemove => match page.preloader.as_mut() {
            Some(preloader) => preloader.on_timer(&mut page.dom, timer),
            None => Vec::new(),
        },
    }
}
