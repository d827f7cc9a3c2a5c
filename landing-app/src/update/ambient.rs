//! 页面效果更新

use landing_core::types::Effect;
use landing_core::Dom;

use super::disclosure::{close_modals, close_nav};
use crate::message::AmbientMessage;
use crate::page::Page;

pub(super) fn update<D: Dom>(page: &mut Page<D>, msg: AmbientMessage<D::Element>) -> Vec<Effect> {
    match msg {
        AmbientMessage::ScrollTo { section } => {
            // 先收起菜单和弹窗，再滚动，焦点最终落在目标区块
            let mut effects = vec![Effect::PreventDefault];
            effects.extend(close_nav(page));
            effects.extend(close_modals(page, None));
            page.smooth_scroll.scroll_to(&mut page.dom, &section);
            effects
        }
        AmbientMessage::Scrolled => {
            if let Some(header) = page.header.as_mut() {
                header.on_scroll(&mut page.dom);
            }
            if let Some(spy) = page.scroll_spy.as_mut() {
                spy.on_scroll(&mut page.dom);
            }
            Vec::new()
        }
        AmbientMessage::Loaded => match page.preloader.as_mut() {
            Some(preloader) => preloader.on_load(&mut page.dom),
            None => Vec::new(),
        },
    }
}
