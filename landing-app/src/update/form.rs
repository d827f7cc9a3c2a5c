//! 表单更新

use landing_core::types::Effect;
use landing_core::Dom;

use crate::message::FormMessage;
use crate::page::Page;

pub(super) fn update<D: Dom>(page: &mut Page<D>, msg: FormMessage<D::Element>) -> Vec<Effect> {
    let Some(form) = page.form.as_mut() else {
        return Vec::new();
    };
    match msg {
        FormMessage::Submit => form.submit(&mut page.dom, &mut page.ui),
        FormMessage::Blur(target) => {
            form.handle_blur(&mut page.dom, &target);
            Vec::new()
        }
        FormMessage::Input(target) => {
            form.handle_input(&mut page.dom, &target);
            Vec::new()
        }
    }
}
