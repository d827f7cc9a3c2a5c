//! Message 层：页面消息定义
//!
//! 作为 Event → Update 之间的桥梁。
//! Event 层把宿主事件翻译成消息，Update 层根据消息修改页面状态并返回 Effect。
//!
//! 模块结构：
//!     disclosure.rs       导航菜单与弹窗的子消息
//!     form.rs             联系表单的子消息
//!     ambient.rs          滚动、加载等页面效果的子消息

mod ambient;
mod disclosure;
mod form;

pub use ambient::AmbientMessage;
pub use disclosure::DisclosureMessage;
pub use form::FormMessage;

use landing_core::types::TimerId;

/// 主消息
#[derive(Debug, Clone, PartialEq)]
pub enum PageMessage<E> {
    /// Navigation panel and modal dialogs
    Disclosure(DisclosureMessage<E>),

    /// Contact form
    Form(FormMessage<E>),

    /// Scroll-spy, smooth scrolling, header, preloader
    Ambient(AmbientMessage<E>),

    /// A scheduled timer fired
    Timer(TimerId),

    /// 无操作
    Noop,
}
