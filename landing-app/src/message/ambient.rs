//! 页面效果消息类型

/// Ambient effect messages
#[derive(Debug, Clone, PartialEq)]
pub enum AmbientMessage<E> {
    /// In-page link clicked: bring `section` into view
    ScrollTo { section: E },

    /// Window scrolled
    Scrolled,

    /// Page finished loading
    Loaded,
}
