//! 表单消息类型

/// Contact form messages
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage<E> {
    /// Form submitted
    Submit,

    /// Focus left a control
    Blur(E),

    /// A control's value changed
    Input(E),
}
