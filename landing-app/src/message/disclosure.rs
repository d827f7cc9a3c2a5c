//! 弹层消息类型

use landing_core::types::KeyPress;

/// Navigation panel and modal messages
#[derive(Debug, Clone, PartialEq)]
pub enum DisclosureMessage<E> {
    /// Nav toggle clicked
    ToggleNav,

    /// Click that hit no trigger, control or in-page link
    OutsideClick(E),

    /// Open the named modal
    OpenModal(String),

    /// Close control or backdrop of the open modal clicked
    CloseModal,

    /// Keydown while a region is open
    Key(KeyPress),

    /// Window resized
    Resized,
}
