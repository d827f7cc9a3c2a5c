//! Keyboard input

/// Keys the behavior layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// A keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub const fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub const fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }

    pub const fn tab() -> Self {
        Self::new(Key::Tab)
    }

    pub const fn shift_tab() -> Self {
        Self::shifted(Key::Tab)
    }

    pub const fn escape() -> Self {
        Self::new(Key::Escape)
    }
}
