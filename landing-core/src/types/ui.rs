//! Shared UI state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a disclosure region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum DisclosureId {
    /// The mobile navigation panel (singleton)
    Nav,
    /// A modal dialog, keyed by the value of its opener's trigger attribute
    Modal(String),
}

impl DisclosureId {
    pub fn is_modal(&self) -> bool {
        matches!(self, Self::Modal(_))
    }
}

impl fmt::Display for DisclosureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nav => write!(f, "nav"),
            Self::Modal(name) => write!(f, "modal:{name}"),
        }
    }
}

/// The only state shared between controllers.
///
/// Owned by the page for its whole lifetime. The disclosure controller writes
/// `open_disclosure`, the form controller writes `is_submitting`; nobody else
/// mutates either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Which disclosure is open, if any
    pub open_disclosure: Option<DisclosureId>,
    /// A form submission is in flight
    pub is_submitting: bool,
}

impl UiState {
    pub fn is_open(&self, id: &DisclosureId) -> bool {
        self.open_disclosure.as_ref() == Some(id)
    }
}
