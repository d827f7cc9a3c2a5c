//! Contact form types

use std::fmt;

use serde::{Deserialize, Serialize};

/// The validated contact form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    Email,
    BusinessType,
    Website,
    Message,
}

impl FieldName {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::BusinessType,
        Self::Website,
        Self::Message,
    ];

    /// The control's `name` attribute (also the relay's field key).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::BusinessType => "businessType",
            Self::Website => "website",
            Self::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub const fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Tunable bounds used by the field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub name_min_chars: usize,
    pub message_max_chars: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_max_chars: 2000,
        }
    }
}

/// Where the contact form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
