//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
///
/// Neither is fatal to the page: a missing element disables one module and a
/// bad config falls back to defaults. Relay failures never become a
/// `CoreError`; the form turns them into its error state.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required element is not in the document
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// Site configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// 是否为预期行为，用于日志分级。
    ///
    /// `true` → `warn`，`false` → `error`。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingElement(_) => true,
            Self::Config(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
