//! 类型定义模块

mod effect;
mod form;
mod geometry;
mod input;
mod ui;

pub use effect::{Effect, TimerId};
pub use form::{FieldName, SubmissionState, ValidationLimits, ValidationResult};
pub use geometry::{Rect, Viewport};
pub use input::{Key, KeyPress};
pub use ui::{DisclosureId, UiState};

// Re-export relay 库的公共类型
pub use landing_relay::{ErrorPayload, FieldError, FormSubmission, RelayResponse};
