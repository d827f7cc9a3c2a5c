//! 页面行为控制器
//!
//! Controllers never call into each other. They share only [`UiState`]
//! (passed by `&mut` from the page) and report follow-up work as
//! [`Effect`]s.
//!
//! [`UiState`]: crate::types::UiState
//! [`Effect`]: crate::types::Effect

pub mod disclosure;
pub mod effects;
pub mod focus;
pub mod form;

pub use disclosure::{Disclosure, DisclosureSettings, Phase};
pub use effects::{HeaderEffect, Preloader, PreloaderPhase, ScrollSpy, SmoothScroll};
pub use form::{ContactForm, FIELD_SPECS, FieldElements, FormElements, FormFieldSpec, FormSettings};
