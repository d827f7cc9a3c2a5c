//! Site configuration
//!
//! Every element id, class name and timing the behavior layer relies on. All
//! fields have defaults matching the stock markup, so an empty JSON object
//! (or no config at all) is a valid configuration.

use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Page configuration, read from JSON with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    // === Element ids ===
    pub nav_toggle_id: String,
    pub nav_menu_id: String,
    /// Modal containers are `#{name}{modal_id_suffix}`
    pub modal_id_suffix: String,
    /// Attribute on modal openers; its value is the modal name
    pub modal_trigger_attr: String,
    /// Attribute marking modal close controls (buttons, backdrop)
    pub modal_close_attr: String,
    pub form_id: String,
    /// Per-field error elements are `#{field}{error_id_suffix}`
    pub error_id_suffix: String,
    pub form_loading_id: String,
    pub form_success_id: String,
    pub form_error_id: String,
    pub header_id: String,
    pub preloader_id: String,

    // === Class names ===
    pub open_class: String,
    pub visible_class: String,
    pub invalid_class: String,
    pub active_class: String,
    pub scrolled_class: String,
    /// Added to `<body>` while a modal is open
    pub scroll_lock_class: String,
    pub fade_class: String,

    // === Geometry & timing ===
    pub desktop_breakpoint: f64,
    pub entrance_delay_ms: u64,
    pub modal_exit_ms: u64,
    pub header_scroll_threshold: f64,
    pub scroll_margin: f64,
    pub preloader_fallback_ms: u64,
    pub preloader_fade_ms: u64,
    /// Scroll-spy band, as fractions of the viewport height cut from the top
    /// and from the bottom
    pub spy_band_top: f64,
    pub spy_band_bottom: f64,

    // === Validation ===
    pub name_min_chars: usize,
    pub message_max_chars: usize,
    /// Used when the form has no `action`
    pub fallback_endpoint: Option<String>,

    // === Logging ===
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav_toggle_id: "nav-toggle".to_string(),
            nav_menu_id: "nav-menu".to_string(),
            modal_id_suffix: "-modal".to_string(),
            modal_trigger_attr: "data-modal-target".to_string(),
            modal_close_attr: "data-close-modal".to_string(),
            form_id: "contact-form".to_string(),
            error_id_suffix: "-error".to_string(),
            form_loading_id: "form-loading".to_string(),
            form_success_id: "form-success".to_string(),
            form_error_id: "form-error".to_string(),
            header_id: "site-header".to_string(),
            preloader_id: "preloader".to_string(),

            open_class: "open".to_string(),
            visible_class: "visible".to_string(),
            invalid_class: "is-invalid".to_string(),
            active_class: "active".to_string(),
            scrolled_class: "scrolled".to_string(),
            scroll_lock_class: "modal-open".to_string(),
            fade_class: "fade-out".to_string(),

            desktop_breakpoint: 1024.0,
            entrance_delay_ms: 10,
            modal_exit_ms: 250,
            header_scroll_threshold: 100.0,
            scroll_margin: 20.0,
            preloader_fallback_ms: 3000,
            preloader_fade_ms: 500,
            spy_band_top: 0.2,
            spy_band_bottom: 0.7,

            name_min_chars: 2,
            message_max_chars: 2000,
            fallback_endpoint: None,

            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON configuration. Missing keys take their defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Id of the container for modal `name`.
    pub fn modal_container_id(&self, name: &str) -> String {
        format!("{name}{}", self.modal_id_suffix)
    }

    /// Id of the error element for field `field`.
    pub fn error_element_id(&self, field: &str) -> String {
        format!("{field}{}", self.error_id_suffix)
    }

    pub fn entrance_delay(&self) -> Duration {
        Duration::from_millis(self.entrance_delay_ms)
    }

    pub fn modal_exit(&self) -> Duration {
        Duration::from_millis(self.modal_exit_ms)
    }

    pub fn preloader_fallback(&self) -> Duration {
        Duration::from_millis(self.preloader_fallback_ms)
    }

    pub fn preloader_fade(&self) -> Duration {
        Duration::from_millis(self.preloader_fade_ms)
    }

    /// Log level filter; unknown names fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
