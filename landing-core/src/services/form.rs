//! Contact form controller
//!
//! Field rules, per-field error rendering, and the submission cycle:
//!
//! ```text
//! Idle ──submit (valid)──▶ Loading ──2xx──────────────▶ Success
//!   ▲                         │──422 + known fields──▶ Idle
//!   │                         └──anything else───────▶ Error
//!   └── Success / Error accept a new submit
//! ```
//!
//! The network call itself is not made here: `submit` returns
//! [`Effect::SendForm`] and the host reports the outcome through
//! [`ContactForm::finish_submission`].

use std::sync::LazyLock;

use landing_relay::{FormSubmission, RelayResponse, RelayResult};
use regex::Regex;
use url::Url;

use crate::config::SiteConfig;
use crate::traits::Dom;
use crate::types::{Effect, FieldName, SubmissionState, UiState, ValidationLimits, ValidationResult};

/// 宽松但实用的邮箱格式：本地部分字符集 + 点分隔的域名标签（每段 ≤ 63）
static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .ok()
});

const EMAIL_MAX_LEN: usize = 254;

/// One row of the field table.
#[derive(Debug, Clone, Copy)]
pub struct FormFieldSpec {
    pub name: FieldName,
    pub required: bool,
    /// Receives the trimmed value
    pub validator: fn(&str, &ValidationLimits) -> ValidationResult,
}

/// Rules for every contact form field, in form order.
pub static FIELD_SPECS: [FormFieldSpec; 5] = [
    FormFieldSpec {
        name: FieldName::Name,
        required: true,
        validator: validate_name,
    },
    FormFieldSpec {
        name: FieldName::Email,
        required: true,
        validator: validate_email,
    },
    FormFieldSpec {
        name: FieldName::BusinessType,
        required: true,
        validator: validate_business_type,
    },
    FormFieldSpec {
        name: FieldName::Website,
        required: false,
        validator: validate_website,
    },
    FormFieldSpec {
        name: FieldName::Message,
        required: false,
        validator: validate_message,
    },
];

pub fn spec_for(name: FieldName) -> &'static FormFieldSpec {
    match name {
        FieldName::Name => &FIELD_SPECS[0],
        FieldName::Email => &FIELD_SPECS[1],
        FieldName::BusinessType => &FIELD_SPECS[2],
        FieldName::Website => &FIELD_SPECS[3],
        FieldName::Message => &FIELD_SPECS[4],
    }
}

// ===== Field rules =====

pub fn validate_name(value: &str, limits: &ValidationLimits) -> ValidationResult {
    if value.is_empty() {
        ValidationResult::invalid("Please enter your name.")
    } else if value.chars().count() < limits.name_min_chars {
        ValidationResult::invalid(format!(
            "Name must be at least {} characters.",
            limits.name_min_chars
        ))
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_email(value: &str, _limits: &ValidationLimits) -> ValidationResult {
    if value.is_empty() {
        ValidationResult::invalid("Please enter your email address.")
    } else if !is_valid_email(value) {
        ValidationResult::invalid("Please enter a valid email address.")
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_business_type(value: &str, _limits: &ValidationLimits) -> ValidationResult {
    if value.is_empty() {
        ValidationResult::invalid("Please select your business type.")
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_website(value: &str, _limits: &ValidationLimits) -> ValidationResult {
    if value.is_empty() || is_web_url(value) {
        ValidationResult::ok()
    } else {
        ValidationResult::invalid("Please enter a valid URL starting with http:// or https://.")
    }
}

pub fn validate_message(value: &str, limits: &ValidationLimits) -> ValidationResult {
    if value.chars().count() > limits.message_max_chars {
        ValidationResult::invalid(format!(
            "Message must be {} characters or fewer.",
            limits.message_max_chars
        ))
    } else {
        ValidationResult::ok()
    }
}

pub fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LEN {
        return false;
    }
    match EMAIL_PATTERN.as_ref() {
        Some(re) => re.is_match(value),
        None => {
            log::error!("[form] Email pattern failed to compile");
            false
        }
    }
}

/// Absolute `http`/`https` URL with a host.
pub fn is_web_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

// ===== Controller =====

/// A field's control and its error element.
#[derive(Debug, Clone)]
pub struct FieldElements<E> {
    pub name: FieldName,
    pub input: E,
    pub error: Option<E>,
}

/// Elements the form controller works on, discovered once at page start.
#[derive(Debug, Clone)]
pub struct FormElements<E> {
    pub form: E,
    /// Bound fields in form order; fields missing from the markup are absent
    pub fields: Vec<FieldElements<E>>,
    pub submit_control: Option<E>,
    pub loading: Option<E>,
    pub success: Option<E>,
    /// Optional failure region shown in the `Error` state
    pub failure: Option<E>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub invalid_class: String,
    pub limits: ValidationLimits,
    pub fallback_endpoint: Option<String>,
}

impl FormSettings {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            invalid_class: config.invalid_class.clone(),
            limits: ValidationLimits {
                name_min_chars: config.name_min_chars,
                message_max_chars: config.message_max_chars,
            },
            fallback_endpoint: config.fallback_endpoint.clone(),
        }
    }
}

/// The contact form.
#[derive(Debug, Clone)]
pub struct ContactForm<E> {
    elements: FormElements<E>,
    settings: FormSettings,
    state: SubmissionState,
}

impl<E: Clone + PartialEq + std::fmt::Debug> ContactForm<E> {
    pub fn new(elements: FormElements<E>, settings: FormSettings) -> Self {
        Self {
            elements,
            settings,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn form(&self) -> &E {
        &self.elements.form
    }

    pub fn elements(&self) -> &FormElements<E> {
        &self.elements
    }

    fn field(&self, name: FieldName) -> Option<&FieldElements<E>> {
        self.elements.fields.iter().find(|f| f.name == name)
    }

    /// The field whose control is `target`.
    pub fn field_for(&self, target: &E) -> Option<FieldName> {
        self.elements
            .fields
            .iter()
            .find(|f| f.input == *target)
            .map(|f| f.name)
    }

    /// Trimmed current value of a field.
    pub fn value<D: Dom<Element = E>>(&self, dom: &D, name: FieldName) -> String {
        self.field(name)
            .map(|f| dom.value(&f.input).trim().to_string())
            .unwrap_or_default()
    }

    /// Run one field's rule without touching the page.
    pub fn evaluate<D: Dom<Element = E>>(&self, dom: &D, name: FieldName) -> ValidationResult {
        let spec = spec_for(name);
        (spec.validator)(&self.value(dom, name), &self.settings.limits)
    }

    /// The field currently carries the invalid marker.
    pub fn is_marked_invalid<D: Dom<Element = E>>(&self, dom: &D, name: FieldName) -> bool {
        self.field(name)
            .is_some_and(|f| dom.has_class(&f.input, &self.settings.invalid_class))
    }

    /// Validate one field and render its error state. Only that field changes.
    pub fn validate_field<D: Dom<Element = E>>(&self, dom: &mut D, name: FieldName) -> bool {
        if self.field(name).is_none() {
            log::debug!("[form] Field '{name}' not in the form, skipping");
            return true;
        }
        let result = self.evaluate(dom, name);
        self.render_field(dom, name, &result);
        result.valid
    }

    /// Validate required fields and any optional field with a value.
    ///
    /// Every evaluated field renders its result, so all messages show at once.
    pub fn validate_form<D: Dom<Element = E>>(&self, dom: &mut D) -> bool {
        let mut all_valid = true;
        for spec in &FIELD_SPECS {
            if spec.required || !self.value(dom, spec.name).is_empty() {
                let valid = self.validate_field(dom, spec.name);
                all_valid &= valid;
            }
        }
        all_valid
    }

    fn render_field<D: Dom<Element = E>>(&self, dom: &mut D, name: FieldName, result: &ValidationResult) {
        let Some(field) = self.field(name) else {
            return;
        };
        let error_id = field.error.as_ref().and_then(|e| dom.attribute(e, "id"));

        if result.valid {
            dom.remove_class(&field.input, &self.settings.invalid_class);
            dom.remove_attribute(&field.input, "aria-invalid");
            if let Some(id) = &error_id {
                remove_token(dom, &field.input, "aria-describedby", id);
            }
            if let Some(error) = &field.error {
                dom.set_text(error, "");
                dom.set_attribute(error, "hidden", "");
            }
        } else {
            dom.add_class(&field.input, &self.settings.invalid_class);
            dom.set_attribute(&field.input, "aria-invalid", "true");
            if let Some(id) = &error_id {
                add_token(dom, &field.input, "aria-describedby", id);
            }
            if let Some(error) = &field.error {
                dom.set_text(error, result.message.as_deref().unwrap_or_default());
                dom.remove_attribute(error, "hidden");
            }
        }
    }

    /// Focus-out on a field validates it.
    pub fn handle_blur<D: Dom<Element = E>>(&self, dom: &mut D, target: &E) -> bool {
        let Some(name) = self.field_for(target) else {
            return false;
        };
        self.validate_field(dom, name);
        true
    }

    /// Typing into a field already marked invalid re-validates it, so the
    /// error clears as soon as the value is fixed.
    pub fn handle_input<D: Dom<Element = E>>(&self, dom: &mut D, target: &E) -> bool {
        match self.field_for(target) {
            Some(name) if self.is_marked_invalid(dom, name) => {
                self.validate_field(dom, name);
                true
            }
            _ => false,
        }
    }

    /// Form submit event.
    ///
    /// Always suppresses the browser's own submission. Ignored while another
    /// submission is in flight.
    pub fn submit<D: Dom<Element = E>>(&mut self, dom: &mut D, ui: &mut UiState) -> Vec<Effect> {
        let mut effects = vec![Effect::PreventDefault];
        if ui.is_submitting {
            log::debug!("[form] Submission already in flight, ignoring submit");
            return effects;
        }
        ui.is_submitting = true;

        if !self.validate_form(dom) {
            if let Some(first) = self
                .elements
                .fields
                .iter()
                .find(|f| dom.has_class(&f.input, &self.settings.invalid_class))
            {
                dom.focus(&first.input);
            }
            log::debug!("[form] Validation failed, not sending");
            ui.is_submitting = false;
            return effects;
        }

        let Some(endpoint) = self.endpoint(dom) else {
            log::error!("[form] No form action and no fallback endpoint configured");
            self.enter_error(dom);
            ui.is_submitting = false;
            return effects;
        };

        self.enter_loading(dom);
        let submission = self.collect_submission(dom, endpoint);
        log::debug!(
            "[form] Sending {} field(s) to {}",
            submission.fields.len(),
            submission.endpoint
        );
        effects.push(Effect::SendForm(submission));
        effects
    }

    /// The form's `action`, else the configured fallback.
    pub fn endpoint<D: Dom<Element = E>>(&self, dom: &D) -> Option<String> {
        dom.attribute(&self.elements.form, "action")
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .or_else(|| self.settings.fallback_endpoint.clone())
    }

    /// Every successful control of the form, in document order.
    pub fn collect_submission<D: Dom<Element = E>>(&self, dom: &D, endpoint: String) -> FormSubmission {
        let fields = named_controls(dom, &self.elements.form)
            .into_iter()
            .map(|(name, control)| (name, dom.value(&control)))
            .collect();
        FormSubmission { endpoint, fields }
    }

    /// Apply the relay's answer. Clears the in-flight flag on every path.
    pub fn finish_submission<D: Dom<Element = E>>(
        &mut self,
        dom: &mut D,
        ui: &mut UiState,
        outcome: &RelayResult<RelayResponse>,
    ) -> SubmissionState {
        ui.is_submitting = false;
        if self.state != SubmissionState::Loading {
            log::warn!("[form] Relay answer arrived in state {:?}, ignoring", self.state);
            return self.state;
        }

        match outcome {
            Ok(response) if response.is_success() => {
                log::info!("[form] Submission succeeded (HTTP {})", response.status);
                self.enter_success(dom);
            }
            Ok(response) => {
                if !self.apply_server_errors(dom, response) {
                    log::error!(
                        "[form] Relay rejected submission (HTTP {}) without field errors",
                        response.status
                    );
                    self.enter_error(dom);
                }
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[form] Submission failed: {e}");
                } else {
                    log::error!("[form] Submission failed: {e}");
                }
                self.enter_error(dom);
            }
        }
        self.state
    }

    /// Render field errors from a rejection payload. `false` when the payload
    /// is missing, malformed, or names no field of this form.
    fn apply_server_errors<D: Dom<Element = E>>(&mut self, dom: &mut D, response: &RelayResponse) -> bool {
        let payload = match response.error_payload() {
            Ok(Some(payload)) => payload,
            Ok(None) => return false,
            Err(e) => {
                log::error!("[form] {e}");
                return false;
            }
        };

        let mut known = Vec::new();
        for error in &payload.errors {
            match error.field.as_deref().and_then(FieldName::from_name) {
                Some(name) if self.field(name).is_some() => known.push((name, error.message.clone())),
                _ => log::debug!("[form] Ignoring server error for {:?}: {}", error.field, error.message),
            }
        }
        if known.is_empty() {
            return false;
        }

        log::warn!("[form] Relay rejected {} field(s)", known.len());
        for (name, message) in &known {
            self.render_field(dom, *name, &ValidationResult::invalid(message.clone()));
        }
        self.leave_loading(dom);
        self.state = SubmissionState::Idle;
        if let Some(first) = self
            .elements
            .fields
            .iter()
            .find(|f| known.iter().any(|(name, _)| *name == f.name))
        {
            dom.focus(&first.input);
        }
        true
    }

    /// Clear every value and every error state.
    pub fn reset<D: Dom<Element = E>>(&self, dom: &mut D) {
        for (_, control) in named_controls(dom, &self.elements.form) {
            let is_hidden_input = dom
                .attribute(&control, "type")
                .is_some_and(|t| t.eq_ignore_ascii_case("hidden"));
            if !is_hidden_input {
                dom.set_value(&control, "");
            }
        }
        for spec in &FIELD_SPECS {
            self.render_field(dom, spec.name, &ValidationResult::ok());
        }
    }

    fn enter_loading<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        if let Some(control) = &self.elements.submit_control {
            dom.set_attribute(control, "disabled", "");
        }
        dom.set_attribute(&self.elements.form, "aria-busy", "true");
        set_shown(dom, self.elements.loading.as_ref(), true);
        set_shown(dom, self.elements.success.as_ref(), false);
        set_shown(dom, self.elements.failure.as_ref(), false);
        self.state = SubmissionState::Loading;
    }

    fn leave_loading<D: Dom<Element = E>>(&self, dom: &mut D) {
        if let Some(control) = &self.elements.submit_control {
            dom.remove_attribute(control, "disabled");
        }
        dom.remove_attribute(&self.elements.form, "aria-busy");
        set_shown(dom, self.elements.loading.as_ref(), false);
    }

    fn enter_success<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        self.leave_loading(dom);
        self.reset(dom);
        if let Some(success) = &self.elements.success {
            dom.remove_attribute(success, "hidden");
            if !dom.has_attribute(success, "tabindex") {
                dom.set_attribute(success, "tabindex", "-1");
            }
            dom.focus(success);
        }
        self.state = SubmissionState::Success;
    }

    fn enter_error<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        self.leave_loading(dom);
        set_shown(dom, self.elements.failure.as_ref(), true);
        self.state = SubmissionState::Error;
    }
}

/// Named, enabled form controls that a browser would submit.
fn named_controls<D: Dom>(dom: &D, form: &D::Element) -> Vec<(String, D::Element)> {
    dom.descendants(form)
        .into_iter()
        .filter_map(|control| {
            if !matches!(dom.tag_name(&control).as_str(), "input" | "select" | "textarea")
                || dom.has_attribute(&control, "disabled")
            {
                return None;
            }
            let kind = dom
                .attribute(&control, "type")
                .unwrap_or_default()
                .to_ascii_lowercase();
            match kind.as_str() {
                "submit" | "button" | "reset" | "image" | "file" => return None,
                "checkbox" | "radio" if !dom.has_attribute(&control, "checked") => return None,
                _ => {}
            }
            let name = dom.attribute(&control, "name").filter(|n| !n.is_empty())?;
            Some((name, control))
        })
        .collect()
}

fn set_shown<D: Dom>(dom: &mut D, element: Option<&D::Element>, shown: bool) {
    if let Some(element) = element {
        if shown {
            dom.remove_attribute(element, "hidden");
        } else {
            dom.set_attribute(element, "hidden", "");
        }
    }
}

/// Add `token` to a space-separated attribute such as `aria-describedby`.
fn add_token<D: Dom>(dom: &mut D, element: &D::Element, attr: &str, token: &str) {
    let current = dom.attribute(element, attr).unwrap_or_default();
    if current.split_whitespace().any(|t| t == token) {
        return;
    }
    let value = if current.trim().is_empty() {
        token.to_string()
    } else {
        format!("{} {token}", current.trim())
    };
    dom.set_attribute(element, attr, &value);
}

fn remove_token<D: Dom>(dom: &mut D, element: &D::Element, attr: &str, token: &str) {
    let Some(current) = dom.attribute(element, attr) else {
        return;
    };
    let rest: Vec<&str> = current.split_whitespace().filter(|t| *t != token).collect();
    if rest.is_empty() {
        dom.remove_attribute(element, attr);
    } else {
        dom.set_attribute(element, attr, &rest.join(" "));
    }
}
