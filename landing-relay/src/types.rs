//! Wire types exchanged with the form relay.

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelayResult};

/// A form submission ready to be sent.
///
/// Fields keep the order in which they appear in the form; the relay sends
/// them `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Absolute URL the form posts to (the form's `action`).
    pub endpoint: String,
    /// `(name, value)` pairs in document order.
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fields: Vec::new(),
        }
    }

    /// Append one field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Look up a field value by name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// What the relay answered: status code plus raw body.
///
/// Any 2xx status counts as success and the body is ignored. Other statuses
/// may carry a [`ErrorPayload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

impl RelayResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as a structured error payload.
    ///
    /// Returns `Ok(None)` for an empty body, `Err(ParseError)` when the body is
    /// present but not the expected JSON shape.
    pub fn error_payload(&self) -> RelayResult<Option<ErrorPayload>> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str::<ErrorPayload>(&self.body)
            .map(Some)
            .map_err(|e| RelayError::ParseError {
                detail: e.to_string(),
            })
    }
}

/// Structured failure body: `{ "errors": [ { "field": "...", "message": "..." } ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// One server-reported problem.
///
/// Relays also report form-level problems without a `field`; those cannot be
/// rendered inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(RelayResponse::new(200, "").is_success());
        assert!(RelayResponse::new(204, "").is_success());
        assert!(!RelayResponse::new(302, "").is_success());
        assert!(!RelayResponse::new(422, "").is_success());
    }

    #[test]
    fn error_payload_with_fields() {
        let resp = RelayResponse::new(
            422,
            r#"{"errors":[{"field":"email","message":"taken"},{"message":"form disabled","code":"DISABLED"}]}"#,
        );
        let payload = resp.error_payload().unwrap().unwrap();
        assert_eq!(payload.errors.len(), 2);
        assert_eq!(payload.errors[0].field.as_deref(), Some("email"));
        assert_eq!(payload.errors[0].message, "taken");
        assert!(payload.errors[1].field.is_none());
        assert_eq!(payload.errors[1].code.as_deref(), Some("DISABLED"));
    }

    #[test]
    fn error_payload_empty_body() {
        let resp = RelayResponse::new(500, "  ");
        assert!(resp.error_payload().unwrap().is_none());
    }

    #[test]
    fn error_payload_not_json() {
        let resp = RelayResponse::new(502, "<html>Bad Gateway</html>");
        assert!(matches!(
            resp.error_payload(),
            Err(RelayError::ParseError { .. })
        ));
    }

    #[test]
    fn submission_builder_keeps_order() {
        let s = FormSubmission::new("https://relay.test/f/1")
            .field("name", "Ada")
            .field("email", "ada@example.com");
        assert_eq!(s.fields[0].0, "name");
        assert_eq!(s.value("email"), Some("ada@example.com"));
        assert_eq!(s.value("missing"), None);
    }
}
