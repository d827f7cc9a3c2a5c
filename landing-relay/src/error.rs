use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for every form-relay operation.
///
/// Each variant carries the endpoint it relates to (where one is known) plus
/// variant-specific context. Variants are serializable so the host can report
/// them in a structured way.
///
/// The relay never retries: a failed submission surfaces to the form as a
/// generic error state and the visitor decides whether to submit again.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RelayError {
    /// A network-level error occurred (DNS failure, connection refused, CORS rejection, ...).
    #[error("[{endpoint}] Network error: {detail}")]
    NetworkError {
        /// Endpoint the request was sent to.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The request timed out.
    #[error("[{endpoint}] Request timeout: {detail}")]
    Timeout {
        /// Endpoint the request was sent to.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The configured endpoint is not an absolute `http`/`https` URL.
    #[error("Invalid relay endpoint '{endpoint}': {detail}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        endpoint: String,
        /// Why it was rejected.
        detail: String,
    },

    /// The relay answered with a body that could not be parsed.
    #[error("Parse error: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },
}

impl RelayError {
    /// 是否为预期行为（配置错误以外的失败都可能是访客网络问题），用于日志分级。
    ///
    /// `true` → `warn`，`false` → `error`。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

/// Convenience type alias for `Result<T, RelayError>`.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = RelayError::NetworkError {
            endpoint: "https://relay.test/f/abc".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[https://relay.test/f/abc] Network error: connection refused"
        );
    }

    #[test]
    fn display_invalid_endpoint() {
        let e = RelayError::InvalidEndpoint {
            endpoint: "ftp://relay.test".to_string(),
            detail: "unsupported scheme 'ftp'".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid relay endpoint 'ftp://relay.test': unsupported scheme 'ftp'"
        );
    }

    #[test]
    fn display_parse_error() {
        let e = RelayError::ParseError {
            detail: "expected value".to_string(),
        };
        assert_eq!(e.to_string(), "Parse error: expected value");
    }

    #[test]
    fn display_timeout_and_error_source() {
        let e = RelayError::Timeout {
            endpoint: "https://relay.test".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[https://relay.test] Request timeout: 30s elapsed");
        let source: &dyn std::error::Error = &e;
        assert!(source.source().is_none());
    }

    #[test]
    fn serialize_carries_code_tag() {
        let e = RelayError::Timeout {
            endpoint: "https://relay.test".to_string(),
            detail: "30s elapsed".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"Timeout\""));
        assert!(json.contains("\"detail\":\"30s elapsed\""));
    }

    #[test]
    fn expected_variants() {
        assert!(
            RelayError::NetworkError {
                endpoint: "e".into(),
                detail: "d".into(),
            }
            .is_expected()
        );
        assert!(
            !RelayError::InvalidEndpoint {
                endpoint: "e".into(),
                detail: "d".into(),
            }
            .is_expected()
        );
        assert!(!RelayError::ParseError { detail: "d".into() }.is_expected());
    }
}
