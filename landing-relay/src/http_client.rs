//! HTTP relay client
//!
//! Sends the contact form as a form-encoded POST and hands the raw status and
//! body back to the caller. Interpreting the answer (success, field errors,
//! generic failure) belongs to the form controller, not to the transport.
//!
//! # design principles
//! - **Non-2xx is not a transport error** - a 422 with a field-error payload is a normal answer
//! - **No retries** - the visitor re-submits if they want to
//! - **No client-side timeout** - a hung relay leaves the form in its loading state

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::error::{RelayError, RelayResult};
use crate::traits::FormRelay;
use crate::types::{FormSubmission, RelayResponse};
use crate::utils::log_sanitizer::{describe_fields, truncate_for_log};

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status and response text
    ///
    /// Unified processing: sending requests, logging, error handling
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `endpoint` - endpoint string (for logging and error context)
    ///
    /// # Returns
    /// * `Ok(RelayResponse)` - status code and body, whatever the status
    /// * `Err(RelayError::Timeout | RelayError::NetworkError)` - transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        endpoint: &str,
    ) -> RelayResult<RelayResponse> {
        log::debug!("[relay] POST {endpoint}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            } else {
                RelayError::NetworkError {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[relay] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| RelayError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[relay] Response Body: {}", truncate_for_log(&body));

        Ok(RelayResponse { status, body })
    }

    /// Check that `endpoint` is an absolute `http`/`https` URL.
    pub fn parse_endpoint(endpoint: &str) -> RelayResult<Url> {
        let url = Url::parse(endpoint).map_err(|e| RelayError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(RelayError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                detail: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

/// reqwest-backed [`FormRelay`].
///
/// Works on native targets and on `wasm32-unknown-unknown`, where reqwest
/// goes through the browser's `fetch`.
#[derive(Debug, Clone, Default)]
pub struct HttpFormRelay {
    client: Client,
}

impl HttpFormRelay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxy, custom TLS roots, ...).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl FormRelay for HttpFormRelay {
    async fn submit(&self, submission: &FormSubmission) -> RelayResult<RelayResponse> {
        let url = HttpUtils::parse_endpoint(&submission.endpoint)?;
        log::debug!("[relay] Fields: {}", describe_fields(&submission.fields));
        let request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&submission.fields);

        let response = HttpUtils::execute_request(request, &submission.endpoint).await?;
        if response.is_success() {
            log::info!("[relay] Submission accepted (HTTP {})", response.status);
        } else {
            log::warn!("[relay] Submission rejected (HTTP {})", response.status);
        }
        Ok(response)
    }
}
