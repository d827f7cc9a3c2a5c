//! Relay abstraction.

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::types::{FormSubmission, RelayResponse};

/// Something that can deliver a contact-form submission.
///
/// `?Send` because in the browser the underlying `fetch` future is not `Send`;
/// the page runs on a single thread.
///
/// Implementations:
/// - [`HttpFormRelay`](crate::HttpFormRelay): reqwest (native and wasm32)
/// - test mocks that return canned responses
#[async_trait(?Send)]
pub trait FormRelay {
    /// POST the submission and return the raw status/body.
    ///
    /// Non-2xx statuses are NOT errors at this layer; only transport failures
    /// and an unusable endpoint are.
    async fn submit(&self, submission: &FormSubmission) -> RelayResult<RelayResponse>;
}
