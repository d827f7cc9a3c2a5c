//! # landing-relay
//!
//! Client for the third-party form relay that receives the landing page's
//! contact form.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls on native targets.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! On `wasm32-unknown-unknown` reqwest goes through the browser's `fetch` and
//! neither TLS feature is compiled.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use landing_relay::{FormRelay, FormSubmission, HttpFormRelay};
//!
//! # async fn run() -> Result<(), landing_relay::RelayError> {
//! let relay = HttpFormRelay::new();
//! let submission = FormSubmission::new("https://relay.example.com/f/abc123")
//!     .field("name", "Ada Lovelace")
//!     .field("email", "ada@example.com");
//!
//! let response = relay.submit(&submission).await?;
//! if response.is_success() {
//!     println!("sent");
//! } else if let Ok(Some(payload)) = response.error_payload() {
//!     for err in payload.errors {
//!         println!("{:?}: {}", err.field, err.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Only transport failures and unusable endpoints are [`RelayError`]s. A
//! non-2xx answer comes back as a normal [`RelayResponse`]; use
//! [`RelayResponse::error_payload`] to read per-field problems.

mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use error::{RelayError, RelayResult};
pub use http_client::{HttpFormRelay, HttpUtils};
pub use traits::FormRelay;
pub use types::{ErrorPayload, FieldError, FormSubmission, RelayResponse};
pub use utils::log_sanitizer::{describe_fields, truncate_for_log};
