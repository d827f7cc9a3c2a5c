//! Utility modules.

/// Log sanitization utilities to keep visitor data out of logs.
pub mod log_sanitizer;
